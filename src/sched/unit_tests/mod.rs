#[cfg(test)]
mod batch_tests;
