use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use synchrotron::sim::top::{SynchrotronTop, SynchrotronTopConfig};
use synchrotron::traffic::PatternKind;

#[derive(Parser)]
#[command(version, about)]
struct SynchrotronArgs {
    /// TOML config with [sim], [timing] and [traffic] sections
    config_path: Option<PathBuf>,

    /// Request trace file, overriding the config
    #[arg(long)]
    trace: Option<PathBuf>,
    /// Synthetic pattern: row_stream, row_thrash, bank_interleave, random
    #[arg(long)]
    pattern: Option<String>,
    #[arg(long)]
    count: Option<usize>,
    /// Write the schedule as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,
}

pub fn main() -> ExitCode {
    env_logger::init();
    let argv = SynchrotronArgs::parse();

    let mut config = match argv.config_path {
        Some(path) => match SynchrotronTopConfig::from_file(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("failed to load {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => SynchrotronTopConfig::default(),
    };

    if let Some(trace) = argv.trace {
        config.sim.trace = trace.display().to_string();
    }
    if let Some(name) = argv.pattern {
        match PatternKind::from_name(&name) {
            Some(pattern) => config.traffic.pattern = pattern,
            None => {
                eprintln!("unknown pattern {name}");
                return ExitCode::FAILURE;
            }
        }
    }
    config.traffic.count = argv.count.unwrap_or(config.traffic.count);
    if let Some(csv) = argv.csv {
        config.sim.csv = csv.display().to_string();
    }

    let mut top = SynchrotronTop::new(Arc::new(config));
    let report = match top.run() {
        Ok(report) => report,
        Err(err) => {
            eprintln!("scheduling failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("cycle  cmd  bg bank      row  col  req");
    for (cycle, slot) in top.scheduler.schedule().commands() {
        println!(
            "{:>5}  {:<4} {:>2} {:>4} {:>8} {:>4} {:>4}",
            cycle,
            slot.cmd.short(),
            slot.group,
            slot.bank,
            slot.row,
            slot.col,
            slot.request
        );
    }

    let stats = top.scheduler.stats();
    println!(
        "{} requests -> {} commands over {} cycles ({} ACT, {} RD, {} PRE; {} hits, {} misses, {} conflicts)",
        report.submitted,
        report.commands,
        report.max_cycle + 1,
        stats.acts(),
        stats.rds(),
        stats.pres(),
        stats.row_hits(),
        stats.row_misses(),
        stats.row_conflicts()
    );
    ExitCode::SUCCESS
}
