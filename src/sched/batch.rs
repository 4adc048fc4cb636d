use log::{debug, trace};

use crate::dram::{RequestBuffer, SbrTable, SrrTable};
use crate::sched::error::SchedError;

/// Result of a batch pass: table populations and the critical-path bank
/// cluster, `None` for an empty batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchSummary {
    pub num_requests: usize,
    pub num_srr: usize,
    pub num_sbr: usize,
    pub critical_path: Option<usize>,
}

/// Phase 1 controller: folds the request buffer into same-row chains, chains
/// those into same-bank clusters, then picks the critical path.
pub struct BatchScheduler<'a> {
    requests: &'a mut RequestBuffer,
    srr: &'a mut SrrTable,
    sbr: &'a mut SbrTable,
}

impl<'a> BatchScheduler<'a> {
    pub fn new(
        requests: &'a mut RequestBuffer,
        srr: &'a mut SrrTable,
        sbr: &'a mut SbrTable,
    ) -> Self {
        Self { requests, srr, sbr }
    }

    pub fn run(mut self) -> Result<BatchSummary, SchedError> {
        self.process_requests()?;
        self.build_bank_chains()?;
        let critical_path = self.sbr.find_max();
        let summary = BatchSummary {
            num_requests: self.requests.len(),
            num_srr: self.srr.len(),
            num_sbr: self.sbr.len(),
            critical_path,
        };
        debug!(
            "batch built: {} requests -> {} rows -> {} banks, critical path {:?}",
            summary.num_requests, summary.num_srr, summary.num_sbr, summary.critical_path
        );
        Ok(summary)
    }

    /// Walks requests in ingest order, clustering them by hit tag. A hit
    /// extends the matching row cluster and links the previous tail request
    /// to the new one; a miss opens a fresh cluster.
    fn process_requests(&mut self) -> Result<(), SchedError> {
        for id in 0..self.requests.len() {
            let tag = self.requests.get(id).hit_tag();
            match self.srr.lookup(tag) {
                Some(addr) => {
                    let tail = self.srr.entry(addr).tail_req;
                    self.requests.chain_set(tail, id);
                    self.srr.append_request(addr, id);
                    trace!("request {id} joins row cluster {addr} after {tail}");
                }
                None => {
                    let addr = self.srr.allocate(tag, id).ok_or(SchedError::SrrTableFull {
                        capacity: self.srr.capacity(),
                    })?;
                    trace!("request {id} opens row cluster {addr}");
                }
            }
        }
        Ok(())
    }

    /// Walks row clusters in allocation order, clustering them by miss tag.
    /// The miss tag is recovered through the cluster's head request.
    fn build_bank_chains(&mut self) -> Result<(), SchedError> {
        for addr in 0..self.srr.len() {
            let head = self.srr.entry(addr).head_req;
            let count = self.srr.entry(addr).count;
            let tag = self.requests.get(head).miss_tag();
            match self.sbr.lookup(tag) {
                Some(bank_addr) => {
                    let tail = self.sbr.entry(bank_addr).tail_srr;
                    self.srr.chain_set(tail, addr);
                    self.sbr.append_row(bank_addr, addr, count);
                    trace!("row cluster {addr} joins bank cluster {bank_addr} after {tail}");
                }
                None => {
                    let bank_addr =
                        self.sbr
                            .allocate(tag, addr, count)
                            .ok_or(SchedError::SbrTableFull {
                                capacity: self.sbr.capacity(),
                            })?;
                    trace!("row cluster {addr} opens bank cluster {bank_addr}");
                }
            }
        }
        Ok(())
    }
}
