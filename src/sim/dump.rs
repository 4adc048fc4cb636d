use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use crate::dram::{Cycle, ScheduleSlot};

/// CSV sink for the emitted command schedule, one line per occupied cycle.
pub struct ScheduleSink {
    writer: BufWriter<File>,
    wrote_header: bool,
}

impl ScheduleSink {
    pub fn new(path: PathBuf) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
            wrote_header: false,
        })
    }

    pub fn write_slot(&mut self, cycle: Cycle, slot: &ScheduleSlot) {
        if !self.wrote_header {
            let _ = writeln!(self.writer, "cycle,cmd,group,bank,row,col,request");
            self.wrote_header = true;
        }
        let _ = writeln!(
            self.writer,
            "{},{},{},{},{},{},{}",
            cycle,
            slot.cmd.short(),
            slot.group,
            slot.bank,
            slot.row,
            slot.col,
            slot.request
        );
    }
}

impl Drop for ScheduleSink {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}
