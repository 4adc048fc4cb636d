pub mod bank_state;
pub mod request;
pub mod sbr;
pub mod schedule;
pub mod srr;
pub mod types;


pub use bank_state::BankTracker;
pub use request::{ReadRequest, RequestBuffer};
pub use sbr::{SbrEntry, SbrTable};
pub use schedule::{ScheduleMemory, ScheduleSlot};
pub use srr::{SrrEntry, SrrTable};
pub use types::{
    bank_index, CmdKind, Cycle, HitTag, MissTag, ReqId, TimingConfig, BANKS_PER_GROUP,
    BANK_GROUP_WIDTH, BANK_WIDTH, COLUMN_WIDTH, MAX_REQUESTS, MAX_SBR_ENTRIES, MAX_SCHEDULE_CYCLES,
    MAX_SRR_ENTRIES, NUM_BANKS, NUM_BANK_GROUPS, REQUEST_ID_WIDTH, ROW_WIDTH,
};
