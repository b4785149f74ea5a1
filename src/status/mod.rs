//! Enrollment status lookup: seeded records, the pluggable lookup trait, and
//! the checker session that keeps only the latest answer.

mod checker;
mod lookup;
mod records;

pub use checker::{LookupResponse, LookupState, StatusChecker};
pub use lookup::{MockStatusTable, StatusLookup, DEFAULT_LOOKUP_DELAY};
pub use records::{Checkpoint, StatusDetail, StatusRecord, SAMPLE_IDS};
