pub mod bye;
pub mod engine;

pub use bye::{ByeConflict, ByeWeekTally};
pub use engine::{DraftEngine, DraftOutcome, NotDraftedReason};
