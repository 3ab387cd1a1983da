pub mod display_state;
pub mod match_record;

pub use display_state::{DisplayState, Field, FieldChanges};
pub use match_record::{MatchIdentity, MatchRecord, NOT_AVAILABLE, NO_SCORE, UNKNOWN_LEAGUE};
