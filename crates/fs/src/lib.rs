mod matcher;
mod record;
mod reporter;
mod sweeper;

pub use matcher::{MatchRule, NamePattern, SweepRules, days_old, ends_with_any, is_blank};
pub use record::FileCandidate;
pub use reporter::{LogReporter, RecordingReporter, SweepEvent, SweepOp, SweepReporter};
pub use sweeper::{SweepResult, Sweeper};
