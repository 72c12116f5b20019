pub mod candidate;
pub mod job;
pub mod matches;

pub use candidate::CandidateRow;
pub use job::JobRow;
pub use matches::{MatchFilter, MatchListItem, MatchRow, MatchStatus, MatchUpsert};
