// AI-assisted matching: request validation, prompt rendering, the scorer seam
// and the proxy that ties them to storage.
// All model calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod proxy;
pub mod request;
pub mod scorer;
pub mod scores;

pub use proxy::{MatchResponse, MatchingProxy};
pub use request::MatchRequest;
pub use scorer::{LlmMatchScorer, MatchScorer};
pub use scores::ScoreResult;
