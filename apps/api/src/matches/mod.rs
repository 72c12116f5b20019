// Match record endpoints: HR triage over persisted scores.

pub mod handlers;
