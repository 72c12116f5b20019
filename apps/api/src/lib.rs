pub mod config;
pub mod db;
pub mod errors;
pub mod llm_client;
pub mod matches;
pub mod matching;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
