pub mod access;
pub mod ats;
pub mod config;
pub mod errors;
pub mod generation;
pub mod ingest;
pub mod llm_client;
pub mod pipeline;
pub mod routes;
pub mod state;
