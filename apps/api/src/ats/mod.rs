// ATS scoring engine: skill extraction, six resume checkers, score
// aggregation and recommendations. Runs fully deterministically when no
// provider is configured.

pub mod analyzer;
pub mod checks;
pub mod extractor;
pub mod handlers;
pub mod prompts;
pub mod recommendations;
pub mod scoring;
pub mod wordlists;
