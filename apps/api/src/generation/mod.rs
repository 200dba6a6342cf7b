// Application content generation: bullet rewrites, cover letters and
// tailored resumes. All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
