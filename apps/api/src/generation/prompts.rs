// LLM prompt templates for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Bullet rewrite prompt.
/// Replace: {jd_text}, {bullets_json}, {json_only}
pub const REWRITE_BULLETS_PROMPT_TEMPLATE: &str = r#"Rewrite each resume bullet to align with the job description.
Preserve truthfulness, keep measurable outcomes, and keep each bullet concise.

Job description:
{jd_text}

Resume bullets (JSON array):
{bullets_json}

Respond with a JSON array of rewritten bullets, one per input bullet, in the same order.
{json_only}"#;

/// Cover letter prompt. Replace: {jd_text}, {resume_text}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a professional, tailored cover letter in 250-300 words.
Use a confident, engaging tone in first person.
Structure it with: an opening paragraph (why you're interested), middle paragraph(s)
(relevant experience and skills), and a closing paragraph (call to action).
Highlight specific matching experience and demonstrate genuine interest in the role.

Job description:
{jd_text}

Resume:
{resume_text}

Output just the cover letter text."#;

/// Tailored resume prompt. Replace: {jd_text}, {resume_text}
pub const TAILORED_RESUME_PROMPT_TEMPLATE: &str = r#"Rewrite the entire resume to better match the job description.
Optimize the summary, skills, and experience sections.
Maintain the original structure but emphasize relevant skills and achievements.
Correct any obvious text-extraction errors (e.g. 'Mana ger' -> 'Manager').
Do NOT invent false information.

Job description:
{jd_text}

Original Resume:
{resume_text}

Output the full tailored resume in Markdown format."#;
