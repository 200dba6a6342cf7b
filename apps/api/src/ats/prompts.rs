// LLM prompt templates for the ATS engine.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Skill extraction prompt. Replace `{text}` (already truncated) and
/// `{json_only}` before sending.
pub const SKILL_EXTRACTION_PROMPT_TEMPLATE: &str = r#"You are a technical recruiter. Extract ONLY technical skills from the text below.

Include:
- Programming languages (Python, Java, JavaScript, TypeScript, etc.)
- Frameworks and libraries (React, Spring, Django, Redux, etc.)
- Databases (PostgreSQL, MongoDB, Redis, DynamoDB, etc.)
- Cloud platforms and services (AWS, Azure, GCP, S3, Lambda, EKS, RDS, etc.)
- Tools and technologies (Docker, Kubernetes, Git, Jenkins, Terraform, etc.)
- Certifications (AWS Certified, PMP, etc.)

Exclude:
- Soft skills (communication, leadership, teamwork)
- Action verbs (developed, managed, created, building)
- Adjectives (experienced, professional, skilled, proficient)
- Generic terms (software, development, data, code, team, years)

Text:
{text}

Return a JSON array of lowercase skill names, e.g. ["python", "aws", "docker", "react"].
{json_only}"#;

/// Recommendation prompt.
/// Replace: {total}, {breakdown}, {jd_excerpt}, {resume_excerpt}, {json_only}
pub const RECOMMENDATION_PROMPT_TEMPLATE: &str = r#"Analyze this resume's ATS compatibility score of {total}/100.

Score breakdown:
{breakdown}

Job Description:
{jd_excerpt}...

Resume excerpt:
{resume_excerpt}...

Provide 3-5 specific, actionable recommendations to improve the ATS score.
Focus on the lowest-scoring areas. Be concise and practical.
Format the answer as a JSON array of strings.
{json_only}"#;
