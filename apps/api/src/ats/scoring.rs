//! Score aggregation: merges keyword overlap with the six checker scores.
//!
//! Caps: keywords 40, sections 15, contact 10, format 15, length 8,
//! action_verbs 7, achievements 10. They sum to 105, so the total is clamped
//! at 100: a resume maxing every axis still reports 100.

use serde::{Deserialize, Serialize};

use crate::ats::checks::{
    check_achievements, check_action_verbs, check_contact, check_format, check_length,
    check_sections, ACHIEVEMENTS_MAX, ACTION_VERBS_MAX, CONTACT_MAX, FORMAT_MAX, LENGTH_MAX,
    SECTIONS_MAX,
};
use crate::ats::extractor::SkillSet;

pub const KEYWORDS_MAX: u32 = 40;
pub const TOTAL_MAX: u32 = 100;

/// Per-category sub-scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub keywords: u32,
    pub sections: u32,
    pub contact: u32,
    pub format: u32,
    pub length: u32,
    pub action_verbs: u32,
    pub achievements: u32,
}

impl ScoreBreakdown {
    /// Unclamped sum of all sub-scores.
    pub fn sum(&self) -> u32 {
        self.keywords
            + self.sections
            + self.contact
            + self.format
            + self.length
            + self.action_verbs
            + self.achievements
    }

    /// `(category, score, cap)` triples in display order.
    pub fn entries(&self) -> [(&'static str, u32, u32); 7] {
        [
            ("keywords", self.keywords, KEYWORDS_MAX),
            ("sections", self.sections, SECTIONS_MAX),
            ("contact", self.contact, CONTACT_MAX),
            ("format", self.format, FORMAT_MAX),
            ("length", self.length, LENGTH_MAX),
            ("action_verbs", self.action_verbs, ACTION_VERBS_MAX),
            ("achievements", self.achievements, ACHIEVEMENTS_MAX),
        ]
    }
}

/// Aggregated ATS score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtsScore {
    pub total: u32,
    pub breakdown: ScoreBreakdown,
    /// Diagnostic only; the total uses the capped `keywords` sub-score.
    pub keyword_match_pct: u32,
}

/// Scores `resume_text` against the JD skill set.
pub fn aggregate(resume_text: &str, jd_skills: &SkillSet, resume_skills: &SkillSet) -> AtsScore {
    let jd_count = jd_skills.len() as u32;
    let matched = jd_skills.iter().filter(|s| resume_skills.contains(s)).count() as u32;

    // Integer floor of ratio × scale; an empty JD has no ratio.
    let scaled = |scale: u32| if jd_count == 0 { 0 } else { matched * scale / jd_count };

    let breakdown = ScoreBreakdown {
        keywords: scaled(KEYWORDS_MAX),
        sections: check_sections(resume_text),
        contact: check_contact(resume_text),
        format: check_format(resume_text),
        length: check_length(resume_text),
        action_verbs: check_action_verbs(resume_text),
        achievements: check_achievements(resume_text),
    };

    AtsScore {
        total: breakdown.sum().min(TOTAL_MAX),
        breakdown,
        keyword_match_pct: scaled(100),
    }
}
