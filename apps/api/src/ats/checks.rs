//! Resume checkers: six independent scorers, each a pure `fn(&str) -> u32`
//! bounded by its cap. Every checker is total: any input, including the
//! empty string, yields a (possibly zero) score.

use once_cell::sync::Lazy;
use regex::Regex;

pub const SECTIONS_MAX: u32 = 15;
pub const CONTACT_MAX: u32 = 10;
pub const FORMAT_MAX: u32 = 15;
pub const LENGTH_MAX: u32 = 8;
pub const ACTION_VERBS_MAX: u32 = 7;
pub const ACHIEVEMENTS_MAX: u32 = 10;

// ────────────────────────────────────────────────────────────────────────────
// Sections
// ────────────────────────────────────────────────────────────────────────────

/// Critical section families and the header synonyms that identify them.
const SECTION_FAMILIES: &[(&str, &[&str])] = &[
    (
        "experience",
        &["experience", "work experience", "employment", "work history"],
    ),
    ("education", &["education", "academic", "degree"]),
    ("skills", &["skills", "technical skills", "competencies"]),
];

const SECTION_POINTS: u32 = 5;
const SECTION_PENALTY: u32 = 5;
const MIN_CONFIRMED_FAMILIES: usize = 2;
/// Lines after a header searched for content.
const SECTION_LOOKAHEAD: usize = 3;
/// A content line must be longer than this once trimmed.
const SECTION_CONTENT_CHARS: usize = 20;

/// Scores standard sections (0–15). A family counts only when a header line
/// is followed by real content within the next three lines.
///
/// Only the first synonym (in list order) that occurs anywhere in the text is
/// tried for each family; later synonyms are never consulted.
pub fn check_sections(text: &str) -> u32 {
    let lines: Vec<&str> = text.split('\n').collect();
    let lowered: Vec<String> = lines.iter().map(|l| l.to_lowercase()).collect();
    let lowered_text = text.to_lowercase();

    let confirmed = SECTION_FAMILIES
        .iter()
        .filter(|(_, synonyms)| {
            synonyms
                .iter()
                .find(|s| lowered_text.contains(*s))
                .is_some_and(|synonym| family_confirmed(&lines, &lowered, synonym))
        })
        .count();

    let mut score = confirmed as u32 * SECTION_POINTS;
    if confirmed < MIN_CONFIRMED_FAMILIES {
        score = score.saturating_sub(SECTION_PENALTY);
    }
    score.min(SECTIONS_MAX)
}

fn family_confirmed(lines: &[&str], lowered: &[String], synonym: &str) -> bool {
    lowered.iter().enumerate().any(|(i, line)| {
        line.contains(synonym)
            && lines
                .iter()
                .skip(i + 1)
                .take(SECTION_LOOKAHEAD)
                .any(|next| next.trim().chars().count() > SECTION_CONTENT_CHARS)
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Contact
// ────────────────────────────────────────────────────────────────────────────

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern")
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b|\(\d{3}\)\s*\d{3}[-.]?\d{4}").expect("phone pattern")
});

static LINKEDIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"linkedin\.com/in/[\w-]+").expect("linkedin pattern"));

const FREE_MAIL_DOMAINS: &[&str] = &["gmail.com", "outlook.com", "yahoo.com", "protonmail.com"];

const FREE_MAIL_POINTS: u32 = 4;
const CUSTOM_DOMAIN_POINTS: u32 = 3;
const PHONE_POINTS: u32 = 4;
const LINKEDIN_POINTS: u32 = 2;

/// Scores contact details (0–10): email, phone number and LinkedIn profile.
pub fn check_contact(text: &str) -> u32 {
    let mut score = 0;

    if let Some(email) = EMAIL.find(text) {
        let email = email.as_str().to_lowercase();
        score += if FREE_MAIL_DOMAINS.iter().any(|d| email.contains(d)) {
            FREE_MAIL_POINTS
        } else {
            CUSTOM_DOMAIN_POINTS
        };
    }

    if PHONE.is_match(text) {
        score += PHONE_POINTS;
    }

    if LINKEDIN.is_match(&text.to_lowercase()) {
        score += LINKEDIN_POINTS;
    }

    score.min(CONTACT_MAX)
}

// ────────────────────────────────────────────────────────────────────────────
// Length
// ────────────────────────────────────────────────────────────────────────────

/// Scores word count by distance from the ideal 450–700 band (0–8).
pub fn check_length(text: &str) -> u32 {
    match text.split_whitespace().count() {
        450..=700 => LENGTH_MAX,
        400..=449 | 701..=850 => 6,
        350..=399 | 851..=1000 => 4,
        250..=349 | 1001..=1200 => 2,
        _ => 0,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Format
// ────────────────────────────────────────────────────────────────────────────

static BULLET_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*[-*•‣⁃⁌⁍∙◉◘◦☙❥❧]\s").expect("bullet pattern")
});

const SPECIAL_CHARS: &[char] = &[
    '@', '#', '$', '%', '^', '&', '*', '(', ')', '{', '}', '[', ']', '|', '\\', '<', '>',
];

const NO_BULLETS_PENALTY: u32 = 3;
const SPECIAL_CHARS_PENALTY: u32 = 3;
const CASE_PENALTY: u32 = 4;
const SPACING_PENALTY: u32 = 2;
/// Lines this long or shorter are ignored by the case checks.
const CASE_MIN_CHARS: usize = 10;
const MAX_TRIPLE_NEWLINES: usize = 5;

/// Scores formatting quality (0–15), starting from full marks and deducting
/// for missing bullets, symbol noise, shouting or all-lowercase lines, and
/// excess blank separation.
pub fn check_format(text: &str) -> u32 {
    let mut penalty = 0;

    if !BULLET_LINE.is_match(text) {
        penalty += NO_BULLETS_PENALTY;
    }

    // More than 2% special characters
    let total_chars = text.chars().count();
    let special = text.chars().filter(|c| SPECIAL_CHARS.contains(c)).count();
    if special * 50 > total_chars {
        penalty += SPECIAL_CHARS_PENALTY;
    }

    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if !lines.is_empty() {
        let long = |l: &&&str| l.chars().count() > CASE_MIN_CHARS;
        let all_caps = lines.iter().filter(long).filter(|l| is_all_upper(l)).count();
        let all_lower = lines.iter().filter(long).filter(|l| is_all_lower(l)).count();

        // More than 30% of lines
        if all_caps * 10 > lines.len() * 3 {
            penalty += CASE_PENALTY;
        }
        if all_lower * 10 > lines.len() * 3 {
            penalty += CASE_PENALTY;
        }
    }

    if text.matches("\n\n\n").count() > MAX_TRIPLE_NEWLINES {
        penalty += SPACING_PENALTY;
    }

    FORMAT_MAX.saturating_sub(penalty)
}

fn is_all_upper(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && !line.chars().any(char::is_lowercase)
}

fn is_all_lower(line: &str) -> bool {
    line.chars().any(char::is_lowercase) && !line.chars().any(char::is_uppercase)
}

// ────────────────────────────────────────────────────────────────────────────
// Action verbs
// ────────────────────────────────────────────────────────────────────────────

const ACTION_VERBS: &[&str] = &[
    "achieved",
    "improved",
    "developed",
    "created",
    "designed",
    "implemented",
    "managed",
    "led",
    "increased",
    "reduced",
    "optimized",
    "built",
    "launched",
    "delivered",
    "established",
    "streamlined",
    "automated",
    "engineered",
    "architected",
    "spearheaded",
];

/// Scores strong action verbs (0–7) by how many distinct verbs appear.
pub fn check_action_verbs(text: &str) -> u32 {
    let lowered = text.to_lowercase();
    let found = ACTION_VERBS.iter().filter(|v| lowered.contains(*v)).count();

    match found {
        0 => 0,
        1..=2 => 1,
        3..=4 => 3,
        5..=7 => 5,
        _ => ACTION_VERBS_MAX,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Achievements
// ────────────────────────────────────────────────────────────────────────────

static PERCENTAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+%").expect("percentage pattern"));

static DOLLAR_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$[\d,]+").expect("dollar amount pattern"));

static NUMBER_WITH_CONTEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\s+\w+").expect("number context pattern"));

const METRIC_KEYWORDS: &[&str] = &["increased", "decreased", "reduced", "improved", "grew", "saved"];

/// One pattern per keyword: the keyword followed later on the same line by a digit.
static METRIC_NEAR_NUMBER: Lazy<Vec<Regex>> = Lazy::new(|| {
    METRIC_KEYWORDS
        .iter()
        .map(|kw| Regex::new(&format!(r"{kw}.*?\d")).expect("metric pattern"))
        .collect()
});

/// Scores quantified achievements (0–10): percentages, dollar amounts,
/// counted things ("20 projects") and metric verbs backed by numbers.
pub fn check_achievements(text: &str) -> u32 {
    let percentages = PERCENTAGE.find_iter(text).count() as u32;
    let dollars = DOLLAR_AMOUNT.find_iter(text).count() as u32;
    let counted = NUMBER_WITH_CONTEXT.find_iter(text).count() as u32;

    let lowered = text.to_lowercase();
    let metrics = METRIC_NEAR_NUMBER
        .iter()
        .filter(|re| re.is_match(&lowered))
        .count() as u32;

    let score = percentages.min(3) + dollars.min(2) + (counted / 2).min(3) + metrics.min(2);
    score.min(ACHIEVEMENTS_MAX)
}
