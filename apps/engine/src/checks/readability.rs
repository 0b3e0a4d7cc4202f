//! Readability checks (R1–R7) — bullet quality, structure, and density.

use crate::models::analysis::{Check, CheckCategory, CheckStatus};
use crate::models::resume::ResumeData;

const CATEGORY: CheckCategory = CheckCategory::Readability;

/// Resume action verbs a strong bullet opens with, lowercase.
const ACTION_VERBS: &[&str] = &[
    "accelerated",
    "achieved",
    "analyzed",
    "architected",
    "automated",
    "built",
    "championed",
    "consolidated",
    "coordinated",
    "created",
    "cut",
    "delivered",
    "designed",
    "developed",
    "directed",
    "drove",
    "eliminated",
    "engineered",
    "established",
    "expanded",
    "founded",
    "grew",
    "implemented",
    "improved",
    "increased",
    "initiated",
    "integrated",
    "introduced",
    "launched",
    "led",
    "maintained",
    "managed",
    "mentored",
    "migrated",
    "modernized",
    "negotiated",
    "optimized",
    "orchestrated",
    "overhauled",
    "owned",
    "pioneered",
    "redesigned",
    "reduced",
    "refactored",
    "resolved",
    "scaled",
    "shipped",
    "simplified",
    "spearheaded",
    "standardized",
    "streamlined",
    "transformed",
];

/// Leading characters stripped before reading a bullet's first word.
const BULLET_MARKERS: &[char] = &['-', '*', '•', '·', '▪', '►', '→'];

const MIN_BULLET_CHARS: usize = 30;
const MAX_BULLET_CHARS: usize = 200;
const QUANTIFIED_RATIO_TARGET: f64 = 0.20;
const ACTION_VERB_RATIO_TARGET: f64 = 0.60;
const MIN_SECTION_COUNT: usize = 3;
const MIN_SKILL_COUNT: usize = 8;
const MAX_SKILL_COUNT: usize = 40;
const MIN_SUMMARY_CHARS: usize = 100;
const MAX_SUMMARY_CHARS: usize = 400;

pub fn run(resume: &ResumeData) -> Vec<Check> {
    vec![
        check_bullet_length(resume),
        check_quantified_achievements(resume),
        check_section_count(resume),
        check_experience_position(resume),
        check_skills_density(resume),
        check_summary_length(resume),
        check_action_verbs(resume),
    ]
}

/// Non-blank experience description lines, in document order.
fn experience_bullets(resume: &ResumeData) -> Vec<&str> {
    resume
        .experience_items()
        .into_iter()
        .flat_map(|e| e.description.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}…")
    }
}

/// R1 — bullets shorter than 30 chars carry no information; longer than 200
/// chars nobody reads.
fn check_bullet_length(resume: &ResumeData) -> Check {
    let name = "Bullet length";
    let offenders: Vec<String> = experience_bullets(resume)
        .iter()
        .filter(|line| {
            let len = line.chars().count();
            len < MIN_BULLET_CHARS || len > MAX_BULLET_CHARS
        })
        .map(|line| truncate(line, 60))
        .collect();

    if offenders.is_empty() {
        Check::new(
            "R1",
            CATEGORY,
            name,
            CheckStatus::Pass,
            "All experience bullets are a readable length",
        )
    } else {
        Check::new(
            "R1",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!(
                "{} bullet(s) are shorter than {MIN_BULLET_CHARS} or longer than {MAX_BULLET_CHARS} characters",
                offenders.len()
            ),
        )
        .with_details(offenders)
    }
}

/// Quantification heuristic: `%`, `$`, an `Nx` multiplier, or a number
/// followed by a word ("5 engineers", "40 services").
fn is_quantified(line: &str) -> bool {
    if line.contains('%') || line.contains('$') {
        return true;
    }
    let chars: Vec<char> = line.to_lowercase().chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_digit() {
            continue;
        }
        // Nx multiplier: digit directly followed by 'x' at a token edge
        if chars.get(i + 1) == Some(&'x')
            && chars.get(i + 2).map_or(true, |n| !n.is_alphanumeric())
        {
            return true;
        }
        // count+noun: digits, a space, then a letter
        let mut j = i;
        while chars.get(j).is_some_and(|c| c.is_ascii_digit() || *c == ',') {
            j += 1;
        }
        if chars.get(j) == Some(&' ') && chars.get(j + 1).is_some_and(|c| c.is_alphabetic()) {
            return true;
        }
    }
    false
}

/// R2 — at least 20% of bullets should carry a measurable outcome.
fn check_quantified_achievements(resume: &ResumeData) -> Check {
    let name = "Quantified achievements";
    let bullets = experience_bullets(resume);
    if bullets.is_empty() {
        return Check::new(
            "R2",
            CATEGORY,
            name,
            CheckStatus::Warning,
            "No experience bullets to evaluate",
        );
    }

    let quantified = bullets.iter().filter(|b| is_quantified(b)).count();
    let ratio = quantified as f64 / bullets.len() as f64;
    if ratio >= QUANTIFIED_RATIO_TARGET {
        Check::new(
            "R2",
            CATEGORY,
            name,
            CheckStatus::Pass,
            format!("{quantified} of {} bullets are quantified", bullets.len()),
        )
    } else {
        Check::new(
            "R2",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!(
                "Only {quantified} of {} bullets include numbers — add metrics (%, $, counts)",
                bullets.len()
            ),
        )
    }
}

/// R3 — fewer than 3 sections reads as a thin resume.
fn check_section_count(resume: &ResumeData) -> Check {
    let name = "Section count";
    let count = resume.sections.len();
    if count >= MIN_SECTION_COUNT {
        Check::new(
            "R3",
            CATEGORY,
            name,
            CheckStatus::Pass,
            format!("{count} sections"),
        )
    } else {
        Check::new(
            "R3",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!("Only {count} section(s) — aim for at least {MIN_SECTION_COUNT}"),
        )
    }
}

/// R4 — recruiters expect experience first or right after the summary.
fn check_experience_position(resume: &ResumeData) -> Check {
    let name = "Experience position";
    match resume.experience_section_index() {
        None => Check::new(
            "R4",
            CATEGORY,
            name,
            CheckStatus::Warning,
            "No experience section found",
        ),
        Some(index) if index <= 1 => Check::new(
            "R4",
            CATEGORY,
            name,
            CheckStatus::Pass,
            "Experience appears near the top",
        ),
        Some(index) => Check::new(
            "R4",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!(
                "Experience is section {} — move it to the top of the resume",
                index + 1
            ),
        ),
    }
}

/// R5 — too few skills looks weak; too many looks like keyword stuffing.
fn check_skills_density(resume: &ResumeData) -> Check {
    let name = "Skills density";
    let count = resume.total_skill_count();
    if count < MIN_SKILL_COUNT {
        Check::new(
            "R5",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!("Only {count} skills listed — too few to match against"),
        )
    } else if count > MAX_SKILL_COUNT {
        Check::new(
            "R5",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!("{count} skills listed — reads as keyword stuffing"),
        )
    } else {
        Check::new(
            "R5",
            CATEGORY,
            name,
            CheckStatus::Pass,
            format!("{count} skills listed"),
        )
    }
}

/// R6 — summary length window: 100–400 chars.
fn check_summary_length(resume: &ResumeData) -> Check {
    let name = "Summary length";
    let summary = resume
        .summary
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if summary.is_empty() {
        return Check::new(
            "R6",
            CATEGORY,
            name,
            CheckStatus::Warning,
            "No summary to evaluate",
        );
    }
    let len = summary.chars().count();
    if len < MIN_SUMMARY_CHARS {
        Check::new(
            "R6",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!("Summary is too short ({len} chars) — aim for {MIN_SUMMARY_CHARS}–{MAX_SUMMARY_CHARS}"),
        )
    } else if len > MAX_SUMMARY_CHARS {
        Check::new(
            "R6",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!("Summary is too long ({len} chars) — aim for {MIN_SUMMARY_CHARS}–{MAX_SUMMARY_CHARS}"),
        )
    } else {
        Check::new(
            "R6",
            CATEGORY,
            name,
            CheckStatus::Pass,
            format!("Summary length is good ({len} chars)"),
        )
    }
}

/// First word of a bullet after stripping list markers.
fn first_word(line: &str) -> Option<&str> {
    line.trim_start_matches(|c: char| BULLET_MARKERS.contains(&c) || c.is_whitespace())
        .split_whitespace()
        .next()
}

/// R7 — at least 60% of bullets should open with an action verb.
fn check_action_verbs(resume: &ResumeData) -> Check {
    let name = "Action verbs";
    let bullets = experience_bullets(resume);
    if bullets.is_empty() {
        return Check::new(
            "R7",
            CATEGORY,
            name,
            CheckStatus::Pass,
            "No experience bullets to evaluate",
        );
    }

    let mut weak: Vec<String> = Vec::new();
    let mut strong = 0usize;
    for bullet in &bullets {
        let starts_with_verb = first_word(bullet)
            .map(|w| ACTION_VERBS.contains(&w.to_lowercase().as_str()))
            .unwrap_or(false);
        if starts_with_verb {
            strong += 1;
        } else if weak.len() < 5 {
            weak.push(truncate(bullet, 60));
        }
    }

    let ratio = strong as f64 / bullets.len() as f64;
    if ratio >= ACTION_VERB_RATIO_TARGET {
        Check::new(
            "R7",
            CATEGORY,
            name,
            CheckStatus::Pass,
            format!("{strong} of {} bullets open with an action verb", bullets.len()),
        )
    } else {
        Check::new(
            "R7",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!(
                "Only {strong} of {} bullets open with an action verb",
                bullets.len()
            ),
        )
        .with_details(weak)
    }
}
