//! Format checks (F1–F4) — fonts, sizing, length, and special characters.

use crate::models::analysis::{Check, CheckCategory, CheckStatus};
use crate::models::resume::{ResumeData, SectionItem};

const CATEGORY: CheckCategory = CheckCategory::Format;

/// Fonts ATS rendering stacks reliably embed and extract.
const SAFE_FONTS: &[&str] = &[
    "arial",
    "helvetica",
    "calibri",
    "cambria",
    "georgia",
    "garamond",
    "times new roman",
    "times",
    "verdana",
    "tahoma",
    "trebuchet ms",
    "book antiqua",
    "palatino",
    "courier new",
    "lato",
    "roboto",
    "open sans",
    "source sans pro",
];

const MIN_FONT_PT: f64 = 9.0;
const MAX_FONT_PT: f64 = 12.0;

/// Rough plain-text capacity of one rendered page.
const CHARS_PER_PAGE: f64 = 3_500.0;
const MAX_PAGE_ESTIMATE: f64 = 1.5;

/// Symbols that PDF text extraction frequently garbles.
const DECORATIVE_SYMBOLS: &[char] = &[
    '•', '·', '▪', '★', '☆', '✦', '✧', '●', '◆', '■', '□', '▶', '◀', '►', '♦', '✓', '✔',
];

pub fn run(resume: &ResumeData) -> Vec<Check> {
    vec![
        check_font_safety(resume),
        check_font_size(resume),
        check_page_length(resume),
        check_special_characters(resume),
    ]
}

/// First font in a CSS font-family list, quotes stripped.
fn primary_font(family: &str) -> String {
    family
        .split(',')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .to_string()
}

/// F1 — primary font must come from the safe-font allowlist.
fn check_font_safety(resume: &ResumeData) -> Check {
    let name = "Font safety";
    let font = primary_font(&resume.style.font_family);
    if SAFE_FONTS.contains(&font.to_lowercase().as_str()) {
        Check::new(
            "F1",
            CATEGORY,
            name,
            CheckStatus::Pass,
            format!("'{font}' is ATS-safe"),
        )
    } else {
        Check::new(
            "F1",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!("'{font}' is not on the ATS-safe font list"),
        )
    }
}

/// F2 — body font must be 9–12pt.
fn check_font_size(resume: &ResumeData) -> Check {
    let name = "Font size";
    let raw = resume.style.font_size.trim();
    let Some(points) = raw
        .strip_suffix("pt")
        .and_then(|v| v.trim().parse::<f64>().ok())
    else {
        return Check::new(
            "F2",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!("Font size '{raw}' uses a non-standard unit — use pt"),
        );
    };

    if points < MIN_FONT_PT {
        Check::new(
            "F2",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!("{points}pt is too small — ATS OCR and human eyes both struggle below {MIN_FONT_PT}pt"),
        )
    } else if points > MAX_FONT_PT {
        Check::new(
            "F2",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!("{points}pt is too large — wastes space above {MAX_FONT_PT}pt"),
        )
    } else {
        Check::new(
            "F2",
            CATEGORY,
            name,
            CheckStatus::Pass,
            format!("{points}pt is in the recommended range"),
        )
    }
}

/// All textual content that lands on the page, concatenated.
fn aggregate_text(resume: &ResumeData) -> String {
    let mut text = String::new();
    text.push_str(&resume.profile.name);
    text.push(' ');
    text.push_str(&resume.profile.title);
    if let Some(summary) = &resume.summary {
        text.push(' ');
        text.push_str(summary);
    }
    for section in &resume.sections {
        text.push(' ');
        text.push_str(&section.label);
        for item in &section.items {
            text.push(' ');
            match item {
                SectionItem::Experience(e) => {
                    text.push_str(&e.title);
                    text.push(' ');
                    text.push_str(&e.company);
                    text.push(' ');
                    text.push_str(&e.description);
                }
                SectionItem::Project(p) => {
                    text.push_str(&p.title);
                    text.push(' ');
                    text.push_str(&p.description);
                    text.push(' ');
                    text.push_str(&p.tags.join(" "));
                }
                SectionItem::SkillGroup(g) => {
                    text.push_str(&g.category);
                    text.push(' ');
                    text.push_str(&g.skills.join(" "));
                }
                SectionItem::Education(e) => {
                    text.push_str(&e.degree);
                    text.push(' ');
                    text.push_str(&e.institution);
                }
                SectionItem::Custom(c) => {
                    text.push_str(&c.title);
                    text.push(' ');
                    text.push_str(&c.description);
                }
            }
        }
    }
    text
}

/// F3 — page estimate from total character count. Crude but stable: 3,500
/// chars per page regardless of font or margins.
fn check_page_length(resume: &ResumeData) -> Check {
    let name = "Page length";
    let chars = aggregate_text(resume).chars().count();
    let pages = chars as f64 / CHARS_PER_PAGE;
    if pages > MAX_PAGE_ESTIMATE {
        Check::new(
            "F3",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!("Estimated {pages:.1} pages — exceeds the one-page target"),
        )
    } else {
        Check::new(
            "F3",
            CATEGORY,
            name,
            CheckStatus::Pass,
            format!("Estimated {pages:.1} pages"),
        )
    }
}

/// F4 — typographic and decorative characters that garble in ATS extraction.
fn check_special_characters(resume: &ResumeData) -> Check {
    let name = "Special characters";
    let text = aggregate_text(resume);

    let mut curly_quotes = 0usize;
    let mut dashes = 0usize;
    let mut decorative = 0usize;
    for c in text.chars() {
        match c {
            '\u{201C}' | '\u{201D}' | '\u{2018}' | '\u{2019}' => curly_quotes += 1,
            '\u{2013}' | '\u{2014}' => dashes += 1,
            c if DECORATIVE_SYMBOLS.contains(&c) => decorative += 1,
            _ => {}
        }
    }

    if curly_quotes + dashes + decorative == 0 {
        return Check::new(
            "F4",
            CATEGORY,
            name,
            CheckStatus::Pass,
            "No problematic special characters",
        );
    }

    let mut details = Vec::new();
    if curly_quotes > 0 {
        details.push(format!("Curly quotes: {curly_quotes}"));
    }
    if dashes > 0 {
        details.push(format!("Em/en dashes: {dashes}"));
    }
    if decorative > 0 {
        details.push(format!("Decorative symbols: {decorative}"));
    }
    Check::new(
        "F4",
        CATEGORY,
        name,
        CheckStatus::Warning,
        "Special characters found that ATS extraction may garble",
    )
    .with_details(details)
}
