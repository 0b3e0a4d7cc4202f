//! Parsability checks (P1–P7) — will an ATS extract this resume correctly?

use crate::analysis::similarity::is_fuzzy_match;
use crate::models::analysis::{Check, CheckCategory, CheckStatus};
use crate::models::resume::ResumeData;

/// Headings ATS parsers recognize. Section labels are matched exactly or
/// fuzzily (similarity ≥ 0.85) against this list, case-insensitive.
const STANDARD_HEADINGS: &[&str] = &[
    "experience",
    "work experience",
    "professional experience",
    "employment",
    "employment history",
    "work history",
    "projects",
    "personal projects",
    "skills",
    "technical skills",
    "core competencies",
    "education",
    "certifications",
    "awards",
    "publications",
    "summary",
    "professional summary",
    "objective",
    "volunteer",
    "volunteering",
    "languages",
    "interests",
    "references",
    "contact",
];

/// HTML elements ATS parsers routinely mangle or drop.
const UNSAFE_TAGS: &[&str] = &["<table", "<img", "<canvas", "<svg"];

const CATEGORY: CheckCategory = CheckCategory::Parsability;

pub fn run(resume: &ResumeData, html: &str) -> Vec<Check> {
    vec![
        check_contact_info(resume),
        check_section_headings(resume),
        check_date_consistency(resume),
        check_empty_sections(resume),
        check_summary_present(resume),
        check_template_safety(html),
        check_fixed_positioning(html),
    ]
}

/// P1 — email is mandatory (fail), phone/location expected (warn).
fn check_contact_info(resume: &ResumeData) -> Check {
    let name = "Contact information";
    if resume.profile.email.trim().is_empty() {
        return Check::new(
            "P1",
            CATEGORY,
            name,
            CheckStatus::Fail,
            "Email address is missing — ATS systems require an email to route your application",
        );
    }

    let mut missing = Vec::new();
    if resume.profile.phone.trim().is_empty() {
        missing.push("phone number");
    }
    if resume.profile.location.trim().is_empty() {
        missing.push("location");
    }

    if missing.is_empty() {
        Check::new(
            "P1",
            CATEGORY,
            name,
            CheckStatus::Pass,
            "Email, phone, and location are all present",
        )
    } else {
        Check::new(
            "P1",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!("Missing {}", missing.join(" and ")),
        )
    }
}

/// P2 — non-standard section headings confuse ATS section detection.
fn check_section_headings(resume: &ResumeData) -> Check {
    let name = "Section headings";
    let non_standard: Vec<String> = resume
        .sections
        .iter()
        .map(|s| s.label.clone())
        .filter(|label| !is_standard_heading(label))
        .collect();

    if non_standard.is_empty() {
        Check::new(
            "P2",
            CATEGORY,
            name,
            CheckStatus::Pass,
            "All section headings are ATS-standard",
        )
    } else {
        Check::new(
            "P2",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!(
                "{} non-standard section heading(s) may not be recognized",
                non_standard.len()
            ),
        )
        .with_details(non_standard)
    }
}

fn is_standard_heading(label: &str) -> bool {
    let lower = label.trim().to_lowercase();
    STANDARD_HEADINGS
        .iter()
        .any(|h| *h == lower || is_fuzzy_match(&lower, h))
}

/// Recognized date formats for P3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateFormat {
    MonthAbbrevYear, // Jan 2020
    MonthFullYear,   // January 2020
    SlashMonthYear,  // 01/2020
    IsoYearMonth,    // 2020-01
    YearOnly,        // 2020
}

const MONTH_ABBREVS: &[&str] = &[
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

const MONTH_NAMES: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

fn detect_date_format(date: &str) -> Option<DateFormat> {
    let date = date.trim().to_lowercase();

    if let Some((month, year)) = date.split_once(' ') {
        if is_year(year) {
            if MONTH_NAMES.contains(&month) && month.len() > 3 {
                return Some(DateFormat::MonthFullYear);
            }
            if MONTH_ABBREVS.contains(&month.trim_end_matches('.')) {
                return Some(DateFormat::MonthAbbrevYear);
            }
        }
        return None;
    }

    if let Some((month, year)) = date.split_once('/') {
        if is_month_number(month) && is_year(year) {
            return Some(DateFormat::SlashMonthYear);
        }
        return None;
    }

    if let Some((year, month)) = date.split_once('-') {
        if is_year(year) && is_month_number(month) {
            return Some(DateFormat::IsoYearMonth);
        }
        return None;
    }

    if is_year(&date) {
        return Some(DateFormat::YearOnly);
    }
    None
}

fn is_year(s: &str) -> bool {
    s.len() == 4 && s.chars().all(|c| c.is_ascii_digit())
}

fn is_month_number(s: &str) -> bool {
    matches!(s.parse::<u32>(), Ok(m) if (1..=12).contains(&m))
}

/// Dates that are not dates: open-ended positions.
fn is_open_ended(date: &str) -> bool {
    let lower = date.trim().to_lowercase();
    lower.is_empty() || lower == "present" || lower == "current"
}

/// P3 — all dates must use one recognized format, consistently.
fn check_date_consistency(resume: &ResumeData) -> Check {
    use crate::models::resume::SectionItem;
    let name = "Date consistency";

    let mut dates: Vec<&str> = Vec::new();
    for section in &resume.sections {
        for item in &section.items {
            let (start, end) = match item {
                SectionItem::Experience(e) => (&e.start_date, &e.end_date),
                SectionItem::Education(e) => (&e.start_date, &e.end_date),
                _ => continue,
            };
            for date in [start, end] {
                if !is_open_ended(date) {
                    dates.push(date);
                }
            }
        }
    }

    if dates.is_empty() {
        return Check::new("P3", CATEGORY, name, CheckStatus::Pass, "No dates to check");
    }

    let mut unrecognized = Vec::new();
    let mut formats: Vec<DateFormat> = Vec::new();
    for date in &dates {
        match detect_date_format(date) {
            Some(format) => {
                if !formats.contains(&format) {
                    formats.push(format);
                }
            }
            None => unrecognized.push(date.to_string()),
        }
    }

    if !unrecognized.is_empty() {
        return Check::new(
            "P3",
            CATEGORY,
            name,
            CheckStatus::Warning,
            "Some dates use an unrecognized format",
        )
        .with_details(unrecognized);
    }
    if formats.len() > 1 {
        return Check::new(
            "P3",
            CATEGORY,
            name,
            CheckStatus::Warning,
            "Dates mix multiple formats — pick one and use it throughout",
        );
    }
    Check::new(
        "P3",
        CATEGORY,
        name,
        CheckStatus::Pass,
        "All dates use a single consistent format",
    )
}

/// P4 — empty sections read as parsing errors to an ATS.
fn check_empty_sections(resume: &ResumeData) -> Check {
    let name = "Empty sections";
    let empty: Vec<String> = resume
        .sections
        .iter()
        .filter(|s| s.items.is_empty())
        .map(|s| s.label.clone())
        .collect();

    if empty.is_empty() {
        Check::new(
            "P4",
            CATEGORY,
            name,
            CheckStatus::Pass,
            "Every section has content",
        )
    } else {
        Check::new(
            "P4",
            CATEGORY,
            name,
            CheckStatus::Fail,
            format!("{} empty section(s) found", empty.len()),
        )
        .with_details(empty)
    }
}

/// P5 — a summary gives the ATS (and the reader) keyword context up front.
fn check_summary_present(resume: &ResumeData) -> Check {
    let name = "Summary present";
    match resume.summary.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Check::new(
            "P5",
            CATEGORY,
            name,
            CheckStatus::Pass,
            "Summary is present",
        ),
        _ => Check::new(
            "P5",
            CATEGORY,
            name,
            CheckStatus::Warning,
            "No summary — consider adding a short professional summary",
        ),
    }
}

/// P6 — tables, images, and vector graphics break text extraction.
fn check_template_safety(html: &str) -> Check {
    let name = "Template safety";
    let lower = html.to_lowercase();
    let offending: Vec<String> = UNSAFE_TAGS
        .iter()
        .filter(|tag| lower.contains(*tag))
        .map(|tag| format!("{tag}>"))
        .collect();

    if offending.is_empty() {
        Check::new(
            "P6",
            CATEGORY,
            name,
            CheckStatus::Pass,
            "No ATS-unsafe HTML elements in the rendered output",
        )
    } else {
        Check::new(
            "P6",
            CATEGORY,
            name,
            CheckStatus::Fail,
            "Rendered output contains elements ATS parsers cannot read",
        )
        .with_details(offending)
    }
}

/// Max width for absolutely positioned decorations that are still harmless
/// (thin accent bars and the like).
const MAX_ABSOLUTE_WIDTH_PX: f64 = 70.0;

/// P7 — fixed or large absolutely-positioned content reflows unpredictably
/// when an ATS linearizes the document.
fn check_fixed_positioning(html: &str) -> Check {
    let name = "Fixed positioning";
    let compact: String = html
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let has_fixed = compact.contains("position:fixed");
    let has_large_absolute = compact
        .match_indices("position:absolute")
        .any(|(i, _)| !absolute_context_is_narrow(&compact, i));

    if has_fixed || has_large_absolute {
        Check::new(
            "P7",
            CATEGORY,
            name,
            CheckStatus::Warning,
            "Fixed or large absolutely-positioned content detected — may reflow unpredictably in ATS parsing",
        )
    } else {
        Check::new(
            "P7",
            CATEGORY,
            name,
            CheckStatus::Pass,
            "No fixed or floating content",
        )
    }
}

/// Inspects the declaration block around a `position:absolute` occurrence for
/// a width constraint of at most 70px.
fn absolute_context_is_narrow(compact: &str, index: usize) -> bool {
    let block_start = compact[..index]
        .rfind(|c| c == '{' || c == '"' || c == '\'')
        .map(|i| i + 1)
        .unwrap_or(0);
    let block_end = compact[index..]
        .find(|c| c == '}' || c == '"' || c == '\'')
        .map(|i| index + i)
        .unwrap_or(compact.len());
    let block = &compact[block_start..block_end];

    block
        .split(';')
        .filter_map(|decl| decl.strip_prefix("width:"))
        .filter_map(|v| v.strip_suffix("px"))
        .any(|v| v.parse::<f64>().map_or(false, |w| w <= MAX_ABSOLUTE_WIDTH_PX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{
        EducationItem, ExperienceItem, PageSize, Profile, Section, SectionItem, Style,
    };

    fn base_resume() -> ResumeData {
        ResumeData {
            profile: Profile {
                name: "Ada Lovelace".to_string(),
                title: "Engineer".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+44 555 0100".to_string(),
                location: "London".to_string(),
                links: vec![],
            },
            summary: Some("Engineer with a decade of systems work.".to_string()),
            sections: vec![],
            style: Style::default(),
            page_size: PageSize::A4,
        }
    }

    fn experience(start: &str, end: &str) -> SectionItem {
        SectionItem::Experience(ExperienceItem {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            start_date: start.to_string(),
            end_date: end.to_string(),
            description: String::new(),
        })
    }

    #[test]
    fn test_p1_fail_when_email_missing() {
        let mut resume = base_resume();
        resume.profile.email = String::new();
        let check = check_contact_info(&resume);
        assert_eq!(check.status, CheckStatus::Fail);
        assert!(check.message.contains("Email"));
    }

    #[test]
    fn test_p1_warn_when_phone_missing() {
        let mut resume = base_resume();
        resume.profile.phone = String::new();
        let check = check_contact_info(&resume);
        assert_eq!(check.status, CheckStatus::Warning);
        assert!(check.message.contains("phone"));
    }

    #[test]
    fn test_p1_pass_when_complete() {
        assert_eq!(check_contact_info(&base_resume()).status, CheckStatus::Pass);
    }

    #[test]
    fn test_p2_accepts_standard_and_fuzzy_headings() {
        let mut resume = base_resume();
        resume.sections = vec![
            Section {
                label: "Work Experience".to_string(),
                items: vec![experience("2020", "2021")],
            },
            Section {
                // one edit away from "education"
                label: "Educaton".to_string(),
                items: vec![experience("2020", "2021")],
            },
        ];
        assert_eq!(check_section_headings(&resume).status, CheckStatus::Pass);
    }

    #[test]
    fn test_p2_warns_on_creative_heading() {
        let mut resume = base_resume();
        resume.sections = vec![Section {
            label: "My Journey So Far".to_string(),
            items: vec![],
        }];
        let check = check_section_headings(&resume);
        assert_eq!(check.status, CheckStatus::Warning);
        assert_eq!(
            check.details.as_deref(),
            Some(&["My Journey So Far".to_string()][..])
        );
    }

    #[test]
    fn test_p3_pass_on_single_format() {
        let mut resume = base_resume();
        resume.sections = vec![Section {
            label: "Experience".to_string(),
            items: vec![experience("Jan 2020", "Dec 2021"), experience("Mar 2018", "Present")],
        }];
        assert_eq!(check_date_consistency(&resume).status, CheckStatus::Pass);
    }

    #[test]
    fn test_p3_warns_on_mixed_formats() {
        let mut resume = base_resume();
        resume.sections = vec![Section {
            label: "Experience".to_string(),
            items: vec![experience("Jan 2020", "2021")],
        }];
        let check = check_date_consistency(&resume);
        assert_eq!(check.status, CheckStatus::Warning);
        assert!(check.message.contains("multiple formats"));
    }

    #[test]
    fn test_p3_warns_on_unrecognized_format() {
        let mut resume = base_resume();
        resume.sections = vec![Section {
            label: "Education".to_string(),
            items: vec![SectionItem::Education(EducationItem {
                degree: "BSc".to_string(),
                institution: "UCL".to_string(),
                start_date: "sometime in 2019".to_string(),
                end_date: String::new(),
            })],
        }];
        let check = check_date_consistency(&resume);
        assert_eq!(check.status, CheckStatus::Warning);
        assert!(check.details.is_some());
    }

    #[test]
    fn test_p3_pass_when_no_dates() {
        assert_eq!(
            check_date_consistency(&base_resume()).status,
            CheckStatus::Pass
        );
    }

    #[test]
    fn test_date_format_detection() {
        assert_eq!(
            detect_date_format("Jan 2020"),
            Some(DateFormat::MonthAbbrevYear)
        );
        assert_eq!(
            detect_date_format("January 2020"),
            Some(DateFormat::MonthFullYear)
        );
        assert_eq!(
            detect_date_format("01/2020"),
            Some(DateFormat::SlashMonthYear)
        );
        assert_eq!(detect_date_format("2020-01"), Some(DateFormat::IsoYearMonth));
        assert_eq!(detect_date_format("2020"), Some(DateFormat::YearOnly));
        assert_eq!(detect_date_format("13/2020"), None);
        assert_eq!(detect_date_format("Winter 2020"), None);
    }

    #[test]
    fn test_p4_fails_listing_empty_sections() {
        let mut resume = base_resume();
        resume.sections = vec![Section {
            label: "Projects".to_string(),
            items: vec![],
        }];
        let check = check_empty_sections(&resume);
        assert_eq!(check.status, CheckStatus::Fail);
        assert_eq!(check.details.as_deref(), Some(&["Projects".to_string()][..]));
    }

    #[test]
    fn test_p5_warns_on_blank_summary() {
        let mut resume = base_resume();
        resume.summary = Some("   ".to_string());
        assert_eq!(check_summary_present(&resume).status, CheckStatus::Warning);
    }

    #[test]
    fn test_p6_fails_on_table() {
        let check = check_template_safety("<div><table><tr></tr></table></div>");
        assert_eq!(check.status, CheckStatus::Fail);
        assert!(check.details.unwrap().contains(&"<table>".to_string()));
    }

    #[test]
    fn test_p6_passes_on_clean_markup() {
        assert_eq!(
            check_template_safety("<div><p>hello</p></div>").status,
            CheckStatus::Pass
        );
    }

    #[test]
    fn test_p7_warns_on_position_fixed() {
        let html = r#"<div style="position: fixed; top: 0">header</div>"#;
        assert_eq!(check_fixed_positioning(html).status, CheckStatus::Warning);
    }

    #[test]
    fn test_p7_allows_narrow_absolute_accent() {
        let html = r#"<span style="position: absolute; width: 4px; height: 100%"></span>"#;
        assert_eq!(check_fixed_positioning(html).status, CheckStatus::Pass);
    }

    #[test]
    fn test_p7_warns_on_wide_absolute() {
        let html = r#"<div style="position: absolute; width: 300px">sidebar</div>"#;
        assert_eq!(check_fixed_positioning(html).status, CheckStatus::Warning);
    }
}
