//! Assembled resume input — immutable snapshot consumed by the check engine.
//!
//! Built by an external assembler from CMS content plus template settings;
//! the engine never constructs or mutates one itself.

use serde::{Deserialize, Serialize};

/// Contact block at the top of a resume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default)]
    pub links: Vec<ProfileLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileLink {
    pub label: String,
    pub url: String,
}

/// A resume section: ordered, typed items under a display label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub label: String,
    pub items: Vec<SectionItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionItem {
    Experience(ExperienceItem),
    Project(ProjectItem),
    SkillGroup(SkillGroupItem),
    Education(EducationItem),
    Custom(CustomItem),
}

/// One position. `description` holds newline-separated bullet lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceItem {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillGroupItem {
    pub category: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EducationItem {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Template style settings as CSS-ish strings, e.g. `"'Lato', sans-serif"`,
/// `"11pt"`. Only `font_family` and `font_size` are inspected by checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    pub font_family: String,
    pub font_size: String,
    #[serde(default)]
    pub margins: String,
    #[serde(default)]
    pub text_color: String,
    #[serde(default)]
    pub accent_color: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            font_family: "'Lato', sans-serif".to_string(),
            font_size: "11pt".to_string(),
            margins: "1in".to_string(),
            text_color: "#1a1a1a".to_string(),
            accent_color: "#2563eb".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    A4,
    Letter,
}

/// Full assembled resume, the check engine's primary input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeData {
    pub profile: Profile,
    #[serde(default)]
    pub summary: Option<String>,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub style: Style,
    #[serde(default)]
    pub page_size: PageSize,
}

impl ResumeData {
    /// Experience items across all sections, in document order.
    pub fn experience_items(&self) -> Vec<&ExperienceItem> {
        self.sections
            .iter()
            .flat_map(|s| &s.items)
            .filter_map(|i| match i {
                SectionItem::Experience(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    /// Skill name count across all skill-group items.
    pub fn total_skill_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| &s.items)
            .map(|i| match i {
                SectionItem::SkillGroup(g) => g.skills.len(),
                _ => 0,
            })
            .sum()
    }

    /// Index of the first section containing an experience item, if any.
    pub fn experience_section_index(&self) -> Option<usize> {
        self.sections.iter().position(|s| {
            s.items
                .iter()
                .any(|i| matches!(i, SectionItem::Experience(_)))
        })
    }
}
