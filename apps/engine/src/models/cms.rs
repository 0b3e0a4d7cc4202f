//! CMS content bundle handed to the analysis pipeline by the caller.
//!
//! The engine performs no fetching — ids are opaque strings assigned by the
//! hosted backend and are only ever echoed back in coverage and suggestion
//! output.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillGroup {
    pub id: String,
    pub category: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// Everything the coverage scorer and suggestion generator can search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CmsDataForAnalysis {
    #[serde(default)]
    pub experiences: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub skill_groups: Vec<SkillGroup>,
}
