//! Corpus builder — flattens CMS content into lowercase searchable units,
//! one per source item. Pure, no I/O.

use crate::models::analysis::{CorpusEntry, SourceType};
use crate::models::cms::CmsDataForAnalysis;

/// Flattens experiences, projects, and skill groups into searchable text
/// tagged with its source item. Order: experiences, projects, skill groups,
/// each in the order supplied.
pub fn build_corpus(cms: &CmsDataForAnalysis) -> Vec<CorpusEntry> {
    let mut corpus = Vec::with_capacity(
        cms.experiences.len() + cms.projects.len() + cms.skill_groups.len(),
    );

    for exp in &cms.experiences {
        corpus.push(CorpusEntry {
            text: format!("{} {} {}", exp.title, exp.company, exp.description).to_lowercase(),
            source_type: SourceType::Experience,
            item_id: exp.id.clone(),
        });
    }

    for project in &cms.projects {
        corpus.push(CorpusEntry {
            text: format!(
                "{} {} {}",
                project.title,
                project.description,
                project.tags.join(" ")
            )
            .to_lowercase(),
            source_type: SourceType::Project,
            item_id: project.id.clone(),
        });
    }

    for group in &cms.skill_groups {
        corpus.push(CorpusEntry {
            text: format!("{} {}", group.category, group.skills.join(" ")).to_lowercase(),
            source_type: SourceType::SkillGroup,
            item_id: group.id.clone(),
        });
    }

    corpus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cms::{ExperienceEntry, ProjectEntry, SkillGroup};

    fn sample_cms() -> CmsDataForAnalysis {
        CmsDataForAnalysis {
            experiences: vec![ExperienceEntry {
                id: "exp1".to_string(),
                title: "Backend Engineer".to_string(),
                company: "Acme".to_string(),
                description: "Built APIs with Node.js".to_string(),
            }],
            projects: vec![ProjectEntry {
                id: "proj1".to_string(),
                title: "Deploy Bot".to_string(),
                description: "CI/CD automation".to_string(),
                tags: vec!["Kubernetes".to_string(), "Docker".to_string()],
            }],
            skill_groups: vec![SkillGroup {
                id: "sg1".to_string(),
                category: "Languages".to_string(),
                skills: vec!["Rust".to_string(), "TypeScript".to_string()],
            }],
        }
    }

    #[test]
    fn test_one_entry_per_item() {
        let corpus = build_corpus(&sample_cms());
        assert_eq!(corpus.len(), 3);
    }

    #[test]
    fn test_entries_are_lowercase() {
        let corpus = build_corpus(&sample_cms());
        for entry in &corpus {
            assert_eq!(entry.text, entry.text.to_lowercase());
        }
        assert!(corpus[0].text.contains("backend engineer"));
        assert!(corpus[1].text.contains("kubernetes docker"));
        assert!(corpus[2].text.contains("rust typescript"));
    }

    #[test]
    fn test_source_tagging() {
        let corpus = build_corpus(&sample_cms());
        assert_eq!(corpus[0].source_type, SourceType::Experience);
        assert_eq!(corpus[0].item_id, "exp1");
        assert_eq!(corpus[1].source_type, SourceType::Project);
        assert_eq!(corpus[2].source_type, SourceType::SkillGroup);
    }

    #[test]
    fn test_empty_cms_yields_empty_corpus() {
        assert!(build_corpus(&CmsDataForAnalysis::default()).is_empty());
    }
}
