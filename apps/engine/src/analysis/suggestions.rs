//! Suggestion generator — turns a coverage result into concrete
//! include/emphasize recommendations against the CMS content.

use std::collections::{HashMap, HashSet};

use crate::analysis::corpus::build_corpus;
use crate::analysis::coverage::find_matching_items;
use crate::models::analysis::{CoverageResult, ItemRef, SourceType, Suggestion, SuggestionType};
use crate::models::cms::CmsDataForAnalysis;

/// Items sharing at least this many matched keywords earn an emphasize
/// suggestion.
const EMPHASIZE_KEYWORD_COUNT: usize = 3;

/// Generates suggestions from a coverage result.
///
/// Pass 1: every missing keyword is re-searched against the CMS corpus; each
/// newly-seen matching item gets one `include_*` suggestion.
/// Pass 2: items already matched by ≥3 distinct keywords get an `emphasize`
/// suggestion, unless pass 1 claimed them first.
///
/// Each item id receives at most one suggestion per run.
pub fn generate_suggestions(
    coverage: &CoverageResult,
    cms: &CmsDataForAnalysis,
) -> Vec<Suggestion> {
    let corpus = build_corpus(cms);
    let mut suggestions = Vec::new();
    let mut suggested_ids: HashSet<String> = HashSet::new();

    for keyword in &coverage.missing_keywords {
        for item in find_matching_items(keyword, &corpus) {
            if suggested_ids.contains(&item.item_id) {
                continue;
            }
            let display = display_name(&item, cms);
            suggestions.push(Suggestion {
                suggestion_type: include_type(item.source_type),
                item_id: item.item_id.clone(),
                reason: format!("Add '{display}' to cover the keyword '{keyword}'"),
            });
            suggested_ids.insert(item.item_id);
        }
    }

    // Count distinct matched keywords per item, preserving first-seen order.
    let mut keyword_counts: HashMap<String, usize> = HashMap::new();
    let mut item_order: Vec<ItemRef> = Vec::new();
    for km in &coverage.keyword_matches {
        for item in &km.items {
            let count = keyword_counts.entry(item.item_id.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                item_order.push(item.clone());
            }
        }
    }

    for item in item_order {
        if keyword_counts[&item.item_id] < EMPHASIZE_KEYWORD_COUNT
            || suggested_ids.contains(&item.item_id)
        {
            continue;
        }
        let display = display_name(&item, cms);
        let count = keyword_counts[&item.item_id];
        suggestions.push(Suggestion {
            suggestion_type: SuggestionType::Emphasize,
            item_id: item.item_id.clone(),
            reason: format!("'{display}' matches {count} keywords from the job description — consider giving it more prominence"),
        });
        suggested_ids.insert(item.item_id);
    }

    suggestions
}

fn include_type(source: SourceType) -> SuggestionType {
    match source {
        SourceType::Experience => SuggestionType::IncludeExperience,
        SourceType::Project => SuggestionType::IncludeProject,
        SourceType::SkillGroup => SuggestionType::IncludeSkillGroup,
    }
}

/// Display name for reason strings: experience "Title at Company", project
/// title, skill group category. Falls back to the raw id if the item is
/// missing from the bundle.
fn display_name(item: &ItemRef, cms: &CmsDataForAnalysis) -> String {
    match item.source_type {
        SourceType::Experience => cms
            .experiences
            .iter()
            .find(|e| e.id == item.item_id)
            .map(|e| format!("{} at {}", e.title, e.company)),
        SourceType::Project => cms
            .projects
            .iter()
            .find(|p| p.id == item.item_id)
            .map(|p| p.title.clone()),
        SourceType::SkillGroup => cms
            .skill_groups
            .iter()
            .find(|g| g.id == item.item_id)
            .map(|g| g.category.clone()),
    }
    .unwrap_or_else(|| item.item_id.clone())
}
