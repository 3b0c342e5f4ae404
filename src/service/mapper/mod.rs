//! Cross-framework control mapping
//!
//! Computes best-match candidates between the controls of two frameworks
//! using keyword-set similarity. Inputs are plain descriptive strings (one
//! per control, title/description concatenation is the caller's concern);
//! the result is a ranked, thresholded candidate list per source control.

use chrono::Utc;
use std::collections::HashSet;

use crate::model::{ControlMapping, FrameworkMapping, MapperConfig};

pub mod compatibility;

pub use compatibility::framework_compatibility;

/// Extract the keyword set used for similarity comparison.
///
/// Lowercases, splits on whitespace, strips non-alphanumeric characters,
/// drops tokens shorter than three characters, and removes configured stop
/// words. Duplicates collapse: the result is a set.
pub fn extract_keywords(text: &str, stop_words: &[String]) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|token| {
            token
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
        })
        .filter(|token| token.len() >= 3)
        .filter(|token| !stop_words.iter().any(|w| w == token))
        .collect()
}

/// Jaccard index between two keyword sets.
///
/// Two empty sets are considered identical (1.0). A zero-size union with
/// differing sets cannot occur, but is scored 0 rather than dividing by
/// zero.
pub fn similarity(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.union(b).count();

    if union == 0 {
        return 0.0;
    }

    intersection as f64 / union as f64
}

/// Compute best-match candidates for every source control.
///
/// Matches must exceed the configured similarity threshold strictly; the
/// top `max_matches` survive, ranked best-first. A source control with no
/// qualifying match produces no entry unless `report_unmatched` is set, in
/// which case a zero-confidence entry with empty target arrays records the
/// gap.
pub fn map_controls(
    source_controls: &[String],
    target_controls: &[String],
    config: &MapperConfig,
) -> Vec<ControlMapping> {
    let target_keywords: Vec<(usize, HashSet<String>)> = target_controls
        .iter()
        .enumerate()
        .map(|(i, text)| (i, extract_keywords(text, &config.stop_words)))
        .collect();

    let mut mappings = Vec::new();

    for source in source_controls {
        let source_keywords = extract_keywords(source, &config.stop_words);

        let mut matches: Vec<(usize, f64)> = target_keywords
            .iter()
            .map(|(i, keywords)| (*i, similarity(&source_keywords, keywords)))
            .filter(|(_, score)| *score > config.similarity_threshold)
            .collect();

        matches.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        matches.truncate(config.max_matches);

        tracing::debug!(
            source = %source,
            candidates = matches.len(),
            top_score = matches.first().map(|(_, s)| *s).unwrap_or(0.0),
            "Scored source control against targets"
        );

        if matches.is_empty() {
            if config.report_unmatched {
                mappings.push(ControlMapping {
                    source_control_id: source.clone(),
                    source_control_title: source.clone(),
                    target_control_ids: Vec::new(),
                    target_control_titles: Vec::new(),
                    confidence_score: 0.0,
                    reasoning: format!(
                        "No target control exceeded the {} similarity threshold",
                        config.similarity_threshold
                    ),
                });
            }
            continue;
        }

        let targets: Vec<String> = matches
            .iter()
            .map(|(i, _)| target_controls[*i].clone())
            .collect();

        mappings.push(ControlMapping {
            source_control_id: source.clone(),
            source_control_title: source.clone(),
            target_control_ids: targets.clone(),
            target_control_titles: targets,
            confidence_score: matches[0].1,
            reasoning: "Mapped by keyword-set similarity between control descriptions"
                .to_string(),
        });
    }

    mappings
}

/// Wrap per-control mappings into an aggregate framework mapping.
///
/// Completeness is the mean confidence across all mappings, rounded to two
/// decimals; zero when there are no mappings.
pub fn create_framework_mapping(
    source_framework: &str,
    target_framework: &str,
    mappings: Vec<ControlMapping>,
) -> FrameworkMapping {
    let completeness = if mappings.is_empty() {
        0.0
    } else {
        let mean: f64 = mappings.iter().map(|m| m.confidence_score).sum::<f64>()
            / mappings.len() as f64;
        (mean * 100.0).round() / 100.0
    };

    FrameworkMapping {
        source_framework: source_framework.to_string(),
        target_framework: target_framework.to_string(),
        mappings,
        completeness,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords(text: &str) -> HashSet<String> {
        extract_keywords(text, &MapperConfig::default().stop_words)
    }

    #[test]
    fn keywords_drop_stop_words_and_short_tokens() {
        let set = keywords("The control SHALL ensure encryption of key material!");
        assert!(set.contains("encryption"));
        assert!(set.contains("key"));
        assert!(set.contains("material"));
        assert!(!set.contains("shall"));
        assert!(!set.contains("ensure"));
        assert!(!set.contains("control"));
        assert!(!set.contains("of"));
    }

    #[test]
    fn three_character_tokens_survive_the_length_cutoff() {
        // Only tokens shorter than three characters are dropped; domain
        // terms like "key" and "log" must survive. Articles of the same
        // length ride along unless listed as stop words.
        let set = keywords("the key log id");
        assert!(set.contains("key"));
        assert!(set.contains("log"));
        assert!(set.contains("the"));
        assert!(!set.contains("id"));
    }

    #[test]
    fn keywords_collapse_duplicates() {
        let set = keywords("policy policy policy");
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn similarity_is_symmetric_and_bounded() {
        let a = keywords("encryption key management policy");
        let b = keywords("cryptographic key lifecycle policy");
        let ab = similarity(&a, &b);
        let ba = similarity(&b, &a);
        assert_eq!(ab, ba);
        assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn similarity_of_two_empty_sets_is_one() {
        let empty = HashSet::new();
        assert_eq!(similarity(&empty, &empty), 1.0);
    }

    #[test]
    fn similarity_of_disjoint_sets_is_zero() {
        let a = keywords("encryption keys");
        let b = keywords("physical perimeter");
        assert_eq!(similarity(&a, &b), 0.0);
    }

    #[test]
    fn related_key_management_controls_map() {
        let source = vec!["encryption key management policy".to_string()];
        let target = vec!["cryptographic key lifecycle policy".to_string()];
        let mappings = map_controls(&source, &target, &MapperConfig::default());

        assert_eq!(mappings.len(), 1);
        assert!(mappings[0].confidence_score > 0.3);
        assert_eq!(mappings[0].target_control_ids.len(), 1);
        assert_eq!(
            mappings[0].target_control_ids,
            mappings[0].target_control_titles
        );
    }

    #[test]
    fn no_mapping_entry_at_or_below_threshold() {
        let source = vec![
            "encryption key management policy".to_string(),
            "visitor badge procedures for the lobby".to_string(),
        ];
        let target = vec![
            "cryptographic key lifecycle policy".to_string(),
            "incident response planning".to_string(),
        ];
        let mappings = map_controls(&source, &target, &MapperConfig::default());

        for mapping in &mappings {
            assert!(mapping.confidence_score > 0.3);
        }
        // The unrelated source control is silently dropped by default
        assert_eq!(mappings.len(), 1);
    }

    #[test]
    fn report_unmatched_emits_zero_confidence_entries() {
        let config = MapperConfig {
            report_unmatched: true,
            ..MapperConfig::default()
        };
        let source = vec!["visitor badge procedures".to_string()];
        let target = vec!["cryptographic key lifecycle policy".to_string()];
        let mappings = map_controls(&source, &target, &config);

        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].confidence_score, 0.0);
        assert!(mappings[0].target_control_ids.is_empty());
    }

    #[test]
    fn matches_are_ranked_and_capped() {
        let config = MapperConfig {
            max_matches: 2,
            ..MapperConfig::default()
        };
        let source = vec!["access management policy enforcement".to_string()];
        let target = vec![
            "access management policy enforcement".to_string(),
            "access management policy".to_string(),
            "access management policy enforcement duties".to_string(),
            "unrelated physical security".to_string(),
        ];
        let mappings = map_controls(&source, &target, &config);

        assert_eq!(mappings.len(), 1);
        let mapping = &mappings[0];
        assert_eq!(mapping.target_control_ids.len(), 2);
        // Exact match ranks first, confidence equals the top score
        assert_eq!(mapping.target_control_ids[0], target[0]);
        assert_eq!(mapping.confidence_score, 1.0);
    }

    #[test]
    fn completeness_is_mean_confidence_rounded() {
        let mapping = |score: f64| ControlMapping {
            source_control_id: "s".to_string(),
            source_control_title: "s".to_string(),
            target_control_ids: vec!["t".to_string()],
            target_control_titles: vec!["t".to_string()],
            confidence_score: score,
            reasoning: String::new(),
        };

        let fw = create_framework_mapping("A", "B", vec![mapping(0.5), mapping(0.75)]);
        assert_eq!(fw.completeness, 0.63);
        assert!((0.0..=1.0).contains(&fw.completeness));

        let empty = create_framework_mapping("A", "B", vec![]);
        assert_eq!(empty.completeness, 0.0);
        assert!(empty.mappings.is_empty());
    }
}
