use serde::{Deserialize, Serialize};

use super::vocabulary::{is_anatomy_term, is_code_shaped, is_modality_term};

/// Keywords split into four disjoint buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorizedKeywords {
    pub anatomy_terms: Vec<String>,
    pub modalities: Vec<String>,
    pub symptoms: Vec<String>,
    pub codes: Vec<String>,
}

impl CategorizedKeywords {
    pub fn total(&self) -> usize {
        self.anatomy_terms.len() + self.modalities.len() + self.symptoms.len() + self.codes.len()
    }
}

/// Bucket each keyword by fixed priority: code shape, then anatomy, then
/// modality, otherwise symptom. Every keyword lands in exactly one bucket.
pub fn categorize_keywords(keywords: &[String]) -> CategorizedKeywords {
    let mut categorized = CategorizedKeywords::default();

    for keyword in keywords {
        let lower = keyword.trim().to_lowercase();
        let bucket = if is_code_shaped(&lower) {
            &mut categorized.codes
        } else if is_anatomy_term(&lower) {
            &mut categorized.anatomy_terms
        } else if is_modality_term(&lower) {
            &mut categorized.modalities
        } else {
            &mut categorized.symptoms
        };
        bucket.push(keyword.clone());
    }

    categorized
}
