//! Presentation content attached to ranked diseases

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// Description, advice and severity shown for a disease
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiseaseContent {
    pub description: String,
    pub recommendations: Vec<String>,
    pub severity: String,
}

/// Source of presentation content for ranked diseases
pub trait ContentProvider: Send + Sync {
    fn content_for(&self, disease: &str) -> DiseaseContent;
}

/// Generic text used for every disease
#[derive(Debug, Clone, Default)]
pub struct StaticContent;

impl StaticContent {
    pub const SEVERITY: &'static str = "Varies";
    pub const RECOMMENDATIONS: [&'static str; 2] = ["Consult a doctor.", "Stay hydrated and rest."];

    pub fn description(disease: &str) -> String {
        format!("Match based on symptoms: {}.", disease)
    }
}

impl ContentProvider for StaticContent {
    fn content_for(&self, disease: &str) -> DiseaseContent {
        DiseaseContent {
            description: Self::description(disease),
            recommendations: Self::RECOMMENDATIONS.iter().map(|s| s.to_string()).collect(),
            severity: Self::SEVERITY.to_string(),
        }
    }
}

/// Per-disease overrides as stored in a content catalog. Missing fields fall back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// Catalog keyed by disease label, falling back to [`StaticContent`]
#[derive(Debug, Clone, Default)]
pub struct CatalogContent {
    entries: AHashMap<String, ContentEntry>,
}

impl CatalogContent {
    pub fn new(entries: impl IntoIterator<Item = (String, ContentEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &AHashMap<String, ContentEntry> {
        &self.entries
    }
}

impl ContentProvider for CatalogContent {
    fn content_for(&self, disease: &str) -> DiseaseContent {
        let fallback = StaticContent.content_for(disease);
        match self.entries.get(disease) {
            Some(entry) => DiseaseContent {
                description: entry.description.clone().unwrap_or(fallback.description),
                recommendations: entry
                    .recommendations
                    .clone()
                    .unwrap_or(fallback.recommendations),
                severity: entry.severity.clone().unwrap_or(fallback.severity),
            },
            None => fallback,
        }
    }
}
