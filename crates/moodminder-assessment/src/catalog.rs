//! The question catalog.
//!
//! A versioned JSON asset listing every questionnaire item in presentation
//! order. Response sequences are positionally aligned with it. The builtin
//! catalog is embedded at compile time; deployments may point at their own
//! file instead.

use std::collections::HashSet;
use std::path::Path;

use moodminder_core::models::condition::Condition;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CatalogError;

/// Newest catalog file layout this build can read.
const SUPPORTED_FORMAT: u32 = 1;

const BUILTIN: &str = include_str!("../assets/catalog.json");

/// One questionnaire item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Question {
    /// Stable across catalog versions; keys id-form responses.
    pub id: u32,
    pub prompt: String,
    /// Exactly five labels; index 0..4 maps to Likert values 1..5.
    pub options: Vec<String>,
    /// Topical grouping used for sub-scores and insights.
    pub category: String,
    /// Relative importance in the overall score. Rescaled on load so the
    /// catalog's weights sum to 1.
    pub weight: f64,
    /// `None` for general-wellbeing items that only contribute to scoring.
    #[serde(with = "condition_tag")]
    #[ts(type = "string")]
    pub condition: Option<Condition>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    format_version: u32,
    catalog_version: String,
    questions: Vec<Question>,
}

/// The validated, weight-normalized catalog. Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    version: String,
    questions: Vec<Question>,
}

impl Catalog {
    /// The catalog shipped with this build.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&contents)?;
        tracing::info!(
            path = %path.display(),
            version = %catalog.version,
            questions = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        if file.format_version > SUPPORTED_FORMAT {
            return Err(CatalogError::UnsupportedFormat {
                found: file.format_version,
                supported: SUPPORTED_FORMAT,
            });
        }
        Self::from_questions(file.catalog_version, file.questions)
    }

    /// Validate a question list and rescale its weights to sum to 1.
    pub fn from_questions(
        version: impl Into<String>,
        mut questions: Vec<Question>,
    ) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for q in &questions {
            if q.id == 0 {
                return Err(CatalogError::ZeroId);
            }
            if !seen.insert(q.id) {
                return Err(CatalogError::DuplicateId(q.id));
            }
            if q.options.len() != 5 {
                return Err(CatalogError::OptionCount {
                    id: q.id,
                    found: q.options.len(),
                });
            }
            if !(q.weight.is_finite() && q.weight > 0.0) {
                return Err(CatalogError::Weight {
                    id: q.id,
                    weight: q.weight,
                });
            }
            if q.category.trim().is_empty() {
                return Err(CatalogError::EmptyCategory { id: q.id });
            }
        }

        let declared: f64 = questions.iter().map(|q| q.weight).sum();
        if (declared - 1.0).abs() > 1e-9 {
            tracing::debug!(declared, "rescaling catalog weights to sum to 1");
            for q in &mut questions {
                q.weight /= declared;
            }
        }

        Ok(Self {
            version: version.into(),
            questions,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Questions tagged with `condition`, in catalog order, with their
    /// positions in a response vector.
    pub fn questions_for(
        &self,
        condition: Condition,
    ) -> impl Iterator<Item = (usize, &Question)> {
        self.questions
            .iter()
            .enumerate()
            .filter(move |(_, q)| q.condition == Some(condition))
    }
}

/// Serde adapter: the catalog file spells "no condition" as `"general"`.
mod condition_tag {
    use moodminder_core::models::condition::Condition;
    use serde::{Deserialize, Deserializer, Serializer};

    const GENERAL: &str = "general";

    pub fn serialize<S: Serializer>(
        value: &Option<Condition>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.map(|c| c.as_str()).unwrap_or(GENERAL))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Condition>, D::Error> {
        let tag = String::deserialize(deserializer)?;
        if tag == GENERAL {
            return Ok(None);
        }
        tag.parse().map(Some).map_err(serde::de::Error::custom)
    }
}
