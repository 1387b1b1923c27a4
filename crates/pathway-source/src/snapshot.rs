//! Raw snapshots and their decoding
//!
//! A snapshot is one object with the keys `worldviews`, `outcomes`,
//! `problems` and `projects`. Decoding keeps absent collections as `None` so
//! the loader can tell "missing" from "empty".

use crate::error::LoadError;
use pathway_model::{Collection, Dataset, Outcome, Problem, Project, Worldview};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Snapshot text format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl SnapshotFormat {
    /// Format implied by a file extension
    ///
    /// # Errors
    /// Returns [`LoadError::UnsupportedFormat`] for anything other than
    /// `json`, `yaml` or `yml`
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(LoadError::UnsupportedFormat(ext)),
        }
    }

    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collections as returned by a source, before completeness is checked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSnapshot {
    /// Worldview rows, if present
    pub worldviews: Option<Vec<Worldview>>,
    /// Outcome rows, if present
    pub outcomes: Option<Vec<Outcome>>,
    /// Problem rows, if present
    pub problems: Option<Vec<Problem>>,
    /// Project rows, if present
    pub projects: Option<Vec<Project>>,
}

impl RawSnapshot {
    /// Snapshot with every collection present
    #[must_use]
    pub fn complete(dataset: Dataset) -> Self {
        Self {
            worldviews: Some(dataset.worldviews),
            outcomes: Some(dataset.outcomes),
            problems: Some(dataset.problems),
            projects: Some(dataset.projects),
        }
    }

    /// Decode snapshot text
    ///
    /// # Errors
    /// Returns [`LoadError::Parse`] if the text is not a valid snapshot
    pub fn parse(text: &str, format: SnapshotFormat) -> Result<Self, LoadError> {
        match format {
            SnapshotFormat::Json => serde_json::from_str(text)
                .map_err(|e| LoadError::parse_error(format, e.to_string())),
            SnapshotFormat::Yaml => serde_yaml::from_str(text)
                .map_err(|e| LoadError::parse_error(format, e.to_string())),
        }
    }

    /// Collections that are absent, in pathway order
    #[must_use]
    pub fn missing(&self) -> Vec<Collection> {
        Collection::ALL
            .into_iter()
            .filter(|c| match c {
                Collection::Worldviews => self.worldviews.is_none(),
                Collection::Outcomes => self.outcomes.is_none(),
                Collection::Problems => self.problems.is_none(),
                Collection::Projects => self.projects.is_none(),
            })
            .collect()
    }

    /// Turn into a dataset, failing if any collection is absent
    ///
    /// # Errors
    /// Returns [`LoadError::MissingCollection`] naming the first absent
    /// collection
    pub fn into_dataset(self) -> Result<Dataset, LoadError> {
        if let Some(collection) = self.missing().into_iter().next() {
            return Err(LoadError::MissingCollection(collection));
        }

        let dataset = Dataset::new(
            self.worldviews.unwrap_or_default(),
            self.outcomes.unwrap_or_default(),
            self.problems.unwrap_or_default(),
            self.projects.unwrap_or_default(),
        );

        for collection in Collection::ALL {
            if dataset.count(collection) == 0 {
                tracing::warn!(%collection, "snapshot collection is empty");
            }
        }

        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathway_model::RelevanceGrade;
    use pretty_assertions::assert_eq;

    #[test]
    fn format_from_extension() {
        assert_eq!(SnapshotFormat::from_path(Path::new("a.JSON")).unwrap(), SnapshotFormat::Json);
        assert_eq!(SnapshotFormat::from_path(Path::new("a.yml")).unwrap(), SnapshotFormat::Yaml);
        assert!(matches!(
            SnapshotFormat::from_path(Path::new("a.csv")),
            Err(LoadError::UnsupportedFormat(ext)) if ext == "csv"
        ));
        assert!(SnapshotFormat::from_path(Path::new("snapshot")).is_err());
    }

    #[test]
    fn json_uses_camel_case_and_lenient_grades() {
        let text = r#"{
            "worldviews": [{"id": "w1", "name": "Stewards", "color": "green"}],
            "outcomes": [{"id": "o1", "name": "Rivers", "worldviewRelevance": {"w1": "high", "w2": "??"}}],
            "problems": [{"id": "p1", "name": "Runoff", "affectedOutcomes": ["o1"], "problemCategory": ["land"]}],
            "projects": [{"id": "r1", "name": "Buffers", "addressedProblems": ["p1"], "organizations": ["River Trust"]}]
        }"#;

        let dataset = RawSnapshot::parse(text, SnapshotFormat::Json)
            .unwrap()
            .into_dataset()
            .unwrap();

        let outcome = &dataset.outcomes[0];
        assert_eq!(outcome.grade_for(&"w1".into()), Some(RelevanceGrade::High));
        assert_eq!(outcome.worldview_relevance.len(), 1);
        assert!(dataset.problems[0].affected_outcomes.contains("o1"));
        assert_eq!(dataset.projects[0].organizations, vec!["River Trust"]);
    }

    #[test]
    fn yaml_with_missing_relationships() {
        let text = "\
worldviews:
  - id: w1
    name: Stewards
outcomes:
  - id: o1
    name: Rivers
problems:
  - id: p1
    name: Runoff
projects: []
";
        let dataset = RawSnapshot::parse(text, SnapshotFormat::Yaml)
            .unwrap()
            .into_dataset()
            .unwrap();

        assert!(dataset.problems[0].affected_outcomes.is_empty());
        assert!(dataset.projects.is_empty());
    }

    #[test]
    fn missing_collection_fails_the_whole_load() {
        let text = r#"{"worldviews": [], "outcomes": [], "problems": []}"#;
        let raw = RawSnapshot::parse(text, SnapshotFormat::Json).unwrap();

        assert_eq!(raw.missing(), vec![Collection::Projects]);
        assert!(matches!(
            raw.into_dataset(),
            Err(LoadError::MissingCollection(Collection::Projects))
        ));
    }

    #[test]
    fn malformed_text_is_a_parse_error() {
        let err = RawSnapshot::parse("{\"worldviews\": [", SnapshotFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::Parse { format: SnapshotFormat::Json, .. }));
    }
}
