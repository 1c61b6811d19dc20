//! Exercise catalog: loading, validation and lookup.

use std::collections::HashSet;
use std::path::Path;

use birdbrain_algo::{Exercise, Skill};

const DEFAULT_EXERCISES: &str = include_str!("../data/exercises.json");

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read exercises: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse exercises: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid exercise {id}: {reason}")]
    Invalid { id: String, reason: String },
    #[error("Exercise with ID {0} not found")]
    ExerciseNotFound(String),
}

#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    exercises: Vec<Exercise>,
}

impl ExerciseCatalog {
    pub fn new(exercises: Vec<Exercise>) -> Result<Self, CatalogError> {
        validate(&exercises)?;
        Ok(Self { exercises })
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let exercises: Vec<Exercise> = serde_json::from_str(raw)?;
        let catalog = Self::new(exercises)?;
        if catalog.is_empty() {
            tracing::warn!("exercise catalog is empty, every /next request will find no candidates");
        }
        Ok(catalog)
    }

    /// Built-in catalog shipped with the binary
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_EXERCISES)
    }

    /// Loads `path`, or the built-in catalog when the file does not exist
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                let catalog = Self::from_json(&raw)?;
                tracing::info!(path = %path.display(), count = catalog.len(), "exercise catalog loaded");
                Ok(catalog)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "exercise file not found, using built-in catalog");
                Self::builtin()
            }
            Err(err) => Err(err.into()),
        }
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn get(&self, id: &str) -> Result<&Exercise, CatalogError> {
        self.exercises
            .iter()
            .find(|ex| ex.id == id)
            .ok_or_else(|| CatalogError::ExerciseNotFound(id.to_string()))
    }

    /// Distinct skills in order of first appearance
    pub fn skills(&self) -> Vec<Skill> {
        let mut seen = HashSet::new();
        self.exercises
            .iter()
            .filter(|ex| seen.insert(ex.skill.as_str()))
            .map(|ex| ex.skill.clone())
            .collect()
    }

    /// Catalog order with the given ids removed
    pub fn available(&self, exclude_ids: &[String]) -> Vec<Exercise> {
        self.exercises
            .iter()
            .filter(|ex| !exclude_ids.contains(&ex.id))
            .cloned()
            .collect()
    }
}

fn validate(exercises: &[Exercise]) -> Result<(), CatalogError> {
    let mut ids = HashSet::new();

    for ex in exercises {
        let invalid = |reason: &str| CatalogError::Invalid {
            id: ex.id.clone(),
            reason: reason.to_string(),
        };

        if ex.id.trim().is_empty() {
            return Err(invalid("empty id"));
        }
        if ex.skill.trim().is_empty() {
            return Err(invalid("empty skill"));
        }
        if ex.choices.is_empty() {
            return Err(invalid("no choices"));
        }
        if ex.answer_index >= ex.choices.len() {
            return Err(invalid("answer_index out of range"));
        }
        if !ids.insert(ex.id.as_str()) {
            return Err(invalid("duplicate id"));
        }
    }

    Ok(())
}
