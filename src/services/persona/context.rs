//! Persona Context
//!
//! The read-only set of personas for one batch. Built once, then shared by
//! reference (or `Arc`) with every fill task; there is no way to mutate it
//! after construction.

use std::collections::BTreeMap;
use std::path::Path;

use persona_survey_core::Persona;

use super::activity_log::parse_activity_log;
use super::descriptor::{load_descriptor, DESCRIPTOR_FILE};
use crate::utils::error::{AppError, AppResult};

/// Immutable persona lookup keyed by name.
#[derive(Debug, Clone, Default)]
pub struct PersonaContext {
    personas: BTreeMap<String, Persona>,
}

impl PersonaContext {
    /// Build a context from already-constructed personas. A later persona with
    /// the same name replaces an earlier one.
    pub fn from_personas(personas: impl IntoIterator<Item = Persona>) -> Self {
        let personas = personas
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();
        Self { personas }
    }

    /// Load every `<dir>/<Persona_Name>/agent.json` under `personas_dir`,
    /// attaching activity history from `activity_log` when given.
    ///
    /// Descriptors that fail to parse are skipped with a warning. An
    /// unreadable personas directory is an error; a missing activity log
    /// only means no persona has history.
    pub fn load(
        personas_dir: &Path,
        activity_log: Option<&Path>,
        history_lines: usize,
    ) -> AppResult<Self> {
        let entries = std::fs::read_dir(personas_dir).map_err(|e| {
            AppError::config(format!(
                "Cannot read personas directory {}: {}",
                personas_dir.display(),
                e
            ))
        })?;

        let mut personas = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_dir() || !path.join(DESCRIPTOR_FILE).is_file() {
                continue;
            }
            match load_descriptor(&path) {
                Ok(persona) => personas.push(persona),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping persona descriptor");
                }
            }
        }

        let history = match activity_log {
            Some(log) => match std::fs::read_to_string(log) {
                Ok(content) => parse_activity_log(&content, history_lines),
                Err(e) => {
                    tracing::warn!(path = %log.display(), error = %e, "activity log unavailable");
                    Default::default()
                }
            },
            None => Default::default(),
        };

        for persona in &mut personas {
            if let Some(lines) = history.get(&persona.name) {
                persona.activity_history = lines.clone();
            }
        }

        let context = Self::from_personas(personas);
        tracing::info!(
            personas = context.len(),
            with_history = context.iter().filter(|p| p.has_history()).count(),
            "persona context loaded"
        );
        Ok(context)
    }

    /// Look up a persona by name
    pub fn get(&self, name: &str) -> Option<&Persona> {
        self.personas.get(name)
    }

    /// Persona names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.personas.keys().cloned().collect()
    }

    /// Personas in name order
    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        self.personas.values()
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}
