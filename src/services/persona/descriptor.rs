//! Persona Descriptor Parsing
//!
//! Each persona lives in its own directory with an `agent.json` document.
//! Two shapes are accepted: a flat one (`age`, `personality`, `interests`,
//! `lifestyle`, `current_activity`) and a nested one where the attributes sit
//! under `scratch` (`innate`, `learned`) with the current activity in
//! `currently`. Nested values win when both are present.

use std::path::Path;

use persona_survey_core::persona::push_unique;
use persona_survey_core::Persona;
use serde::Deserialize;

use crate::utils::error::{AppError, AppResult};

/// File name of the descriptor inside each persona directory
pub const DESCRIPTOR_FILE: &str = "agent.json";

/// Separators accepted inside a single-string trait list
const TRAIT_SEPARATORS: [char; 4] = [',', '，', '、', ';'];

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TraitList {
    Many(Vec<String>),
    One(String),
}

impl TraitList {
    fn extend_into(self, target: &mut Vec<String>) {
        match self {
            TraitList::Many(items) => {
                for item in items {
                    push_unique(target, item.trim());
                }
            }
            TraitList::One(text) => {
                for item in text.split(TRAIT_SEPARATORS.as_slice()) {
                    push_unique(target, item.trim());
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AgeValue {
    Number(u32),
    Text(String),
}

impl AgeValue {
    fn into_age(self) -> Option<u32> {
        match self {
            AgeValue::Number(age) => Some(age),
            AgeValue::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct Scratch {
    #[serde(default)]
    age: Option<AgeValue>,
    #[serde(default)]
    innate: Option<TraitList>,
    #[serde(default)]
    learned: Option<TraitList>,
    #[serde(default)]
    lifestyle: Option<String>,
    #[serde(default)]
    family_background: Option<String>,
    #[serde(default)]
    wealth_level: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AgentDescriptor {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    age: Option<AgeValue>,
    #[serde(default)]
    personality: Option<TraitList>,
    #[serde(default)]
    interests: Option<TraitList>,
    #[serde(default)]
    lifestyle: Option<String>,
    #[serde(default)]
    current_activity: Option<String>,
    #[serde(default)]
    currently: Option<String>,
    #[serde(default)]
    family_background: Option<String>,
    #[serde(default)]
    wealth_level: Option<String>,
    #[serde(default)]
    scratch: Option<Scratch>,
}

/// Persona name derived from its directory: underscores become spaces.
pub fn name_from_dir(dir_name: &str) -> String {
    dir_name.replace('_', " ")
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a descriptor document. `fallback_name` is used when the document
/// carries no `name` of its own.
pub fn parse_descriptor(content: &str, fallback_name: &str) -> AppResult<Persona> {
    let descriptor: AgentDescriptor = serde_json::from_str(content)?;
    let scratch = descriptor.scratch.unwrap_or_default();

    let name = non_blank(descriptor.name).unwrap_or_else(|| fallback_name.to_string());
    if name.trim().is_empty() {
        return Err(AppError::validation("persona name must not be empty"));
    }

    let mut persona = Persona::new(name);
    persona.age = scratch
        .age
        .and_then(AgeValue::into_age)
        .or_else(|| descriptor.age.and_then(AgeValue::into_age));

    if let Some(traits) = scratch.innate.or(descriptor.personality) {
        traits.extend_into(&mut persona.personality);
    }
    if let Some(interests) = scratch.learned.or(descriptor.interests) {
        interests.extend_into(&mut persona.interests);
    }

    persona.lifestyle = non_blank(scratch.lifestyle).or_else(|| non_blank(descriptor.lifestyle));
    persona.current_activity =
        non_blank(descriptor.currently).or_else(|| non_blank(descriptor.current_activity));
    persona.family_background =
        non_blank(scratch.family_background).or_else(|| non_blank(descriptor.family_background));
    persona.wealth_level =
        non_blank(scratch.wealth_level).or_else(|| non_blank(descriptor.wealth_level));

    Ok(persona)
}

/// Load the descriptor inside `dir`, naming the persona after the directory.
pub fn load_descriptor(dir: &Path) -> AppResult<Persona> {
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let content = std::fs::read_to_string(dir.join(DESCRIPTOR_FILE))?;
    parse_descriptor(&content, &name_from_dir(&dir_name))
}
