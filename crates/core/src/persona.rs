//! Persona Types
//!
//! A persona is a simulated respondent. It is loaded once per generation
//! session and never mutated while answers are being produced.

use serde::{Deserialize, Serialize};

/// A simulated respondent with descriptive attributes and recent activity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Unique persona name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Personality traits, de-duplicated, in source order
    #[serde(default)]
    pub personality: Vec<String>,
    /// Interests, de-duplicated, in source order
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_activity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wealth_level: Option<String>,
    /// Recent activity lines, most recent last
    #[serde(default)]
    pub activity_history: Vec<String>,
}

impl Persona {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether any activity history was loaded for this persona.
    pub fn has_history(&self) -> bool {
        !self.activity_history.is_empty()
    }
}

/// Push `item` unless an equal entry is already present.
pub fn push_unique(items: &mut Vec<String>, item: impl Into<String>) {
    let item = item.into();
    if !item.is_empty() && !items.contains(&item) {
        items.push(item);
    }
}
