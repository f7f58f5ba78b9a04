//! Rating Scale
//!
//! The closed integer domain rating answers live in. Defaults to 1–5 with a
//! fallback of 5, but is a configurable parameter rather than a constant.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Closed integer domain for rating questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingScale {
    /// Lowest accepted score
    #[serde(default = "default_min")]
    pub min: i64,
    /// Highest accepted score
    #[serde(default = "default_max")]
    pub max: i64,
    /// Score used when no rating can be produced
    #[serde(default = "default_fallback")]
    pub fallback: i64,
}

fn default_min() -> i64 {
    1
}

fn default_max() -> i64 {
    5
}

fn default_fallback() -> i64 {
    5
}

impl Default for RatingScale {
    fn default() -> Self {
        Self {
            min: default_min(),
            max: default_max(),
            fallback: default_fallback(),
        }
    }
}

impl RatingScale {
    /// Clamp a value into `[min, max]`.
    pub fn clamp(&self, value: i64) -> i64 {
        value.clamp(self.min, self.max)
    }

    /// Whether the value lies inside the scale.
    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Every score in the scale, ascending.
    pub fn values(&self) -> impl Iterator<Item = i64> {
        self.min..=self.max
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.min > self.max {
            return Err(CoreError::validation(format!(
                "Rating scale min {} exceeds max {}",
                self.min, self.max
            )));
        }
        if !self.contains(self.fallback) {
            return Err(CoreError::validation(format!(
                "Rating fallback {} lies outside {}..={}",
                self.fallback, self.min, self.max
            )));
        }
        Ok(())
    }
}
