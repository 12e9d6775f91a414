use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::alert::ALERT_LEAD_SECS;

/// Opaque recipe identifier, assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(pub i64);

impl RecipeId {
    /// Millisecond timestamp, bumped past any id already in `taken`.
    pub fn generate<'a>(taken: impl IntoIterator<Item = &'a RecipeId>) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        let max_taken = taken.into_iter().map(|id| id.0).max();
        match max_taken {
            Some(max) if max >= now => RecipeId(max + 1),
            _ => RecipeId(now),
        }
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RecipeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RecipeId)
    }
}

/// One step of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub description: String,

    #[serde(rename = "duration")]
    pub duration_secs: u32,

    /// Start the next step's countdown as soon as this one completes.
    #[serde(rename = "autoNext", default)]
    pub auto_advance: bool,

    /// Alert shortly before this step's countdown reaches zero.
    #[serde(rename = "alarmBeforeEnd", default)]
    pub alert_before_end: bool,
}

impl Step {
    pub fn new(description: impl Into<String>, duration_secs: u32) -> Self {
        Self {
            description: description.into(),
            duration_secs,
            auto_advance: false,
            alert_before_end: false,
        }
    }

    pub fn with_auto_advance(mut self, auto_advance: bool) -> Self {
        self.auto_advance = auto_advance;
        self
    }

    pub fn with_alert(mut self, alert_before_end: bool) -> Self {
        self.alert_before_end = alert_before_end;
        self
    }

    /// The alert flag only means something for steps long enough to
    /// hold the full lead time.
    pub fn alert_eligible(&self) -> bool {
        self.alert_before_end && self.duration_secs >= ALERT_LEAD_SECS
    }
}

/// An ordered list of steps. Read-only for the duration of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Recipe {
    pub fn new(id: RecipeId, name: impl Into<String>, steps: Vec<Step>) -> Self {
        Self {
            id,
            name: name.into(),
            steps,
        }
    }

    /// Save-time cleanup: trims the name and drops steps whose
    /// description is blank.
    pub fn sanitized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.steps.retain(|step| !step.description.trim().is_empty());
        self
    }

    /// Sum of all step durations.
    pub fn total_secs(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.duration_secs)).sum()
    }
}
