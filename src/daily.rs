use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{Datelike, Local};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{LectioError, Result};

static DATE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})-(\d{2})$").expect("invalid date token regex"));

/// The `MM-DD` token that keys a day in the reading plan and in every
/// annotation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateToken {
    month: u32,
    day: u32,
}

impl DateToken {
    /// A token for the given month and day; `None` when out of range.
    pub fn new(month: u32, day: u32) -> Option<Self> {
        if (1..=12).contains(&month) && (1..=31).contains(&day) {
            Some(Self { month, day })
        } else {
            None
        }
    }

    /// Parses the exact two-digit `MM-DD` shape.
    pub fn parse(input: &str) -> Option<Self> {
        let caps = DATE_TOKEN_RE.captures(input)?;
        let month: u32 = caps.get(1)?.as_str().parse().ok()?;
        let day: u32 = caps.get(2)?.as_str().parse().ok()?;
        Self::new(month, day)
    }

    /// Today's token, by the local clock.
    pub fn today() -> Self {
        let now = Local::now();
        Self {
            month: now.month(),
            day: now.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl fmt::Display for DateToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

/// A day's worth of passage references in the plan file, either a
/// single reference string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
enum PlanEntry {
    One(String),
    Many(Vec<String>),
}

/// A yearly reading plan: `MM-DD` tokens mapped to the day's passage
/// references.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingPlan {
    days: BTreeMap<String, PlanEntry>,
}

impl ReadingPlan {
    /// Loads a reading plan from a JSON file.
    ///
    /// Unlike reference parsing, a missing or malformed plan file is a
    /// real error: without a plan there is nothing to read.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| LectioError::Plan {
            message: format!("failed to read reading plan: {}", e),
            path: path.display().to_string(),
        })?;

        let plan: ReadingPlan = serde_json::from_str(&contents).map_err(|e| LectioError::Plan {
            message: format!("failed to parse reading plan: {}", e),
            path: path.display().to_string(),
        })?;

        debug!(days = plan.days.len(), "loaded reading plan");
        Ok(plan)
    }

    /// The passage references scheduled for a day; empty when the plan
    /// has no entry for it.
    pub fn references_for(&self, date: &DateToken) -> Vec<String> {
        match self.days.get(&date.to_string()) {
            Some(PlanEntry::One(reference)) => vec![reference.clone()],
            Some(PlanEntry::Many(references)) => references.clone(),
            None => Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
