// ABOUTME: Care activity records (diaper, sleep, bath, medicine) logged against a baby
// ABOUTME: Activity and ActivityType definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Kind of care activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    /// Diaper change (details: wet, dirty, both)
    Diaper,
    /// Bowel movement (details: color, consistency)
    Poop,
    /// Sleep (details: duration)
    Sleep,
    /// Bath
    Bath,
    /// Medicine (details: name, dosage)
    Medicine,
    /// Anything else
    Other,
}

impl ActivityType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Diaper => "diaper",
            Self::Poop => "poop",
            Self::Sleep => "sleep",
            Self::Bath => "bath",
            Self::Medicine => "medicine",
            Self::Other => "other",
        }
    }

    /// Parse from string, rejecting unknown values
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "diaper" => Some(Self::Diaper),
            "poop" => Some(Self::Poop),
            "sleep" => Some(Self::Sleep),
            "bath" => Some(Self::Bath),
            "medicine" => Some(Self::Medicine),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A logged care activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Unique identifier
    pub id: Uuid,
    /// Baby this activity belongs to
    pub baby_id: Uuid,
    /// Kind of activity
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Type-specific key/value details
    pub details: BTreeMap<String, String>,
    /// When the activity started
    pub start_time: DateTime<Utc>,
    /// When the activity ended, for activities with a duration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Free-text notes
    pub notes: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
