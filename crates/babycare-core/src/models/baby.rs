// ABOUTME: Baby profile model owned by an authenticated parent
// ABOUTME: Baby and Gender definitions with string conversions for storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Gender recorded on a baby profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    /// Male
    Male,
    /// Female
    Female,
    /// Other or unspecified
    Other,
}

impl Gender {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// Parse from string, rejecting unknown values
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A baby profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Baby {
    /// Unique identifier
    pub id: Uuid,
    /// User id of the parent who registered the baby
    pub parent_id: String,
    /// Display name
    pub name: String,
    /// Date of birth
    pub birth_date: DateTime<Utc>,
    /// Gender
    pub gender: Gender,
    /// Weight in kilograms
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Height in centimetres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
