// ABOUTME: Core data models for the baby-care tracking API
// ABOUTME: Re-exports Baby, FoodIntake, Activity, and nutrition lookup structures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `Baby`: a profile registered by a parent
//! - `FoodIntake`: one feeding with optional nutrition
//! - `Activity`: diaper, sleep, bath, medicine and other care events
//! - `FoodLookupResult`: normalized output of the nutrition lookup chain

mod activity;
mod baby;
mod food_intake;
mod nutrition;

pub use activity::{Activity, ActivityType};
pub use baby::{Baby, Gender};
pub use food_intake::{FoodIntake, FoodType, IntakeUnit, NutritionalInfo};
pub use nutrition::{FoodLookupResult, Ingredient, LookupSource, NutrientProfile};
