//! Subject categories for concepts.
//!
//! The set is closed: every concept belongs to exactly one of these twelve
//! categories, with [`Category::General`] as the catch-all. Categories
//! serialize to their display names (`"AI & ML"`, `"Web Development"`, ...)
//! because those names are what the viewer shows and what is stored.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Subject category of a concept.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
pub enum Category {
    Biology,
    Chemistry,
    Physics,
    Mathematics,
    #[strum(to_string = "AI & ML")]
    #[serde(rename = "AI & ML")]
    AiMl,
    #[strum(to_string = "Software Engineering")]
    #[serde(rename = "Software Engineering")]
    SoftwareEngineering,
    #[strum(to_string = "Data Science")]
    #[serde(rename = "Data Science")]
    DataScience,
    Databases,
    #[strum(to_string = "Web Development")]
    #[serde(rename = "Web Development")]
    WebDevelopment,
    Hardware,
    Cinematography,
    /// Catch-all when no keyword set matches.
    #[default]
    General,
}

impl Category {
    /// Returns all category display names.
    pub fn all_names() -> Vec<&'static str> {
        Self::iter().map(|c| c.into()).collect()
    }

    /// The display name, as stored and shown.
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Visualization model hint for the 3D viewer.
    ///
    /// Databases get their own `data-structure` hint rather than sharing the
    /// Data Science one.
    pub fn model_type(&self) -> &'static str {
        match self {
            Category::Biology | Category::Hardware => "organic-structure",
            Category::Chemistry => "molecular-model",
            Category::Physics | Category::Cinematography => "motion-simulator",
            Category::Mathematics => "geometric-shape",
            Category::AiMl => "neural-network",
            Category::SoftwareEngineering => "system-architecture",
            Category::DataScience => "data-visualization",
            Category::Databases => "data-structure",
            Category::WebDevelopment => "web-component",
            Category::General => "generic-model",
        }
    }
}
