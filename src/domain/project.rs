use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of outdoor structure being planned.
///
/// Wire format is the Swedish key used by the web client (`"altan"`,
/// `"förråd"`, ...). Keys the service does not recognise are kept in
/// [`ProjectType::Unknown`] so they can still be estimated and logged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectType {
    OutdoorKitchen,
    Deck,
    Shed,
    Pergola,
    Fence,
    Carport,
    PlanterBox,
    Playhouse,
    Greenhouse,
    Other,
    Unknown(String),
}

impl ProjectType {
    /// Every recognised project type, in the order the client presents them.
    pub const KNOWN: [ProjectType; 10] = [
        Self::OutdoorKitchen,
        Self::Deck,
        Self::Shed,
        Self::Pergola,
        Self::Fence,
        Self::Carport,
        Self::PlanterBox,
        Self::Playhouse,
        Self::Greenhouse,
        Self::Other,
    ];

    pub fn from_key(key: &str) -> Self {
        match key {
            "utekök" => Self::OutdoorKitchen,
            "altan" => Self::Deck,
            "förråd" => Self::Shed,
            "pergola" => Self::Pergola,
            "staket" => Self::Fence,
            "carport" => Self::Carport,
            "blomlåda" => Self::PlanterBox,
            "lekstuga" => Self::Playhouse,
            "växthus" => Self::Greenhouse,
            "övrigt" => Self::Other,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::OutdoorKitchen => "utekök",
            Self::Deck => "altan",
            Self::Shed => "förråd",
            Self::Pergola => "pergola",
            Self::Fence => "staket",
            Self::Carport => "carport",
            Self::PlanterBox => "blomlåda",
            Self::Playhouse => "lekstuga",
            Self::Greenhouse => "växthus",
            Self::Other => "övrigt",
            Self::Unknown(key) => key,
        }
    }

    /// Label shown in the project picker.
    pub fn label(&self) -> &'static str {
        match self {
            Self::OutdoorKitchen => "Utekök",
            Self::Deck => "Altan / Trädäck",
            Self::Shed => "Förråd",
            Self::Pergola => "Pergola",
            Self::Fence => "Staket",
            Self::Carport => "Carport",
            Self::PlanterBox => "Blomlåda / Odlingslåda",
            Self::Playhouse => "Lekstuga",
            Self::Greenhouse => "Växthus",
            Self::Other => "Övrigt (beskriv nedan)",
            Self::Unknown(_) => "Byggprojekt",
        }
    }

    /// Short label printed on placeholder images.
    pub fn short_label(&self) -> &'static str {
        match self {
            Self::Deck => "Altan",
            Self::PlanterBox => "Blomlåda",
            Self::Other => "Projekt",
            other => other.label(),
        }
    }
}

impl Default for ProjectType {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<String> for ProjectType {
    fn from(key: String) -> Self {
        Self::from_key(&key)
    }
}

impl From<ProjectType> for String {
    fn from(project_type: ProjectType) -> Self {
        project_type.key().to_string()
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Outer size of the structure in meters.
///
/// Missing fields deserialize as zero; the estimator treats any
/// non-finite or negative value the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub depth: f64,
    #[serde(default)]
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, depth: f64, height: f64) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    pub fn sanitized(self) -> Self {
        fn clamp(v: f64) -> f64 {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                0.0
            }
        }

        Self {
            width: clamp(self.width),
            depth: clamp(self.depth),
            height: clamp(self.height),
        }
    }

    /// Footprint area in square meters.
    pub fn footprint(&self) -> f64 {
        self.width * self.depth
    }
}

/// Rectangle the user marked on the yard photo, in source-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawingRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Everything the planner needs to know about the requested structure.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSpec {
    pub project_type: ProjectType,
    pub dimensions: Dimensions,
    pub description: String,
}

impl ProjectSpec {
    pub fn new(
        project_type: ProjectType,
        dimensions: Dimensions,
        description: Option<String>,
    ) -> Self {
        Self {
            project_type,
            dimensions,
            description: description.unwrap_or_default(),
        }
    }
}
