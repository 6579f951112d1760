use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Location identifier as served by the backend; doubles as display label and query key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location(pub String);

impl Location {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A resolved latitude/longitude pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Feature values submitted to the price model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRequest {
    pub location: Location,
    pub total_sqft: f64,
    pub bhk: u32,
    pub bath: u32,
    pub property_age: u32,
}

/// The most recent successful prediction, kept in memory for saving as a favorite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub request: EstimateRequest,
    /// Price in lakh, always non-negative
    pub price: f64,
    pub estimated_at: DateTime<Utc>,
}

/// A saved property estimate as stored by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub location: Location,
    pub sqft: f64,
    pub bhk: u32,
    pub bath: u32,
    pub property_age: u32,
    pub price: f64,
}

/// Body of a save-favorite request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewFavorite {
    pub location: Location,
    pub sqft: i64,
    pub bhk: u32,
    pub bath: u32,
    #[serde(rename = "propertyAge")]
    pub property_age: u32,
    pub price: f64,
}

/// Category of nearby points of interest
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmenityKind {
    School,
    Hospital,
    Restaurant,
    Mall,
    Park,
    /// Any other amenity tag the backend understands
    Other(String),
}

impl AmenityKind {
    pub fn as_str(&self) -> &str {
        match self {
            AmenityKind::School => "school",
            AmenityKind::Hospital => "hospital",
            AmenityKind::Restaurant => "restaurant",
            AmenityKind::Mall => "mall",
            AmenityKind::Park => "park",
            AmenityKind::Other(tag) => tag,
        }
    }
}

impl From<&str> for AmenityKind {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "school" => AmenityKind::School,
            "hospital" => AmenityKind::Hospital,
            "restaurant" => AmenityKind::Restaurant,
            "mall" => AmenityKind::Mall,
            "park" => AmenityKind::Park,
            other => AmenityKind::Other(other.to_string()),
        }
    }
}

impl fmt::Display for AmenityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A nearby point of interest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl Place {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}
