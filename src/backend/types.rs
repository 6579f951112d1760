use crate::models::{Coordinate, Favorite, Location, Place};
use serde::{Deserialize, Deserializer, Serialize};

/// A list field that may be absent or `null`; both read as empty
fn list_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationsResponse {
    #[serde(default, deserialize_with = "list_or_null")]
    pub locations: Vec<Location>,
}

/// Body of `POST /predict_price`
#[derive(Debug, Clone, Serialize)]
pub struct PredictBody<'a> {
    pub location: &'a str,
    pub total_sqft: f64,
    pub bhk: u32,
    pub bath: u32,
    pub property_age: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PredictDetails {
    pub location_tier_mult: Option<f64>,
}

/// Prediction result. `estimated_price` is absent when the model failed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PredictResponse {
    pub estimated_price: Option<f64>,
    #[serde(default)]
    pub details: Option<PredictDetails>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Where the backend resolved a coordinate from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordsSource {
    Db,
    Api,
}

/// Geocode result: either a coordinate or an error message
#[derive(Debug, Clone, PartialEq)]
pub enum CoordsResponse {
    Found {
        at: Coordinate,
        source: Option<CoordsSource>,
    },
    NotFound(String),
}

/// Raw shape of `/get_location_coords`; lat/lon arrive as numbers or numeric strings
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawCoords {
    #[serde(default)]
    pub lat: Option<serde_json::Value>,
    #[serde(default)]
    pub lon: Option<serde_json::Value>,
    #[serde(default)]
    pub source: Option<CoordsSource>,
    #[serde(default)]
    pub error: Option<String>,
}

impl RawCoords {
    pub(crate) fn into_response(self) -> Option<CoordsResponse> {
        if let Some(error) = self.error {
            return Some(CoordsResponse::NotFound(error));
        }
        let lat = as_f64(self.lat.as_ref()?)?;
        let lon = as_f64(self.lon.as_ref()?)?;
        Some(CoordsResponse::Found {
            at: Coordinate::new(lat, lon),
            source: self.source,
        })
    }
}

fn as_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacesResponse {
    #[serde(default, deserialize_with = "list_or_null")]
    pub places: Vec<Place>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FavoritesResponse {
    #[serde(default, deserialize_with = "list_or_null")]
    pub favorites: Vec<Favorite>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Option<CoordsResponse> {
        serde_json::from_value::<RawCoords>(value)
            .unwrap()
            .into_response()
    }

    #[test]
    fn coords_accept_numeric_strings() {
        let got = parse(json!({"lat": "12.91", "lon": 77.64, "source": "db"}));
        assert_eq!(
            got,
            Some(CoordsResponse::Found {
                at: Coordinate::new(12.91, 77.64),
                source: Some(CoordsSource::Db),
            })
        );
    }

    #[test]
    fn coords_error_wins_over_missing_fields() {
        let got = parse(json!({"error": "Coordinates not found"}));
        assert_eq!(
            got,
            Some(CoordsResponse::NotFound("Coordinates not found".to_string()))
        );
    }

    #[test]
    fn coords_without_lat_are_malformed() {
        assert_eq!(parse(json!({"lon": 1.0})), None);
    }

    #[test]
    fn null_lists_read_as_empty() {
        let locations: LocationsResponse =
            serde_json::from_value(json!({"locations": null})).unwrap();
        assert!(locations.locations.is_empty());

        let places: PlacesResponse =
            serde_json::from_value(json!({"places": null, "error": "Missing lat/lon"})).unwrap();
        assert!(places.places.is_empty());
        assert_eq!(places.error.as_deref(), Some("Missing lat/lon"));

        let favorites: FavoritesResponse = serde_json::from_value(json!({})).unwrap();
        assert!(favorites.favorites.is_empty());
    }

    #[test]
    fn predict_response_tolerates_missing_price() {
        let resp: PredictResponse =
            serde_json::from_value(json!({"details": {"location_tier_mult": 1.5}})).unwrap();
        assert_eq!(resp.estimated_price, None);
        assert_eq!(
            resp.details.and_then(|d| d.location_tier_mult),
            Some(1.5)
        );
    }
}
