use crate::backend::error::BackendError;
use crate::backend::types::{CoordsResponse, PredictResponse};
use crate::models::{AmenityKind, Coordinate, EstimateRequest, Favorite, Location, NewFavorite, Place};
use async_trait::async_trait;

/// Endpoints of the price-estimation backend consumed by the page controller
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /get_locations`
    async fn locations(&self) -> Result<Vec<Location>, BackendError>;

    /// `POST /predict_price`
    async fn predict_price(&self, request: &EstimateRequest) -> Result<PredictResponse, BackendError>;

    /// `GET /get_location_coords`
    async fn location_coords(&self, location: &Location) -> Result<CoordsResponse, BackendError>;

    /// `GET /get_nearby_places`
    async fn nearby_places(
        &self,
        at: Coordinate,
        kind: &AmenityKind,
        radius_m: Option<u32>,
    ) -> Result<Vec<Place>, BackendError>;

    /// `POST /save_favorite`, returns the backend's confirmation message
    async fn save_favorite(&self, favorite: &NewFavorite) -> Result<String, BackendError>;

    /// `GET /get_favorites`
    async fn favorites(&self) -> Result<Vec<Favorite>, BackendError>;

    /// `DELETE /delete_favorite/{id}`, returns the backend's confirmation message
    async fn delete_favorite(&self, id: i64) -> Result<String, BackendError>;
}
