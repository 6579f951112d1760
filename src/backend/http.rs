use crate::backend::error::BackendError;
use crate::backend::traits::Backend;
use crate::backend::types::{
    CoordsResponse, FavoritesResponse, LocationsResponse, MessageResponse, PlacesResponse,
    PredictBody, PredictResponse, RawCoords,
};
use crate::models::{AmenityKind, Coordinate, EstimateRequest, Favorite, Location, NewFavorite, Place};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_USER_AGENT: &str = "price-scout/0.1 (+estimate-client)";

/// `reqwest`-backed client for the price-estimation backend
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a client for `base_url` with no request timeout
    pub fn new(base_url: &str) -> Result<Self, BackendError> {
        Self::with_options(base_url, None, DEFAULT_USER_AGENT)
    }

    /// Create a client with an optional per-request timeout and custom user agent
    pub fn with_options(
        base_url: &str,
        timeout: Option<Duration>,
        user_agent: &str,
    ) -> Result<Self, BackendError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fail on non-2xx, then decode the body
    async fn expect_json<T: DeserializeOwned>(
        endpoint: &'static str,
        response: Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, %status, "backend returned non-success status");
            return Err(BackendError::Status { endpoint, status });
        }
        Self::decode(endpoint, response).await
    }

    /// Decode the body whatever the status; error payloads are meaningful here
    async fn decode<T: DeserializeOwned>(
        endpoint: &'static str,
        response: Response,
    ) -> Result<T, BackendError> {
        let bytes = response.bytes().await?;
        debug!(endpoint, bytes = bytes.len(), "received response body");
        serde_json::from_slice(&bytes).map_err(|source| BackendError::Decode {
            context: endpoint.to_string(),
            source,
        })
    }

    async fn message(endpoint: &'static str, response: Response) -> Result<String, BackendError> {
        let status = response.status();
        let body: MessageResponse = match Self::decode(endpoint, response).await {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(BackendError::Status { endpoint, status });
            }
            Err(err) => return Err(err),
        };
        if let Some(error) = body.error {
            return Err(BackendError::Api(error));
        }
        if !status.is_success() {
            return Err(BackendError::Status { endpoint, status });
        }
        Ok(body.message.unwrap_or_default())
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn locations(&self) -> Result<Vec<Location>, BackendError> {
        let response = self.client.get(self.url("/get_locations")).send().await?;
        let body: LocationsResponse = Self::expect_json("/get_locations", response).await?;
        Ok(body.locations)
    }

    async fn predict_price(&self, request: &EstimateRequest) -> Result<PredictResponse, BackendError> {
        let body = PredictBody {
            location: request.location.as_str(),
            total_sqft: request.total_sqft,
            bhk: request.bhk,
            bath: request.bath,
            property_age: request.property_age,
        };
        let response = self
            .client
            .post(self.url("/predict_price"))
            .json(&body)
            .send()
            .await?;
        Self::decode("/predict_price", response).await
    }

    async fn location_coords(&self, location: &Location) -> Result<CoordsResponse, BackendError> {
        let response = self
            .client
            .get(self.url("/get_location_coords"))
            .query(&[("location", location.as_str())])
            .send()
            .await?;
        let raw: RawCoords = Self::decode("/get_location_coords", response).await?;
        raw.into_response().ok_or_else(|| BackendError::Decode {
            context: "/get_location_coords".to_string(),
            source: serde::de::Error::custom("missing lat/lon"),
        })
    }

    async fn nearby_places(
        &self,
        at: Coordinate,
        kind: &AmenityKind,
        radius_m: Option<u32>,
    ) -> Result<Vec<Place>, BackendError> {
        let mut query = vec![
            ("lat", at.lat.to_string()),
            ("lon", at.lon.to_string()),
            ("type", kind.as_str().to_string()),
        ];
        if let Some(radius) = radius_m {
            query.push(("radius", radius.to_string()));
        }
        let response = self
            .client
            .get(self.url("/get_nearby_places"))
            .query(&query)
            .send()
            .await?;
        let status = response.status();
        let body: PlacesResponse = match Self::decode("/get_nearby_places", response).await {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                warn!(endpoint = "/get_nearby_places", %status, "backend returned non-success status");
                return Err(BackendError::Status {
                    endpoint: "/get_nearby_places",
                    status,
                });
            }
            Err(err) => return Err(err),
        };
        if let Some(error) = &body.error {
            warn!(%status, error = error.as_str(), "nearby lookup rejected, treating as no results");
        }
        Ok(body.places)
    }

    async fn save_favorite(&self, favorite: &NewFavorite) -> Result<String, BackendError> {
        let response = self
            .client
            .post(self.url("/save_favorite"))
            .json(favorite)
            .send()
            .await?;
        Self::message("/save_favorite", response).await
    }

    async fn favorites(&self) -> Result<Vec<Favorite>, BackendError> {
        let response = self.client.get(self.url("/get_favorites")).send().await?;
        let body: FavoritesResponse = Self::expect_json("/get_favorites", response).await?;
        Ok(body.favorites)
    }

    async fn delete_favorite(&self, id: i64) -> Result<String, BackendError> {
        let response = self
            .client
            .delete(self.url(&format!("/delete_favorite/{id}")))
            .send()
            .await?;
        Self::message("/delete_favorite", response).await
    }
}
