//! In-process [`Backend`] that replays queued replies and counts calls.

use crate::backend::types::{CoordsResponse, PredictResponse};
use crate::backend::{Backend, BackendError};
use crate::models::{AmenityKind, Coordinate, EstimateRequest, Favorite, Location, NewFavorite, Place};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

type Queue<T> = Mutex<VecDeque<Result<T, BackendError>>>;

#[derive(Default)]
pub(crate) struct ScriptedBackend {
    locations: Queue<Vec<Location>>,
    predict: Queue<PredictResponse>,
    coords: Queue<CoordsResponse>,
    places: Queue<Vec<Place>>,
    favorites: Queue<Vec<Favorite>>,
    save: Queue<String>,
    delete: Queue<String>,
    calls: Mutex<HashMap<&'static str, u32>>,
    saved: Mutex<Vec<NewFavorite>>,
    predicted: Mutex<Vec<EstimateRequest>>,
}

pub(crate) fn unavailable(endpoint: &'static str) -> BackendError {
    BackendError::Status {
        endpoint,
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn pop<T>(queue: &Queue<T>, endpoint: &'static str) -> Result<T, BackendError> {
    queue
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| Err(BackendError::Api(format!("unscripted call to {endpoint}"))))
}

impl ScriptedBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_locations(&self, reply: Result<Vec<Location>, BackendError>) -> &Self {
        self.locations.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn push_predict(&self, reply: Result<PredictResponse, BackendError>) -> &Self {
        self.predict.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn push_coords(&self, reply: Result<CoordsResponse, BackendError>) -> &Self {
        self.coords.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn push_places(&self, reply: Result<Vec<Place>, BackendError>) -> &Self {
        self.places.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn push_favorites(&self, reply: Result<Vec<Favorite>, BackendError>) -> &Self {
        self.favorites.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn push_save(&self, reply: Result<String, BackendError>) -> &Self {
        self.save.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn push_delete(&self, reply: Result<String, BackendError>) -> &Self {
        self.delete.lock().unwrap().push_back(reply);
        self
    }

    pub(crate) fn calls(&self, endpoint: &str) -> u32 {
        self.calls.lock().unwrap().get(endpoint).copied().unwrap_or(0)
    }

    pub(crate) fn total_calls(&self) -> u32 {
        self.calls.lock().unwrap().values().sum()
    }

    pub(crate) fn saved(&self) -> Vec<NewFavorite> {
        self.saved.lock().unwrap().clone()
    }

    pub(crate) fn predicted(&self) -> Vec<EstimateRequest> {
        self.predicted.lock().unwrap().clone()
    }

    fn record(&self, endpoint: &'static str) {
        *self.calls.lock().unwrap().entry(endpoint).or_insert(0) += 1;
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn locations(&self) -> Result<Vec<Location>, BackendError> {
        self.record("/get_locations");
        pop(&self.locations, "/get_locations")
    }

    async fn predict_price(&self, request: &EstimateRequest) -> Result<PredictResponse, BackendError> {
        self.record("/predict_price");
        self.predicted.lock().unwrap().push(request.clone());
        pop(&self.predict, "/predict_price")
    }

    async fn location_coords(&self, _location: &Location) -> Result<CoordsResponse, BackendError> {
        self.record("/get_location_coords");
        pop(&self.coords, "/get_location_coords")
    }

    async fn nearby_places(
        &self,
        _at: Coordinate,
        _kind: &AmenityKind,
        _radius_m: Option<u32>,
    ) -> Result<Vec<Place>, BackendError> {
        self.record("/get_nearby_places");
        pop(&self.places, "/get_nearby_places")
    }

    async fn save_favorite(&self, favorite: &NewFavorite) -> Result<String, BackendError> {
        self.record("/save_favorite");
        self.saved.lock().unwrap().push(favorite.clone());
        pop(&self.save, "/save_favorite")
    }

    async fn favorites(&self) -> Result<Vec<Favorite>, BackendError> {
        self.record("/get_favorites");
        pop(&self.favorites, "/get_favorites")
    }

    async fn delete_favorite(&self, _id: i64) -> Result<String, BackendError> {
        self.record("/delete_favorite");
        pop(&self.delete, "/delete_favorite")
    }
}
