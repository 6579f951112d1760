mod estimate;
mod favorites;
mod locations;
mod map;
pub mod outcome;

#[cfg(test)]
pub(crate) mod scripted;

pub use outcome::{
    CompareOutcome, DeleteOutcome, EstimateOutcome, FavoritesOutcome, LoadOutcome, NearbyOutcome,
    SaveOutcome, SelectOutcome,
};

use crate::backend::Backend;
use crate::config::{ClientConfig, FavoriteAgePolicy};
use crate::models::{Coordinate, Estimate};
use crate::page::render;
use crate::page::{ElementId, MapView, MarkerId, Page};
use crate::retry::RetryPolicy;
use tracing::info;

pub const DEFAULT_CENTER: Coordinate = Coordinate::new(12.9716, 77.5946);
pub const DEFAULT_ZOOM: u8 = 14;
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";

/// Page controller: owns the backend client, the page, the map widget and
/// the state shared between handlers.
///
/// Handlers take `&mut self`, so shared state only changes between awaits on
/// the caller's task. Concurrent handlers are not sequenced; whichever
/// response lands last owns the view.
pub struct PageController<B, P, M> {
    backend: B,
    page: P,
    map: M,
    location_retry: RetryPolicy,
    favorite_age: FavoriteAgePolicy,
    nearby_radius_m: Option<u32>,
    current_marker: Option<MarkerId>,
    user_coordinate: Option<Coordinate>,
    nearby_markers: Vec<MarkerId>,
    last_estimate: Option<Estimate>,
}

impl<B: Backend, P: Page, M: MapView> PageController<B, P, M> {
    pub fn new(backend: B, page: P, map: M) -> Self {
        Self {
            backend,
            page,
            map,
            location_retry: RetryPolicy::default(),
            favorite_age: FavoriteAgePolicy::default(),
            nearby_radius_m: None,
            current_marker: None,
            user_coordinate: None,
            nearby_markers: Vec::new(),
            last_estimate: None,
        }
    }

    pub fn with_config(mut self, config: &ClientConfig) -> Self {
        self.location_retry = config.location_retry();
        self.favorite_age = config.favorite_age;
        self
    }

    pub fn with_nearby_radius(mut self, radius_m: Option<u32>) -> Self {
        self.nearby_radius_m = radius_m;
        self
    }

    /// Page-load sequence: map, slider label, then the location list.
    pub async fn init(&mut self) -> LoadOutcome {
        self.init_map();
        self.sync_property_age_label();
        self.load_locations(self.location_retry.max_attempts()).await
    }

    fn init_map(&mut self) {
        self.map.add_tile_layer(TILE_URL, TILE_ATTRIBUTION);
        self.map.set_view(DEFAULT_CENTER, DEFAULT_ZOOM);
        let marker = self
            .map
            .add_marker(DEFAULT_CENTER, "Bangalore (Default Location)");
        self.map.open_popup(marker);
        info!("map initialised at default center");
    }

    /// Mirror the property-age slider into its label.
    pub fn sync_property_age_label(&mut self) {
        if !self.page.contains(ElementId::PropertyAge)
            || !self.page.contains(ElementId::PropertyAgeValue)
        {
            return;
        }
        let value = self.page.value(ElementId::PropertyAge).unwrap_or_default();
        self.page.set_text(ElementId::PropertyAgeValue, &value);
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn user_coordinate(&self) -> Option<Coordinate> {
        self.user_coordinate
    }

    pub fn current_marker(&self) -> Option<MarkerId> {
        self.current_marker
    }

    pub fn nearby_markers(&self) -> &[MarkerId] {
        &self.nearby_markers
    }

    pub fn last_estimate(&self) -> Option<&Estimate> {
        self.last_estimate.as_ref()
    }

    fn show_paragraph(&mut self, id: ElementId, text: &str) {
        self.page.set_inner_html(id, &render::paragraph(text));
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
