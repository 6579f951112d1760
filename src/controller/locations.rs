use super::{LoadOutcome, PageController};
use crate::backend::{Backend, BackendError};
use crate::page::render;
use crate::page::{ElementId, MapView, Page};
use crate::retry::{fetch_with_retry, RetryPolicy};
use tracing::{error, info, warn};

impl<B: Backend, P: Page, M: MapView> PageController<B, P, M> {
    /// Fill the location selector, retrying transient failures up to
    /// `max_attempts` times. An empty list is final.
    pub async fn load_locations(&mut self, max_attempts: u32) -> LoadOutcome {
        if !self.page.contains(ElementId::Locations) {
            error!(id = ElementId::Locations.as_str(), "location selector not found");
            self.page
                .alert("Dropdown not found in the HTML. Please check the ID!");
            return LoadOutcome::MissingSelector;
        }

        self.page
            .set_inner_html(ElementId::Locations, render::LOCATION_PLACEHOLDER);

        let policy = RetryPolicy::immediate(max_attempts)
            .with_backoff(self.location_retry.backoff_base_ms());
        info!(max_attempts = policy.max_attempts(), "fetching locations");

        let backend = &self.backend;
        let result = fetch_with_retry(&policy, BackendError::is_transient, || {
            backend.locations()
        })
        .await;

        match result {
            Ok(locations) if locations.is_empty() => {
                warn!("no locations received from backend");
                self.page
                    .alert("No locations available. Please check the backend API!");
                LoadOutcome::Empty
            }
            Ok(locations) => {
                for location in &locations {
                    self.page
                        .append_html(ElementId::Locations, &render::location_option(location));
                }
                info!(count = locations.len(), "location selector populated");
                LoadOutcome::Populated(locations.len())
            }
            Err(err) => {
                error!(attempts = err.attempts, error = %err.last, "giving up on locations");
                self.page
                    .alert("Error fetching locations after multiple attempts. Check the server!");
                LoadOutcome::Exhausted {
                    attempts: err.attempts,
                }
            }
        }
    }
}
