use super::{CompareOutcome, DeleteOutcome, FavoritesOutcome, PageController, SaveOutcome};
use crate::backend::Backend;
use crate::config::FavoriteAgePolicy;
use crate::models::{Estimate, NewFavorite};
use crate::page::render;
use crate::page::{ElementId, MapView, Page};
use rand::Rng;
use tracing::{error, info};

/// Build the save payload from an estimate. Square footage is truncated to
/// whole feet.
pub(crate) fn new_favorite(estimate: &Estimate, age_policy: FavoriteAgePolicy) -> NewFavorite {
    let property_age = match age_policy {
        FavoriteAgePolicy::FromEstimate => estimate.request.property_age,
        FavoriteAgePolicy::Simulated => rand::rng().random_range(1..=20),
    };
    #[allow(clippy::cast_possible_truncation)]
    let sqft = estimate.request.total_sqft.trunc() as i64;
    NewFavorite {
        location: estimate.request.location.clone(),
        sqft,
        bhk: estimate.request.bhk,
        bath: estimate.request.bath,
        property_age,
        price: estimate.price,
    }
}

impl<B: Backend, P: Page, M: MapView> PageController<B, P, M> {
    /// Save the last estimate as a favorite, then reload the list.
    pub async fn save_favorite(&mut self) -> SaveOutcome {
        let Some(estimate) = self.last_estimate.as_ref() else {
            self.page.alert("Estimate the price first before saving.");
            return SaveOutcome::NoEstimate;
        };
        let favorite = new_favorite(estimate, self.favorite_age);

        match self.backend.save_favorite(&favorite).await {
            Ok(message) => {
                info!(location = %favorite.location, price = favorite.price, "favorite saved");
                self.page.alert(&message);
                SaveOutcome::Saved(self.load_favorites().await)
            }
            Err(err) => {
                error!(error = %err, "error saving favorite");
                self.page.alert("Could not save favorite.");
                SaveOutcome::Failed
            }
        }
    }

    /// Re-render the whole favorites list from the backend.
    pub async fn load_favorites(&mut self) -> FavoritesOutcome {
        match self.backend.favorites().await {
            Ok(favorites) => {
                self.page.set_inner_html(ElementId::FavoritesList, "");
                if favorites.is_empty() {
                    self.show_paragraph(ElementId::FavoritesList, "No saved properties found.");
                    return FavoritesOutcome::Empty;
                }
                for fav in &favorites {
                    self.page
                        .append_html(ElementId::FavoritesList, &render::favorite_item(fav));
                }
                self.page.set_visible(ElementId::SavedPropertiesSection, true);
                FavoritesOutcome::Listed(favorites.len())
            }
            Err(err) => {
                error!(error = %err, "error loading favorites");
                self.show_paragraph(ElementId::FavoritesList, "Error loading saved properties.");
                FavoritesOutcome::Failed
            }
        }
    }

    /// Delete a favorite by id, then reload the list exactly once.
    pub async fn delete_favorite(&mut self, id: i64) -> DeleteOutcome {
        let deleted = match self.backend.delete_favorite(id).await {
            Ok(message) => {
                info!(id, "favorite deleted");
                self.page.alert(&message);
                true
            }
            Err(err) => {
                error!(id, error = %err, "error deleting favorite");
                self.page.alert("Could not delete favorite.");
                false
            }
        };
        let reload = self.load_favorites().await;
        DeleteOutcome { deleted, reload }
    }

    /// Tabulate the checked favorites from their rendered details.
    pub fn compare_selected(&mut self) -> CompareOutcome {
        let checked = self.page.checked_boxes(ElementId::FavoritesList);
        if checked.len() < 2 {
            self.page.alert("Select at least two properties to compare.");
            return CompareOutcome::TooFew;
        }
        let markup = self
            .page
            .inner_html(ElementId::FavoritesList)
            .unwrap_or_default();
        let rows = render::selected_details(&markup, &checked);
        self.page
            .set_inner_html(ElementId::ComparisonResult, &render::comparison_table(&rows));
        CompareOutcome::Compared(rows.len())
    }
}
