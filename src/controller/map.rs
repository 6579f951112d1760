use super::{NearbyOutcome, PageController, SelectOutcome, DEFAULT_ZOOM};
use crate::backend::types::CoordsResponse;
use crate::backend::Backend;
use crate::models::{AmenityKind, Location};
use crate::page::render;
use crate::page::{ElementId, MapView, Page};
use tracing::{error, info, warn};

impl<B: Backend, P: Page, M: MapView> PageController<B, P, M> {
    /// Geocode the selected location, move the "current location" marker
    /// there and recenter the map.
    pub async fn select_location(&mut self) -> SelectOutcome {
        let Some(location) = self
            .page
            .value(ElementId::Locations)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(Location::new)
        else {
            error!("no location selected");
            return SelectOutcome::NoSelection;
        };

        info!(%location, "fetching coordinates");
        match self.backend.location_coords(&location).await {
            Ok(CoordsResponse::Found { at, source }) => {
                self.user_coordinate = Some(at);
                if let Some(previous) = self.current_marker.take() {
                    self.map.remove_marker(previous);
                }
                let marker = self.map.add_marker(at, &render::location_popup(&location));
                self.map.open_popup(marker);
                self.current_marker = Some(marker);
                self.map.set_view(at, DEFAULT_ZOOM);
                info!(lat = at.lat, lon = at.lon, ?source, "map recentered");
                SelectOutcome::Centered(at)
            }
            Ok(CoordsResponse::NotFound(reason)) => {
                warn!(%location, %reason, "location not found");
                self.page.alert("Location not found on map.");
                SelectOutcome::NotFound
            }
            Err(err) => {
                error!(%location, error = %err, "coordinate lookup failed");
                self.page.alert("Could not fetch location coordinates.");
                SelectOutcome::Failed
            }
        }
    }

    /// Replace the amenity markers with places of `kind` around the
    /// resolved location.
    pub async fn fetch_nearby_places(&mut self, kind: &AmenityKind) -> NearbyOutcome {
        let Some(at) = self.user_coordinate else {
            self.page.alert("Select a location first!");
            return NearbyOutcome::NoCoordinate;
        };

        self.show_paragraph(ElementId::NearbyList, &format!("Loading nearby {kind}..."));

        match self.backend.nearby_places(at, kind, self.nearby_radius_m).await {
            Ok(places) if places.is_empty() => {
                self.clear_nearby_markers();
                self.show_paragraph(ElementId::NearbyList, &format!("No nearby {kind} found."));
                NearbyOutcome::Empty
            }
            Ok(places) => {
                self.clear_nearby_markers();
                for place in &places {
                    let marker = self
                        .map
                        .add_marker(place.coordinate(), &render::place_popup(place));
                    self.nearby_markers.push(marker);
                }
                info!(%kind, count = places.len(), "nearby places displayed");
                self.show_paragraph(
                    ElementId::NearbyList,
                    &format!(
                        "{} nearby {kind} found and displayed on the map.",
                        places.len()
                    ),
                );
                NearbyOutcome::Shown(places.len())
            }
            Err(err) => {
                error!(%kind, error = %err, "nearby places request failed");
                self.show_paragraph(ElementId::NearbyList, "Error fetching amenities.");
                NearbyOutcome::Failed
            }
        }
    }

    fn clear_nearby_markers(&mut self) {
        for marker in self.nearby_markers.drain(..) {
            self.map.remove_marker(marker);
        }
    }
}
