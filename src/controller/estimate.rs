use super::{EstimateOutcome, PageController};
use crate::backend::Backend;
use crate::models::{Estimate, EstimateRequest, Location};
use crate::page::render;
use crate::page::{ElementId, MapView, Page, RadioGroup};
use chrono::Utc;
use tracing::{debug, error, info};

const PLACEHOLDER_LABEL: &str = "Choose a Location";

/// Read and validate the estimate form. `None` if any field is missing or
/// not a number.
pub(crate) fn read_estimate_form<P: Page>(page: &P) -> Option<EstimateRequest> {
    let location = page
        .value(ElementId::Locations)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != PLACEHOLDER_LABEL)?;
    let total_sqft = page
        .value(ElementId::Sqft)?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())?;
    let bhk = page.checked_radio(RadioGroup::Bhk)?.trim().parse().ok()?;
    let bath = page
        .checked_radio(RadioGroup::Bathrooms)?
        .trim()
        .parse()
        .ok()?;
    let property_age = page.value(ElementId::PropertyAge)?.trim().parse().ok()?;

    Some(EstimateRequest {
        location: Location::new(location),
        total_sqft,
        bhk,
        bath,
        property_age,
    })
}

impl<B: Backend, P: Page, M: MapView> PageController<B, P, M> {
    /// Validate the form, request a prediction and render it.
    pub async fn estimate_price(&mut self) -> EstimateOutcome {
        let Some(request) = read_estimate_form(&self.page) else {
            debug!("estimate form incomplete");
            self.page
                .alert("Please fill in all details before estimating the price.");
            return EstimateOutcome::Invalid;
        };

        match self.backend.predict_price(&request).await {
            Ok(response) => match response.estimated_price {
                Some(price) => {
                    let price = price.abs();
                    info!(location = %request.location, price, "estimate received");
                    self.page
                        .set_inner_html(ElementId::EstimatedPrice, &render::estimated_price(price));
                    self.last_estimate = Some(Estimate {
                        request,
                        price,
                        estimated_at: Utc::now(),
                    });
                    EstimateOutcome::Rendered(price)
                }
                None => {
                    error!(backend_error = ?response.error, "prediction response carried no price");
                    self.last_estimate = None;
                    self.page.set_inner_html(
                        ElementId::EstimatedPrice,
                        &render::error_heading("Error: No price received."),
                    );
                    EstimateOutcome::NoPrice
                }
            },
            Err(err) => {
                error!(error = %err, "prediction request failed");
                self.last_estimate = None;
                self.page.set_inner_html(
                    ElementId::EstimatedPrice,
                    &render::error_heading("Error: Could not fetch prediction."),
                );
                EstimateOutcome::Failed
            }
        }
    }
}
