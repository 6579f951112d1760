//! What each handler left on screen. Handlers never fail; these describe the
//! visible result so callers and tests can branch on it.

use crate::models::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Selector filled with this many locations
    Populated(usize),
    /// Backend answered with an empty list; not retried
    Empty,
    /// Every attempt failed
    Exhausted { attempts: u32 },
    /// The location selector is missing from the page
    MissingSelector,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EstimateOutcome {
    Rendered(f64),
    /// A required field was missing or malformed; no request sent
    Invalid,
    /// Backend answered without a price
    NoPrice,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectOutcome {
    Centered(Coordinate),
    NoSelection,
    NotFound,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NearbyOutcome {
    /// This many amenity markers are now on the map
    Shown(usize),
    /// No location resolved yet; no request sent
    NoCoordinate,
    Empty,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoritesOutcome {
    Listed(usize),
    Empty,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved(FavoritesOutcome),
    /// Nothing estimated yet; no request sent
    NoEstimate,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub deleted: bool,
    pub reload: FavoritesOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOutcome {
    Compared(usize),
    /// Fewer than two favorites checked
    TooFew,
}
