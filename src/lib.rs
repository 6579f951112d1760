//! Client-side controller for a real-estate price-estimation page.
//!
//! [`controller::PageController`] drives a [`page::Page`] and a
//! [`page::MapView`] against a [`backend::Backend`]: it fills the location
//! selector, renders price estimates, manages saved favorites and overlays
//! nearby amenities on the map.

pub mod backend;
pub mod config;
pub mod controller;
pub mod models;
pub mod page;
pub mod retry;

pub use backend::{Backend, BackendError, HttpBackend};
pub use config::{ClientConfig, FavoriteAgePolicy};
pub use controller::PageController;
