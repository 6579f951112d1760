pub mod memory;
pub mod render;
pub mod traits;

pub use memory::{MemoryMap, MemoryPage, PlacedMarker};
pub use traits::{ElementId, MapView, MarkerId, Page, RadioGroup};
