use crate::models::Coordinate;

/// Element IDs binding the controller to the page markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Locations,
    Sqft,
    PropertyAge,
    PropertyAgeValue,
    EstimatedPrice,
    EstimateBtn,
    NearbyList,
    FavoritesList,
    SavedPropertiesSection,
    CompareBtn,
    ComparisonResult,
    MapView,
}

impl ElementId {
    pub const ALL: [ElementId; 12] = [
        ElementId::Locations,
        ElementId::Sqft,
        ElementId::PropertyAge,
        ElementId::PropertyAgeValue,
        ElementId::EstimatedPrice,
        ElementId::EstimateBtn,
        ElementId::NearbyList,
        ElementId::FavoritesList,
        ElementId::SavedPropertiesSection,
        ElementId::CompareBtn,
        ElementId::ComparisonResult,
        ElementId::MapView,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementId::Locations => "uiLocations",
            ElementId::Sqft => "uiSqft",
            ElementId::PropertyAge => "uiPropertyAge",
            ElementId::PropertyAgeValue => "propertyAgeValue",
            ElementId::EstimatedPrice => "uiEstimatedPrice",
            ElementId::EstimateBtn => "estimateBtn",
            ElementId::NearbyList => "nearbyList",
            ElementId::FavoritesList => "favoritesList",
            ElementId::SavedPropertiesSection => "savedPropertiesSection",
            ElementId::CompareBtn => "compareBtn",
            ElementId::ComparisonResult => "comparisonResult",
            ElementId::MapView => "mapView",
        }
    }
}

/// Radio button groups, addressed by their `name` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadioGroup {
    Bhk,
    Bathrooms,
}

impl RadioGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            RadioGroup::Bhk => "uiBHK",
            RadioGroup::Bathrooms => "uiBathrooms",
        }
    }
}

/// The document the controller reads input from and renders into.
///
/// Writes to an element that does not exist are ignored.
pub trait Page: Send {
    fn contains(&self, id: ElementId) -> bool;

    /// Current value of an input or the selected option of a select
    fn value(&self, id: ElementId) -> Option<String>;

    fn checked_radio(&self, group: RadioGroup) -> Option<String>;

    /// Values of the checked checkboxes rendered inside `container`
    fn checked_boxes(&self, container: ElementId) -> Vec<String>;

    fn inner_html(&self, id: ElementId) -> Option<String>;

    fn set_inner_html(&mut self, id: ElementId, html: &str);

    fn append_html(&mut self, id: ElementId, html: &str);

    fn set_text(&mut self, id: ElementId, text: &str);

    fn set_visible(&mut self, id: ElementId, visible: bool);

    /// Blocking user-visible message
    fn alert(&mut self, message: &str);
}

/// Handle to a marker placed on a [`MapView`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerId(pub u64);

/// Tile map widget, treated as a black box
pub trait MapView: Send {
    fn add_tile_layer(&mut self, url_template: &str, attribution: &str);

    fn set_view(&mut self, center: Coordinate, zoom: u8);

    fn add_marker(&mut self, at: Coordinate, popup_html: &str) -> MarkerId;

    fn open_popup(&mut self, marker: MarkerId);

    fn remove_marker(&mut self, marker: MarkerId);
}
