use crate::models::Coordinate;
use crate::page::traits::{ElementId, MapView, MarkerId, Page, RadioGroup};
use scraper::{Html, Selector};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, warn};

#[derive(Debug, Default, Clone)]
struct Element {
    html: String,
    value: Option<String>,
    text: Option<String>,
    visible: bool,
}

/// In-memory document: holds element markup and form state, records alerts.
#[derive(Debug, Default)]
pub struct MemoryPage {
    elements: HashMap<ElementId, Element>,
    radios: HashMap<RadioGroup, String>,
    checked: HashSet<String>,
    alerts: Vec<String>,
}

impl MemoryPage {
    /// A page with no elements at all
    pub fn new() -> Self {
        Self::default()
    }

    /// A page containing every element the controller binds to
    pub fn with_all_elements() -> Self {
        let mut page = Self::new();
        for id in ElementId::ALL {
            page.insert(id);
        }
        page
    }

    pub fn insert(&mut self, id: ElementId) {
        self.elements.entry(id).or_insert_with(|| Element {
            visible: id != ElementId::SavedPropertiesSection,
            ..Element::default()
        });
    }

    pub fn without(mut self, id: ElementId) -> Self {
        self.elements.remove(&id);
        self
    }

    pub fn set_value(&mut self, id: ElementId, value: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.value = Some(value.into());
        }
    }

    pub fn clear_value(&mut self, id: ElementId) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.value = None;
        }
    }

    pub fn check_radio(&mut self, group: RadioGroup, value: impl Into<String>) {
        self.radios.insert(group, value.into());
    }

    pub fn uncheck_radio(&mut self, group: RadioGroup) {
        self.radios.remove(&group);
    }

    /// Tick the checkbox whose `value` attribute is `value`
    pub fn check_box(&mut self, value: impl Into<String>) {
        self.checked.insert(value.into());
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(&id).and_then(|el| el.text.as_deref())
    }

    pub fn is_visible(&self, id: ElementId) -> bool {
        self.elements.get(&id).is_some_and(|el| el.visible)
    }

    /// Visible text of an element's markup, tags stripped
    pub fn rendered_text(&self, id: ElementId) -> String {
        let Some(el) = self.elements.get(&id) else {
            return String::new();
        };
        Html::parse_fragment(&el.html)
            .root_element()
            .text()
            .collect::<String>()
    }

    /// Non-empty option values of a select element, in document order
    pub fn option_values(&self, id: ElementId) -> Vec<String> {
        let (Some(el), Ok(selector)) = (self.elements.get(&id), Selector::parse("option")) else {
            return Vec::new();
        };
        Html::parse_fragment(&el.html)
            .select(&selector)
            .filter_map(|opt| opt.value().attr("value"))
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Trimmed text of each element matching `css` inside an element's markup
    pub fn texts(&self, id: ElementId, css: &str) -> Vec<String> {
        let (Some(el), Ok(selector)) = (self.elements.get(&id), Selector::parse(css)) else {
            return Vec::new();
        };
        Html::parse_fragment(&el.html)
            .select(&selector)
            .map(|node| node.text().collect::<String>().trim().to_string())
            .collect()
    }

    /// Cell text of every `tr` in an element's markup, header row included
    pub fn table_rows(&self, id: ElementId) -> Vec<Vec<String>> {
        let (Some(el), Ok(rows), Ok(cells)) = (
            self.elements.get(&id),
            Selector::parse("tr"),
            Selector::parse("th, td"),
        ) else {
            return Vec::new();
        };
        Html::parse_fragment(&el.html)
            .select(&rows)
            .map(|row| {
                row.select(&cells)
                    .map(|cell| cell.text().collect::<String>())
                    .collect()
            })
            .collect()
    }
}

impl Page for MemoryPage {
    fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    fn value(&self, id: ElementId) -> Option<String> {
        self.elements.get(&id).and_then(|el| el.value.clone())
    }

    fn checked_radio(&self, group: RadioGroup) -> Option<String> {
        self.radios.get(&group).cloned()
    }

    fn checked_boxes(&self, container: ElementId) -> Vec<String> {
        let (Some(el), Ok(selector)) = (
            self.elements.get(&container),
            Selector::parse("input[type=\"checkbox\"]"),
        ) else {
            return Vec::new();
        };
        Html::parse_fragment(&el.html)
            .select(&selector)
            .filter_map(|input| input.value().attr("value"))
            .filter(|v| self.checked.contains(*v))
            .map(str::to_string)
            .collect()
    }

    fn inner_html(&self, id: ElementId) -> Option<String> {
        self.elements.get(&id).map(|el| el.html.clone())
    }

    fn set_inner_html(&mut self, id: ElementId, html: &str) {
        match self.elements.get_mut(&id) {
            Some(el) => el.html = html.to_string(),
            None => debug!(id = id.as_str(), "write to missing element ignored"),
        }
    }

    fn append_html(&mut self, id: ElementId, html: &str) {
        match self.elements.get_mut(&id) {
            Some(el) => el.html.push_str(html),
            None => debug!(id = id.as_str(), "write to missing element ignored"),
        }
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.text = Some(text.to_string());
        }
    }

    fn set_visible(&mut self, id: ElementId, visible: bool) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.visible = visible;
        }
    }

    fn alert(&mut self, message: &str) {
        warn!(alert = message, "user alert");
        self.alerts.push(message.to_string());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub at: Coordinate,
    pub popup_html: String,
    pub popup_open: bool,
}

/// In-memory map widget tracking live markers and the current view.
#[derive(Debug, Default)]
pub struct MemoryMap {
    tile_layers: Vec<String>,
    center: Option<Coordinate>,
    zoom: Option<u8>,
    markers: BTreeMap<u64, PlacedMarker>,
    next_id: u64,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(&self) -> Option<Coordinate> {
        self.center
    }

    pub fn zoom(&self) -> Option<u8> {
        self.zoom
    }

    pub fn tile_layers(&self) -> &[String] {
        &self.tile_layers
    }

    pub fn marker(&self, id: MarkerId) -> Option<&PlacedMarker> {
        self.markers.get(&id.0)
    }

    /// Live markers in placement order
    pub fn markers(&self) -> impl Iterator<Item = &PlacedMarker> {
        self.markers.values()
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}

impl MapView for MemoryMap {
    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) {
        debug!(url_template, attribution, "tile layer added");
        self.tile_layers.push(url_template.to_string());
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        info!(lat = center.lat, lon = center.lon, zoom, "map view moved");
        self.center = Some(center);
        self.zoom = Some(zoom);
    }

    fn add_marker(&mut self, at: Coordinate, popup_html: &str) -> MarkerId {
        let id = self.next_id;
        self.next_id += 1;
        self.markers.insert(
            id,
            PlacedMarker {
                at,
                popup_html: popup_html.to_string(),
                popup_open: false,
            },
        );
        MarkerId(id)
    }

    fn open_popup(&mut self, marker: MarkerId) {
        for (id, placed) in &mut self.markers {
            placed.popup_open = *id == marker.0;
        }
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(&marker.0);
    }
}
