//! Map Service
//!
//! Builds what the map tab draws for the selected day: one marker per item
//! with coordinates, a path through them in list order, the viewport to fit
//! and the selection panel.

use crate::models::itinerary::ItineraryItem;
use crate::models::map::{
    CategoryStyle, MapBounds, MapMarker, MapPath, MapView, SelectionPanel, TileLayer,
};
use crate::services::link_service::{booking_url, directions_url};
use crate::state::{AppState, Tab};

const PATH_COLOR: &str = "#1e3a8a";
const PATH_WEIGHT: u8 = 3;
const PATH_OPACITY: f32 = 0.6;
const FIT_PADDING: (u16, u16) = (50, 50);
const FIT_MAX_ZOOM: u8 = 15;
const SELECTED_SCALE: f32 = 1.5;

pub fn build_markers(items: &[ItineraryItem], selected: Option<&str>) -> Vec<MapMarker> {
    items
        .iter()
        .filter_map(|item| {
            let position = item.coordinates()?;
            let is_selected = selected == Some(item.id.as_str());
            Some(MapMarker {
                item_id: item.id.clone(),
                name: item.name.clone(),
                category: item.category,
                position,
                style: CategoryStyle::for_category(item.category),
                selected: is_selected,
                scale: if is_selected { SELECTED_SCALE } else { 1.0 },
            })
        })
        .collect()
}

/// Path in list order; needs at least two placed items.
pub fn build_path(items: &[ItineraryItem]) -> Option<MapPath> {
    let points: Vec<(f64, f64)> = items.iter().filter_map(|item| item.coordinates()).collect();
    if points.len() < 2 {
        return None;
    }
    Some(MapPath {
        points,
        color: PATH_COLOR,
        weight: PATH_WEIGHT,
        opacity: PATH_OPACITY,
    })
}

pub fn path_bounds(path: &MapPath) -> Option<MapBounds> {
    let (first_lat, first_lng) = *path.points.first()?;
    let (mut south, mut west, mut north, mut east) = (first_lat, first_lng, first_lat, first_lng);
    for &(lat, lng) in &path.points[1..] {
        south = south.min(lat);
        north = north.max(lat);
        west = west.min(lng);
        east = east.max(lng);
    }
    Some(MapBounds {
        south_west: (south, west),
        north_east: (north, east),
        padding: FIT_PADDING,
        max_zoom: FIT_MAX_ZOOM,
    })
}

pub fn selection_panel(item: &ItineraryItem) -> SelectionPanel {
    SelectionPanel {
        item_id: item.id.clone(),
        name: item.name.clone(),
        category_label: item.category.label(),
        style: CategoryStyle::for_category(item.category),
        start_time: item.start_time.to_string(),
        end_time: item.end_time.to_string(),
        opening_hours: item.opening_hours.clone(),
        notes: item.notes.clone(),
        directions_url: directions_url(item),
        booking_url: booking_url(item),
    }
}

/// Map view of the selected day, or `None` if that day does not exist.
pub fn build_map_view(state: &AppState) -> Option<MapView> {
    let day = state.current_day()?;
    let selected = state.selected_map_item.as_deref();
    let visible = state.active_tab == Tab::Map;

    let path = build_path(&day.itinerary);
    let fit_bounds = match (&path, visible, selected) {
        (Some(path), true, None) => path_bounds(path),
        _ => None,
    };
    let selection = selected
        .and_then(|id| day.find(id))
        .map(selection_panel);

    Some(MapView {
        day_index: state.selected_day,
        tiles: TileLayer::default(),
        markers: build_markers(&day.itinerary, selected),
        path,
        fit_bounds,
        selection,
        invalidate_size: visible && state.map_layout_stale,
    })
}
