use serde::Serialize;

use super::itinerary::Category;

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";
pub const DEFAULT_CENTER: (f64, f64) = (33.5902, 130.4206);
pub const DEFAULT_ZOOM: u8 = 13;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStyle {
    pub color: &'static str,
    pub hex: &'static str,
    pub icon: &'static str,
}

impl CategoryStyle {
    pub fn for_category(category: Category) -> Self {
        let (color, hex, icon) = match category {
            Category::Flight => ("bg-blue-600", "#2563eb", "fa-solid fa-plane"),
            Category::Sight => ("bg-emerald-500", "#10b981", "fa-solid fa-camera-retro"),
            Category::Food => ("bg-rose-500", "#f43f5e", "fa-solid fa-utensils"),
            Category::Transit => ("bg-amber-500", "#f59e0b", "fa-solid fa-bus"),
            Category::Lodging => ("bg-indigo-500", "#6366f1", "fa-solid fa-hotel"),
            Category::Shopping => ("bg-fuchsia-500", "#d946ef", "fa-solid fa-bag-shopping"),
            Category::Other => ("bg-slate-400", "#94a3b8", "fa-solid fa-circle-question"),
        };
        Self { color, hex, icon }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    pub url: &'static str,
    pub center: (f64, f64),
    pub zoom: u8,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url: TILE_URL,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub item_id: String,
    pub name: String,
    pub category: Category,
    pub position: (f64, f64),
    pub style: CategoryStyle,
    pub selected: bool,
    pub scale: f32,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapPath {
    pub points: Vec<(f64, f64)>,
    pub color: &'static str,
    pub weight: u8,
    pub opacity: f32,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapBounds {
    pub south_west: (f64, f64),
    pub north_east: (f64, f64),
    pub padding: (u16, u16),
    pub max_zoom: u8,
}

/// Details shown for the selected marker.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelectionPanel {
    pub item_id: String,
    pub name: String,
    pub category_label: &'static str,
    pub style: CategoryStyle,
    pub start_time: String,
    pub end_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    pub day_index: usize,
    pub tiles: TileLayer,
    pub markers: Vec<MapMarker>,
    pub path: Option<MapPath>,
    pub fit_bounds: Option<MapBounds>,
    pub selection: Option<SelectionPanel>,
    pub invalidate_size: bool,
}
