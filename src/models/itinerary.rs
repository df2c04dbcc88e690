use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wall-clock time of day, always rendered as zero-padded `HH:mm`.
///
/// Items within a day are ordered by this value, which matches the
/// lexicographic order of the rendered string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(ClockTime)
    }

    /// Out-of-range components clamp to midnight; for literal tables.
    pub fn hm(hour: u32, minute: u32) -> Self {
        ClockTime::new(hour, minute).unwrap_or(ClockTime(NaiveTime::MIN))
    }

    /// Accepts `H:mm` or `HH:mm`, surrounding whitespace ignored.
    pub fn parse(text: &str) -> Option<Self> {
        NaiveTime::parse_from_str(text.trim(), "%H:%M")
            .ok()
            .map(ClockTime)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for ClockTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClockTime::parse(s).ok_or_else(|| format!("invalid time '{}', expected HH:mm", s))
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Flight,
    Sight,
    Food,
    Transit,
    Lodging,
    Shopping,
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Flight,
        Category::Sight,
        Category::Food,
        Category::Transit,
        Category::Lodging,
        Category::Shopping,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Flight => "flight",
            Category::Sight => "sight",
            Category::Food => "food",
            Category::Transit => "transit",
            Category::Lodging => "lodging",
            Category::Shopping => "shopping",
            Category::Other => "other",
        }
    }

    /// Display label shown on cards.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Flight => "航班",
            Category::Sight => "景點",
            Category::Food => "美食",
            Category::Transit => "交通",
            Category::Lodging => "住宿",
            Category::Shopping => "購物",
            Category::Other => "其他",
        }
    }

    /// Resolves either the wire name or the display label. Anything else
    /// lands in `Other`, same as the card styling does.
    pub fn from_name(name: &str) -> Category {
        let name = name.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name) || c.label() == name)
            .unwrap_or(Category::Other)
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Category::from_name(&name))
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Walk,
    Car,
    Train,
    Plane,
}

impl TransportMode {
    pub fn icon(mode: Option<TransportMode>) -> &'static str {
        match mode {
            Some(TransportMode::Walk) => "fa-person-walking",
            Some(TransportMode::Car) => "fa-car",
            Some(TransportMode::Train) => "fa-train-subway",
            Some(TransportMode::Plane) => "fa-plane",
            None => "fa-ellipsis",
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryItem {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_spots: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locker_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl ItineraryItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        start_time: ClockTime,
        end_time: ClockTime,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            start_time,
            end_time,
            sub_spots: None,
            price: None,
            booking_link: None,
            opening_hours: None,
            notes: None,
            locker_info: None,
            transport_mode: None,
            transport_detail: None,
            location: None,
            lat: None,
            lng: None,
        }
    }

    /// Both coordinates, when the item can be placed on the map.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        }
    }

    /// Overwrites every field the patch carries.
    pub fn apply(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(start_time) = patch.start_time {
            self.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            self.end_time = end_time;
        }
        if let Some(sub_spots) = &patch.sub_spots {
            self.sub_spots = Some(sub_spots.clone());
        }
        if let Some(price) = &patch.price {
            self.price = Some(price.clone());
        }
        if let Some(booking_link) = &patch.booking_link {
            self.booking_link = Some(booking_link.clone());
        }
        if let Some(opening_hours) = &patch.opening_hours {
            self.opening_hours = Some(opening_hours.clone());
        }
        if let Some(notes) = &patch.notes {
            self.notes = Some(notes.clone());
        }
        if let Some(locker_info) = &patch.locker_info {
            self.locker_info = Some(locker_info.clone());
        }
        if let Some(transport_mode) = patch.transport_mode {
            self.transport_mode = Some(transport_mode);
        }
        if let Some(transport_detail) = &patch.transport_detail {
            self.transport_detail = Some(transport_detail.clone());
        }
        if let Some(location) = &patch.location {
            self.location = Some(location.clone());
        }
        if let Some(lat) = patch.lat {
            self.lat = Some(lat);
        }
        if let Some(lng) = patch.lng {
            self.lng = Some(lng);
        }
    }
}

/// Partial update, as sent by the edit form or an `update_itinerary_item` call.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<ClockTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_spots: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locker_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<TransportMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

/// A new item before it has been given an identifier.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub category: Category,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    #[serde(flatten)]
    pub details: ItemPatch,
}

impl NewItem {
    pub fn into_item(self, id: String) -> ItineraryItem {
        let mut item = ItineraryItem::new(id, self.name, self.category, self.start_time, self.end_time);
        // Core fields above win over anything repeated in the details.
        let details = ItemPatch {
            name: None,
            category: None,
            start_time: None,
            end_time: None,
            ..self.details
        };
        item.apply(&details);
        item
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub date: String,
    pub weekday: String,
    pub itinerary: Vec<ItineraryItem>,
}

impl DayPlan {
    pub fn find(&self, item_id: &str) -> Option<&ItineraryItem> {
        self.itinerary.iter().find(|item| item.id == item_id)
    }

    /// Stable re-sort by start time.
    pub fn sort_by_start_time(&mut self) {
        self.itinerary.sort_by_key(|item| item.start_time);
    }
}
