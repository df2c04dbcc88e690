use serde::Serialize;

use crate::models::itinerary::{DayPlan, ItineraryItem, TransportMode};
use crate::models::map::CategoryStyle;
use crate::services::link_service::{booking_url, directions_url};

const DEFAULT_LEG_DETAIL: &str = "前往此地";

/// How the traveller gets to an item from the one before it.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransitLeg {
    pub icon: &'static str,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directions_url: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryCard {
    #[serde(flatten)]
    pub item: ItineraryItem,
    pub category_label: &'static str,
    pub style: CategoryStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leg: Option<TransitLeg>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub day_index: usize,
    pub date: String,
    pub weekday: String,
    pub cards: Vec<ItineraryCard>,
}

fn transit_leg(item: &ItineraryItem) -> TransitLeg {
    TransitLeg {
        icon: TransportMode::icon(item.transport_mode),
        detail: item
            .transport_detail
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LEG_DETAIL.to_string()),
        directions_url: directions_url(item),
    }
}

pub fn build_day_view(day_index: usize, day: &DayPlan) -> DayView {
    let cards = day
        .itinerary
        .iter()
        .enumerate()
        .map(|(position, item)| ItineraryCard {
            item: item.clone(),
            category_label: item.category.label(),
            style: CategoryStyle::for_category(item.category),
            leg: if position == 0 { None } else { Some(transit_leg(item)) },
            booking_url: booking_url(item),
        })
        .collect();

    DayView {
        day_index,
        date: day.date.clone(),
        weekday: day.weekday.clone(),
        cards,
    }
}
