use url::Url;

use crate::models::itinerary::ItineraryItem;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/";

/// Transit directions to the item, when it has coordinates.
pub fn directions_url(item: &ItineraryItem) -> Option<String> {
    let (lat, lng) = item.coordinates()?;
    let url = format!(
        "{}?api=1&destination={},{}&travelmode=transit",
        DIRECTIONS_BASE, lat, lng
    );
    Url::parse(&url).ok().map(|_| url)
}

/// The booking link exactly as authored; blank links count as absent.
pub fn booking_url(item: &ItineraryItem) -> Option<String> {
    item.booking_link
        .as_deref()
        .filter(|link| !link.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed::initial_days;

    #[test]
    fn test_directions_url_uses_coordinates() {
        let days = initial_days();
        let ramen = days[0].find("3").unwrap();
        assert_eq!(
            directions_url(ramen).as_deref(),
            Some("https://www.google.com/maps/dir/?api=1&destination=33.5932,130.3977&travelmode=transit")
        );
    }

    #[test]
    fn test_no_directions_without_coordinates() {
        let mut item = initial_days()[0].itinerary[0].clone();
        item.lng = None;
        assert!(directions_url(&item).is_none());
    }

    #[test]
    fn test_booking_url_is_verbatim() {
        let days = initial_days();
        let dinner = days[0].find("7").unwrap();
        assert_eq!(
            booking_url(dinner).as_deref(),
            Some("https://www.motu-ooyama.com/reservation/")
        );

        let mut item = dinner.clone();
        item.booking_link = Some("www.motu-ooyama.com/reservation".to_string());
        assert_eq!(booking_url(&item).as_deref(), Some("www.motu-ooyama.com/reservation"));
        item.booking_link = Some("  ".to_string());
        assert!(booking_url(&item).is_none());
        item.booking_link = None;
        assert!(booking_url(&item).is_none());
    }
}
