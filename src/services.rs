pub mod chat_service;
pub mod currency_service;
pub mod day_view_service;
pub mod gemini_service;
pub mod itinerary_store;
pub mod link_service;
pub mod map_service;
pub mod optimization_service;
pub mod travel_tip_service;
