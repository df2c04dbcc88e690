pub mod chat;
pub mod currency;
pub mod itinerary;
pub mod map;
pub mod optimization;
pub mod tool_call;
