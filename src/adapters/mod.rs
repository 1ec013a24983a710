// Adapters layer: concrete clocks and the HTTP boundary around the card engine.

pub mod clock;
pub mod http;
