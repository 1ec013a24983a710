pub mod classify;
pub mod details;
pub mod engine;
pub mod format;
pub mod luhn;
pub mod normalize;

pub use crate::domain::model::{CardDetails, CardType, HealthStatus, NormalizedDigits};
pub use crate::domain::ports::{Clock, ServerSettings};
pub use crate::utils::error::CardError;
