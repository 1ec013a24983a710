use crate::core::details::{card_details, iso_timestamp};
use crate::domain::model::{CardDetails, HealthStatus};
use crate::domain::ports::Clock;
use crate::utils::error::CardError;

/// Entry point the boundary calls once per request. Holds nothing but the
/// clock, so one instance can be shared across threads.
pub struct CardEngine<C: Clock> {
    clock: C,
}

impl<C: Clock> CardEngine<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    /// `None` is an absent card number value, which fails the format check.
    /// A request with no card number field at all is rejected by the caller
    /// with [`CardError::MissingInput`] before reaching the engine.
    pub fn validate(&self, raw: Option<&str>) -> Result<CardDetails, CardError> {
        match card_details(raw, &self.clock) {
            Ok(details) => {
                tracing::debug!(
                    card_type = %details.card_type,
                    length = details.length,
                    bin = %details.bin,
                    last_four = %details.last_four,
                    is_valid = details.is_valid,
                    "Card number checked"
                );
                Ok(details)
            }
            Err(e) => {
                tracing::debug!("Card number rejected: {}", e);
                Err(e)
            }
        }
    }

    pub fn health(&self) -> HealthStatus {
        HealthStatus::healthy(iso_timestamp(self.clock.now()))
    }
}
