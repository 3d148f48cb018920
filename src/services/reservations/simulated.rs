use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use super::ReservationProvider;
use crate::models::{BookingConfirmation, BookingRequest};

/// Accepts every booking after a fixed latency. Used when no reservations
/// endpoint is configured.
pub struct SimulatedReservations {
    latency: Duration,
}

impl SimulatedReservations {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl ReservationProvider for SimulatedReservations {
    async fn reserve(&self, request: &BookingRequest) -> anyhow::Result<BookingConfirmation> {
        tokio::time::sleep(self.latency).await;
        tracing::info!(reference = %request.reference, "simulated reservation accepted");
        Ok(BookingConfirmation::for_request(request, Utc::now().naive_utc()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[tokio::test]
    async fn test_simulated_confirms_request() {
        let request = BookingRequest {
            reference: "CB-TEST000001".to_string(),
            service: "coffee-tasting".to_string(),
            service_name: "Coffee Tasting".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 20).unwrap(),
            time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            guests: 2,
            name: "Ana".to_string(),
            last_name: String::new(),
            email: "ana@example.com".to_string(),
            phone: "+573001234567".to_string(),
            notes: String::new(),
            total: 90_000,
            amount_in_cents: 9_000_000,
            currency: "COP".to_string(),
        };

        let provider = SimulatedReservations::new(Duration::from_millis(1));
        let confirmation = provider.reserve(&request).await.unwrap();
        assert_eq!(confirmation.reference, "CB-TEST000001");
        assert_eq!(confirmation.total, 90_000);
        assert_eq!(confirmation.amount_in_cents, 9_000_000);
        assert_eq!(confirmation.currency, "COP");
    }
}
