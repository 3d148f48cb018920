pub mod http;
pub mod simulated;

use async_trait::async_trait;

use crate::models::{BookingConfirmation, BookingRequest};

#[async_trait]
pub trait ReservationProvider: Send + Sync {
    async fn reserve(&self, request: &BookingRequest) -> anyhow::Result<BookingConfirmation>;
}
