use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;

use super::ReservationProvider;
use crate::models::{BookingConfirmation, BookingRequest};

/// Forwards bookings as JSON to an upstream reservations endpoint. Any
/// transport error or non-2xx status fails the submission.
pub struct HttpReservations {
    url: String,
    client: reqwest::Client,
}

impl HttpReservations {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ReservationProvider for HttpReservations {
    async fn reserve(&self, request: &BookingRequest) -> anyhow::Result<BookingConfirmation> {
        self.client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .context("failed to reach reservations endpoint")?
            .error_for_status()
            .context("reservations endpoint returned error")?;

        Ok(BookingConfirmation::for_request(request, Utc::now().naive_utc()))
    }
}
