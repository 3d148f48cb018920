use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingDraft {
    pub service: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub guests: Option<u32>,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BookingField {
    Service,
    Date,
    Time,
    Guests,
    Name,
    LastName,
    Email,
    Phone,
    Notes,
}

impl BookingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingField::Service => "service",
            BookingField::Date => "date",
            BookingField::Time => "time",
            BookingField::Guests => "guests",
            BookingField::Name => "name",
            BookingField::LastName => "last_name",
            BookingField::Email => "email",
            BookingField::Phone => "phone",
            BookingField::Notes => "notes",
        }
    }
}

impl std::fmt::Display for BookingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of a completed draft, handed to the reservation provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRequest {
    pub reference: String,
    pub service: String,
    pub service_name: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub guests: u32,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub notes: String,
    pub total: u64,
    pub amount_in_cents: u64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingConfirmation {
    pub reference: String,
    pub total: u64,
    pub amount_in_cents: u64,
    pub currency: String,
    pub confirmed_at: NaiveDateTime,
}

impl BookingConfirmation {
    pub fn for_request(request: &BookingRequest, confirmed_at: NaiveDateTime) -> Self {
        Self {
            reference: request.reference.clone(),
            total: request.total,
            amount_in_cents: request.amount_in_cents,
            currency: request.currency.clone(),
            confirmed_at,
        }
    }
}
