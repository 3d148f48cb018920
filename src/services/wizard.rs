use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{
    parse_time_slot, BookingConfirmation, BookingDraft, BookingField, BookingRequest, Catalog,
    Locale, WizardPhase, WizardStep,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WizardError {
    #[error("missing required field: {0}")]
    MissingField(BookingField),

    #[error("unknown service: {0}")]
    UnknownService(String),

    #[error("date {0} is in the past")]
    PastDate(NaiveDate),

    #[error("at least one guest is required")]
    NoGuests,

    #[error("{guests} guests exceeds the capacity of {capacity}")]
    OverCapacity { guests: u32, capacity: u32 },

    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: BookingField, value: String },

    #[error("bookings can only be submitted from the review step")]
    NotAtReview,

    #[error("a submission is already in progress")]
    Submitting,

    #[error("booking already confirmed")]
    AlreadyConfirmed,

    #[error("no submission in progress")]
    NotSubmitting,

    #[error("booking wizard is closed")]
    Closed,
}

impl WizardError {
    /// True when the action is invalid for the wizard's current state rather
    /// than for the data it holds.
    pub fn is_state_conflict(&self) -> bool {
        matches!(
            self,
            WizardError::NotAtReview
                | WizardError::Submitting
                | WizardError::AlreadyConfirmed
                | WizardError::NotSubmitting
                | WizardError::Closed
        )
    }
}

pub struct BookingWizard {
    catalog: Arc<Catalog>,
    locale: Locale,
    step: WizardStep,
    draft: BookingDraft,
    phase: WizardPhase,
    open: bool,
    last_active: Instant,
}

impl BookingWizard {
    pub fn new(catalog: Arc<Catalog>, locale: Locale) -> Self {
        Self {
            catalog,
            locale,
            step: WizardStep::Service,
            draft: BookingDraft::default(),
            phase: WizardPhase::Editing,
            open: true,
            last_active: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    pub fn last_active(&self) -> Instant {
        self.last_active
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn phase(&self) -> &WizardPhase {
        &self.phase
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) -> Result<(), WizardError> {
        if self.phase == WizardPhase::Submitting {
            return Err(WizardError::Submitting);
        }
        self.reset();
        Ok(())
    }

    pub fn set_field(&mut self, field: BookingField, value: &str) -> Result<(), WizardError> {
        self.ensure_editable()?;

        let trimmed = value.trim();
        let invalid = || WizardError::InvalidValue {
            field,
            value: value.to_string(),
        };

        match field {
            BookingField::Service => {
                self.draft.service = (!trimmed.is_empty()).then(|| trimmed.to_string());
            }
            BookingField::Date => {
                self.draft.date = if trimmed.is_empty() {
                    None
                } else {
                    Some(NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| invalid())?)
                };
            }
            BookingField::Time => {
                self.draft.time = if trimmed.is_empty() {
                    None
                } else {
                    Some(parse_time_slot(trimmed).ok_or_else(invalid)?)
                };
            }
            BookingField::Guests => {
                self.draft.guests = if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.parse::<u32>().map_err(|_| invalid())?)
                };
            }
            BookingField::Name => self.draft.name = value.to_string(),
            BookingField::LastName => self.draft.last_name = value.to_string(),
            BookingField::Email => self.draft.email = value.to_string(),
            BookingField::Phone => self.draft.phone = value.to_string(),
            BookingField::Notes => self.draft.notes = value.to_string(),
        }
        Ok(())
    }

    /// Moves to the next step once the current one is complete. A no-op on
    /// the review step.
    pub fn advance(&mut self, today: NaiveDate) -> Result<WizardStep, WizardError> {
        self.ensure_editable()?;
        if let Some(next) = self.step.next() {
            self.validate_step(self.step, today)?;
            tracing::debug!(from = self.step.number(), to = next.number(), "wizard advanced");
            self.step = next;
        }
        Ok(self.step)
    }

    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        self.ensure_editable()?;
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        Ok(self.step)
    }

    pub fn can_advance(&self, today: NaiveDate) -> bool {
        self.validate_step(self.step, today).is_ok()
    }

    /// Checks the requirements for leaving `step`. For the review step this
    /// covers the whole draft.
    pub fn validate_step(&self, step: WizardStep, today: NaiveDate) -> Result<(), WizardError> {
        let draft = &self.draft;
        match step {
            WizardStep::Service => {
                let id = draft
                    .service
                    .as_deref()
                    .ok_or(WizardError::MissingField(BookingField::Service))?;
                if self.catalog.find(id).is_none() {
                    return Err(WizardError::UnknownService(id.to_string()));
                }
                Ok(())
            }
            WizardStep::Schedule => {
                let date = draft.date.ok_or(WizardError::MissingField(BookingField::Date))?;
                draft.time.ok_or(WizardError::MissingField(BookingField::Time))?;
                let guests = draft
                    .guests
                    .ok_or(WizardError::MissingField(BookingField::Guests))?;

                if date < today {
                    return Err(WizardError::PastDate(date));
                }
                if guests == 0 {
                    return Err(WizardError::NoGuests);
                }
                if let Some(offering) = draft.service.as_deref().and_then(|id| self.catalog.find(id)) {
                    if guests > offering.capacity {
                        return Err(WizardError::OverCapacity {
                            guests,
                            capacity: offering.capacity,
                        });
                    }
                }
                Ok(())
            }
            WizardStep::Contact => {
                let required = [
                    (BookingField::Name, &draft.name),
                    (BookingField::Email, &draft.email),
                    (BookingField::Phone, &draft.phone),
                ];
                for (field, value) in required {
                    if value.trim().is_empty() {
                        return Err(WizardError::MissingField(field));
                    }
                }
                Ok(())
            }
            WizardStep::Review => {
                self.validate_step(WizardStep::Service, today)?;
                self.validate_step(WizardStep::Schedule, today)?;
                self.validate_step(WizardStep::Contact, today)
            }
        }
    }

    /// Unit price of the selected offering times the guest count (one when
    /// unset). Zero without a known offering.
    pub fn compute_total(&self) -> u64 {
        let Some(offering) = self.draft.service.as_deref().and_then(|id| self.catalog.find(id))
        else {
            return 0;
        };
        offering
            .unit_price
            .saturating_mul(u64::from(self.draft.guests.unwrap_or(1)))
    }

    pub fn submit(&mut self, today: NaiveDate) -> Result<BookingRequest, WizardError> {
        if !self.open {
            return Err(WizardError::Closed);
        }
        match self.phase {
            WizardPhase::Submitting => return Err(WizardError::Submitting),
            WizardPhase::Succeeded { .. } => return Err(WizardError::AlreadyConfirmed),
            WizardPhase::Editing | WizardPhase::Failed { .. } => {}
        }
        if self.step != WizardStep::Review {
            return Err(WizardError::NotAtReview);
        }
        self.validate_step(WizardStep::Review, today)?;

        let draft = &self.draft;
        let (Some(date), Some(time), Some(guests)) = (draft.date, draft.time, draft.guests) else {
            return Err(WizardError::MissingField(BookingField::Date));
        };
        let service = draft.service.clone().unwrap_or_default();
        let service_name = self
            .catalog
            .find(&service)
            .map(|o| o.name.get(self.locale).to_string())
            .unwrap_or_default();
        let total = self.compute_total();

        let request = BookingRequest {
            reference: new_reference(),
            service,
            service_name,
            date,
            time,
            guests,
            name: draft.name.trim().to_string(),
            last_name: draft.last_name.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            notes: draft.notes.trim().to_string(),
            total,
            amount_in_cents: total.saturating_mul(100),
            currency: self.catalog.currency.clone(),
        };

        self.phase = WizardPhase::Submitting;
        Ok(request)
    }

    pub fn finish_submission(
        &mut self,
        outcome: Result<BookingConfirmation, String>,
    ) -> Result<(), WizardError> {
        if self.phase != WizardPhase::Submitting {
            return Err(WizardError::NotSubmitting);
        }
        self.phase = match outcome {
            Ok(confirmation) => WizardPhase::Succeeded { confirmation },
            Err(reason) => WizardPhase::Failed { reason },
        };
        Ok(())
    }

    /// Clears a confirmed booking. Returns false when the wizard has moved on
    /// from the confirmation identified by `reference`.
    pub fn reset_after_success(&mut self, reference: &str) -> bool {
        match &self.phase {
            WizardPhase::Succeeded { confirmation } if confirmation.reference == reference => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    fn ensure_editable(&mut self) -> Result<(), WizardError> {
        if !self.open {
            return Err(WizardError::Closed);
        }
        match self.phase {
            WizardPhase::Editing => Ok(()),
            WizardPhase::Submitting => Err(WizardError::Submitting),
            WizardPhase::Succeeded { .. } => Err(WizardError::AlreadyConfirmed),
            WizardPhase::Failed { .. } => {
                self.phase = WizardPhase::Editing;
                Ok(())
            }
        }
    }

    fn reset(&mut self) {
        self.step = WizardStep::Service;
        self.draft = BookingDraft::default();
        self.phase = WizardPhase::Editing;
        self.open = false;
    }
}

fn new_reference() -> String {
    let id = Uuid::new_v4().simple().to_string();
    format!("CB-{}", id[..10].to_uppercase())
}
