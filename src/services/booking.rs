use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{BookingConfirmation, BookingRequest, Locale};
use crate::services::wizard::{BookingWizard, WizardError};
use crate::state::AppState;

pub fn open_wizard(state: &AppState, locale: Locale) -> Uuid {
    let id = Uuid::new_v4();
    let wizard = BookingWizard::new(Arc::clone(&state.catalog), locale);
    state.wizards().insert(id, wizard);
    tracing::info!(booking_id = %id, locale = locale.as_str(), "booking wizard opened");
    id
}

/// Runs `f` against the wizard `id` under the wizard lock and marks it active.
pub fn with_wizard<T>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut BookingWizard) -> Result<T, WizardError>,
) -> Result<T, AppError> {
    let mut wizards = state.wizards();
    let wizard = wizards
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("booking {id}")))?;
    wizard.touch();
    Ok(f(wizard)?)
}

/// Moves the wizard to `Submitting` and waits for the reservation outcome.
///
/// The provider call and the phase transition run on their own task, so a
/// caller that goes away mid-flight still leaves the wizard in `Succeeded` or
/// `Failed`.
pub async fn submit(
    state: &Arc<AppState>,
    id: Uuid,
    today: NaiveDate,
) -> Result<BookingConfirmation, AppError> {
    let request = with_wizard(state, id, |w| w.submit(today))?;

    tracing::info!(
        booking_id = %id,
        reference = %request.reference,
        service = %request.service,
        guests = request.guests,
        total = request.total,
        "submitting booking"
    );

    let task = tokio::spawn(complete_submission(Arc::clone(state), id, request));
    match task.await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(booking_id = %id, error = %e, "submission task aborted");
            let reason = format!("submission aborted: {e}");
            // Ignored if the task already recorded an outcome.
            let _ = with_wizard(state, id, |w| w.finish_submission(Err(reason.clone())));
            Err(AppError::Reservation(reason))
        }
    }
}

async fn complete_submission(
    state: Arc<AppState>,
    id: Uuid,
    request: BookingRequest,
) -> Result<BookingConfirmation, AppError> {
    let outcome = state.reservations.reserve(&request).await;
    let result = match &outcome {
        Ok(confirmation) => Ok(confirmation.clone()),
        Err(e) => Err(format!("{e:#}")),
    };
    let phase = with_wizard(&state, id, |w| {
        w.finish_submission(result)?;
        Ok(w.phase().as_str())
    })?;
    tracing::debug!(booking_id = %id, phase, "submission finished");

    match outcome {
        Ok(confirmation) => {
            tracing::info!(booking_id = %id, reference = %confirmation.reference, "booking confirmed");
            schedule_reset(&state, id, confirmation.reference.clone());
            Ok(confirmation)
        }
        Err(e) => {
            tracing::error!(booking_id = %id, reference = %request.reference, error = %e, "booking submission failed");
            Err(AppError::Reservation(format!("{e:#}")))
        }
    }
}

fn schedule_reset(state: &Arc<AppState>, id: Uuid, reference: String) {
    let state = Arc::clone(state);
    tokio::spawn(async move {
        tokio::time::sleep(state.config.reset_delay).await;
        let reset = state
            .wizards()
            .get_mut(&id)
            .map(|w| w.reset_after_success(&reference))
            .unwrap_or(false);
        if reset {
            tracing::info!(booking_id = %id, reference = %reference, "booking wizard reset after confirmation");
        }
    });
}
