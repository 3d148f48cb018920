use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::catalog::LocaleQuery;
use crate::errors::AppError;
use crate::models::{BookingDraft, BookingField, Locale, WizardPhase, WizardStep};
use crate::services::booking::{self, with_wizard};
use crate::services::wizard::BookingWizard;
use crate::state::AppState;

#[derive(Serialize)]
pub struct WizardView {
    id: Uuid,
    open: bool,
    locale: Locale,
    step: u8,
    step_name: WizardStep,
    phase: WizardPhase,
    draft: BookingDraft,
    total: u64,
    currency: String,
    can_advance: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    blocked_by: Option<String>,
}

impl WizardView {
    fn new(id: Uuid, wizard: &BookingWizard, currency: &str, today: NaiveDate) -> Self {
        let blocked_by = wizard
            .validate_step(wizard.step(), today)
            .err()
            .map(|e| e.to_string());

        Self {
            id,
            open: wizard.is_open(),
            locale: wizard.locale(),
            step: wizard.step().number(),
            step_name: wizard.step(),
            phase: wizard.phase().clone(),
            draft: wizard.draft().clone(),
            total: wizard.compute_total(),
            currency: currency.to_string(),
            can_advance: blocked_by.is_none(),
            blocked_by,
        }
    }
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn view(state: &AppState, id: Uuid) -> Result<WizardView, AppError> {
    let today = today();
    with_wizard(state, id, |w| {
        Ok(WizardView::new(id, w, &state.catalog.currency, today))
    })
}

// POST /api/bookings
pub async fn open_booking(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
) -> Result<(StatusCode, Json<WizardView>), AppError> {
    let id = booking::open_wizard(&state, query.resolve(&state));
    Ok((StatusCode::CREATED, Json(view(&state, id)?)))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    Ok(Json(view(&state, id)?))
}

// PUT /api/bookings/:id/fields
#[derive(Deserialize)]
pub struct SetFieldRequest {
    pub field: BookingField,
    #[serde(default)]
    pub value: String,
}

pub async fn set_field(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetFieldRequest>,
) -> Result<Json<WizardView>, AppError> {
    with_wizard(&state, id, |w| w.set_field(body.field, &body.value))?;
    Ok(Json(view(&state, id)?))
}

// POST /api/bookings/:id/advance
pub async fn advance(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    let step = with_wizard(&state, id, |w| w.advance(today()))?;
    tracing::debug!(booking_id = %id, step = step.number(), "advance");
    Ok(Json(view(&state, id)?))
}

// POST /api/bookings/:id/retreat
pub async fn retreat(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    with_wizard(&state, id, |w| w.retreat())?;
    Ok(Json(view(&state, id)?))
}

// POST /api/bookings/:id/submit
pub async fn submit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    booking::submit(&state, id, today()).await?;
    Ok(Json(view(&state, id)?))
}

// POST /api/bookings/:id/open
pub async fn reopen(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    with_wizard(&state, id, |w| {
        w.open();
        Ok(())
    })?;
    Ok(Json(view(&state, id)?))
}

// DELETE /api/bookings/:id
pub async fn close(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<WizardView>, AppError> {
    with_wizard(&state, id, |w| w.close())?;
    tracing::info!(booking_id = %id, "booking wizard closed");
    Ok(Json(view(&state, id)?))
}
