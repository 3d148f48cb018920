use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::models::{Locale, TIME_SLOTS};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

impl LocaleQuery {
    pub fn resolve(&self, state: &AppState) -> Locale {
        self.locale
            .as_deref()
            .and_then(Locale::parse)
            .unwrap_or(state.config.default_locale)
    }
}

#[derive(Serialize)]
pub struct OfferingResponse {
    id: String,
    name: String,
    unit_price: u64,
    duration: String,
    capacity: u32,
    description: String,
}

#[derive(Serialize)]
pub struct CatalogResponse {
    locale: Locale,
    currency: String,
    offerings: Vec<OfferingResponse>,
    time_slots: Vec<&'static str>,
}

// GET /api/catalog
pub async fn get_catalog(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
) -> Json<CatalogResponse> {
    let locale = query.resolve(&state);

    let offerings = state
        .catalog
        .offerings
        .iter()
        .map(|o| OfferingResponse {
            id: o.id.clone(),
            name: o.name.get(locale).to_string(),
            unit_price: o.unit_price,
            duration: o.duration.clone(),
            capacity: o.capacity,
            description: o.description.get(locale).to_string(),
        })
        .collect();

    Json(CatalogResponse {
        locale,
        currency: state.catalog.currency.clone(),
        offerings,
        time_slots: TIME_SLOTS.to_vec(),
    })
}
