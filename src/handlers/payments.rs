use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::services::signature::integrity_signature;
use crate::state::AppState;

/// Amounts arrive either as JSON numbers or as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(u64),
    Text(String),
}

impl Amount {
    /// Decimal text of the amount. Blank text is returned as-is so it is
    /// reported as missing.
    fn into_digits(self) -> Result<String, AppError> {
        match self {
            Amount::Number(n) => Ok(n.to_string()),
            Amount::Text(s) => {
                let s = s.trim();
                if s.bytes().all(|b| b.is_ascii_digit()) {
                    Ok(s.to_string())
                } else {
                    Err(AppError::BadRequest(format!(
                        "amountInCents must be a whole number of cents, got {s:?}"
                    )))
                }
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRequest {
    pub amount_in_cents: Option<Amount>,
    pub currency: Option<String>,
    pub reference: Option<String>,
}

#[derive(Serialize)]
pub struct SignatureResponse {
    signature: String,
}

// POST /api/payments/signature
pub async fn signature(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SignatureRequest>,
) -> Result<Json<SignatureResponse>, AppError> {
    let amount = body
        .amount_in_cents
        .map(Amount::into_digits)
        .transpose()?
        .unwrap_or_default();
    let currency = body.currency.unwrap_or_default().trim().to_string();
    let reference = body.reference.unwrap_or_default().trim().to_string();

    let missing: Vec<&str> = [
        ("amountInCents", &amount),
        ("currency", &currency),
        ("reference", &reference),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect();

    if !missing.is_empty() {
        tracing::warn!(missing = ?missing, "signature request missing fields");
        return Err(AppError::BadRequest(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    let secret = &state.config.payment_integrity_secret;
    if secret.is_empty() {
        tracing::error!("PAYMENT_INTEGRITY_SECRET not configured");
        return Err(AppError::Config(
            "payment integrity secret not configured".to_string(),
        ));
    }

    let signature = integrity_signature(secret, &amount, &currency, &reference)
        .map_err(|e| AppError::Config(e.to_string()))?;
    tracing::info!(reference = %reference, currency = %currency, "payment signature issued");

    Ok(Json(SignatureResponse { signature }))
}
