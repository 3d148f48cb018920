use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

use crate::models::WizardPhase;
use crate::state::AppState;

/// Drops wizards and chat sessions idle for longer than the session TTL.
/// Wizards mid-submission are kept so their outcome can still land.
pub fn evict_idle(state: &AppState, now: Instant) -> (usize, usize) {
    let ttl = state.config.session_ttl;
    let expired = |last_active: Instant| now.saturating_duration_since(last_active) > ttl;

    let wizards = {
        let mut wizards = state.wizards();
        let before = wizards.len();
        wizards.retain(|_, w| *w.phase() == WizardPhase::Submitting || !expired(w.last_active()));
        before - wizards.len()
    };

    let chats = {
        let mut chats = state.chats();
        let before = chats.len();
        chats.retain(|_, s| !expired(s.last_active));
        before - chats.len()
    };

    (wizards, chats)
}

pub fn spawn(state: Arc<AppState>) -> JoinHandle<()> {
    let period = state.config.sweep_interval.max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            let (wizards, chats) = evict_idle(&state, Instant::now());
            if wizards + chats > 0 {
                tracing::info!(wizards, chats, "evicted idle sessions");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::{BookingField, Catalog, Locale};
    use crate::services::reservations::simulated::SimulatedReservations;
    use crate::services::{booking, chat};

    fn test_state() -> Arc<AppState> {
        let mut config = AppConfig::from_env();
        config.session_ttl = Duration::from_secs(60);
        Arc::new(AppState::new(
            config,
            Catalog::builtin(),
            Box::new(SimulatedReservations::new(Duration::ZERO)),
        ))
    }

    #[test]
    fn test_fresh_entries_survive() {
        let state = test_state();
        booking::open_wizard(&state, Locale::En);
        chat::open_session(&state, Locale::En);

        assert_eq!(evict_idle(&state, Instant::now()), (0, 0));
        assert_eq!(state.wizards().len(), 1);
        assert_eq!(state.chats().len(), 1);
    }

    #[test]
    fn test_idle_entries_evicted() {
        let state = test_state();
        let wizard = booking::open_wizard(&state, Locale::En);
        let (session, _) = chat::open_session(&state, Locale::Es);

        let later = Instant::now() + Duration::from_secs(61);
        assert_eq!(evict_idle(&state, later), (1, 1));
        assert!(booking::with_wizard(&state, wizard, |_| Ok(())).is_err());
        assert!(chat::messages(&state, session).is_none());
    }

    #[test]
    fn test_submitting_wizard_kept() {
        let state = test_state();
        let id = booking::open_wizard(&state, Locale::En);
        let today = chrono::Local::now().date_naive();
        let date = (today + chrono::Days::new(2)).format("%Y-%m-%d").to_string();
        booking::with_wizard(&state, id, |w| {
            w.set_field(BookingField::Service, "coffee-tasting")?;
            w.advance(today)?;
            w.set_field(BookingField::Date, &date)?;
            w.set_field(BookingField::Time, "08:00")?;
            w.set_field(BookingField::Guests, "1")?;
            w.advance(today)?;
            w.set_field(BookingField::Name, "Ana")?;
            w.set_field(BookingField::Email, "ana@example.com")?;
            w.set_field(BookingField::Phone, "+573001234567")?;
            w.advance(today)?;
            w.submit(today)
        })
        .unwrap();

        let later = Instant::now() + Duration::from_secs(61);
        assert_eq!(evict_idle(&state, later), (0, 0));
        assert_eq!(state.wizards().len(), 1);
    }
}
