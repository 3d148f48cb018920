use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::models::{Catalog, ChatEvent, ChatSession};
use crate::services::reservations::ReservationProvider;
use crate::services::wizard::BookingWizard;

pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<Catalog>,
    pub wizards: Mutex<HashMap<Uuid, BookingWizard>>,
    pub chats: Mutex<HashMap<Uuid, ChatSession>>,
    pub reservations: Box<dyn ReservationProvider>,
    pub chat_tx: broadcast::Sender<ChatEvent>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        catalog: Catalog,
        reservations: Box<dyn ReservationProvider>,
    ) -> Self {
        let (chat_tx, _) = broadcast::channel(256);
        Self {
            config,
            catalog: Arc::new(catalog),
            wizards: Mutex::new(HashMap::new()),
            chats: Mutex::new(HashMap::new()),
            reservations,
            chat_tx,
        }
    }

    // Poisoning is ignored: every critical section leaves the maps consistent.
    pub fn wizards(&self) -> MutexGuard<'_, HashMap<Uuid, BookingWizard>> {
        self.wizards.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn chats(&self) -> MutexGuard<'_, HashMap<Uuid, ChatSession>> {
        self.chats.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
