use std::env;
use std::time::Duration;

use crate::models::Locale;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub static_dir: String,
    pub default_locale: Locale,
    pub payment_integrity_secret: String,
    pub reservations_url: String,
    pub catalog_path: String,
    pub submit_delay: Duration,
    pub reset_delay: Duration,
    pub chat_reply_delay_min: Duration,
    pub chat_reply_delay_max: Duration,
    /// Wizards and chat sessions idle this long are evicted.
    pub session_ttl: Duration,
    pub sweep_interval: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let reply_min = millis("CHAT_REPLY_DELAY_MIN_MS", 1000);
        let reply_max = millis("CHAT_REPLY_DELAY_MAX_MS", 3000);

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "dist".to_string()),
            default_locale: env::var("DEFAULT_LOCALE")
                .ok()
                .and_then(|v| Locale::parse(&v))
                .unwrap_or_default(),
            payment_integrity_secret: env::var("PAYMENT_INTEGRITY_SECRET").unwrap_or_default(),
            reservations_url: env::var("RESERVATIONS_URL").unwrap_or_default(),
            catalog_path: env::var("CATALOG_PATH").unwrap_or_default(),
            submit_delay: millis("SUBMIT_DELAY_MS", 1500),
            reset_delay: millis("RESET_DELAY_MS", 3000),
            chat_reply_delay_min: reply_min.min(reply_max),
            chat_reply_delay_max: reply_max.max(reply_min),
            session_ttl: secs("SESSION_TTL_SECS", 1800),
            sweep_interval: secs("SWEEP_INTERVAL_SECS", 60),
        }
    }
}

fn millis(key: &str, default: u64) -> Duration {
    let ms = env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default);
    Duration::from_millis(ms)
}

fn secs(key: &str, default: u64) -> Duration {
    let s = env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default);
    Duration::from_secs(s)
}
