use std::path::Path;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::util::parse_json_or;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    #[default]
    Es,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Some(Locale::En),
            "es" => Some(Locale::Es),
            _ => None,
        }
    }
}

/// A text available in every supported locale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Localized {
    pub en: String,
    pub es: String,
}

impl Localized {
    pub fn new(en: &str, es: &str) -> Self {
        Self {
            en: en.to_string(),
            es: es.to_string(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Es => &self.es,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Offering {
    pub id: String,
    pub name: Localized,
    /// Price per guest in whole currency units.
    pub unit_price: u64,
    pub duration: String,
    pub capacity: u32,
    pub description: Localized,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub currency: String,
    pub offerings: Vec<Offering>,
}

/// Bookable times of day, in display order.
pub const TIME_SLOTS: [&str; 8] = [
    "08:00", "09:00", "10:00", "11:00", "14:00", "15:00", "16:00", "17:00",
];

pub fn parse_time_slot(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    if !TIME_SLOTS.contains(&s) {
        return None;
    }
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}

impl Catalog {
    pub fn builtin() -> Self {
        Self {
            currency: "COP".to_string(),
            offerings: vec![
                Offering {
                    id: "coffee-tasting".to_string(),
                    name: Localized::new("Coffee Tasting", "Cata de Café"),
                    unit_price: 45_000,
                    duration: "90 min".to_string(),
                    capacity: 8,
                    description: Localized::new(
                        "Guided cupping of three single-origin coffees from local farms.",
                        "Catación guiada de tres cafés de origen de fincas locales.",
                    ),
                },
                Offering {
                    id: "barista-class".to_string(),
                    name: Localized::new("Barista Class", "Clase de Barista"),
                    unit_price: 80_000,
                    duration: "2 h".to_string(),
                    capacity: 6,
                    description: Localized::new(
                        "Hands-on espresso, milk texturing and latte art with our head barista.",
                        "Espresso, texturizado de leche y arte latte con nuestro barista principal.",
                    ),
                },
                Offering {
                    id: "gringo-tour".to_string(),
                    name: Localized::new("Coffee Farm Tour", "Tour de Finca Cafetera"),
                    unit_price: 120_000,
                    duration: "4 h".to_string(),
                    capacity: 12,
                    description: Localized::new(
                        "Half-day visit to a partner farm, from cherry picking to roasting.",
                        "Visita de medio día a una finca aliada, de la recolección al tostado.",
                    ),
                },
                Offering {
                    id: "brunch-table".to_string(),
                    name: Localized::new("Brunch Table", "Mesa de Brunch"),
                    unit_price: 35_000,
                    duration: "2 h".to_string(),
                    capacity: 10,
                    description: Localized::new(
                        "Reserved table with our weekend brunch menu and bottomless filter coffee.",
                        "Mesa reservada con el menú de brunch y café filtrado ilimitado.",
                    ),
                },
            ],
        }
    }

    /// Reads a catalog override from `path`, keeping the built-in catalog when
    /// the file is missing or malformed.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(raw) => parse_json_or(&raw, Self::builtin()),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "catalog file unreadable, using built-in catalog");
                Self::builtin()
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&Offering> {
        self.offerings.iter().find(|o| o.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_unique() {
        let catalog = Catalog::builtin();
        let mut ids: Vec<_> = catalog.offerings.iter().map(|o| o.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.offerings.len());
        assert!(catalog.offerings.iter().all(|o| o.capacity >= 1));
    }

    #[test]
    fn test_time_slot_must_be_listed() {
        assert_eq!(
            parse_time_slot("09:00"),
            NaiveTime::from_hms_opt(9, 0, 0)
        );
        assert!(parse_time_slot("09:30").is_none());
        assert!(parse_time_slot("noon").is_none());
    }

    #[test]
    fn test_localized_lookup() {
        let catalog = Catalog::builtin();
        let tasting = catalog.find("coffee-tasting").unwrap();
        assert_eq!(tasting.name.get(Locale::En), "Coffee Tasting");
        assert_eq!(tasting.name.get(Locale::Es), "Cata de Café");
        assert!(catalog.find("karaoke").is_none());
    }

    #[test]
    fn test_locale_parse() {
        assert_eq!(Locale::parse("EN"), Some(Locale::En));
        assert_eq!(Locale::parse(" es "), Some(Locale::Es));
        assert_eq!(Locale::parse("fr"), None);
    }

    #[test]
    fn test_load_falls_back_on_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(Catalog::load(&path), Catalog::builtin());
        assert_eq!(Catalog::load(&dir.path().join("missing.json")), Catalog::builtin());
    }

    #[test]
    fn test_load_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"currency":"USD","offerings":[{"id":"espresso-flight","name":{"en":"Espresso Flight","es":"Vuelo de Espresso"},"unit_price":12,"duration":"30 min","capacity":4,"description":{"en":"Three shots.","es":"Tres shots."}}]}"#,
        )
        .unwrap();
        let catalog = Catalog::load(&path);
        assert_eq!(catalog.currency, "USD");
        assert_eq!(catalog.offerings.len(), 1);
        assert_eq!(catalog.find("espresso-flight").unwrap().unit_price, 12);
    }
}
