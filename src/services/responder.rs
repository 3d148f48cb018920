use crate::models::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Menu,
    Services,
    Hours,
    Location,
    Reservation,
}

/// Keyword sets in match order. The first topic with a keyword contained in
/// the lower-cased input wins.
const KEYWORDS: [(Topic, &[&str]); 5] = [
    (Topic::Menu, &["menu", "food", "drink", "coffee"]),
    (Topic::Services, &["service", "gringo", "tour", "class"]),
    (Topic::Hours, &["hour", "open", "time", "horario", "abierto"]),
    (
        Topic::Location,
        &["location", "address", "where", "dirección", "dónde"],
    ),
    (
        Topic::Reservation,
        &["reservation", "book", "reserve", "reservación"],
    ),
];

pub fn classify(input: &str) -> Option<Topic> {
    let text = input.to_lowercase();
    KEYWORDS
        .iter()
        .find(|(_, words)| words.iter().any(|w| text.contains(w)))
        .map(|(topic, _)| *topic)
}

pub fn reply_for(topic: Option<Topic>, locale: Locale) -> &'static str {
    match (topic, locale) {
        (Some(Topic::Menu), Locale::En) => {
            "Our menu has specialty coffee from local farms, fresh pastries and a weekend brunch. Check the Menu section for prices!"
        }
        (Some(Topic::Menu), Locale::Es) => {
            "Nuestro menú tiene café de especialidad de fincas locales, pastelería fresca y brunch los fines de semana. ¡Mira la sección de Menú para ver precios!"
        }
        (Some(Topic::Services), Locale::En) => {
            "We offer coffee tastings, barista classes, coffee farm tours and brunch tables. You can book any of them from the Book button."
        }
        (Some(Topic::Services), Locale::Es) => {
            "Ofrecemos catas de café, clases de barista, tours a fincas cafeteras y mesas de brunch. Puedes reservar cualquiera desde el botón Reservar."
        }
        (Some(Topic::Hours), Locale::En) => {
            "We're open Monday to Saturday from 7:00 to 19:00 and Sundays from 8:00 to 14:00."
        }
        (Some(Topic::Hours), Locale::Es) => {
            "Abrimos de lunes a sábado de 7:00 a 19:00 y los domingos de 8:00 a 14:00."
        }
        (Some(Topic::Location), Locale::En) => {
            "You'll find us on Calle 10 #40-20, El Poblado, Medellín. There's a map at the bottom of the page."
        }
        (Some(Topic::Location), Locale::Es) => {
            "Estamos en la Calle 10 #40-20, El Poblado, Medellín. Hay un mapa al final de la página."
        }
        (Some(Topic::Reservation), Locale::En) => {
            "To make a reservation, press Book, pick an experience, a date and time, and leave your contact details. We'll confirm right away."
        }
        (Some(Topic::Reservation), Locale::Es) => {
            "Para reservar, presiona Reservar, elige una experiencia, fecha y hora, y deja tus datos de contacto. Te confirmamos enseguida."
        }
        (None, Locale::En) => {
            "Thanks for your message! A member of our team will get back to you shortly. Meanwhile, ask me about our menu, hours, location or reservations."
        }
        (None, Locale::Es) => {
            "¡Gracias por tu mensaje! Alguien de nuestro equipo te responderá pronto. Mientras tanto, pregúntame por el menú, horarios, ubicación o reservas."
        }
    }
}

pub fn greeting(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Hi! 👋 How can we help you today?",
        Locale::Es => "¡Hola! 👋 ¿En qué te podemos ayudar hoy?",
    }
}

pub fn auto_reply(input: &str, locale: Locale) -> &'static str {
    reply_for(classify(input), locale)
}
