pub mod booking;
pub mod chat;
pub mod icons;
pub mod reservations;
pub mod responder;
pub mod signature;
pub mod sweeper;
pub mod wizard;
