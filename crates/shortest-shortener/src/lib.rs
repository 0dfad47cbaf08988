//! URL shortener service implementation.
//!
//! This crate ties a [`Repository`](shortest_core::Repository) and a
//! [`Generator`](shortest_generator::Generator) together into the
//! [`Shortener`](shortest_core::Shortener) used by the gateway.

pub mod clock;
pub mod service;

pub use clock::{Clock, SystemClock};
pub use service::{ShortenerService, ShortenerSettings, DEFAULT_MAX_ATTEMPTS};
