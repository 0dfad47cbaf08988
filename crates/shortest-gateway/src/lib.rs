//! HTTP front end for the short.est shortener.
//!
//! Exposes encode/decode/statistics/list and a health probe under `/api`,
//! and the redirect path at the root. URL validation happens here; everything
//! else is delegated to a [`Shortener`](shortest_core::Shortener).

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod telemetry;

pub use app::App;
pub use state::AppState;
