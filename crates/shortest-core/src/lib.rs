//! Core types and traits for the short.est URL shortener.
//!
//! This crate provides the types shared by the storage backends, the
//! shortener service and the HTTP gateway.

pub mod error;
pub mod repository;
pub mod shortcode;
pub mod shortener;

pub use error::{ShortenerError, StorageError};
pub use repository::{ReadRepository, Repository, UrlRecord};
pub use shortcode::ShortCode;
pub use shortener::{Shortener, UrlStatistics};
