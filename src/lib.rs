//! Deckwright Library
//!
//! This library provides the core of the Deckwright presentation service:
//! an in-memory slide model, themes, markdown formatting, composite slide
//! components, and cross-slide shape alignment. The optional `web` feature
//! adds the HTTP API.

// Module declarations
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod models;
pub mod services;

#[cfg(feature = "web")]
pub mod web;

pub use error::{DeckError, DeckResult};
