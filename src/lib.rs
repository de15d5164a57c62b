// ============================================================================
// Character Roster Library
// ============================================================================

//! A roster of fictional characters kept in one JSON file.
//!
//! - [`storage`] loads and atomically replaces the whole document.
//! - [`service`] implements list/get/create/update/delete on top of a store.
//! - [`web`] exposes the service as a REST API (axum).
//! - [`client`] talks to that API and keeps a filtered local view.
//!
//! ```no_run
//! use std::sync::Arc;
//! use character_roster::{AppState, JsonFileStore, build_router};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Arc::new(JsonFileStore::new("user.json"));
//! let router = build_router(AppState::from_store(store));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod service;
pub mod state;
pub mod storage;
pub mod web;

pub use crate::core::{Result, RosterError};
pub use client::{RosterClient, RosterSession, RosterView};
pub use config::AppConfig;
pub use domain::{Character, CharacterId, CharacterPatch, Document, NewCharacter};
pub use service::CharacterService;
pub use state::AppState;
pub use storage::{DocumentStore, InMemoryStore, JsonFileStore};
pub use web::build_router;
