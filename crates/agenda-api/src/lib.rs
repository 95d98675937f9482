//! JSON REST API for Agenda.
//!
//! Exposes an axum [`Router`] backed by any [`AgendaStore`] and
//! [`PhoneValidator`]. Transport concerns (binding, tracing layers) are the
//! caller's responsibility.
//!
//! Routing is by exact method and path. Every pair not listed in
//! [`api_router`] (unknown path, or a known path with another method) is
//! answered with `200 Endpoint not found`.

pub mod contacts;
pub mod enrich;
pub mod error;
pub mod hobbies;
pub mod validator;

use std::sync::Arc;

use agenda_core::{phone::PhoneValidator, store::AgendaStore};
use axum::{
  Router,
  http::StatusCode,
  routing::get,
};
use serde::Deserialize;

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Process-wide resources shared by every handler.
pub struct AppState<S, V> {
  pub store:     Arc<S>,
  pub validator: Arc<V>,
}

impl<S, V> Clone for AppState<S, V> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      validator: Arc::clone(&self.validator),
    }
  }
}

// ─── Shared extractors ────────────────────────────────────────────────────────

/// `?id=` query parameter used by the single-resource endpoints.
#[derive(Debug, Deserialize)]
pub struct IdParams {
  pub id: Option<String>,
}

/// Treat empty strings the same as absent values.
pub(crate) fn present(value: Option<String>) -> Option<String> {
  value.filter(|v| !v.is_empty())
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
pub fn api_router<S, V>(state: AppState<S, V>) -> Router<()>
where
  S: AgendaStore + 'static,
  V: PhoneValidator + 'static,
{
  Router::new()
    // Contacts
    .route("/contacts", get(contacts::list::<S, V>).fallback(endpoint_not_found))
    .route(
      "/contact",
      get(contacts::get_one::<S, V>)
        .post(contacts::create::<S, V>)
        .put(contacts::update::<S, V>)
        .delete(contacts::delete::<S, V>)
        .fallback(endpoint_not_found),
    )
    // Hobbies
    .route("/hobbies", get(hobbies::list::<S, V>).fallback(endpoint_not_found))
    .route(
      "/hobby",
      get(hobbies::get_one::<S, V>)
        .post(hobbies::create::<S, V>)
        .put(hobbies::update::<S, V>)
        .delete(hobbies::delete::<S, V>)
        .fallback(endpoint_not_found),
    )
    .fallback(endpoint_not_found)
    .with_state(state)
}

/// Unmatched routes answer 200, not 404.
async fn endpoint_not_found() -> (StatusCode, &'static str) {
  (StatusCode::OK, "Endpoint not found")
}

// ─── Integration tests ────────────────────────────────────────────────────────
