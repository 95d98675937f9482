//! Handlers for the hobby endpoints.
//!
//! | Method   | Path       | Notes |
//! |----------|------------|-------|
//! | `GET`    | `/hobbies` | All hobbies |
//! | `GET`    | `/hobby`   | `?id` required; 404 if not found |
//! | `POST`   | `/hobby`   | Body: `{"description":"..."}` |
//! | `PUT`    | `/hobby`   | Body: `{"id":"...","description":"..."}` |
//! | `DELETE` | `/hobby`   | `?id` required; also strips the id from every contact |
//!
//! `PUT` without a description and `DELETE` without an id answer 404 rather
//! than 400; existing clients depend on those codes.

use axum::{
  Json,
  extract::{Query, State},
};
use agenda_core::{hobby::Hobby, phone::PhoneValidator, store::AgendaStore};
use serde::Deserialize;

use crate::{AppState, IdParams, error::ApiError, present};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /hobbies`
pub async fn list<S, V>(
  State(state): State<AppState<S, V>>,
) -> Result<Json<Vec<Hobby>>, ApiError>
where
  S: AgendaStore,
  V: PhoneValidator,
{
  let hobbies = state
    .store
    .list_hobbies()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(hobbies.into_iter().map(Hobby::from).collect()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /hobby?id=<id>`
pub async fn get_one<S, V>(
  State(state): State<AppState<S, V>>,
  Query(params): Query<IdParams>,
) -> Result<Json<Hobby>, ApiError>
where
  S: AgendaStore,
  V: PhoneValidator,
{
  let id = present(params.id).ok_or_else(|| ApiError::BadRequest("Bad request".into()))?;

  let hobby = state
    .store
    .get_hobby(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Hobby not found".into()))?;
  Ok(Json(Hobby::from(hobby)))
}

// ─── Create / update ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct HobbyBody {
  /// Only read by `PUT`.
  pub id:          Option<String>,
  pub description: Option<String>,
}

/// `POST /hobby`
pub async fn create<S, V>(
  State(state): State<AppState<S, V>>,
  Json(body): Json<HobbyBody>,
) -> Result<Json<Hobby>, ApiError>
where
  S: AgendaStore,
  V: PhoneValidator,
{
  let description =
    present(body.description).ok_or_else(|| ApiError::BadRequest("Bad request".into()))?;

  let hobby = state
    .store
    .insert_hobby(description)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(hobby_id = %hobby.id, "hobby created");
  Ok(Json(Hobby::from(hobby)))
}

/// `PUT /hobby`
pub async fn update<S, V>(
  State(state): State<AppState<S, V>>,
  Json(body): Json<HobbyBody>,
) -> Result<&'static str, ApiError>
where
  S: AgendaStore,
  V: PhoneValidator,
{
  let description =
    present(body.description).ok_or_else(|| ApiError::NotFound("Bad request".into()))?;
  let Some(id) = present(body.id) else {
    return Err(ApiError::NotFound("Hobby not found".into()));
  };

  let matched = state
    .store
    .update_hobby(id, description)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !matched {
    return Err(ApiError::NotFound("Hobby not found".into()));
  }
  Ok("OK")
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /hobby?id=<id>`
///
/// The hobby row goes first, then the id is pulled from contacts. The two
/// steps are not atomic: a failure in between leaves dangling ids behind,
/// which enrichment skips on read.
pub async fn delete<S, V>(
  State(state): State<AppState<S, V>>,
  Query(params): Query<IdParams>,
) -> Result<&'static str, ApiError>
where
  S: AgendaStore,
  V: PhoneValidator,
{
  let id = present(params.id).ok_or_else(|| ApiError::NotFound("Bad request".into()))?;

  let deleted = state
    .store
    .delete_hobby(id.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(ApiError::NotFound("Hobby not found".into()));
  }

  let modified = state
    .store
    .pull_hobby_from_contacts(id.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(hobby_id = %id, contacts = modified, "hobby deleted");
  Ok("OK")
}
