//! Handlers for the contact endpoints.
//!
//! | Method   | Path        | Notes |
//! |----------|-------------|-------|
//! | `GET`    | `/contacts` | Optional `?name=` exact-match filter; every result is enriched |
//! | `GET`    | `/contact`  | `?id` required; 404 if not found |
//! | `POST`   | `/contact`  | Body: [`ContactBody`]; duplicate phone answers "User already exists" |
//! | `PUT`    | `/contact`  | Body: [`ContactBody`]; matches on phone, hobby ids must exist |
//! | `DELETE` | `/contact`  | `?id` required |

use std::collections::HashSet;

use axum::{
  Json,
  extract::{Query, State},
};
use agenda_core::{
  contact::{Contact, ContactUpdate, NewContact},
  phone::PhoneValidator,
  store::AgendaStore,
};
use serde::{Deserialize, Serialize};

use crate::{AppState, IdParams, error::ApiError, enrich, present};

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Exact name to filter on. Empty is treated as absent.
  pub name: Option<String>,
}

/// `GET /contacts[?name=<name>]`
pub async fn list<S, V>(
  State(state): State<AppState<S, V>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Contact>>, ApiError>
where
  S: AgendaStore,
  V: PhoneValidator,
{
  let records = state
    .store
    .list_contacts(present(params.name))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let contacts = enrich::expand_all(&*state.store, &*state.validator, records).await?;
  Ok(Json(contacts))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /contact?id=<id>`
pub async fn get_one<S, V>(
  State(state): State<AppState<S, V>>,
  Query(params): Query<IdParams>,
) -> Result<Json<Contact>, ApiError>
where
  S: AgendaStore,
  V: PhoneValidator,
{
  let id = present(params.id).ok_or_else(|| ApiError::BadRequest("Bad request".into()))?;

  let record = state
    .store
    .get_contact(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Not found".into()))?;

  let contact = enrich::expand_contact(&*state.store, &*state.validator, record).await?;
  Ok(Json(contact))
}

// ─── Create / update body ─────────────────────────────────────────────────────

/// JSON body accepted by `POST /contact` and `PUT /contact`.
///
/// Every field is optional at the decoding layer so that presence checks can
/// answer with the API's own status codes.
#[derive(Debug, Deserialize)]
pub struct ContactBody {
  pub name:    Option<String>,
  pub phone:   Option<String>,
  /// Echoed back on create; never stored.
  pub country: Option<String>,
  pub hobbies: Option<Vec<String>>,
}

/// Representation returned by `POST /contact`: hobby ids are echoed raw, not
/// expanded, and no country lookup is made.
#[derive(Debug, Serialize)]
pub struct CreatedContact {
  pub id:      String,
  pub name:    String,
  pub phone:   String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub country: Option<String>,
  pub hobbies: Vec<String>,
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /contact`. Hobby ids are stored without an existence check.
pub async fn create<S, V>(
  State(state): State<AppState<S, V>>,
  Json(body): Json<ContactBody>,
) -> Result<Json<CreatedContact>, ApiError>
where
  S: AgendaStore,
  V: PhoneValidator,
{
  let (Some(name), Some(phone)) = (present(body.name), present(body.phone)) else {
    return Err(ApiError::BadRequest("Bad request".into()));
  };

  let Some(record) = state
    .store
    .insert_contact(NewContact {
      name,
      phone,
      hobbies: body.hobbies.unwrap_or_default(),
    })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
  else {
    return Err(ApiError::Conflict("User already exists".into()));
  };

  tracing::info!(contact_id = %record.id, "contact created");
  Ok(Json(CreatedContact {
    id:      record.id,
    name:    record.name,
    phone:   record.phone,
    country: body.country,
    hobbies: record.hobbies,
  }))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /contact`: replaces name and hobbies on the contact holding `phone`.
pub async fn update<S, V>(
  State(state): State<AppState<S, V>>,
  Json(body): Json<ContactBody>,
) -> Result<&'static str, ApiError>
where
  S: AgendaStore,
  V: PhoneValidator,
{
  let (Some(name), Some(phone), Some(hobbies)) =
    (present(body.name), present(body.phone), body.hobbies)
  else {
    return Err(ApiError::BadRequest("Bad request".into()));
  };

  let known: HashSet<String> = state
    .store
    .find_hobbies(hobbies.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .into_iter()
    .map(|h| h.id)
    .collect();
  if let Some(missing) = hobbies.iter().find(|id| !known.contains(*id)) {
    tracing::debug!(hobby_id = %missing, "update references unknown hobby");
    return Err(ApiError::NotFound("Hobby not found".into()));
  }

  let matched = state
    .store
    .update_contact_by_phone(phone, ContactUpdate { name, hobbies })
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !matched {
    return Err(ApiError::NotFound("Contact not found".into()));
  }
  Ok("OK")
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /contact?id=<id>`
pub async fn delete<S, V>(
  State(state): State<AppState<S, V>>,
  Query(params): Query<IdParams>,
) -> Result<&'static str, ApiError>
where
  S: AgendaStore,
  V: PhoneValidator,
{
  let id = present(params.id).ok_or_else(|| ApiError::BadRequest("Bad request".into()))?;

  let deleted = state
    .store
    .delete_contact(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !deleted {
    return Err(ApiError::NotFound("Contact not found".into()));
  }
  Ok("OK")
}
