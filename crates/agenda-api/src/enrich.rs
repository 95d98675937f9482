//! Enrichment adapter: turns a stored [`ContactRecord`] into the outward
//! [`Contact`] by resolving hobby ids and looking up the phone's country.
//!
//! Nothing computed here is written back to the store.

use std::collections::HashMap;

use agenda_core::{
  contact::{Contact, ContactRecord},
  hobby::Hobby,
  phone::PhoneValidator,
  store::AgendaStore,
};

use crate::error::ApiError;

/// Expand one record.
///
/// Hobbies come back in the order the record lists them. Ids that no longer
/// resolve are dropped, and a repeated id yields a single hobby. Any
/// validator failure aborts the expansion.
pub async fn expand_contact<S, V>(
  store:     &S,
  validator: &V,
  record:    ContactRecord,
) -> Result<Contact, ApiError>
where
  S: AgendaStore,
  V: PhoneValidator,
{
  let found = store
    .find_hobbies(record.hobbies.clone())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let mut by_id: HashMap<String, Hobby> = found
    .into_iter()
    .map(|h| (h.id.clone(), Hobby::from(h)))
    .collect();
  let hobbies = record
    .hobbies
    .iter()
    .filter_map(|id| by_id.remove(id))
    .collect();

  tracing::debug!(contact_id = %record.id, "looking up phone country");
  let info = validator
    .lookup(&record.phone)
    .await
    .map_err(|e| ApiError::Upstream(Box::new(e)))?;

  Ok(Contact {
    id:      record.id,
    name:    record.name,
    phone:   record.phone,
    country: info.country,
    hobbies,
  })
}

/// Expand every record in turn. The first failure aborts the whole list;
/// partial results are never returned.
pub async fn expand_all<S, V>(
  store:     &S,
  validator: &V,
  records:   Vec<ContactRecord>,
) -> Result<Vec<Contact>, ApiError>
where
  S: AgendaStore,
  V: PhoneValidator,
{
  let mut contacts = Vec::with_capacity(records.len());
  for record in records {
    contacts.push(expand_contact(store, validator, record).await?);
  }
  Ok(contacts)
}
