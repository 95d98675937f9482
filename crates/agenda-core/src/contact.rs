//! Contact: the stored record and the outward-facing, enriched view.
//!
//! A [`ContactRecord`] only references hobbies by id. The [`Contact`] returned
//! to clients is assembled on read: hobby ids are resolved against the hobby
//! collection and `country` is looked up from the phone number. `country` is
//! never persisted.

use serde::{Deserialize, Serialize};

use crate::hobby::Hobby;

/// A contact as held by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
  pub id:      String,
  pub name:    String,
  pub phone:   String,
  /// Hobby ids, in the order the client supplied them.
  pub hobbies: Vec<String>,
}

/// Input for [`AgendaStore::insert_contact`](crate::store::AgendaStore::insert_contact).
/// The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewContact {
  pub name:    String,
  pub phone:   String,
  pub hobbies: Vec<String>,
}

/// Replacement for the mutable fields of a contact matched by phone.
#[derive(Debug, Clone)]
pub struct ContactUpdate {
  pub name:    String,
  pub hobbies: Vec<String>,
}

/// The computed read model for a contact. Never stored, always derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:      String,
  pub name:    String,
  pub phone:   String,
  pub country: String,
  pub hobbies: Vec<Hobby>,
}
