//! The `AgendaStore` trait.
//!
//! A document store with two collections, contacts and hobbies. The trait
//! mirrors the handful of document operations the API needs (find, find one,
//! insert one, update one, update many, delete one). Nothing here spans both
//! collections atomically: cross-collection work such as hobby cleanup is
//! sequenced by the caller.

use std::future::Future;

use crate::{
  contact::{ContactRecord, ContactUpdate, NewContact},
  hobby::HobbyRecord,
};

/// Abstraction over an Agenda storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait AgendaStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Contacts ──────────────────────────────────────────────────────────

  /// All contacts, or only those whose name equals `name` exactly.
  fn list_contacts(
    &self,
    name: Option<String>,
  ) -> impl Future<Output = Result<Vec<ContactRecord>, Self::Error>> + Send + '_;

  /// Retrieve a contact by id. Returns `None` if not found.
  fn get_contact(
    &self,
    id: String,
  ) -> impl Future<Output = Result<Option<ContactRecord>, Self::Error>> + Send + '_;

  /// Persist a new contact unless another contact already holds its phone,
  /// in which case nothing is written and `None` is returned. The check and
  /// the insert are atomic. Hobby ids are stored as given; no existence
  /// check is made.
  fn insert_contact(
    &self,
    input: NewContact,
  ) -> impl Future<Output = Result<Option<ContactRecord>, Self::Error>> + Send + '_;

  /// Overwrite name and hobbies on the contact whose phone equals `phone`.
  /// Returns `false` if no contact matched.
  fn update_contact_by_phone(
    &self,
    phone: String,
    update: ContactUpdate,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete a contact by id. Returns `false` if nothing was deleted.
  fn delete_contact(
    &self,
    id: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Remove `hobby_id` from every contact's hobby list. Returns the number of
  /// contacts modified. Each contact is rewritten atomically with respect to
  /// concurrent contact updates.
  fn pull_hobby_from_contacts(
    &self,
    hobby_id: String,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Hobbies ───────────────────────────────────────────────────────────

  fn list_hobbies(
    &self,
  ) -> impl Future<Output = Result<Vec<HobbyRecord>, Self::Error>> + Send + '_;

  /// Retrieve a hobby by id. Returns `None` if not found.
  fn get_hobby(
    &self,
    id: String,
  ) -> impl Future<Output = Result<Option<HobbyRecord>, Self::Error>> + Send + '_;

  /// Every hobby whose id is in `ids`. Unknown ids are skipped; duplicates in
  /// `ids` yield one record. Order is unspecified.
  fn find_hobbies(
    &self,
    ids: Vec<String>,
  ) -> impl Future<Output = Result<Vec<HobbyRecord>, Self::Error>> + Send + '_;

  fn insert_hobby(
    &self,
    description: String,
  ) -> impl Future<Output = Result<HobbyRecord, Self::Error>> + Send + '_;

  /// Overwrite a hobby's description. Returns `false` if no hobby matched.
  fn update_hobby(
    &self,
    id: String,
    description: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Delete a hobby by id. Returns `false` if nothing was deleted.
  /// Does not touch contacts; see [`AgendaStore::pull_hobby_from_contacts`].
  fn delete_hobby(
    &self,
    id: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
