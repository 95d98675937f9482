//! Hobby records and their API representation.

use serde::{Deserialize, Serialize};

/// A hobby as held by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HobbyRecord {
  pub id:          String,
  pub description: String,
}

/// A hobby as returned to clients, either directly or embedded in a
/// [`Contact`](crate::contact::Contact).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hobby {
  pub id:          String,
  pub description: String,
}

impl From<HobbyRecord> for Hobby {
  fn from(r: HobbyRecord) -> Self {
    Hobby { id: r.id, description: r.description }
  }
}
