//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Ids are hyphenated lowercase UUID strings. Hobby-id lists are compact JSON
//! arrays.

use agenda_core::{contact::ContactRecord, hobby::HobbyRecord};
use uuid::Uuid;

use crate::Result;

// ─── Ids ──────────────────────────────────────────────────────────────────────

pub fn new_id() -> String { Uuid::new_v4().hyphenated().to_string() }

// ─── Hobby-id lists ───────────────────────────────────────────────────────────

pub fn encode_ids(ids: &[String]) -> Result<String> {
  Ok(serde_json::to_string(ids)?)
}

pub fn decode_ids(s: &str) -> Result<Vec<String>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Raw row types ────────────────────────────────────────────────────────────

/// Raw column values for a `contacts` row.
pub struct RawContact {
  pub contact_id: String,
  pub name:       String,
  pub phone:      String,
  pub hobbies:    String,
}

impl RawContact {
  pub const COLUMNS: &'static str = "contact_id, name, phone, hobbies";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawContact {
      contact_id: row.get(0)?,
      name:       row.get(1)?,
      phone:      row.get(2)?,
      hobbies:    row.get(3)?,
    })
  }

  pub fn into_record(self) -> Result<ContactRecord> {
    Ok(ContactRecord {
      id:      self.contact_id,
      name:    self.name,
      phone:   self.phone,
      hobbies: decode_ids(&self.hobbies)?,
    })
  }
}

pub fn hobby_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<HobbyRecord> {
  Ok(HobbyRecord { id: row.get(0)?, description: row.get(1)? })
}
