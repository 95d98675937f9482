//! [`SqliteStore`]: the SQLite implementation of [`AgendaStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use agenda_core::{
  contact::{ContactRecord, ContactUpdate, NewContact},
  hobby::HobbyRecord,
  store::AgendaStore,
};

use crate::{
  encode::{RawContact, encode_ids, hobby_from_row, new_id},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Agenda document store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── AgendaStore impl ────────────────────────────────────────────────────────

impl AgendaStore for SqliteStore {
  type Error = crate::Error;

  // ── Contacts ──────────────────────────────────────────────────────────────

  async fn list_contacts(&self, name: Option<String>) -> Result<Vec<ContactRecord>> {
    let raws: Vec<RawContact> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(n) = name {
          let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM contacts WHERE name = ?1 ORDER BY rowid",
            RawContact::COLUMNS
          ))?;
          stmt
            .query_map(rusqlite::params![n], RawContact::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM contacts ORDER BY rowid",
            RawContact::COLUMNS
          ))?;
          stmt
            .query_map([], RawContact::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawContact::into_record).collect()
  }

  async fn get_contact(&self, id: String) -> Result<Option<ContactRecord>> {
    let raw: Option<RawContact> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT {} FROM contacts WHERE contact_id = ?1",
          RawContact::COLUMNS
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![id], RawContact::from_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawContact::into_record).transpose()
  }

  async fn insert_contact(&self, input: NewContact) -> Result<Option<ContactRecord>> {
    let record = ContactRecord {
      id:      new_id(),
      name:    input.name,
      phone:   input.phone,
      hobbies: input.hobbies,
    };

    let id_str      = record.id.clone();
    let name        = record.name.clone();
    let phone       = record.phone.clone();
    let hobbies_str = encode_ids(&record.hobbies)?;

    // The phone check and the insert share one transaction, so two creates
    // racing on the same phone cannot both land.
    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let taken = tx
          .query_row(
            "SELECT 1 FROM contacts WHERE phone = ?1 LIMIT 1",
            rusqlite::params![phone],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if taken {
          return Ok(false);
        }
        tx.execute(
          "INSERT INTO contacts (contact_id, name, phone, hobbies) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, phone, hobbies_str],
        )?;
        tx.commit()?;
        Ok(true)
      })
      .await?;

    if !inserted {
      tracing::debug!(phone = %record.phone, "phone already taken");
      return Ok(None);
    }
    tracing::debug!(contact_id = %record.id, "inserted contact");
    Ok(Some(record))
  }

  async fn update_contact_by_phone(
    &self,
    phone:  String,
    update: ContactUpdate,
  ) -> Result<bool> {
    let hobbies_str = encode_ids(&update.hobbies)?;
    let name        = update.name;

    // Only the first contact holding the phone is touched.
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE contacts SET name = ?1, hobbies = ?2
           WHERE contact_id = (
             SELECT contact_id FROM contacts WHERE phone = ?3 ORDER BY rowid LIMIT 1
           )",
          rusqlite::params![name, hobbies_str, phone],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn delete_contact(&self, id: String) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM contacts WHERE contact_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(deleted > 0)
  }

  async fn pull_hobby_from_contacts(&self, hobby_id: String) -> Result<u64> {
    // Read, filter and rewrite on one transaction so a concurrent contact
    // update cannot be overwritten with a stale hobby list.
    let modified = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let referencing = {
          let mut stmt = tx.prepare(
            "SELECT c.contact_id, c.hobbies FROM contacts c
             WHERE EXISTS (SELECT 1 FROM json_each(c.hobbies) j WHERE j.value = ?1)",
          )?;
          stmt
            .query_map(rusqlite::params![hobby_id], |row| {
              Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };

        for (contact_id, hobbies_json) in &referencing {
          let mut ids: Vec<String> =
            serde_json::from_str(hobbies_json).map_err(json_column_error)?;
          ids.retain(|id| *id != hobby_id);
          let rewritten = serde_json::to_string(&ids).map_err(json_column_error)?;
          tx.execute(
            "UPDATE contacts SET hobbies = ?1 WHERE contact_id = ?2",
            rusqlite::params![rewritten, contact_id],
          )?;
        }
        tx.commit()?;
        Ok(referencing.len() as u64)
      })
      .await?;

    tracing::debug!(modified, "pulled hobby from contacts");
    Ok(modified)
  }

  // ── Hobbies ───────────────────────────────────────────────────────────────

  async fn list_hobbies(&self) -> Result<Vec<HobbyRecord>> {
    let hobbies = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT hobby_id, description FROM hobbies ORDER BY rowid")?;
        let rows = stmt
          .query_map([], hobby_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(hobbies)
  }

  async fn get_hobby(&self, id: String) -> Result<Option<HobbyRecord>> {
    let hobby = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT hobby_id, description FROM hobbies WHERE hobby_id = ?1",
              rusqlite::params![id],
              hobby_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(hobby)
  }

  async fn find_hobbies(&self, ids: Vec<String>) -> Result<Vec<HobbyRecord>> {
    if ids.is_empty() {
      return Ok(Vec::new());
    }
    let ids_json = encode_ids(&ids)?;

    let hobbies = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT hobby_id, description FROM hobbies
           WHERE hobby_id IN (SELECT value FROM json_each(?1))
           ORDER BY rowid",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![ids_json], hobby_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(hobbies)
  }

  async fn insert_hobby(&self, description: String) -> Result<HobbyRecord> {
    let record = HobbyRecord { id: new_id(), description };

    let id_str      = record.id.clone();
    let description = record.description.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO hobbies (hobby_id, description) VALUES (?1, ?2)",
          rusqlite::params![id_str, description],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(hobby_id = %record.id, "inserted hobby");
    Ok(record)
  }

  async fn update_hobby(&self, id: String, description: String) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE hobbies SET description = ?1 WHERE hobby_id = ?2",
          rusqlite::params![description, id],
        )?)
      })
      .await?;
    Ok(changed > 0)
  }

  async fn delete_hobby(&self, id: String) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM hobbies WHERE hobby_id = ?1",
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(deleted > 0)
  }
}

/// Surface a malformed `hobbies` column from inside a connection closure.
fn json_column_error(e: serde_json::Error) -> rusqlite::Error {
  rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
}
