//! Record storage: save, load, list, and delete bird records.
//!
//! Each record is stored whole as a JSON document. The `name` and `photo`
//! columns are copies kept for lookups.

use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::model::BirdRecord;

use super::{Result, Storage, StorageError};

impl Storage {
    /// Saves a record, replacing any existing record with the same id.
    pub fn save_record(&self, user: &str, record: &BirdRecord) -> Result<()> {
        let conn = self.open_db(user)?;
        write_record(&conn, record)?;
        tracing::info!(user, id = %record.id, name = %record.name, "saved record");
        Ok(())
    }

    /// Loads a single record.
    pub fn load_record(&self, user: &str, id: Uuid) -> Result<BirdRecord> {
        let conn = self.open_db(user)?;
        read_record(&conn, id)?.ok_or(StorageError::RecordNotFound(id))
    }

    /// Lists all of a user's records, oldest save first.
    pub fn list_records(&self, user: &str) -> Result<Vec<BirdRecord>> {
        let conn = self.open_db(user)?;
        let mut stmt = conn.prepare("SELECT document FROM records")?;
        let documents = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut records = Vec::new();
        for document in documents {
            records.push(parse_document(&document?)?);
        }
        records.sort_by(|a: &BirdRecord, b: &BirdRecord| a.saved_at.cmp(&b.saved_at));
        Ok(records)
    }

    /// Deletes a record, and its photo if no other record shares it.
    pub fn delete_record(&self, user: &str, id: Uuid) -> Result<()> {
        let conn = self.open_db(user)?;
        let record = read_record(&conn, id)?.ok_or(StorageError::RecordNotFound(id))?;

        conn.execute("DELETE FROM records WHERE id = ?1", [id.to_string()])?;
        tracing::info!(user, %id, name = %record.name, "deleted record");

        if let Some(photo) = &record.photo {
            self.release_photo(&conn, user, &photo.sha256);
        }
        Ok(())
    }
}

pub(super) fn write_record(conn: &Connection, record: &BirdRecord) -> Result<()> {
    let document = serde_json::to_string(record)?;
    conn.execute(
        "INSERT INTO records (id, name, photo, saved_at, document)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT (id) DO UPDATE SET
             name = excluded.name,
             photo = excluded.photo,
             saved_at = excluded.saved_at,
             document = excluded.document",
        rusqlite::params![
            record.id.to_string(),
            &record.name,
            record.photo.as_ref().map(|p| p.sha256.as_str()),
            record.saved_at.to_string(),
            document,
        ],
    )?;
    Ok(())
}

pub(super) fn read_record(conn: &Connection, id: Uuid) -> Result<Option<BirdRecord>> {
    let document = conn
        .query_row(
            "SELECT document FROM records WHERE id = ?1",
            [id.to_string()],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    document.as_deref().map(parse_document).transpose()
}

/// Number of records pointing at a photo blob.
pub(super) fn photo_references(conn: &Connection, sha256: &str) -> Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM records WHERE photo = ?1",
        [sha256],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}

fn parse_document(document: &str) -> Result<BirdRecord> {
    serde_json::from_str(document)
        .map_err(|e| StorageError::Corrupt(format!("invalid record document: {e}")))
}
