//! Photo storage: content-addressed, zstd-compressed image blobs.
//!
//! A blob is named by the SHA-256 of the original bytes, so two records
//! carrying the same photo share one file. A blob is removed once no
//! record in the user's database points at it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jiff::Timestamp;
use rusqlite::Connection;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::model::{BirdRecord, PhotoRef};

use super::records::{photo_references, read_record, write_record};
use super::{Result, Storage, StorageError};

const COMPRESSION_LEVEL: i32 = 3;

impl Storage {
    /// Attaches a photo to a record, replacing any previous one.
    ///
    /// The previous blob is removed if nothing else uses it; failing to
    /// remove it is logged and otherwise ignored. If the record cannot be
    /// saved, the new blob is released again.
    pub fn update_record_photo(
        &self,
        user: &str,
        id: Uuid,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<BirdRecord> {
        if image_kind(bytes).is_none() {
            return Err(StorageError::NotAnImage(file_name.to_string()));
        }

        let conn = self.open_db(user)?;
        let mut record = read_record(&conn, id)?.ok_or(StorageError::RecordNotFound(id))?;

        let sha256 = hex::encode(Sha256::digest(bytes));
        self.write_blob(user, &sha256, bytes)?;

        let previous = record.photo.replace(PhotoRef {
            sha256: sha256.clone(),
            file_name: file_name.to_string(),
        });
        record.saved_at = Timestamp::now();
        if let Err(e) = write_record(&conn, &record) {
            self.release_photo(&conn, user, &sha256);
            return Err(e);
        }
        tracing::info!(user, %id, photo = %sha256, "updated record photo");

        if let Some(old) = previous
            && old.sha256 != sha256
        {
            self.release_photo(&conn, user, &old.sha256);
        }

        Ok(record)
    }

    /// Loads the original bytes of a stored photo.
    pub fn load_photo(&self, user: &str, photo: &PhotoRef) -> Result<Vec<u8>> {
        let path = self.blob_path(user, &photo.sha256)?;
        let compressed = match fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::PhotoNotFound(photo.sha256.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        let bytes = zstd::decode_all(compressed.as_slice())?;

        if hex::encode(Sha256::digest(&bytes)) != photo.sha256 {
            return Err(StorageError::Corrupt(format!(
                "photo {} does not match its hash",
                photo.sha256
            )));
        }
        Ok(bytes)
    }

    /// Removes a blob if no record references it any more.
    pub(super) fn release_photo(&self, conn: &Connection, user: &str, sha256: &str) {
        let result = photo_references(conn, sha256).and_then(|refs| {
            if refs > 0 {
                return Ok(false);
            }
            let path = self.blob_path(user, sha256)?;
            match fs::remove_file(path) {
                Ok(()) => Ok(true),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
                Err(e) => Err(e.into()),
            }
        });
        match result {
            Ok(true) => tracing::debug!(user, photo = sha256, "removed unused photo"),
            Ok(false) => {}
            Err(e) => tracing::warn!(user, photo = sha256, "could not remove old photo: {e}"),
        }
    }

    /// Writes a blob unless an intact copy is already stored. A damaged
    /// copy is replaced.
    fn write_blob(&self, user: &str, sha256: &str, bytes: &[u8]) -> Result<()> {
        let path = self.blob_path(user, sha256)?;
        if blob_matches(&path, sha256) {
            return Ok(());
        }
        if path.exists() {
            tracing::warn!(user, photo = sha256, "replacing damaged photo blob");
        }
        fs::create_dir_all(self.photos_dir(user)?)?;
        let compressed = zstd::encode_all(bytes, COMPRESSION_LEVEL)?;
        let tmp = path.with_extension("zst.tmp");
        fs::write(&tmp, compressed)?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    fn blob_path(&self, user: &str, sha256: &str) -> Result<PathBuf> {
        if sha256.len() != 64 || !sha256.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(StorageError::Corrupt(format!("invalid photo hash: {sha256}")));
        }
        Ok(self.photos_dir(user)?.join(format!("{sha256}.zst")))
    }
}

fn blob_matches(path: &Path, sha256: &str) -> bool {
    fs::read(path)
        .ok()
        .and_then(|compressed| zstd::decode_all(compressed.as_slice()).ok())
        .is_some_and(|bytes| hex::encode(Sha256::digest(&bytes)) == sha256)
}

/// Recognizes the image formats a phone or camera is likely to produce.
pub fn image_kind(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("jpeg")
    } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some("png")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("webp")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::model::{Status, Traits};

    const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\rIHDR";

    fn test_storage() -> (TempDir, Storage) {
        let dir = TempDir::new().unwrap();
        let storage = Storage::new(dir.path().join("users")).unwrap();
        (dir, storage)
    }

    fn saved_record(storage: &Storage, name: &str) -> BirdRecord {
        let record = BirdRecord {
            id: Uuid::new_v4(),
            name: name.into(),
            sex: "Pullet".into(),
            weight: 9.0,
            date_of_birth: None,
            status: Status::Chick,
            project_id: None,
            traits: Traits::default(),
            classification: None,
            photo: None,
            saved_at: Timestamp::now(),
        };
        storage.save_record("ana", &record).unwrap();
        record
    }

    fn blob_count(dir: &TempDir) -> usize {
        let photos = dir.path().join("users").join("ana").join("photos");
        fs::read_dir(photos).map(Iterator::count).unwrap_or(0)
    }

    #[test]
    fn recognizes_image_signatures() {
        assert_eq!(image_kind(JPEG), Some("jpeg"));
        assert_eq!(image_kind(PNG), Some("png"));
        assert_eq!(image_kind(b"GIF89a...."), Some("gif"));
        assert_eq!(image_kind(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("webp"));
        assert_eq!(image_kind(b"%PDF-1.7"), None);
        assert_eq!(image_kind(b""), None);
    }

    #[test]
    fn attach_and_load_photo() {
        let (_dir, storage) = test_storage();
        let record = saved_record(&storage, "Ruby");

        let updated = storage
            .update_record_photo("ana", record.id, "ruby.jpg", JPEG)
            .unwrap();
        let photo = updated.photo.clone().unwrap();
        assert_eq!(photo.file_name, "ruby.jpg");

        let reloaded = storage.load_record("ana", record.id).unwrap();
        assert_eq!(reloaded.photo, Some(photo.clone()));
        assert_eq!(storage.load_photo("ana", &photo).unwrap(), JPEG);
    }

    #[test]
    fn non_image_is_rejected() {
        let (_dir, storage) = test_storage();
        let record = saved_record(&storage, "Ruby");

        let err = storage
            .update_record_photo("ana", record.id, "notes.txt", b"hello")
            .unwrap_err();
        assert!(matches!(err, StorageError::NotAnImage(_)));
    }

    #[test]
    fn photo_for_missing_record_fails() {
        let (_dir, storage) = test_storage();
        let err = storage
            .update_record_photo("ana", Uuid::new_v4(), "x.jpg", JPEG)
            .unwrap_err();
        assert!(matches!(err, StorageError::RecordNotFound(_)));
    }

    #[test]
    fn replacing_photo_removes_old_blob() {
        let (dir, storage) = test_storage();
        let record = saved_record(&storage, "Ruby");

        let first = storage
            .update_record_photo("ana", record.id, "a.jpg", JPEG)
            .unwrap()
            .photo
            .unwrap();
        storage
            .update_record_photo("ana", record.id, "b.png", PNG)
            .unwrap();

        assert_eq!(blob_count(&dir), 1);
        let err = storage.load_photo("ana", &first).unwrap_err();
        assert!(matches!(err, StorageError::PhotoNotFound(_)));
    }

    #[test]
    fn shared_blob_survives_until_last_reference() {
        let (dir, storage) = test_storage();
        let a = saved_record(&storage, "A");
        let b = saved_record(&storage, "B");

        storage.update_record_photo("ana", a.id, "same.jpg", JPEG).unwrap();
        storage.update_record_photo("ana", b.id, "same.jpg", JPEG).unwrap();
        assert_eq!(blob_count(&dir), 1);

        storage.delete_record("ana", a.id).unwrap();
        assert_eq!(blob_count(&dir), 1);

        storage.delete_record("ana", b.id).unwrap();
        assert_eq!(blob_count(&dir), 0);
    }

    #[test]
    fn tampered_blob_is_corrupt() {
        let (dir, storage) = test_storage();
        let record = saved_record(&storage, "Ruby");
        let photo = storage
            .update_record_photo("ana", record.id, "ruby.jpg", JPEG)
            .unwrap()
            .photo
            .unwrap();

        let path = dir
            .path()
            .join("users")
            .join("ana")
            .join("photos")
            .join(format!("{}.zst", photo.sha256));
        fs::write(path, zstd::encode_all(PNG, 3).unwrap()).unwrap();

        let err = storage.load_photo("ana", &photo).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }

    #[test]
    fn damaged_blob_is_rewritten_on_next_upload() {
        let (dir, storage) = test_storage();
        let a = saved_record(&storage, "A");
        let b = saved_record(&storage, "B");
        let photo = storage
            .update_record_photo("ana", a.id, "same.jpg", JPEG)
            .unwrap()
            .photo
            .unwrap();

        let path = dir
            .path()
            .join("users")
            .join("ana")
            .join("photos")
            .join(format!("{}.zst", photo.sha256));
        fs::write(&path, b"not zstd").unwrap();

        storage.update_record_photo("ana", b.id, "same.jpg", JPEG).unwrap();
        assert_eq!(storage.load_photo("ana", &photo).unwrap(), JPEG);
        assert_eq!(blob_count(&dir), 1);
    }

    #[test]
    fn failed_record_write_leaves_no_blob() {
        let (dir, storage) = test_storage();
        let record = saved_record(&storage, "Ruby");

        let conn = Connection::open(dir.path().join("users/ana/records.sqlite")).unwrap();
        conn.execute_batch(
            "CREATE TRIGGER no_insert BEFORE INSERT ON records
                 BEGIN SELECT RAISE(ABORT, 'read only'); END;
             CREATE TRIGGER no_update BEFORE UPDATE ON records
                 BEGIN SELECT RAISE(ABORT, 'read only'); END;",
        )
        .unwrap();

        let err = storage
            .update_record_photo("ana", record.id, "ruby.jpg", JPEG)
            .unwrap_err();
        assert!(matches!(err, StorageError::Sqlite(_)));
        assert_eq!(blob_count(&dir), 0);
        assert!(storage.load_record("ana", record.id).unwrap().photo.is_none());
    }
}
