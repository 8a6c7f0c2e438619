//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use serde_json::{Map, Value};
use crate::{Result, Error};
use super::schema;

/// SQLite-backed store of JSON documents
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Document Operations ==========

    /// Point-read a document
    pub fn get_document(&self, path: &str) -> Result<Option<Value>> {
        Ok(load_body(&self.conn, path)?.map(Value::Object))
    }

    /// Create a document; fails if one already exists at `path`
    pub fn create_document(&self, path: &str, body: &Value) -> Result<()> {
        let object = as_object(path, body)?;
        let tx = self.conn.unchecked_transaction()?;
        if load_body(&tx, path)?.is_some() {
            return Err(Error::DocumentExists(path.to_string()));
        }
        tx.execute(
            "INSERT INTO documents (path, body) VALUES (?1, ?2)",
            params![path, serde_json::to_string(object)?],
        )?;
        tx.commit()?;
        Ok(())
    }

    /// Create or overwrite a document
    pub fn set_document(&self, path: &str, body: &Value) -> Result<()> {
        let object = as_object(path, body)?;
        self.conn.execute(
            r#"
            INSERT INTO documents (path, body) VALUES (?1, ?2)
            ON CONFLICT(path) DO UPDATE SET
                body = excluded.body,
                updated_at = CAST(strftime('%s', 'now') AS INTEGER)
            "#,
            params![path, serde_json::to_string(object)?],
        )?;
        Ok(())
    }

    /// Unix timestamp of the last write to a document
    pub fn updated_at(&self, path: &str) -> Result<Option<i64>> {
        self.conn
            .query_row(
                "SELECT updated_at FROM documents WHERE path = ?1",
                [path],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    // ========== Field Operations ==========

    /// Atomically read, modify and write back one field of a document.
    ///
    /// The closure sees the current value (`Null` when the field is absent)
    /// inside a single transaction; the document is only rewritten when the
    /// value actually changed. Fails with `DocumentNotFound` when there is
    /// no document at `path`.
    pub fn modify_field<R>(
        &self,
        path: &str,
        field: &str,
        f: impl FnOnce(&mut Value) -> Result<R>,
    ) -> Result<R> {
        let tx = self.conn.unchecked_transaction()?;
        let mut body = load_body(&tx, path)?
            .ok_or_else(|| Error::DocumentNotFound(path.to_string()))?;

        let before = body.get(field).cloned().unwrap_or(Value::Null);
        let mut value = before.clone();
        let out = f(&mut value)?;

        if value != before {
            body.insert(field.to_string(), value);
            tx.execute(
                r#"
                UPDATE documents
                SET body = ?2, updated_at = CAST(strftime('%s', 'now') AS INTEGER)
                WHERE path = ?1
                "#,
                params![path, serde_json::to_string(&body)?],
            )?;
            tracing::debug!("Rewrote field '{}' of {}", field, path);
        }
        tx.commit()?;
        Ok(out)
    }

    /// Overwrite one field of a document
    pub fn update_field(&self, path: &str, field: &str, value: Value) -> Result<()> {
        self.modify_field(path, field, |current| {
            *current = value;
            Ok(())
        })
    }

    // ========== Array Operations ==========

    /// Append each element not already present in the array field
    pub fn array_union(&self, path: &str, field: &str, elements: Vec<Value>) -> Result<()> {
        self.modify_field(path, field, |current| {
            let array = array_mut(field, current)?;
            for element in elements {
                if !array.contains(&element) {
                    array.push(element);
                }
            }
            Ok(())
        })
    }

    /// Replace the array element whose `key` equals `id`.
    ///
    /// Other elements keep their values and positions. Returns `false` when
    /// no element matches.
    pub fn replace_array_element(
        &self,
        path: &str,
        field: &str,
        key: &str,
        id: &str,
        element: Value,
    ) -> Result<bool> {
        self.modify_field(path, field, |current| {
            let array = array_mut(field, current)?;
            match array.iter_mut().find(|v| element_key(v, key) == Some(id)) {
                Some(slot) => {
                    *slot = element;
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }

    /// Remove the array element whose `key` equals `id`
    pub fn remove_array_element(&self, path: &str, field: &str, key: &str, id: &str) -> Result<bool> {
        self.modify_field(path, field, |current| {
            let array = array_mut(field, current)?;
            match array.iter().position(|v| element_key(v, key) == Some(id)) {
                Some(index) => {
                    array.remove(index);
                    Ok(true)
                }
                None => Ok(false),
            }
        })
    }

    // ========== Bulk Operations ==========

    /// Count stored documents
    pub fn count_documents(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DocStats> {
        let bytes: i64 = self.conn.query_row(
            "SELECT COALESCE(SUM(LENGTH(body)), 0) FROM documents",
            [],
            |row| row.get(0),
        )?;
        Ok(DocStats {
            documents: self.count_documents()?,
            bytes: bytes as usize,
        })
    }
}

fn load_body(conn: &Connection, path: &str) -> Result<Option<Map<String, Value>>> {
    let raw: Option<String> = conn
        .query_row("SELECT body FROM documents WHERE path = ?1", [path], |row| row.get(0))
        .optional()?;

    match raw {
        Some(raw) => match serde_json::from_str(&raw)? {
            Value::Object(map) => Ok(Some(map)),
            _ => Err(Error::InvalidField(format!("document {} is not an object", path))),
        },
        None => Ok(None),
    }
}

fn as_object<'a>(path: &str, body: &'a Value) -> Result<&'a Map<String, Value>> {
    body.as_object()
        .ok_or_else(|| Error::InvalidField(format!("document {} must be a JSON object", path)))
}

/// Treat an absent field as an empty array; reject anything else that is not one
fn array_mut<'a>(field: &str, value: &'a mut Value) -> Result<&'a mut Vec<Value>> {
    if value.is_null() {
        *value = Value::Array(Vec::new());
    }
    value
        .as_array_mut()
        .ok_or_else(|| Error::InvalidField(format!("{} is not an array", field)))
}

fn element_key<'a>(element: &'a Value, key: &str) -> Option<&'a str> {
    element.get(key).and_then(Value::as_str)
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DocStats {
    pub documents: usize,
    pub bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PATH: &str = "portfolio/data";

    fn seeded() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .create_document(PATH, &json!({"hero": {"name": "Ana"}, "skills": []}))
            .unwrap();
        store
    }

    #[test]
    fn test_document_crud() {
        let store = seeded();

        let doc = store.get_document(PATH).unwrap().unwrap();
        assert_eq!(doc["hero"]["name"], "Ana");
        assert!(store.get_document("other/doc").unwrap().is_none());

        assert!(matches!(
            store.create_document(PATH, &json!({})),
            Err(Error::DocumentExists(_))
        ));

        store.set_document(PATH, &json!({"hero": {"name": "Bea"}})).unwrap();
        let doc = store.get_document(PATH).unwrap().unwrap();
        assert_eq!(doc["hero"]["name"], "Bea");
        assert!(doc.get("skills").is_none());
    }

    #[test]
    fn test_rejects_non_object_documents() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(matches!(
            store.set_document(PATH, &json!([1, 2])),
            Err(Error::InvalidField(_))
        ));
    }

    #[test]
    fn test_update_field_requires_document() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store.update_field(PATH, "hero", json!({})).unwrap_err();
        assert!(matches!(err, Error::DocumentNotFound(_)));
    }

    #[test]
    fn test_array_union_skips_present_elements() {
        let store = seeded();

        store.array_union(PATH, "skills", vec![json!({"id": "1"}), json!({"id": "2"})]).unwrap();
        store.array_union(PATH, "skills", vec![json!({"id": "2"})]).unwrap();
        let doc = store.get_document(PATH).unwrap().unwrap();
        assert_eq!(doc["skills"], json!([{"id": "1"}, {"id": "2"}]));
    }

    #[test]
    fn test_array_ops_on_absent_field_start_empty() {
        let store = seeded();
        store.array_union(PATH, "projects", vec![json!({"id": "p"})]).unwrap();
        let doc = store.get_document(PATH).unwrap().unwrap();
        assert_eq!(doc["projects"], json!([{"id": "p"}]));
    }

    #[test]
    fn test_array_ops_reject_non_array_field() {
        let store = seeded();
        let err = store.array_union(PATH, "hero", vec![json!(1)]).unwrap_err();
        assert!(matches!(err, Error::InvalidField(_)));
    }

    #[test]
    fn test_replace_and_remove_by_key() {
        let store = seeded();
        store
            .array_union(
                PATH,
                "skills",
                vec![json!({"id": "a", "v": 1}), json!({"id": "b", "v": 2}), json!({"id": "c", "v": 3})],
            )
            .unwrap();

        assert!(store.replace_array_element(PATH, "skills", "id", "b", json!({"id": "b", "v": 20})).unwrap());
        assert!(!store.replace_array_element(PATH, "skills", "id", "zz", json!({"id": "zz"})).unwrap());

        let doc = store.get_document(PATH).unwrap().unwrap();
        assert_eq!(
            doc["skills"],
            json!([{"id": "a", "v": 1}, {"id": "b", "v": 20}, {"id": "c", "v": 3}])
        );

        assert!(store.remove_array_element(PATH, "skills", "id", "a").unwrap());
        assert!(!store.remove_array_element(PATH, "skills", "id", "a").unwrap());
        let doc = store.get_document(PATH).unwrap().unwrap();
        assert_eq!(doc["skills"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_modification_leaves_document_untouched() {
        let store = seeded();
        let result: Result<()> = store.modify_field(PATH, "hero", |value| {
            *value = json!({"name": "changed"});
            Err(Error::InvalidField("boom".into()))
        });
        assert!(result.is_err());

        let doc = store.get_document(PATH).unwrap().unwrap();
        assert_eq!(doc["hero"]["name"], "Ana");
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("folio.db");
        {
            let store = SqliteStore::open(&db).unwrap();
            store.set_document(PATH, &json!({"skills": [{"id": "1"}]})).unwrap();
        }
        let store = SqliteStore::open(&db).unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.documents, 1);
        assert!(stats.bytes > 0);
        assert!(store.updated_at(PATH).unwrap().is_some());
    }
}
