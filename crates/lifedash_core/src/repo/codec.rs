//! JSON encoding of whole collections.
//!
//! # Invariants
//! - A stored array is decoded element by element. Elements that do not
//!   decode are kept as raw JSON and written back in place on the next save.
//! - Only a value that is not a JSON array at all is discarded by a save.

use super::RepoResult;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// One element of a stored collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
enum Slot<T> {
    Record(T),
    Unreadable(Value),
}

/// A decoded collection that still remembers elements it could not read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StoredCollection<T> {
    slots: Vec<Slot<T>>,
}

impl<T> Default for StoredCollection<T> {
    fn default() -> Self {
        Self { slots: Vec::new() }
    }
}

impl<T> StoredCollection<T> {
    pub fn records(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Record(record) => Some(record),
            Slot::Unreadable(_) => None,
        })
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots.iter_mut().filter_map(|slot| match slot {
            Slot::Record(record) => Some(record),
            Slot::Unreadable(_) => None,
        })
    }

    pub fn into_records(self) -> Vec<T> {
        self.slots
            .into_iter()
            .filter_map(|slot| match slot {
                Slot::Record(record) => Some(record),
                Slot::Unreadable(_) => None,
            })
            .collect()
    }

    pub fn push(&mut self, record: T) {
        self.slots.push(Slot::Record(record));
    }

    /// Number of readable records.
    pub fn len(&self) -> usize {
        self.records().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn unreadable_count(&self) -> usize {
        self.slots.len() - self.len()
    }
}

/// Decodes a stored collection, keeping unreadable elements for write-back.
///
/// Missing values and values that are not JSON arrays decode as empty.
/// Corruption is logged by key and index only; stored text is never logged.
pub fn decode_stored<T: DeserializeOwned>(key: &str, raw: Option<&str>) -> StoredCollection<T> {
    let Some(raw) = raw else {
        return StoredCollection::default();
    };

    let values = match serde_json::from_str::<Vec<Value>>(raw) {
        Ok(values) => values,
        Err(err) => {
            warn!(
                "event=collection_decode module=repo status=error key={key} error_code=corrupt_collection line={} column={}",
                err.line(),
                err.column()
            );
            return StoredCollection::default();
        }
    };

    let slots = values
        .into_iter()
        .enumerate()
        .map(|(index, value)| match T::deserialize(&value) {
            Ok(record) => Slot::Record(record),
            Err(err) => {
                warn!(
                    "event=record_decode module=repo status=error key={key} index={index} error_code=unreadable_record error={err}"
                );
                Slot::Unreadable(value)
            }
        })
        .collect();
    StoredCollection { slots }
}

/// Decodes a stored collection to its readable records only.
pub fn decode_collection<T: DeserializeOwned>(key: &str, raw: Option<&str>) -> Vec<T> {
    decode_stored(key, raw).into_records()
}

/// Decodes one stored document, treating missing or corrupt values as absent.
pub fn decode_document<T: DeserializeOwned>(key: &str, raw: Option<&str>) -> Option<T> {
    let raw = raw?;
    match serde_json::from_str::<T>(raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(
                "event=document_decode module=repo status=error key={key} error_code=corrupt_document line={} column={}",
                err.line(),
                err.column()
            );
            None
        }
    }
}

pub fn encode<T: Serialize + ?Sized>(value: &T) -> RepoResult<String> {
    Ok(serde_json::to_string(value)?)
}

#[cfg(test)]
mod tests {
    use super::{decode_collection, decode_document, decode_stored, encode};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        id: String,
        count: u32,
    }

    #[test]
    fn missing_value_decodes_to_empty() {
        let decoded: Vec<String> = decode_collection("tasks_x", None);
        assert!(decoded.is_empty());
    }

    #[test]
    fn corrupt_value_decodes_to_empty() {
        let decoded: Vec<String> = decode_collection("tasks_x", Some("[{not json"));
        assert!(decoded.is_empty());

        let wrong_shape: Vec<String> = decode_collection("tasks_x", Some("{\"a\":1}"));
        assert!(wrong_shape.is_empty());
    }

    #[test]
    fn encode_then_decode_preserves_order() {
        let values = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        let raw = encode(&values).unwrap();
        let decoded: Vec<String> = decode_collection("k", Some(&raw));
        assert_eq!(decoded, values);
    }

    #[test]
    fn unreadable_elements_are_skipped_but_written_back_in_place() {
        let raw = r#"[{"id":"a","count":1},{"id":"b","count":-3},{"id":"c","count":2}]"#;
        let mut stored = decode_stored::<Counter>("counters_x", Some(raw));

        assert_eq!(stored.len(), 2);
        assert_eq!(stored.unreadable_count(), 1);
        assert_eq!(
            stored.records().map(|c| c.id.as_str()).collect::<Vec<_>>(),
            vec!["a", "c"]
        );

        for counter in stored.records_mut() {
            counter.count += 10;
        }
        stored.push(Counter {
            id: "d".to_string(),
            count: 0,
        });

        assert_eq!(
            encode(&stored).unwrap(),
            r#"[{"id":"a","count":11},{"id":"b","count":-3},{"id":"c","count":12},{"id":"d","count":0}]"#
        );
    }

    #[test]
    fn corrupt_document_is_absent() {
        assert_eq!(decode_document::<String>("currentUser", Some("nope")), None);
        assert_eq!(decode_document::<String>("currentUser", None), None);
    }
}
