use serde::{Deserialize, Serialize};

/// A persisted (name, descriptor) pair.
///
/// `name` is the unique key; `descriptor` is the feature vector as
/// delivered by the client. Descriptor length is not validated here.
/// A record whose length differs from the rest of the roster is stored
/// as-is and simply never wins a match against compatible candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub descriptor: Vec<f32>,
}

impl Record {
    pub fn new(name: impl Into<String>, descriptor: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            descriptor,
        }
    }
}

/// Replaces the descriptor of the record with a matching name, or appends
/// a new record if no name matches (exact, case-sensitive).
///
/// Returns true when an existing record was updated.
pub fn upsert(records: &mut Vec<Record>, name: &str, descriptor: Vec<f32>) -> bool {
    match records.iter_mut().find(|r| r.name == name) {
        Some(existing) => {
            existing.descriptor = descriptor;
            true
        }
        None => {
            records.push(Record::new(name, descriptor));
            false
        }
    }
}

/// Removes every record whose name matches exactly.
///
/// Returns true when at least one record was removed. Relative order of
/// the remaining records is preserved.
pub fn remove(records: &mut Vec<Record>, name: &str) -> bool {
    let before = records.len();
    records.retain(|r| r.name != name);
    records.len() < before
}

/// Projects just the names, preserving store order.
pub fn list_names(records: &[Record]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}
