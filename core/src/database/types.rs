//! database/types.rs
//! The parts of a database the header layer needs to see: KDF choice and
//! where custom data (a KDBX 4 feature) is attached.

use std::collections::BTreeMap;

use uuid::Uuid;

use crate::crypto::kdf::KdfParameters;
use crate::headers::decode::ParsedHeader;

/// Free-form key/value extension data.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CustomData {
    items: BTreeMap<String, String>,
}

impl CustomData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.items.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.items.remove(key)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    pub uuid: Uuid,
    pub custom_data: CustomData,
    /// Previous versions of this entry.
    pub history: Vec<Entry>,
}

impl Entry {
    pub fn new(uuid: Uuid) -> Self {
        Self { uuid, ..Default::default() }
    }

    pub fn has_custom_data(&self) -> bool {
        !self.custom_data.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Group {
    pub uuid: Uuid,
    pub custom_data: CustomData,
    pub groups: Vec<Group>,
    pub entries: Vec<Entry>,
}

impl Group {
    pub fn new(uuid: Uuid) -> Self {
        Self { uuid, ..Default::default() }
    }

    pub fn has_custom_data(&self) -> bool {
        !self.custom_data.is_empty()
    }

    pub fn add_group(&mut self, group: Group) -> &mut Group {
        self.groups.push(group);
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    pub fn add_entry(&mut self, entry: Entry) -> &mut Entry {
        self.entries.push(entry);
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Database {
    /// Owned here; a parsed header's parameters are moved in, not copied.
    pub kdf: Option<KdfParameters>,
    /// Database-level custom data (metadata section).
    pub custom_data: CustomData,
    pub root: Option<Group>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take over the KDF parameters of a freshly parsed header.
    pub fn adopt_header(&mut self, parsed: &mut ParsedHeader) {
        if let Some(kdf) = parsed.header.kdf_parameters.take() {
            self.kdf = Some(kdf);
        }
    }

    pub fn has_custom_data(&self) -> bool {
        !self.custom_data.is_empty()
    }
}
