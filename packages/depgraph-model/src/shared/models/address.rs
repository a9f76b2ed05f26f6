//! Interned dependency addresses

use dashmap::DashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Stable key of one dependency inside a build graph
///
/// Cloning is a refcount bump. Addresses produced by the same
/// [`AddressInterner`] share one allocation per distinct string, so
/// [`Address::ptr_eq`] holds for equal addresses of one session.
#[derive(Clone, Eq)]
pub struct Address(Arc<str>);

impl Address {
    /// Wrap a string without interning (deserialization, tests)
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(Arc::from(value.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Same backing allocation
    pub fn ptr_eq(&self, other: &Address) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Address {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Hash for Address {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl PartialOrd for Address {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Address {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl Borrow<str> for Address {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({:?})", &*self.0)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Address::new(value))
    }
}

/// Concurrent string interner for addresses
#[derive(Default)]
pub struct AddressInterner {
    table: DashMap<Arc<str>, ()>,
}

impl AddressInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string (concurrent-safe, deduplicates automatically)
    pub fn intern(&self, value: impl AsRef<str>) -> Address {
        let value = value.as_ref();

        // Fast path: already interned
        if let Some(entry) = self.table.get(value) {
            return Address(Arc::clone(entry.key()));
        }

        let arc: Arc<str> = Arc::from(value);
        let entry = self.table.entry(arc).or_insert(());
        Address(Arc::clone(entry.key()))
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&self) {
        self.table.clear();
    }
}
