//! The document contract consumed by security policies.
//!
//! The repository owning documents is not part of this engine. Policies
//! only need lock state, version/proxy flags and property lookup, which is
//! what [`Document`] exposes. [`MemoryDocument`] is a plain in-memory
//! implementation, used by tests and by callers holding detached snapshots.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A lock held on a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Lock {
    /// User name of the lock holder.
    pub owner: String,

    /// When the lock was taken (Unix milliseconds).
    pub created: i64,
}

impl Lock {
    /// Create a lock.
    pub fn new(owner: impl Into<String>, created: i64) -> Self {
        Self {
            owner: owner.into(),
            created,
        }
    }

    /// Whether `user` holds this lock.
    pub fn is_held_by(&self, user: &str) -> bool {
        self.owner == user
    }
}

/// Legacy string form: `owner:created`.
impl fmt::Display for Lock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.owner, self.created)
    }
}

impl FromStr for Lock {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Owner names may contain ':', the timestamp never does.
        let (owner, created) = s
            .rsplit_once(':')
            .ok_or_else(|| CoreError::InvalidLock(s.to_string()))?;
        if owner.is_empty() {
            return Err(CoreError::InvalidLock(s.to_string()));
        }
        let created = created
            .parse::<i64>()
            .map_err(|_| CoreError::InvalidLock(s.to_string()))?;
        Ok(Lock::new(owner, created))
    }
}

/// A property value readable by policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    String(String),
    Strings(Vec<String>),
}

impl PropertyValue {
    /// The value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value is `s` or a list containing `s`.
    pub fn contains_str(&self, s: &str) -> bool {
        match self {
            PropertyValue::String(v) => v == s,
            PropertyValue::Strings(vs) => vs.iter().any(|v| v == s),
            _ => false,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

/// What the permission engine may ask of a document.
pub trait Document: Send + Sync {
    /// Repository identifier.
    fn id(&self) -> &str;

    /// Document type name (e.g. `Workspace`).
    fn doc_type(&self) -> &str;

    /// Current lock, if any.
    fn lock(&self) -> Option<&Lock>;

    /// Whether this is a frozen version.
    fn is_version(&self) -> bool;

    /// Whether this is a proxy pointing at another document.
    fn is_proxy(&self) -> bool;

    /// Whether the document is checked out (editable live document).
    fn is_checked_out(&self) -> bool;

    /// Property lookup by schema-qualified path, e.g. `dc:creator`.
    fn property(&self, path: &str) -> Option<&PropertyValue>;
}

/// In-memory [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryDocument {
    pub id: String,
    pub doc_type: String,
    #[serde(default)]
    pub lock: Option<Lock>,
    #[serde(default)]
    pub version: bool,
    #[serde(default)]
    pub proxy: bool,
    #[serde(default = "default_checked_out")]
    pub checked_out: bool,
    #[serde(default)]
    pub properties: HashMap<String, PropertyValue>,
}

fn default_checked_out() -> bool {
    true
}

impl MemoryDocument {
    /// A checked-out live document with no lock and no properties.
    pub fn new(id: impl Into<String>, doc_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            doc_type: doc_type.into(),
            lock: None,
            version: false,
            proxy: false,
            checked_out: true,
            properties: HashMap::new(),
        }
    }

    pub fn with_lock(mut self, lock: Lock) -> Self {
        self.lock = Some(lock);
        self
    }

    /// Turn into a version: versions are never checked out.
    pub fn as_version(mut self) -> Self {
        self.version = true;
        self.checked_out = false;
        self
    }

    pub fn as_proxy(mut self) -> Self {
        self.proxy = true;
        self
    }

    pub fn checked_in(mut self) -> Self {
        self.checked_out = false;
        self
    }

    pub fn with_property(
        mut self,
        path: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.insert(path.into(), value.into());
        self
    }

    /// Set or clear the lock in place.
    pub fn set_lock(&mut self, lock: Option<Lock>) {
        self.lock = lock;
    }
}

impl Document for MemoryDocument {
    fn id(&self) -> &str {
        &self.id
    }

    fn doc_type(&self) -> &str {
        &self.doc_type
    }

    fn lock(&self) -> Option<&Lock> {
        self.lock.as_ref()
    }

    fn is_version(&self) -> bool {
        self.version
    }

    fn is_proxy(&self) -> bool {
        self.proxy
    }

    fn is_checked_out(&self) -> bool {
        self.checked_out
    }

    fn property(&self, path: &str) -> Option<&PropertyValue> {
        self.properties.get(path)
    }
}
