//! Parameter bag for pending entries and legacy key normalization.
//!
//! Older API versions spelled the entry fields `scope_type`, `scope` and
//! `with_key`. Callers may still pass those; they are mapped onto the current
//! names (`type`, `value`, `withLink`) once, when the bag is built. Keys this
//! crate does not know about are kept verbatim so callers can hand extra
//! fields through to the remote service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const KEY_ROLE: &str = "role";
pub const KEY_TYPE: &str = "type";
pub const KEY_VALUE: &str = "value";
pub const KEY_ADDITIONAL_ROLES: &str = "additionalRoles";
pub const KEY_ID: &str = "id";
pub const KEY_WITH_LINK: &str = "withLink";

const LEGACY_SCOPE_TYPE: &str = "scope_type";
const LEGACY_SCOPE: &str = "scope";
const LEGACY_WITH_KEY: &str = "with_key";

/// Legacy spelling of [`crate::ScopeType::Anyone`].
const LEGACY_PUBLIC_SCOPE: &str = "default";

/// Insertion-ordered mapping of canonical keys to opaque values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryParams(Map<String, Value>);

impl EntryParams {
    /// Build a canonical bag from caller-supplied pairs.
    ///
    /// Later pairs win when two keys map onto the same canonical key.
    pub fn normalize<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut bag = Map::new();
        for (key, value) in pairs {
            let (key, value) = normalize_pair(key.into(), value.into());
            bag.insert(key, value);
        }
        Self(bag)
    }

    /// Build a canonical bag from a JSON object. The input is left untouched.
    ///
    /// Returns `None` when `value` is not an object.
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        value
            .as_object()
            .map(|object| Self::normalize(object.iter().map(|(k, v)| (k.clone(), v.clone()))))
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Insert a value under `key` as-is. No normalization is applied.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    #[must_use]
    pub const fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_json(self) -> Value {
        Value::Object(self.0)
    }
}

impl<K, V> FromIterator<(K, V)> for EntryParams
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::normalize(iter)
    }
}

fn normalize_pair(key: String, value: Value) -> (String, Value) {
    match key.as_str() {
        LEGACY_SCOPE_TYPE => {
            let value = if value.as_str() == Some(LEGACY_PUBLIC_SCOPE) {
                tracing::debug!("rewriting legacy scope_type \"default\" to \"anyone\"");
                Value::from("anyone")
            } else {
                value
            };
            (KEY_TYPE.to_owned(), value)
        }
        LEGACY_SCOPE => (KEY_VALUE.to_owned(), value),
        LEGACY_WITH_KEY => (KEY_WITH_LINK.to_owned(), value),
        _ => (key, value),
    }
}
