//! Process-wide named value registry
//!
//! Stores values under a `(namespace, key)` pair. The registry is an
//! explicit value owned by the embedding application and handed to whoever
//! needs it; bootstrap code fills it once and request handling treats it as
//! read-mostly.

use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;

/// Namespaced key/value store for process-wide settings
///
/// # Examples
///
/// ```
/// use pagelib_core::Registry;
///
/// let registry = Registry::new();
/// registry.register("pagelib::core", "version", "1.0");
///
/// assert_eq!(
///     registry.retrieve_str("pagelib::core", "version"),
///     Some("1.0".to_string())
/// );
/// ```
#[derive(Debug, Default)]
pub struct Registry {
	entries: RwLock<HashMap<String, HashMap<String, Value>>>,
}

impl Registry {
	/// Creates an empty registry
	pub fn new() -> Self {
		Self {
			entries: RwLock::new(HashMap::new()),
		}
	}

	/// Stores a value under the given namespace and key, replacing any
	/// previous value
	pub fn register(&self, namespace: &str, key: &str, value: impl Into<Value>) {
		let mut entries = self.entries.write();
		entries
			.entry(namespace.to_string())
			.or_default()
			.insert(key.to_string(), value.into());
	}

	/// Looks up a value by namespace and key
	pub fn retrieve(&self, namespace: &str, key: &str) -> Option<Value> {
		let entries = self.entries.read();
		entries.get(namespace).and_then(|ns| ns.get(key)).cloned()
	}

	/// Looks up a value and returns it as a string, if it is one
	pub fn retrieve_str(&self, namespace: &str, key: &str) -> Option<String> {
		match self.retrieve(namespace, key) {
			Some(Value::String(s)) => Some(s),
			_ => None,
		}
	}

	/// True if the namespace/key pair has a registered value
	pub fn contains(&self, namespace: &str, key: &str) -> bool {
		let entries = self.entries.read();
		entries.get(namespace).is_some_and(|ns| ns.contains_key(key))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_register_and_retrieve() {
		let registry = Registry::new();
		registry.register("app::core", "charset", "utf-8");
		registry.register("app::core", "debug", true);

		assert_eq!(registry.retrieve_str("app::core", "charset"), Some("utf-8".to_string()));
		assert_eq!(registry.retrieve("app::core", "debug"), Some(Value::Bool(true)));
	}

	#[test]
	fn test_namespaces_are_isolated() {
		let registry = Registry::new();
		registry.register("a", "key", "one");
		registry.register("b", "key", "two");

		assert_eq!(registry.retrieve_str("a", "key"), Some("one".to_string()));
		assert_eq!(registry.retrieve_str("b", "key"), Some("two".to_string()));
	}

	#[test]
	fn test_missing_key_returns_none() {
		let registry = Registry::new();
		assert_eq!(registry.retrieve("nope", "nothing"), None);
		assert!(!registry.contains("nope", "nothing"));
	}
}
