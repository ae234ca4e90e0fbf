//! Configuration handle
//!
//! The template engine never loads configuration itself; it reads
//! section/key lookups from an opaque [`Configuration`] handle supplied by
//! the embedding application. [`InMemoryConfiguration`] is the bundled
//! implementation for applications and tests; anything that can answer a
//! section/key lookup can stand in for it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read-only section/key configuration lookups
pub trait Configuration: Send + Sync {
	/// Returns the value stored under `section` / `key`, if any
	fn get(&self, section: &str, key: &str) -> Option<String>;

	/// Returns all keys of a section, if the section exists
	fn section(&self, section: &str) -> Option<HashMap<String, String>>;
}

/// Configuration backed by an in-memory section map
///
/// # Examples
///
/// ```
/// use pagelib_core::{Configuration, InMemoryConfiguration};
///
/// let config = InMemoryConfiguration::new()
///     .with("site", "title", "My Site")
///     .with("site", "charset", "utf-8");
///
/// assert_eq!(config.get("site", "title"), Some("My Site".to_string()));
/// assert_eq!(config.get("site", "missing"), None);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InMemoryConfiguration {
	sections: HashMap<String, HashMap<String, String>>,
}

impl InMemoryConfiguration {
	/// Creates an empty configuration
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder-style insert
	pub fn with(mut self, section: &str, key: &str, value: impl Into<String>) -> Self {
		self.set(section, key, value);
		self
	}

	/// Stores a value under `section` / `key`
	pub fn set(&mut self, section: &str, key: &str, value: impl Into<String>) {
		self.sections
			.entry(section.to_string())
			.or_default()
			.insert(key.to_string(), value.into());
	}

	/// Loads sections from a JSON object of the shape
	/// `{"section": {"key": "value"}}`
	///
	/// # Examples
	///
	/// ```
	/// use pagelib_core::{Configuration, InMemoryConfiguration};
	///
	/// let config = InMemoryConfiguration::from_json_str(
	///     r#"{"site": {"title": "My Site"}}"#,
	/// ).unwrap();
	/// assert_eq!(config.get("site", "title"), Some("My Site".to_string()));
	/// ```
	pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
		let sections: HashMap<String, HashMap<String, String>> = serde_json::from_str(input)?;
		Ok(Self { sections })
	}
}

impl Configuration for InMemoryConfiguration {
	fn get(&self, section: &str, key: &str) -> Option<String> {
		self.sections.get(section).and_then(|s| s.get(key)).cloned()
	}

	fn section(&self, section: &str) -> Option<HashMap<String, String>> {
		self.sections.get(section).cloned()
	}
}
