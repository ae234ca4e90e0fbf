//! Attribute parser
//!
//! Converts a raw `key="value" key2="value2"` region into an ordered map.
//! Keys and values are trimmed; source order is preserved. The loop is
//! bounded by a fixed ceiling so a pathological attribute string aborts
//! instead of spinning.

use crate::TemplateResult;
use crate::scanner::snippet;
use indexmap::IndexMap;
use pagelib_exception::Error;

/// Hard ceiling on attributes parsed out of a single tag
pub const MAX_ATTRIBUTE_LOOPS: usize = 20;

/// Parses an attribute region into an ordered `key -> value` map
///
/// # Errors
///
/// - a key without a quoted value (missing opening or closing `"`)
/// - an empty key (`="value"` with nothing before the `=`)
/// - more than [`MAX_ATTRIBUTE_LOOPS`] attributes in one tag
///
/// # Examples
///
/// ```
/// use pagelib_template::attributes::parse_attributes;
///
/// let map = parse_attributes(r#" name="user" style="bold" "#).unwrap();
/// assert_eq!(map.get("name").map(String::as_str), Some("user"));
/// assert_eq!(map.get_index(1).map(|(k, _)| k.as_str()), Some("style"));
/// ```
pub fn parse_attributes(input: &str) -> TemplateResult<IndexMap<String, String>> {
	let mut attributes = IndexMap::new();
	let mut offset = 0usize;
	let mut loops = 0usize;

	while let Some(eq_rel) = input[offset..].find('=') {
		loops += 1;
		if loops >= MAX_ATTRIBUTE_LOOPS {
			return Err(Error::parse(format!(
				"maximum number of attribute parser loops ({MAX_ATTRIBUTE_LOOPS}) exceeded \
				 while parsing \"{}\"",
				snippet(input)
			)));
		}

		let eq = offset + eq_rel;
		let key = input[offset..eq].trim();
		if key.is_empty() {
			return Err(Error::parse(format!(
				"attribute without a name in \"{}\"",
				snippet(input)
			)));
		}

		let Some(quote_rel) = input[eq + 1..].find('"') else {
			return Err(Error::parse(format!(
				"attribute \"{key}\" has no quoted value in \"{}\"",
				snippet(input)
			)));
		};
		let value_start = eq + 1 + quote_rel + 1;
		let Some(end_rel) = input[value_start..].find('"') else {
			return Err(Error::parse(format!(
				"attribute \"{key}\" has an unterminated value in \"{}\"",
				snippet(input)
			)));
		};
		let value_end = value_start + end_rel;

		attributes.insert(
			key.to_string(),
			input[value_start..value_end].trim().to_string(),
		);
		offset = value_end + 1;
	}

	Ok(attributes)
}
