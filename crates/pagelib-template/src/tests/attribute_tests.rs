//! Attribute parser tests

use crate::attributes::{MAX_ATTRIBUTE_LOOPS, parse_attributes};
use pagelib_exception::Error;

#[test]
fn test_empty_input_yields_empty_map() {
	assert!(parse_attributes("").unwrap().is_empty());
	assert!(parse_attributes("   ").unwrap().is_empty());
}

#[test]
fn test_single_attribute() {
	let map = parse_attributes(" name=\"user\"").unwrap();
	assert_eq!(map.len(), 1);
	assert_eq!(map.get("name").map(String::as_str), Some("user"));
}

#[test]
fn test_multiple_attributes_keep_source_order() {
	let map = parse_attributes(" b=\"2\" a=\"1\" c=\"3\" ").unwrap();

	let keys: Vec<&str> = map.keys().map(String::as_str).collect();
	assert_eq!(keys, vec!["b", "a", "c"]);
}

#[test]
fn test_keys_and_values_are_trimmed() {
	let map = parse_attributes(" name = \" padded \" ").unwrap();
	assert_eq!(map.get("name").map(String::as_str), Some("padded"));
}

#[test]
fn test_value_may_contain_equals_sign() {
	let map = parse_attributes(" href=\"?page=2\" rel=\"next\"").unwrap();
	assert_eq!(map.get("href").map(String::as_str), Some("?page=2"));
	assert_eq!(map.get("rel").map(String::as_str), Some("next"));
}

#[test]
fn test_unquoted_value_is_a_parse_error() {
	let err = parse_attributes(" a=1").unwrap_err();
	assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_unterminated_value_is_a_parse_error() {
	let err = parse_attributes(" a=\"1").unwrap_err();
	assert!(matches!(err, Error::Parse(_)));
	assert!(err.to_string().contains("unterminated"));
}

#[test]
fn test_missing_key_is_a_parse_error() {
	let err = parse_attributes("=\"value\"").unwrap_err();
	assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_loop_ceiling_aborts_pathological_input() {
	let mut input = String::new();
	for i in 0..MAX_ATTRIBUTE_LOOPS + 5 {
		input.push_str(&format!(" k{i}=\"v\""));
	}

	let err = parse_attributes(&input).unwrap_err();
	assert!(matches!(err, Error::Parse(_)));
	assert!(err.to_string().contains("maximum number"));
}

#[test]
fn test_attribute_count_below_ceiling_parses() {
	let mut input = String::new();
	for i in 0..10 {
		input.push_str(&format!(" k{i}=\"v{i}\""));
	}

	let map = parse_attributes(&input).unwrap();
	assert_eq!(map.len(), 10);
}
