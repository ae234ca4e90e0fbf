//! Tag scanner tests
//!
//! Extent resolution, self-closing detection and error conditions of the
//! character-level scanner.

use crate::scanner::scan_next;
use pagelib_exception::Error;

#[test]
fn test_finds_container_tag_with_offsets() {
	let input = "Hello <t:name attr=\"x\">World</t:name>!";
	let tag = scan_next(input, "t:name", 0).unwrap().unwrap();

	assert_eq!(tag.start, 6);
	assert_eq!(tag.end, input.len() - 1);
	assert_eq!(tag.attributes.trim(), "attr=\"x\"");
	assert_eq!(tag.content, "World");
	assert!(!tag.self_closing);
}

#[test]
fn test_self_closing_tag_has_empty_content() {
	let tag = scan_next("<p:c a=\"1\" />", "p:c", 0).unwrap().unwrap();

	assert!(tag.self_closing);
	assert_eq!(tag.content, "");
	assert_eq!(tag.end, 13);
}

#[test]
fn test_self_closing_without_space() {
	let tag = scan_next("<p:c a=\"1\"/>", "p:c", 0).unwrap().unwrap();

	assert!(tag.self_closing);
	assert_eq!(tag.attributes.trim(), "a=\"1\"");
}

#[test]
fn test_explicitly_closed_empty_tag() {
	let tag = scan_next("<p:c a=\"1\"></p:c>", "p:c", 0).unwrap().unwrap();

	assert!(!tag.self_closing);
	assert_eq!(tag.content, "");
	assert_eq!(tag.attributes.trim(), "a=\"1\"");
}

#[test]
fn test_nested_same_token_resolves_outer_extent() {
	let input = "<p:c><p:c>x</p:c></p:c>";
	let tag = scan_next(input, "p:c", 0).unwrap().unwrap();

	assert_eq!(tag.content, "<p:c>x</p:c>");
	assert_eq!(tag.end, input.len());
}

#[test]
fn test_nested_self_closing_does_not_end_container() {
	let input = "<p:c>a<p:c />b</p:c>";
	let tag = scan_next(input, "p:c", 0).unwrap().unwrap();

	assert_eq!(tag.content, "a<p:c />b");
}

#[test]
fn test_token_boundary_rejects_longer_names() {
	// t:names is a different tag type and must not match t:name
	assert!(scan_next("<t:names />", "t:name", 0).unwrap().is_none());

	let input = "<t:names /><t:name />";
	let tag = scan_next(input, "t:name", 0).unwrap().unwrap();
	assert_eq!(tag.start, 11);
}

#[test]
fn test_quoted_angle_bracket_does_not_end_tag() {
	let tag = scan_next("<p:c a=\"x>y\">z</p:c>", "p:c", 0).unwrap().unwrap();

	assert_eq!(tag.attributes.trim(), "a=\"x>y\"");
	assert_eq!(tag.content, "z");
}

#[test]
fn test_missing_closing_tag_is_a_parse_error() {
	let err = scan_next("<p:c>oops", "p:c", 0).unwrap_err();
	assert!(matches!(err, Error::Parse(_)));
	assert!(err.to_string().contains("p:c"));
}

#[test]
fn test_unterminated_tag_start_is_a_parse_error() {
	let err = scan_next("text <p:c a=\"1\"", "p:c", 0).unwrap_err();
	assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_scan_from_offset_skips_earlier_match() {
	let input = "<p:c />---<p:c />";
	let first = scan_next(input, "p:c", 0).unwrap().unwrap();
	let second = scan_next(input, "p:c", first.end).unwrap().unwrap();

	assert_eq!(first.start, 0);
	assert_eq!(second.start, 10);
}

#[test]
fn test_no_match_returns_none() {
	assert!(scan_next("plain text only", "p:c", 0).unwrap().is_none());
	assert!(scan_next("", "p:c", 0).unwrap().is_none());
}
