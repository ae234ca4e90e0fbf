//! Document tree tests
//!
//! Parse-pass invariants (placeholder bookkeeping, taglib scoping,
//! lifecycle hooks) and transform-pass behavior on hand-built documents.

use crate::document::{Document, MAX_PARSER_LOOPS, ParentScope, TagHandler, placeholder_token};
use crate::loader::MemoryTemplateSource;
use crate::render_context::RenderContext;
use crate::taglib::TagLib;
use crate::TemplateResult;
use pagelib_exception::Error;

/// Renders its raw inner content back unchanged
struct EchoTag;

impl TagHandler for EchoTag {
	fn transform(&mut self, doc: &mut Document, _ctx: &RenderContext) -> TemplateResult<String> {
		Ok(doc.content().to_string())
	}
}

/// Records lifecycle hook invocations in its node's attributes
struct LifecycleProbeTag;

impl TagHandler for LifecycleProbeTag {
	fn on_parse_time(
		&mut self,
		doc: &mut Document,
		_parent: &mut ParentScope<'_>,
		_ctx: &RenderContext,
	) -> TemplateResult<()> {
		doc.set_attribute("probe-parse", "yes");
		Ok(())
	}

	fn on_after_append(&mut self, doc: &mut Document, _ctx: &RenderContext) -> TemplateResult<()> {
		doc.set_attribute("probe-append", "yes");
		Ok(())
	}
}

fn test_context() -> RenderContext {
	RenderContext::new(MemoryTemplateSource::new())
}

fn context_with_echo(prefix: &str, name: &str) -> RenderContext {
	let ctx = test_context();
	ctx.tags().register(prefix, name, || Box::new(EchoTag));
	ctx
}

fn root_with(content: &str, lib: TagLib) -> Document {
	let mut doc = Document::new();
	doc.add_taglib(lib);
	doc.set_content(content);
	doc
}

#[test]
fn test_echo_tag_round_trip() {
	let ctx = context_with_echo("t", "name");
	let mut doc = root_with(
		"Hello <t:name attr=\"x\">World</t:name>!",
		TagLib::new("app", "t", "name"),
	);
	doc.parse_content(&ctx).unwrap();

	assert_eq!(doc.children().len(), 1);
	let child = &doc.children()[0];
	assert_eq!(child.attribute("attr"), Some("x"));
	assert_eq!(child.content(), "World");

	assert_eq!(doc.transform(&ctx).unwrap(), "Hello World!");
}

#[test]
fn test_placeholder_markers_match_children_one_to_one() {
	let ctx = context_with_echo("t", "x");
	let mut doc = root_with(
		"<t:x>a</t:x> mid <t:x>b</t:x> end <t:x />",
		TagLib::new("app", "t", "x"),
	);
	doc.parse_content(&ctx).unwrap();

	assert_eq!(doc.children().len(), 3);
	for child in doc.children() {
		let marker = placeholder_token(child.object_id());
		assert_eq!(doc.content().matches(&marker).count(), 1);
	}

	let output = doc.transform(&ctx).unwrap();
	assert_eq!(output, "a mid b end ");
	for child in doc.children() {
		let marker = placeholder_token(child.object_id());
		assert_eq!(output.matches(&marker).count(), 0);
	}
}

#[test]
fn test_self_closing_and_explicit_empty_tag_are_equivalent() {
	let ctx = context_with_echo("p", "c");

	let mut self_closing = root_with("<p:c a=\"1\" />", TagLib::new("app", "p", "c"));
	self_closing.parse_content(&ctx).unwrap();

	let mut explicit = root_with("<p:c a=\"1\"></p:c>", TagLib::new("app", "p", "c"));
	explicit.parse_content(&ctx).unwrap();

	let a = &self_closing.children()[0];
	let b = &explicit.children()[0];
	assert_eq!(a.attributes(), b.attributes());
	assert_eq!(a.content(), "");
	assert_eq!(b.content(), "");
}

#[test]
fn test_nested_same_token_extent_covers_full_pair() {
	let ctx = context_with_echo("p", "c");
	let mut doc = root_with("<p:c><p:c>x</p:c></p:c>", TagLib::new("app", "p", "c"));
	doc.parse_content(&ctx).unwrap();

	// one outer node whose raw content holds the untouched inner pair
	assert_eq!(doc.children().len(), 1);
	assert_eq!(doc.children()[0].content(), "<p:c>x</p:c>");
}

#[test]
fn test_missing_closing_tag_aborts_parse() {
	let ctx = context_with_echo("p", "c");
	let mut doc = root_with("before <p:c>never closed", TagLib::new("app", "p", "c"));

	let err = doc.parse_content(&ctx).unwrap_err();
	assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_unregistered_tag_is_missing_taglib() {
	let ctx = test_context();
	let mut doc = root_with("<nope:tag />", TagLib::new("app", "nope", "tag"));

	let err = doc.parse_content(&ctx).unwrap_err();
	assert!(matches!(
		err,
		Error::MissingTagLib { prefix, name } if prefix == "nope" && name == "tag"
	));
}

#[test]
fn test_parser_loop_ceiling() {
	let ctx = context_with_echo("x", "run");
	let content = "<x:run />".repeat(MAX_PARSER_LOOPS + 1);
	let mut doc = root_with(&content, TagLib::new("app", "x", "run"));

	let err = doc.parse_content(&ctx).unwrap_err();
	assert!(matches!(err, Error::Parse(_)));
	assert!(err.to_string().contains("maximum number of parser loops"));
}

#[test]
fn test_transform_twice_is_idempotent_without_mutation() {
	let ctx = context_with_echo("t", "name");
	let mut doc = root_with(
		"Hello <t:name>World</t:name>!",
		TagLib::new("app", "t", "name"),
	);
	doc.parse_content(&ctx).unwrap();

	let first = doc.transform(&ctx).unwrap();
	let second = doc.transform(&ctx).unwrap();
	assert_eq!(first, second);
}

#[test]
fn test_lifecycle_hooks_run_in_order() {
	let ctx = test_context();
	ctx.tags().register("probe", "tag", || Box::new(LifecycleProbeTag));
	let mut doc = root_with("<probe:tag />", TagLib::new("app", "probe", "tag"));
	doc.parse_content(&ctx).unwrap();

	let child = &doc.children()[0];
	assert_eq!(child.attribute("probe-parse"), Some("yes"));
	assert_eq!(child.attribute("probe-append"), Some("yes"));
}

#[test]
fn test_children_inherit_context_and_language() {
	let ctx = context_with_echo("t", "name");
	let mut doc = root_with("<t:name />", TagLib::new("app", "t", "name"));
	doc.set_context("sites::main");
	doc.set_language("de");
	doc.parse_content(&ctx).unwrap();

	let child = &doc.children()[0];
	assert_eq!(child.context(), Some("sites::main"));
	assert_eq!(child.language(), "de");
}

#[test]
fn test_controller_sentinel_is_extracted_and_removed() {
	let mut doc = Document::new();
	doc.set_content("<@controller class=\"welcome\" @>Hello");
	doc.extract_document_controller().unwrap();

	assert_eq!(doc.controller(), Some("welcome"));
	assert_eq!(doc.content(), "Hello");
}

#[test]
fn test_controller_sentinel_without_class_is_a_parse_error() {
	let mut doc = Document::new();
	doc.set_content("<@controller namespace=\"x\" @>");

	let err = doc.extract_document_controller().unwrap_err();
	assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_unterminated_controller_sentinel_is_a_parse_error() {
	let mut doc = Document::new();
	doc.set_content("<@controller class=\"welcome\"");

	let err = doc.extract_document_controller().unwrap_err();
	assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_unresolvable_controller_fails_at_transform() {
	let ctx = test_context();
	let mut doc = Document::new();
	doc.set_content("<@controller class=\"ghost\" @>text");
	doc.extract_document_controller().unwrap();

	let err = doc.transform(&ctx).unwrap_err();
	assert!(matches!(err, Error::ControllerBinding(name) if name == "ghost"));
}

#[test]
fn test_addtaglib_extends_parent_scope_mid_pass() {
	let ctx = context_with_echo("x", "echo");
	let mut doc = Document::new();
	doc.set_content("<core:addtaglib prefix=\"x\" class=\"echo\" /><x:echo>hi</x:echo>");
	doc.parse_content(&ctx).unwrap();

	assert_eq!(doc.children().len(), 2);
	assert_eq!(doc.transform(&ctx).unwrap(), "hi");
}

#[test]
fn test_set_place_holder_fills_matching_children() {
	let ctx = test_context();
	let mut doc = Document::new();
	doc.set_content(
		"<html:placeholder name=\"a\" /> and <html:placeholder name=\"a\" />, not <html:placeholder name=\"b\" />",
	);
	doc.parse_content(&ctx).unwrap();

	assert_eq!(doc.set_place_holder("a", "X"), 2);
	assert_eq!(doc.set_place_holder("missing", "Y"), 0);
	assert!(doc.place_holder_exists("b"));
	assert!(!doc.place_holder_exists("missing"));

	assert_eq!(doc.transform(&ctx).unwrap(), "X and X, not ");
}
