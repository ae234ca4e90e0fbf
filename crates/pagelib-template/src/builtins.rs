//! Built-in taglibs
//!
//! The bundled tag set every container document recognizes by default:
//! `core:addtaglib`, `core:importdesign`, `html:placeholder` and
//! `html:template`, plus the fragment-scoped `template:placeholder` and
//! `template:addtaglib` variants.

use crate::TemplateResult;
use crate::document::{Document, ParentScope, TagHandler};
use crate::render_context::RenderContext;
use crate::taglib::{TagLib, TagRegistry, core_taglibs, fragment_taglibs};
use pagelib_exception::Error;

/// Registers the bundled taglibs on a registry
pub(crate) fn register_builtins(registry: &TagRegistry) {
	registry.register("core", "addtaglib", || Box::new(AddTagLibTag));
	registry.register("core", "importdesign", || Box::new(ImportDesignTag));
	registry.register("html", "placeholder", || Box::new(PlaceHolderTag));
	registry.register("html", "template", || Box::new(TemplateTag));
	registry.register("template", "placeholder", || Box::new(PlaceHolderTag));
	registry.register("template", "addtaglib", || Box::new(AddTagLibTag));
}

fn required_attribute<'a>(doc: &'a Document, key: &str) -> TemplateResult<&'a str> {
	doc.attribute(key).ok_or_else(|| {
		Error::parse(format!(
			"tag \"{}:{}\" is missing the required \"{key}\" attribute",
			doc.prefix().unwrap_or(""),
			doc.name().unwrap_or("")
		))
	})
}

/// `core:addtaglib` / `template:addtaglib`
///
/// Extends the enclosing node's recognized tag set at parse time and
/// renders to the empty string. Because the parent iterates its taglib list
/// by index, the addition is picked up in the same extraction pass.
pub struct AddTagLibTag;

impl TagHandler for AddTagLibTag {
	fn on_parse_time(
		&mut self,
		doc: &mut Document,
		parent: &mut ParentScope<'_>,
		_ctx: &RenderContext,
	) -> TemplateResult<()> {
		let namespace = doc.attribute("namespace").unwrap_or("").to_string();
		let prefix = required_attribute(doc, "prefix")?.to_string();
		let name = required_attribute(doc, "class")?.to_string();
		parent.add_taglib(TagLib::new(namespace, prefix, name));
		Ok(())
	}

	fn transform(&mut self, _doc: &mut Document, _ctx: &RenderContext) -> TemplateResult<String> {
		Ok(String::new())
	}
}

/// `core:importdesign`
///
/// Composes another template file as a sub-tree at the tag's position. The
/// loaded content goes through the full parse: controller sentinel
/// extraction first, then taglib extraction with the core tag set. An
/// optional `context` attribute overrides the inherited application
/// context for the sub-tree.
pub struct ImportDesignTag;

impl TagHandler for ImportDesignTag {
	fn on_parse_time(
		&mut self,
		doc: &mut Document,
		_parent: &mut ParentScope<'_>,
		ctx: &RenderContext,
	) -> TemplateResult<()> {
		let span = format!("(core:importdesign) {}::on_parse_time()", doc.object_id());
		ctx.benchmark().start(&span);

		let namespace = required_attribute(doc, "namespace")?.to_string();
		let template = required_attribute(doc, "template")?.to_string();
		let context_override = doc.attribute("context").map(str::to_string);
		if let Some(context) = context_override {
			doc.set_context(context);
		}

		for lib in core_taglibs() {
			doc.add_taglib(lib);
		}
		let result = doc.load_design(ctx, &namespace, &template);

		ctx.benchmark().stop(&span);
		result
	}
}

/// `html:placeholder` / `template:placeholder`
///
/// An output slot. Renders whatever content a document controller injected
/// via `set_place_holder`; empty by default.
pub struct PlaceHolderTag;

impl TagHandler for PlaceHolderTag {
	fn transform(&mut self, doc: &mut Document, _ctx: &RenderContext) -> TemplateResult<String> {
		Ok(doc.content().to_string())
	}
}

/// `html:template`
///
/// A reusable named fragment. Its inner content is parsed with the
/// fragment-scoped tag set (`template:placeholder`, `template:addtaglib`)
/// but renders to the empty string at its place of definition - unless
/// `transform_on_place` was called. Controllers fetch the fragment by name
/// via `Document::get_template`, fill its placeholders and either render it
/// with `transform_template` or mark it for in-place output.
pub struct TemplateTag;

impl TagHandler for TemplateTag {
	fn on_parse_time(
		&mut self,
		doc: &mut Document,
		_parent: &mut ParentScope<'_>,
		ctx: &RenderContext,
	) -> TemplateResult<()> {
		for lib in fragment_taglibs() {
			doc.add_taglib(lib);
		}
		doc.parse_content(ctx)
	}

	fn transform(&mut self, doc: &mut Document, ctx: &RenderContext) -> TemplateResult<String> {
		if doc.renders_in_place() {
			doc.transform_template(ctx)
		} else {
			Ok(String::new())
		}
	}
}
