//! Document tree
//!
//! A [`Document`] is one node of the parsed template tree. The root node is
//! owned by the enclosing [`Page`](crate::page::Page); every recognized tag
//! occurrence becomes a child node, and the matched span in the parent's
//! content is replaced by a unique placeholder marker that the transform
//! pass later substitutes 1:1 with the child's rendered output.
//!
//! Node lifecycle: Created -> on_parse_time -> attached -> on_after_append
//! -> (content mutations by controllers) -> transform. There are no
//! backward transitions; calling transform again simply re-executes.

use crate::attributes::parse_attributes;
use crate::render_context::RenderContext;
use crate::scanner::{scan_next, snippet};
use crate::taglib::{TagLib, core_taglibs};
use crate::TemplateResult;
use indexmap::IndexMap;
use pagelib_exception::Error;
use std::mem;
use uuid::Uuid;

/// Ceiling on tag extractions per parse pass; exceeding it indicates
/// cyclic or runaway tag definitions
pub const MAX_PARSER_LOOPS: usize = 100;

/// Marker for the controller sentinel start
const CONTROLLER_START: &str = "<@controller";
/// Marker for the controller sentinel end
const CONTROLLER_END: &str = "@>";

/// Generates the unique object id of one tree node
pub(crate) fn generate_object_id() -> String {
	Uuid::new_v4().simple().to_string()
}

/// The placeholder marker substituted for a child tag's span
pub(crate) fn placeholder_token(object_id: &str) -> String {
	format!("<{object_id} />")
}

/// Mutable view of the enclosing node handed to parse-time hooks
///
/// Lets a tag extend its parent's recognized tag set while the parent's
/// extraction loop is still running (`core:addtaglib` relies on this: the
/// taglib list is iterated by index, so additions are picked up in the same
/// pass).
pub struct ParentScope<'a> {
	taglibs: &'a mut Vec<TagLib>,
}

impl ParentScope<'_> {
	/// Registers a further taglib on the enclosing node
	pub fn add_taglib(&mut self, lib: TagLib) {
		self.taglibs.push(lib);
	}
}

/// Behavior attached to one parsed tag occurrence
///
/// Handlers are produced by [`TagRegistry`](crate::TagRegistry) factories,
/// one per node. All hooks default to no-ops and the transform defaults to
/// the standard controller-plus-children rendering, so a minimal tag only
/// overrides what it needs.
pub trait TagHandler: Send {
	/// Called immediately after the node was created from its tag string,
	/// before it is attached to the tree
	///
	/// This is where container tags parse their own inner content, load
	/// further template files, or register taglibs on the parent.
	fn on_parse_time(
		&mut self,
		doc: &mut Document,
		parent: &mut ParentScope<'_>,
		ctx: &RenderContext,
	) -> TemplateResult<()> {
		let _ = (doc, parent, ctx);
		Ok(())
	}

	/// Called once the node has been attached to its parent
	fn on_after_append(&mut self, doc: &mut Document, ctx: &RenderContext) -> TemplateResult<()> {
		let _ = (doc, ctx);
		Ok(())
	}

	/// Renders the node to its output string
	fn transform(&mut self, doc: &mut Document, ctx: &RenderContext) -> TemplateResult<String> {
		doc.default_transform(ctx)
	}
}

/// One node of the template tree
pub struct Document {
	object_id: String,
	prefix: Option<String>,
	name: Option<String>,
	attributes: IndexMap<String, String>,
	content: String,
	children: Vec<Document>,
	taglibs: Vec<TagLib>,
	controller: Option<String>,
	context: Option<String>,
	language: String,
	render_in_place: bool,
	handler: Option<Box<dyn TagHandler>>,
}

impl Document {
	/// Creates a root document with the core tag set registered
	pub fn new() -> Self {
		Self {
			object_id: generate_object_id(),
			prefix: None,
			name: None,
			attributes: IndexMap::new(),
			content: String::new(),
			children: Vec::new(),
			taglibs: core_taglibs(),
			controller: None,
			context: None,
			language: "en".to_string(),
			render_in_place: false,
			handler: None,
		}
	}

	/// Creates a node for one parsed tag occurrence; seeds no taglibs (a
	/// nested node only recognizes what its handler registers)
	pub(crate) fn for_tag(
		lib: &TagLib,
		object_id: String,
		attributes: IndexMap<String, String>,
		content: String,
	) -> Self {
		Self {
			object_id,
			prefix: Some(lib.prefix().to_string()),
			name: Some(lib.name().to_string()),
			attributes,
			content,
			children: Vec::new(),
			taglibs: Vec::new(),
			controller: None,
			context: None,
			language: "en".to_string(),
			render_in_place: false,
			handler: None,
		}
	}

	/// The node's generated unique id
	pub fn object_id(&self) -> &str {
		&self.object_id
	}

	/// Tag prefix; `None` for the root node
	pub fn prefix(&self) -> Option<&str> {
		self.prefix.as_deref()
	}

	/// Tag name; `None` for the root node
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	fn display_name(&self) -> String {
		match (&self.prefix, &self.name) {
			(Some(prefix), Some(name)) => format!("{prefix}:{name}"),
			_ => "document".to_string(),
		}
	}

	/// Raw content of the node (placeholders included between parse and
	/// transform)
	pub fn content(&self) -> &str {
		&self.content
	}

	/// Replaces the node's content
	pub fn set_content(&mut self, content: impl Into<String>) {
		self.content = content.into();
	}

	/// Appends to the node's content
	pub fn append_content(&mut self, content: &str) {
		self.content.push_str(content);
	}

	/// Single attribute lookup
	pub fn attribute(&self, key: &str) -> Option<&str> {
		self.attributes.get(key).map(String::as_str)
	}

	/// Sets one attribute
	pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.attributes.insert(key.into(), value.into());
	}

	/// All attributes in source order
	pub fn attributes(&self) -> &IndexMap<String, String> {
		&self.attributes
	}

	/// The inherited application context, if any
	pub fn context(&self) -> Option<&str> {
		self.context.as_deref()
	}

	/// Overrides the application context for this node and nodes parsed
	/// below it afterwards
	pub fn set_context(&mut self, context: impl Into<String>) {
		self.context = Some(context.into());
	}

	/// The inherited language code
	pub fn language(&self) -> &str {
		&self.language
	}

	/// Overrides the language for this node and nodes parsed below it
	/// afterwards
	pub fn set_language(&mut self, language: impl Into<String>) {
		self.language = language.into();
	}

	/// The bound document controller name, if a sentinel was extracted
	pub fn controller(&self) -> Option<&str> {
		self.controller.as_deref()
	}

	/// Child nodes in parse order
	pub fn children(&self) -> &[Document] {
		&self.children
	}

	/// Mutable access to child nodes
	pub fn children_mut(&mut self) -> &mut [Document] {
		&mut self.children
	}

	/// Registers a further taglib on this node
	pub fn add_taglib(&mut self, lib: TagLib) {
		self.taglibs.push(lib);
	}

	/// Taglibs this node currently recognizes
	pub fn taglibs(&self) -> &[TagLib] {
		&self.taglibs
	}

	/// Marks a fragment to be rendered at its place of definition
	pub fn transform_on_place(&mut self) {
		self.render_in_place = true;
	}

	/// True if [`transform_on_place`](Self::transform_on_place) was called
	pub fn renders_in_place(&self) -> bool {
		self.render_in_place
	}

	/// Loads a template through the context's source and parses it:
	/// controller sentinel first, then taglib extraction
	pub fn load_design(
		&mut self,
		ctx: &RenderContext,
		namespace: &str,
		design: &str,
	) -> TemplateResult<()> {
		self.content = ctx.source().load(namespace, design)?;
		self.extract_document_controller()?;
		self.parse_content(ctx)
	}

	/// Extracts the `<@controller class="..." @>` sentinel, if present,
	/// binding the named controller and removing the sentinel from content
	pub(crate) fn extract_document_controller(&mut self) -> TemplateResult<()> {
		let Some(start) = self.content.find(CONTROLLER_START) else {
			return Ok(());
		};
		let Some(end_rel) = self.content[start..].find(CONTROLLER_END) else {
			return Err(Error::parse(format!(
				"controller sentinel is never terminated by \"{CONTROLLER_END}\"; near \"{}\"",
				snippet(&self.content[start..])
			)));
		};
		let end = start + end_rel;

		let attr_region = self.content[start + CONTROLLER_START.len()..end].to_string();
		let attributes = parse_attributes(&attr_region)?;
		let Some(class) = attributes.get("class") else {
			return Err(Error::parse(format!(
				"controller sentinel is missing the \"class\" attribute; near \"{}\"",
				snippet(&self.content[start..])
			)));
		};

		tracing::debug!(controller = %class, "bound document controller");
		self.controller = Some(class.clone());
		self.content.replace_range(start..end + CONTROLLER_END.len(), "");
		Ok(())
	}

	/// Extracts every registered taglib tag from the node's content,
	/// materializing one child node per occurrence and substituting each
	/// matched span with the child's placeholder
	///
	/// The taglib list is iterated by index because parse-time hooks may
	/// register further taglibs mid-pass (`core:addtaglib`).
	pub fn parse_content(&mut self, ctx: &RenderContext) -> TemplateResult<()> {
		let mut content = mem::take(&mut self.content);
		let mut loops = 0usize;
		let mut index = 0usize;

		while index < self.taglibs.len() {
			let lib = self.taglibs[index].clone();
			let token = lib.token();
			let mut from = 0usize;

			while let Some(tag) = scan_next(&content, &token, from)? {
				loops += 1;
				if loops > MAX_PARSER_LOOPS {
					return Err(Error::parse(format!(
						"maximum number of parser loops ({MAX_PARSER_LOOPS}) exceeded while \
						 extracting \"<{token}>\" tags"
					)));
				}

				let mut handler = ctx.tags().resolve(&lib)?;
				let attributes = parse_attributes(&tag.attributes)?;
				let object_id = generate_object_id();
				tracing::debug!(token = %token, object_id = %object_id, "extracted taglib tag");

				let mut child = Document::for_tag(&lib, object_id.clone(), attributes, tag.content);
				child.context = self.context.clone();
				child.language = self.language.clone();

				content.replace_range(tag.start..tag.end, &placeholder_token(&object_id));
				from = tag.start;

				{
					let mut parent = ParentScope {
						taglibs: &mut self.taglibs,
					};
					handler.on_parse_time(&mut child, &mut parent, ctx)?;
				}
				child.handler = Some(handler);
				self.children.push(child);
			}

			index += 1;
		}

		self.content = content;

		if !self.children.is_empty() {
			let span = format!(
				"({}) {}::children::on_after_append()",
				self.display_name(),
				self.object_id
			);
			ctx.benchmark().start(&span);
			for child in &mut self.children {
				if let Some(mut handler) = child.handler.take() {
					handler.on_after_append(child, ctx)?;
					child.handler = Some(handler);
				}
			}
			ctx.benchmark().stop(&span);
		}

		Ok(())
	}

	/// Fills every placeholder child carrying the given `name` attribute
	/// with the value, returning how many were filled
	///
	/// A zero count is reported as a warning; placeholders that stay empty
	/// render as the empty string.
	pub fn set_place_holder(&mut self, name: &str, value: &str) -> usize {
		let mut count = 0usize;
		for child in &mut self.children {
			if child.name.as_deref() == Some("placeholder")
				&& child.attribute("name") == Some(name)
			{
				child.set_content(value);
				count += 1;
			}
		}
		if count == 0 {
			tracing::warn!(placeholder = name, "no placeholder found for name");
		}
		count
	}

	/// True if a placeholder child with the given name exists
	pub fn place_holder_exists(&self, name: &str) -> bool {
		self.children.iter().any(|child| {
			child.name.as_deref() == Some("placeholder") && child.attribute("name") == Some(name)
		})
	}

	/// Looks up an `html:template` fragment child by its `name` attribute
	pub fn get_template(&mut self, name: &str) -> Option<&mut Document> {
		self.children.iter_mut().find(|child| {
			child.name.as_deref() == Some("template") && child.attribute("name") == Some(name)
		})
	}

	/// Substitutes every child placeholder, in parse order, with the
	/// child's transformed output and returns the resulting string
	///
	/// This is the bare substitution step with no controller invocation;
	/// fragments expose it to controllers as their rendering entry point.
	pub fn transform_template(&mut self, ctx: &RenderContext) -> TemplateResult<String> {
		let mut content = self.content.clone();
		for child in &mut self.children {
			let marker = placeholder_token(&child.object_id);
			let rendered = child.transform(ctx)?;
			content = content.replace(&marker, &rendered);
		}
		Ok(content)
	}

	/// The standard node rendering: run the bound document controller (if
	/// any), then substitute child placeholders
	///
	/// The controller runs before substitution and sees the node's raw
	/// content with placeholders intact; its mutations persist on the tree.
	pub fn default_transform(&mut self, ctx: &RenderContext) -> TemplateResult<String> {
		let span = format!("({}) {}::transform()", self.display_name(), self.object_id);

		if let Some(controller_name) = self.controller.clone() {
			let mut controller = ctx.controllers().resolve(&controller_name)?;
			ctx.benchmark().start(&span);
			let controller_span =
				format!("({controller_name}) {}::transform_content()", self.object_id);
			ctx.benchmark().start(&controller_span);
			controller.transform_content(self, ctx)?;
			ctx.benchmark().stop(&controller_span);
		} else {
			ctx.benchmark().start(&span);
		}

		let content = self.transform_template(ctx)?;
		ctx.benchmark().stop(&span);
		Ok(content)
	}

	/// Renders this node through its handler, or through
	/// [`default_transform`](Self::default_transform) when it has none
	pub fn transform(&mut self, ctx: &RenderContext) -> TemplateResult<String> {
		match self.handler.take() {
			Some(mut handler) => {
				let output = handler.transform(self, ctx);
				self.handler = Some(handler);
				output
			}
			None => self.default_transform(ctx),
		}
	}
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl std::fmt::Debug for Document {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Document")
			.field("object_id", &self.object_id)
			.field("prefix", &self.prefix)
			.field("name", &self.name)
			.field("attributes", &self.attributes)
			.field("content", &self.content)
			.field("children", &self.children)
			.field("taglibs", &self.taglibs)
			.field("controller", &self.controller)
			.finish_non_exhaustive()
	}
}
