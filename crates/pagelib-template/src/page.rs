//! Page
//!
//! The root object of one rendered web page. A page owns the root
//! [`Document`] of the tree: `load_design` loads and parses the initial
//! template, `transform` renders the whole tree to the final string.

use crate::TemplateResult;
use crate::document::Document;
use crate::render_context::RenderContext;
use pagelib_exception::Error;

/// Root of one page's document tree
///
/// # Examples
///
/// ```
/// use pagelib_template::{MemoryTemplateSource, Page, RenderContext};
///
/// let mut source = MemoryTemplateSource::new();
/// source.insert("sites::main", "index", "<h1>Hi</h1>");
///
/// let ctx = RenderContext::new(source);
/// let mut page = Page::new("index");
/// page.load_design(&ctx, "sites::main", "index").unwrap();
///
/// assert_eq!(page.transform(&ctx).unwrap(), "<h1>Hi</h1>");
/// ```
#[derive(Debug)]
pub struct Page {
	name: String,
	context: Option<String>,
	language: String,
	document: Option<Document>,
}

impl Page {
	/// Creates a page with no document loaded yet
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			context: None,
			language: "en".to_string(),
			document: None,
		}
	}

	/// The page name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Sets the application context applied to the root document
	pub fn set_context(&mut self, context: impl Into<String>) {
		self.context = Some(context.into());
	}

	/// Sets the language applied to the root document
	pub fn set_language(&mut self, language: impl Into<String>) {
		self.language = language.into();
	}

	/// Creates the root document and loads the initial template
	///
	/// If no context was set on the page, the template's namespace is taken
	/// as the context instead.
	pub fn load_design(
		&mut self,
		ctx: &RenderContext,
		namespace: &str,
		design: &str,
	) -> TemplateResult<()> {
		let mut document = Document::new();
		match &self.context {
			Some(context) => document.set_context(context.clone()),
			None => document.set_context(namespace),
		}
		document.set_language(self.language.clone());
		document.load_design(ctx, namespace, design)?;
		self.document = Some(document);
		Ok(())
	}

	/// The root document, once a design was loaded
	pub fn document(&self) -> Option<&Document> {
		self.document.as_ref()
	}

	/// Mutable access to the root document
	pub fn document_mut(&mut self) -> Option<&mut Document> {
		self.document.as_mut()
	}

	/// Transforms the tree and returns the rendered page
	pub fn transform(&mut self, ctx: &RenderContext) -> TemplateResult<String> {
		match &mut self.document {
			Some(document) => document.transform(ctx),
			None => Err(Error::parse(
				"transform() called before load_design(); the page has no document",
			)),
		}
	}
}
