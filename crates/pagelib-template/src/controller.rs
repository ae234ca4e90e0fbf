//! Document controllers
//!
//! A document controller is the presentation logic bound to one template
//! via the `<@controller class="..." @>` sentinel. During transform it runs
//! before child substitution and may mutate the document's content,
//! attributes and children - typically by filling placeholders.

use crate::TemplateResult;
use crate::document::Document;
use crate::render_context::RenderContext;
use pagelib_exception::Error;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Presentation logic bound to a document
///
/// # Examples
///
/// ```
/// use pagelib_template::{Document, DocumentController, RenderContext, TemplateResult};
///
/// struct Welcome;
///
/// impl DocumentController for Welcome {
///     fn transform_content(
///         &mut self,
///         document: &mut Document,
///         _ctx: &RenderContext,
///     ) -> TemplateResult<()> {
///         document.set_place_holder("user", "World");
///         Ok(())
///     }
/// }
/// ```
pub trait DocumentController: Send {
	/// Mutates the document before child placeholders are substituted
	fn transform_content(
		&mut self,
		document: &mut Document,
		ctx: &RenderContext,
	) -> TemplateResult<()>;
}

/// Factory producing a fresh controller per transform
pub type ControllerFactory = Arc<dyn Fn() -> Box<dyn DocumentController> + Send + Sync>;

/// Registry mapping controller names to factories
///
/// Filled at bootstrap; the transform engine resolves the name a template's
/// sentinel carries, and an unknown name is a fatal
/// [`Error::ControllerBinding`].
#[derive(Clone, Default)]
pub struct ControllerRegistry {
	controllers: Arc<RwLock<HashMap<String, ControllerFactory>>>,
}

impl ControllerRegistry {
	/// Creates an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a factory under the given name, replacing any previous
	/// registration
	pub fn register<F>(&self, name: &str, factory: F)
	where
		F: Fn() -> Box<dyn DocumentController> + Send + Sync + 'static,
	{
		let mut controllers = self.controllers.write();
		controllers.insert(name.to_string(), Arc::new(factory));
	}

	/// True if a factory is registered under the name
	pub fn contains(&self, name: &str) -> bool {
		let controllers = self.controllers.read();
		controllers.contains_key(name)
	}

	/// Produces a fresh controller, or fails with
	/// [`Error::ControllerBinding`]
	pub fn resolve(&self, name: &str) -> TemplateResult<Box<dyn DocumentController>> {
		let factory = {
			let controllers = self.controllers.read();
			controllers.get(name).cloned()
		};
		match factory {
			Some(factory) => Ok(factory()),
			None => Err(Error::ControllerBinding(name.to_string())),
		}
	}
}

impl std::fmt::Debug for ControllerRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let controllers = self.controllers.read();
		f.debug_struct("ControllerRegistry")
			.field("registered", &controllers.keys().collect::<Vec<_>>())
			.finish()
	}
}
