//! # Pagelib
//!
//! A page-controller web template framework for Rust.
//!
//! Pagelib renders pages from plain HTML templates interleaved with
//! XML-style taglib tags. A parse pass builds a document tree - one node
//! per recognized tag, each matched span replaced by a unique placeholder -
//! and a transform pass runs the bound document controller and substitutes
//! every placeholder with its child's rendered output.
//!
//! ## Core principles
//!
//! - **No ambient state**: registries, configuration and instrumentation
//!   travel in an explicit [`template::RenderContext`], never in globals
//! - **Explicit factories**: tag types and document controllers are
//!   resolved through registries filled at bootstrap, not by runtime name
//!   lookup into the type system
//! - **Fail fast**: malformed templates abort the request with a
//!   diagnostic carrying a source snippet; there are no retries and no
//!   partial output
//!
//! ## Feature Flags
//!
//! - `core` - registries, configuration handle, benchmark timer
//! - `template` - the template DOM engine (implies `core`)
//! - `full` (default) - everything
//!
//! ## Quick Example
//!
//! ```
//! use pagelib::template::{Document, DocumentController, MemoryTemplateSource, Page,
//!     RenderContext, TemplateResult};
//!
//! struct Welcome;
//!
//! impl DocumentController for Welcome {
//!     fn transform_content(
//!         &mut self,
//!         document: &mut Document,
//!         _ctx: &RenderContext,
//!     ) -> TemplateResult<()> {
//!         document.set_place_holder("user", "World");
//!         Ok(())
//!     }
//! }
//!
//! let mut source = MemoryTemplateSource::new();
//! source.insert(
//!     "sites::main",
//!     "welcome",
//!     "<@controller class=\"welcome\" @>Hello <html:placeholder name=\"user\" />!",
//! );
//!
//! let ctx = RenderContext::new(source);
//! ctx.controllers().register("welcome", || Box::new(Welcome));
//!
//! let mut page = Page::new("welcome");
//! page.load_design(&ctx, "sites::main", "welcome").unwrap();
//! assert_eq!(page.transform(&ctx).unwrap(), "Hello World!");
//! ```

// Module re-exports following the workspace structure
#[cfg(feature = "core")]
pub mod core;
#[cfg(feature = "template")]
pub mod template;

// Re-export the error taxonomy at the crate root
pub use pagelib_exception::{Error, Result};

// Re-export core services
#[cfg(feature = "core")]
pub use pagelib_core::{BenchmarkTimer, Configuration, InMemoryConfiguration, Registry};

// Re-export the template engine's main types
#[cfg(feature = "template")]
pub use pagelib_template::{
	Document, DocumentController, FileSystemTemplateSource, Page, RenderContext, TagHandler,
	TagLib, TagRegistry, TemplateSource,
};
