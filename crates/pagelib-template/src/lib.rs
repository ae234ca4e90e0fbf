//! # Pagelib Templates
//!
//! Template DOM engine for the pagelib framework.
//!
//! Templates are plain HTML interleaved with XML-style taglib tags:
//!
//! ```text
//! <@controller class="welcome" @>
//! <html>
//!   <body>
//!     Hello <html:placeholder name="user" />!
//!     <core:importdesign namespace="sites::main" template="footer" />
//!   </body>
//! </html>
//! ```
//!
//! ## How rendering works
//!
//! - A parse pass scans the template for every registered `prefix:name`
//!   token, builds one [`Document`] node per recognized tag, and replaces
//!   the matched span with a unique placeholder marker.
//! - Tag behavior is resolved through a [`TagRegistry`] mapping
//!   `(prefix, name)` to a [`TagHandler`] factory; nodes receive lifecycle
//!   callbacks (`on_parse_time`, `on_after_append`) as the tree is built.
//! - A transform pass runs the bound [`DocumentController`] (designated by
//!   a `<@controller class="..." @>` sentinel) and then substitutes every
//!   placeholder with its child's recursively transformed output.
//!
//! ## Built-in taglibs
//!
//! - `core:addtaglib` - registers a further taglib on the enclosing node
//! - `core:importdesign` - composes another template file as a sub-tree
//! - `html:placeholder` - output slot filled by a document controller
//! - `html:template` - reusable named fragment with `template:placeholder`
//!   and `template:addtaglib` scoped inside it
//!
//! ## Example
//!
//! ```
//! use pagelib_template::{MemoryTemplateSource, Page, RenderContext};
//!
//! let mut source = MemoryTemplateSource::new();
//! source.insert("sites::main", "welcome", "Hello World!");
//!
//! let ctx = RenderContext::new(source);
//! let mut page = Page::new("welcome");
//! page.load_design(&ctx, "sites::main", "welcome").unwrap();
//!
//! assert_eq!(page.transform(&ctx).unwrap(), "Hello World!");
//! ```

pub mod attributes;
pub mod builtins;
pub mod controller;
pub mod document;
pub mod loader;
pub mod page;
pub mod render_context;
pub mod scanner;
pub mod taglib;

pub use builtins::{AddTagLibTag, ImportDesignTag, PlaceHolderTag, TemplateTag};
pub use controller::{ControllerRegistry, DocumentController};
pub use document::{Document, ParentScope, TagHandler};
pub use loader::{FileSystemTemplateSource, MemoryTemplateSource, TemplateSource};
pub use page::Page;
pub use pagelib_exception::Error as TemplateError;
pub use render_context::RenderContext;
pub use taglib::{TagLib, TagRegistry};

/// Result alias used across the template engine
pub type TemplateResult<T> = pagelib_exception::Result<T>;

#[cfg(test)]
mod tests;
