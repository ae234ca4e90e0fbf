//! Tag scanner
//!
//! Locates taglib tags in raw template text. The scanner walks the input as
//! a character state machine: a candidate `<prefix:name` occurrence only
//! counts when followed by whitespace, `/` or `>`, the attribute region is
//! consumed quote-aware up to the tag-end `>`, and container tags track the
//! nesting depth of their own token so that
//! `<p:c><p:c>x</p:c></p:c>` resolves the outer extent to the full nested
//! pair instead of the first inner closing tag.

use crate::TemplateResult;
use pagelib_exception::Error;

/// One recognized tag occurrence within a content buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch {
	/// Byte offset of the opening `<`
	pub start: usize,
	/// Byte offset one past the end of the whole tag span
	pub end: usize,
	/// Raw attribute substring, still unparsed
	pub attributes: String,
	/// Raw inner content; empty for self-closing tags
	pub content: String,
	/// True for `<prefix:name ... />`
	pub self_closing: bool,
}

/// Maximum number of characters quoted back in parse error messages
const SNIPPET_LEN: usize = 60;

/// Quotes the head of the offending source into an error message
pub(crate) fn snippet(source: &str) -> String {
	let mut out: String = source.chars().take(SNIPPET_LEN).collect();
	if source.chars().count() > SNIPPET_LEN {
		out.push_str("...");
	}
	out
}

/// Finds the next occurrence of `<{token}` at or after `from` whose
/// following character makes it a real tag start
fn find_open(content: &str, token: &str, from: usize) -> Option<usize> {
	let open = format!("<{token}");
	let mut cursor = from;
	while let Some(rel) = content.get(cursor..)?.find(&open) {
		let pos = cursor + rel;
		let boundary = content[pos + open.len()..].chars().next();
		match boundary {
			Some(c) if c.is_ascii_whitespace() || c == '/' || c == '>' => return Some(pos),
			Some(_) => cursor = pos + open.len(),
			None => return None,
		}
	}
	None
}

/// Consumes the attribute region starting behind `<{token}` and returns the
/// byte offset of the tag-end `>` plus whether the tag is self-closing
///
/// Quoted attribute values may contain `>` without terminating the tag.
fn find_tag_end(content: &str, token: &str, from: usize) -> TemplateResult<(usize, bool)> {
	let mut in_quotes = false;
	let mut prev = None;
	for (rel, ch) in content[from..].char_indices() {
		match ch {
			'"' => in_quotes = !in_quotes,
			'>' if !in_quotes => return Ok((from + rel, prev == Some('/'))),
			_ => {}
		}
		prev = Some(ch);
	}
	Err(Error::parse(format!(
		"tag \"<{token}\" is never terminated by '>'; near \"{}\"",
		snippet(&content[from..])
	)))
}

/// Returns the next occurrence of `token` in `content` at or after `from`,
/// or `None` when the buffer holds no further tag of that type
///
/// # Errors
///
/// - the tag start has no matching `>` (unterminated attribute region)
/// - a container tag has no matching `</prefix:name>` counterpart
///
/// # Examples
///
/// ```
/// use pagelib_template::scanner::scan_next;
///
/// let tag = scan_next("Hello <t:name attr=\"x\">World</t:name>!", "t:name", 0)
///     .unwrap()
///     .unwrap();
/// assert_eq!(tag.attributes.trim(), "attr=\"x\"");
/// assert_eq!(tag.content, "World");
/// assert!(!tag.self_closing);
/// ```
pub fn scan_next(content: &str, token: &str, from: usize) -> TemplateResult<Option<TagMatch>> {
	let open = format!("<{token}");
	let close = format!("</{token}>");

	let Some(start) = find_open(content, token, from.min(content.len())) else {
		return Ok(None);
	};

	let (tag_end, self_closing) = find_tag_end(content, token, start + open.len())?;
	let attr_end = if self_closing { tag_end - 1 } else { tag_end };
	let attributes = content[start + open.len()..attr_end].to_string();

	if self_closing {
		return Ok(Some(TagMatch {
			start,
			end: tag_end + 1,
			attributes,
			content: String::new(),
			self_closing: true,
		}));
	}

	// walk forward tracking the nesting depth of this token; nested
	// self-closing occurrences leave the depth unchanged
	let content_start = tag_end + 1;
	let mut depth = 1usize;
	let mut cursor = content_start;
	loop {
		let next_open = find_open(content, token, cursor);
		let next_close = content[cursor..].find(&close).map(|rel| cursor + rel);
		match (next_open, next_close) {
			(Some(o), Some(c)) if o < c => {
				let (nested_end, nested_self_closing) = find_tag_end(content, token, o + open.len())?;
				if !nested_self_closing {
					depth += 1;
				}
				cursor = nested_end + 1;
			}
			(_, Some(c)) => {
				depth -= 1;
				if depth == 0 {
					return Ok(Some(TagMatch {
						start,
						end: c + close.len(),
						attributes,
						content: content[content_start..c].to_string(),
						self_closing: false,
					}));
				}
				cursor = c + close.len();
			}
			(_, None) => {
				return Err(Error::parse(format!(
					"no closing tag found for \"<{token}>\"; near \"{}\"",
					snippet(&content[start..])
				)));
			}
		}
	}
}
