//! Markdown to sanitized HTML for server-originated text.
//!
//! Everything the query service returns is untrusted. Answer text and
//! reference content pass through [`render_safe`] before they are inserted
//! into the document as HTML.

use log::error;
use pulldown_cmark::{Options, Parser, html};

use crate::error::RenderError;

/// Capability that turns markdown into HTML safe to insert into the page.
pub trait ToSafeHtml {
	fn to_safe_html(&self, markdown: &str) -> Result<String, RenderError>;
}

/// `pulldown-cmark` for the conversion, `ammonia` for the clean-up.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownSanitizer;

impl MarkdownSanitizer {
	fn options() -> Options {
		Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
	}
}

impl ToSafeHtml for MarkdownSanitizer {
	fn to_safe_html(&self, markdown: &str) -> Result<String, RenderError> {
		let parser = Parser::new_ext(markdown, Self::options());
		let mut unsafe_html = String::with_capacity(markdown.len() * 3 / 2);
		html::write_html_fmt(&mut unsafe_html, parser).map_err(|err| RenderError(err.to_string()))?;
		Ok(ammonia::clean(&unsafe_html))
	}
}

/// Render through `sanitizer`, falling back to the escaped original text.
pub fn render_safe<S: ToSafeHtml + ?Sized>(sanitizer: &S, markdown: &str) -> String {
	match sanitizer.to_safe_html(markdown) {
		Ok(html) => html,
		Err(err) => {
			error!("Error rendering markdown: {err}");
			ammonia::clean_text(markdown)
		}
	}
}
