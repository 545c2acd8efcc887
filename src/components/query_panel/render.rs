use log::warn;

use super::types::{
	AnswerView, ExpansionState, MetadataLine, ReferenceContent, ReferenceView, ResultView,
};
use crate::api::{QueryResponse, ReferenceEntry};
use crate::config::{ELLIPSIS, MAX_REFERENCE_CONTENT_CHARS};
use crate::markdown::{ToSafeHtml, render_safe};

/// Turn a service reply into everything the result panel displays.
pub fn render_response<S: ToSafeHtml + ?Sized>(response: &QueryResponse, sanitizer: &S) -> ResultView {
	let answer = match response.answer.as_deref() {
		Some(answer) => AnswerView::Html(render_safe(sanitizer, answer)),
		None => {
			warn!("No answer in response data");
			AnswerView::Placeholder
		}
	};

	let references = response
		.references
		.iter()
		.map(|(key, entry)| render_reference(key, entry, sanitizer))
		.collect();

	ResultView { answer, references }
}

fn render_reference<S: ToSafeHtml + ?Sized>(key: &str, entry: &ReferenceEntry, sanitizer: &S) -> ReferenceView {
	let content = entry.content().map(|text| match truncate(&text) {
		Some(preview) => ReferenceContent {
			preview_html: render_safe(sanitizer, &preview),
			full_html: Some(render_safe(sanitizer, &text)),
			state: ExpansionState::Collapsed,
		},
		None => ReferenceContent {
			preview_html: render_safe(sanitizer, &text),
			full_html: None,
			state: ExpansionState::Collapsed,
		},
	});

	let metadata = entry
		.metadata()
		.map(|(key, value)| MetadataLine {
			key: key.to_string(),
			value,
		})
		.collect();

	ReferenceView {
		header: format!("Reference [{key}]"),
		content,
		metadata,
	}
}

/// The first `MAX_REFERENCE_CONTENT_CHARS` characters plus an ellipsis, or
/// `None` if the text already fits.
fn truncate(text: &str) -> Option<String> {
	let (cut, _) = text.char_indices().nth(MAX_REFERENCE_CONTENT_CHARS)?;
	Some(format!("{}{ELLIPSIS}", &text[..cut]))
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::error::RenderError;
	use crate::markdown::MarkdownSanitizer;

	/// Passes text through untouched so previews can be compared exactly.
	struct Verbatim;

	impl ToSafeHtml for Verbatim {
		fn to_safe_html(&self, markdown: &str) -> Result<String, RenderError> {
			Ok(markdown.to_string())
		}
	}

	fn response(value: serde_json::Value) -> QueryResponse {
		QueryResponse::from(value)
	}

	#[test]
	fn bold_answer_with_short_reference() {
		let view = render_response(
			&response(json!({"answer": "**Hi**", "references": {"1": {"content": "short text"}}})),
			&MarkdownSanitizer,
		);

		let AnswerView::Html(answer) = &view.answer else {
			panic!("expected rendered answer");
		};
		assert!(answer.contains("<strong>Hi</strong>"));
		assert!(view.shows_references());
		assert_eq!(view.references.len(), 1);

		let reference = &view.references[0];
		assert_eq!(reference.header, "Reference [1]");
		assert!(reference.metadata.is_empty());
		let content = reference.content.as_ref().unwrap();
		assert!(!content.can_expand());
		assert!(content.displayed_html().contains("short text"));
	}

	#[test]
	fn missing_answer_shows_placeholder() {
		let view = render_response(&response(json!({"references": {}})), &MarkdownSanitizer);
		assert_eq!(view.answer, AnswerView::Placeholder);
		assert!(!view.shows_references());
	}

	#[test]
	fn falsy_answer_and_content_render_as_absent() {
		let view = render_response(
			&response(json!({"answer": false, "references": {"1": {"content": false, "page": 0}}})),
			&MarkdownSanitizer,
		);
		assert_eq!(view.answer, AnswerView::Placeholder);

		let reference = &view.references[0];
		assert!(reference.content.is_none());
		assert_eq!(reference.metadata, [MetadataLine { key: "page".into(), value: "0".into() }]);
	}

	#[test]
	fn long_content_is_truncated_to_limit() {
		let long = "a".repeat(MAX_REFERENCE_CONTENT_CHARS + 1);
		let view = render_response(&response(json!({"references": {"k": {"content": long}}})), &Verbatim);
		let content = view.references[0].content.as_ref().unwrap();

		assert_eq!(content.preview_html, format!("{}...", "a".repeat(MAX_REFERENCE_CONTENT_CHARS)));
		assert_eq!(content.displayed_html(), content.preview_html);
		assert!(content.can_expand());
	}

	#[test]
	fn content_at_limit_is_not_truncated() {
		let exact = "b".repeat(MAX_REFERENCE_CONTENT_CHARS);
		let view = render_response(&response(json!({"references": {"k": {"content": exact}}})), &Verbatim);
		let content = view.references[0].content.as_ref().unwrap();

		assert_eq!(content.preview_html, exact);
		assert!(!content.is_truncated());
		assert!(!content.can_expand());
	}

	#[test]
	fn truncation_counts_characters_not_bytes() {
		let text = "é".repeat(MAX_REFERENCE_CONTENT_CHARS + 5);
		let preview = truncate(&text).unwrap();
		assert_eq!(preview.chars().count(), MAX_REFERENCE_CONTENT_CHARS + ELLIPSIS.len());
		assert!(truncate(&"é".repeat(MAX_REFERENCE_CONTENT_CHARS)).is_none());
	}

	#[test]
	fn expanding_is_one_way_and_idempotent() {
		let long = format!("{}tail", "x".repeat(MAX_REFERENCE_CONTENT_CHARS));
		let view = render_response(&response(json!({"references": {"k": {"content": long.clone()}}})), &Verbatim);
		let mut content = view.references[0].content.clone().unwrap();

		content.expand();
		assert_eq!(content.displayed_html(), long);
		assert!(!content.can_expand());

		content.expand();
		assert_eq!(content.state, ExpansionState::Expanded);
		assert_eq!(content.displayed_html(), long);
		assert!(!content.can_expand());
	}

	#[test]
	fn expanding_untruncated_content_changes_nothing() {
		let view = render_response(&response(json!({"references": {"k": {"content": "tiny"}}})), &Verbatim);
		let mut content = view.references[0].content.clone().unwrap();
		content.expand();
		assert_eq!(content.state, ExpansionState::Collapsed);
		assert_eq!(content.displayed_html(), "tiny");
	}

	#[test]
	fn references_keep_order_and_metadata() {
		let view = render_response(
			&response(json!({
				"answer": "ok",
				"references": {
					"b": {"source": "doc.md", "content": "one", "score": 0.5},
					"a": {"type": "document", "extra": {"page": 2}}
				}
			})),
			&Verbatim,
		);

		let headers: Vec<_> = view.references.iter().map(|r| r.header.as_str()).collect();
		assert_eq!(headers, ["Reference [b]", "Reference [a]"]);

		let first = &view.references[0];
		let lines: Vec<_> = first.metadata.iter().map(|m| (m.key.as_str(), m.value.as_str())).collect();
		assert_eq!(lines, [("source", "doc.md"), ("score", "0.5")]);

		let second = &view.references[1];
		assert!(second.content.is_none());
		assert_eq!(second.metadata[1].value, r#"{"page":2}"#);
	}

	#[test]
	fn reference_content_is_sanitized() {
		let view = render_response(
			&response(json!({"answer": "<script>steal()</script>fine", "references": {
				"1": {"content": "<img src=x onerror=alert(1)>"}
			}})),
			&MarkdownSanitizer,
		);
		let AnswerView::Html(answer) = &view.answer else {
			panic!("expected rendered answer");
		};
		assert!(!answer.contains("<script"));
		let content = view.references[0].content.as_ref().unwrap();
		assert!(!content.displayed_html().contains("onerror"));
	}
}
