#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerView {
	/// Sanitized HTML of the answer markdown.
	Html(String),
	/// The service sent no answer.
	Placeholder,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultView {
	pub answer: AnswerView,
	pub references: Vec<ReferenceView>,
}

impl ResultView {
	pub fn shows_references(&self) -> bool {
		!self.references.is_empty()
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceView {
	pub header: String,
	pub content: Option<ReferenceContent>,
	pub metadata: Vec<MetadataLine>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataLine {
	pub key: String,
	pub value: String,
}

/// Collapsed until "Show more" is used; expanded is terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpansionState {
	#[default]
	Collapsed,
	Expanded,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceContent {
	pub preview_html: String,
	/// Present only when the preview was truncated.
	pub full_html: Option<String>,
	pub state: ExpansionState,
}

impl ReferenceContent {
	pub fn is_truncated(&self) -> bool {
		self.full_html.is_some()
	}

	pub fn can_expand(&self) -> bool {
		self.is_truncated() && self.state == ExpansionState::Collapsed
	}

	pub fn expand(&mut self) {
		if self.is_truncated() {
			self.state = ExpansionState::Expanded;
		}
	}

	pub fn displayed_html(&self) -> &str {
		match (&self.full_html, self.state) {
			(Some(full), ExpansionState::Expanded) => full,
			_ => &self.preview_html,
		}
	}
}
