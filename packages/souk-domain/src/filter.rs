use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterError {
	SearchTextWithoutLanguage,
}

/// Optional predicates applied when browsing catalogue lines.
///
/// Category and text search combine with logical AND when both are present.
/// Construction is the only place a filter combination is checked; everything
/// downstream can rely on a `TextSearch` always carrying its language id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineFilter {
	pub category_name: Option<String>,
	pub search: Option<TextSearch>,
}

/// Tokenized text search over line names and descriptions, scoped to one
/// language at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSearch {
	pub text: String,
	pub language_id: String,
}

impl LineFilter {
	pub fn new(
		category_name: Option<String>,
		search_text: Option<String>,
		language_id: Option<String>,
	) -> Result<Self, FilterError> {
		let category_name = category_name.filter(|name| !name.trim().is_empty());
		let search_text = search_text.filter(|text| !text.trim().is_empty());
		let language_id = language_id.filter(|id| !id.trim().is_empty());
		let search = match search_text {
			Some(text) => {
				let Some(language_id) = language_id else {
					return Err(FilterError::SearchTextWithoutLanguage);
				};

				Some(TextSearch { text, language_id })
			},
			// A language id without search text has nothing to scope; ignore it.
			None => None,
		};

		Ok(Self { category_name, search })
	}

	pub fn is_empty(&self) -> bool {
		self.category_name.is_none() && self.search.is_none()
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortOption {
	#[default]
	None,
	PriceLowToHigh,
	PriceHighToLow,
}

/// An offset-sliced window over the candidate line set.
///
/// `limit == 0` requests metadata only: the response carries the total size
/// and facet names but no lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
	pub limit: i64,
	pub offset: i64,
}
