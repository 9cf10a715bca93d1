use souk_domain::LineFilter;

const SQL_LINE_IDS_FOR_PARTY: &str = "\
SELECT line.line_id
FROM catalogues AS catalogue
JOIN catalogue_lines AS line ON line.catalogue_key = catalogue.catalogue_key
WHERE catalogue.catalogue_id = $1
	AND catalogue.provider_party_id = $2
ORDER BY line.line_key
LIMIT $3 OFFSET $4";

const SQL_LINE_IDS_WITH_CATEGORY: &str = "\
SELECT line.line_id
FROM catalogues AS catalogue
JOIN catalogue_lines AS line ON line.catalogue_key = catalogue.catalogue_key
WHERE catalogue.catalogue_id = $1
	AND catalogue.provider_party_id = $2
	AND EXISTS (
		SELECT 1
		FROM line_classifications AS classification
		WHERE classification.line_key = line.line_key
			AND classification.class_name = $3
	)
ORDER BY line.line_key
LIMIT $4 OFFSET $5";

const SQL_LINE_IDS_WITH_SEARCH_TEXT: &str = "\
SELECT line.line_id
FROM catalogues AS catalogue
JOIN catalogue_lines AS line ON line.catalogue_key = catalogue.catalogue_key
WHERE catalogue.catalogue_id = $1
	AND catalogue.provider_party_id = $2
	AND EXISTS (
		SELECT 1
		FROM line_texts AS line_text
		WHERE line_text.line_key = line.line_key
			AND line_text.language_id = $3
			AND to_tsvector($4::regconfig, line_text.value)
				@@ plainto_tsquery($4::regconfig, $5)
	)
ORDER BY line.line_key
LIMIT $6 OFFSET $7";

const SQL_LINE_IDS_WITH_CATEGORY_AND_SEARCH_TEXT: &str = "\
SELECT line.line_id
FROM catalogues AS catalogue
JOIN catalogue_lines AS line ON line.catalogue_key = catalogue.catalogue_key
WHERE catalogue.catalogue_id = $1
	AND catalogue.provider_party_id = $2
	AND EXISTS (
		SELECT 1
		FROM line_classifications AS classification
		WHERE classification.line_key = line.line_key
			AND classification.class_name = $3
	)
	AND EXISTS (
		SELECT 1
		FROM line_texts AS line_text
		WHERE line_text.line_key = line.line_key
			AND line_text.language_id = $4
			AND to_tsvector($5::regconfig, line_text.value)
				@@ plainto_tsquery($5::regconfig, $6)
	)
ORDER BY line.line_key
LIMIT $7 OFFSET $8";

/// The closed set of candidate-id query shapes. Which one runs depends only
/// on which filter predicates are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineQueryVariant {
	ByParty,
	ByPartyAndCategory,
	ByPartyAndText,
	ByPartyCategoryAndText,
}

/// An immutable, fully parameterized candidate-id query: a fixed SQL template
/// plus its ordered bindings. Filter values never reach the SQL text. The
/// trailing LIMIT/OFFSET parameters are bound by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineQueryPlan {
	variant: LineQueryVariant,
	sql: &'static str,
	binds: Vec<String>,
	native: bool,
}

impl LineQueryPlan {
	/// Selects the query variant for the given catalogue scope and filter.
	///
	/// The two full-text variants are flagged native: tokenized search is
	/// expressed with `plainto_tsquery`, which is Postgres-specific, while the
	/// other two shapes are portable relational SQL. The text-search
	/// configuration name is itself a binding (cast to `regconfig`), so even
	/// that never lands in the template.
	pub fn build(
		catalogue_id: &str,
		party_id: &str,
		filter: &LineFilter,
		text_search_config: &str,
	) -> Self {
		let mut binds = vec![catalogue_id.to_string(), party_id.to_string()];

		match (filter.category_name.as_deref(), filter.search.as_ref()) {
			(None, None) => Self {
				variant: LineQueryVariant::ByParty,
				sql: SQL_LINE_IDS_FOR_PARTY,
				binds,
				native: false,
			},
			(Some(category_name), None) => {
				binds.push(category_name.to_string());

				Self {
					variant: LineQueryVariant::ByPartyAndCategory,
					sql: SQL_LINE_IDS_WITH_CATEGORY,
					binds,
					native: false,
				}
			},
			(None, Some(search)) => {
				binds.push(search.language_id.clone());
				binds.push(text_search_config.to_string());
				binds.push(search.text.clone());

				Self {
					variant: LineQueryVariant::ByPartyAndText,
					sql: SQL_LINE_IDS_WITH_SEARCH_TEXT,
					binds,
					native: true,
				}
			},
			(Some(category_name), Some(search)) => {
				binds.push(category_name.to_string());
				binds.push(search.language_id.clone());
				binds.push(text_search_config.to_string());
				binds.push(search.text.clone());

				Self {
					variant: LineQueryVariant::ByPartyCategoryAndText,
					sql: SQL_LINE_IDS_WITH_CATEGORY_AND_SEARCH_TEXT,
					binds,
					native: true,
				}
			},
		}
	}

	pub fn variant(&self) -> LineQueryVariant {
		self.variant
	}

	pub fn sql(&self) -> &'static str {
		self.sql
	}

	pub fn binds(&self) -> &[String] {
		&self.binds
	}

	pub fn is_native(&self) -> bool {
		self.native
	}
}
