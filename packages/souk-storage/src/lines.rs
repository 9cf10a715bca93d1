use std::collections::HashMap;

use sqlx::{Postgres, Transaction};
use time::OffsetDateTime;
use uuid::Uuid;

use souk_domain::{CatalogueLine, Classification, LocalizedText, PageRequest, SortOption, TextField};

use crate::{
	Error, Result,
	db::Db,
	models::{ClassificationRow, LineRow, TextRow},
	plan::LineQueryPlan,
};

const SQL_LINE_COUNT_FOR_PARTY: &str = "\
SELECT count(line.line_key)
FROM catalogues AS catalogue
JOIN catalogue_lines AS line ON line.catalogue_key = catalogue.catalogue_key
WHERE catalogue.catalogue_id = $1
	AND catalogue.provider_party_id = $2";

const SQL_CLASSIFICATION_NAMES: &str = "\
SELECT DISTINCT classification.class_name
FROM catalogues AS catalogue
JOIN catalogue_lines AS line ON line.catalogue_key = catalogue.catalogue_key
JOIN line_classifications AS classification ON classification.line_key = line.line_key
WHERE catalogue.uuid = $1";

const SQL_LINES_BY_IDS: &str = "\
SELECT
	line.line_key,
	line.line_id,
	line.manufacturer_item_id,
	line.manufacturer_party_id,
	line.item_name,
	line.price_amount,
	line.created_at,
	line.updated_at
FROM catalogues AS catalogue
JOIN catalogue_lines AS line ON line.catalogue_key = catalogue.catalogue_key
WHERE catalogue.uuid = $1
	AND line.line_id = ANY($2)";

const SQL_CLASSIFICATIONS_FOR_LINES: &str = "\
SELECT classification.line_key, classification.class_code, classification.class_name
FROM line_classifications AS classification
WHERE classification.line_key = ANY($1)
ORDER BY classification.classification_key";

const SQL_TEXTS_FOR_LINES: &str = "\
SELECT line_text.line_key, line_text.language_id, line_text.field, line_text.value
FROM line_texts AS line_text
WHERE line_text.line_key = ANY($1)
ORDER BY line_text.text_key";

/// Unfiltered line count for the party-scoped catalogue. Active filters never
/// reduce this number.
pub async fn count_lines_for_party(db: &Db, catalogue_id: &str, party_id: &str) -> Result<i64> {
	let count: i64 = sqlx::query_scalar(SQL_LINE_COUNT_FOR_PARTY)
		.bind(catalogue_id)
		.bind(party_id)
		.fetch_one(&db.pool)
		.await?;

	Ok(count)
}

/// The distinct classification names attached to any line of the catalogue,
/// independent of active filters. No ordering guarantee.
pub async fn classification_names(db: &Db, catalogue_uuid: Uuid) -> Result<Vec<String>> {
	let names: Vec<String> = sqlx::query_scalar(SQL_CLASSIFICATION_NAMES)
		.bind(catalogue_uuid)
		.fetch_all(&db.pool)
		.await?;

	Ok(names)
}

/// Executes a candidate-id plan, returning the surrogate-key-ordered window of
/// line business ids. Callers must not invoke this for a zero limit; the page
/// window is bound after the plan's own parameters.
pub async fn resolve_line_ids(
	db: &Db,
	plan: &LineQueryPlan,
	page: PageRequest,
) -> Result<Vec<String>> {
	let mut query = sqlx::query_scalar::<_, String>(plan.sql());

	for bind in plan.binds() {
		query = query.bind(bind.as_str());
	}

	let ids = query.bind(page.limit).bind(page.offset).fetch_all(&db.pool).await?;

	Ok(ids)
}

/// Batch-loads full lines for the given business ids: one query for the line
/// rows, one for classifications, one for localized texts. The requested sort
/// applies to the line rows; assembly preserves their order.
pub async fn fetch_lines_by_ids(
	db: &Db,
	catalogue_uuid: Uuid,
	line_ids: &[String],
	sort: SortOption,
) -> Result<Vec<CatalogueLine>> {
	if line_ids.is_empty() {
		return Ok(Vec::new());
	}

	let sql = format!("{SQL_LINES_BY_IDS}{}", order_clause(sort));
	let rows: Vec<LineRow> = sqlx::query_as(&sql)
		.bind(catalogue_uuid)
		.bind(line_ids)
		.fetch_all(&db.pool)
		.await?;
	let line_keys = rows.iter().map(|row| row.line_key).collect::<Vec<_>>();
	let classification_rows: Vec<ClassificationRow> =
		sqlx::query_as(SQL_CLASSIFICATIONS_FOR_LINES)
			.bind(&line_keys)
			.fetch_all(&db.pool)
			.await?;
	let text_rows: Vec<TextRow> =
		sqlx::query_as(SQL_TEXTS_FOR_LINES).bind(&line_keys).fetch_all(&db.pool).await?;

	assemble_lines(rows, classification_rows, text_rows)
}

/// Fetches one line by business id, with children.
pub async fn find_line(
	db: &Db,
	catalogue_uuid: Uuid,
	line_id: &str,
) -> Result<Option<CatalogueLine>> {
	let mut lines =
		fetch_lines_by_ids(db, catalogue_uuid, &[line_id.to_string()], SortOption::None).await?;

	Ok(lines.pop())
}

pub async fn line_exists(db: &Db, catalogue_uuid: Uuid, line_id: &str) -> Result<bool> {
	let count: i64 = sqlx::query_scalar(
		"\
SELECT count(line.line_key)
FROM catalogues AS catalogue
JOIN catalogue_lines AS line ON line.catalogue_key = catalogue.catalogue_key
WHERE catalogue.uuid = $1
	AND line.line_id = $2",
	)
	.bind(catalogue_uuid)
	.bind(line_id)
	.fetch_one(&db.pool)
	.await?;

	Ok(count > 0)
}

/// Inserts a line and its child rows under the catalogue identified by uuid.
pub async fn insert_line_tx(
	tx: &mut Transaction<'_, Postgres>,
	catalogue_uuid: Uuid,
	line: &CatalogueLine,
	now: OffsetDateTime,
) -> Result<()> {
	let Some(line_id) = line.extracted_id() else {
		return Err(Error::Malformed("Catalogue line has no id.".to_string()));
	};
	let line_key: Option<i64> = sqlx::query_scalar(
		"\
INSERT INTO catalogue_lines (
	catalogue_key,
	line_id,
	manufacturer_item_id,
	manufacturer_party_id,
	item_name,
	price_amount,
	created_at,
	updated_at
)
SELECT catalogue.catalogue_key, $2, $3, $4, $5, $6, $7, $7
FROM catalogues AS catalogue
WHERE catalogue.uuid = $1
RETURNING line_key",
	)
	.bind(catalogue_uuid)
	.bind(line_id)
	.bind(line.manufacturer_item_id.as_deref())
	.bind(line.manufacturer_party_id.as_str())
	.bind(line.item_name.as_str())
	.bind(line.price_amount)
	.bind(now)
	.fetch_optional(&mut **tx)
	.await?;
	let Some(line_key) = line_key else {
		return Err(Error::NotFound(format!("Catalogue {catalogue_uuid} does not exist.")));
	};

	insert_children_tx(tx, line_key, line).await?;

	Ok(())
}

/// Updates the line targeted by its business id, replacing child rows
/// wholesale.
pub async fn update_line_tx(
	tx: &mut Transaction<'_, Postgres>,
	catalogue_uuid: Uuid,
	line: &CatalogueLine,
	now: OffsetDateTime,
) -> Result<()> {
	let Some(line_id) = line.extracted_id() else {
		return Err(Error::Malformed("Catalogue line has no id.".to_string()));
	};
	let line_key: Option<i64> = sqlx::query_scalar(
		"\
UPDATE catalogue_lines AS line
SET
	manufacturer_item_id = $3,
	manufacturer_party_id = $4,
	item_name = $5,
	price_amount = $6,
	updated_at = $7
FROM catalogues AS catalogue
WHERE catalogue.catalogue_key = line.catalogue_key
	AND catalogue.uuid = $1
	AND line.line_id = $2
RETURNING line.line_key",
	)
	.bind(catalogue_uuid)
	.bind(line_id)
	.bind(line.manufacturer_item_id.as_deref())
	.bind(line.manufacturer_party_id.as_str())
	.bind(line.item_name.as_str())
	.bind(line.price_amount)
	.bind(now)
	.fetch_optional(&mut **tx)
	.await?;
	let Some(line_key) = line_key else {
		return Err(Error::NotFound(format!(
			"Catalogue line {line_id} does not exist in catalogue {catalogue_uuid}."
		)));
	};

	sqlx::query("DELETE FROM line_classifications WHERE line_key = $1")
		.bind(line_key)
		.execute(&mut **tx)
		.await?;
	sqlx::query("DELETE FROM line_texts WHERE line_key = $1")
		.bind(line_key)
		.execute(&mut **tx)
		.await?;

	insert_children_tx(tx, line_key, line).await?;

	Ok(())
}

/// Deletes a line by business id. Returns whether a line was removed; child
/// rows go with it through the cascading foreign keys.
pub async fn delete_line(db: &Db, catalogue_uuid: Uuid, line_id: &str) -> Result<bool> {
	let result = sqlx::query(
		"\
DELETE FROM catalogue_lines AS line
USING catalogues AS catalogue
WHERE catalogue.catalogue_key = line.catalogue_key
	AND catalogue.uuid = $1
	AND line.line_id = $2",
	)
	.bind(catalogue_uuid)
	.bind(line_id)
	.execute(&db.pool)
	.await?;

	Ok(result.rows_affected() > 0)
}

async fn insert_children_tx(
	tx: &mut Transaction<'_, Postgres>,
	line_key: i64,
	line: &CatalogueLine,
) -> Result<()> {
	for classification in &line.classifications {
		sqlx::query(
			"INSERT INTO line_classifications (line_key, class_code, class_name) VALUES ($1, $2, $3)",
		)
		.bind(line_key)
		.bind(classification.code.as_deref())
		.bind(classification.name.as_str())
		.execute(&mut **tx)
		.await?;
	}
	for text in &line.texts {
		sqlx::query(
			"INSERT INTO line_texts (line_key, language_id, field, value) VALUES ($1, $2, $3, $4)",
		)
		.bind(line_key)
		.bind(text.language_id.as_str())
		.bind(text.field.as_str())
		.bind(text.value.as_str())
		.execute(&mut **tx)
		.await?;
	}

	Ok(())
}

fn order_clause(sort: SortOption) -> &'static str {
	match sort {
		SortOption::None => "",
		SortOption::PriceLowToHigh => "\nORDER BY line.price_amount ASC",
		// Descending is the only direction with pinned nulls placement.
		SortOption::PriceHighToLow => "\nORDER BY line.price_amount DESC NULLS LAST",
	}
}

fn assemble_lines(
	rows: Vec<LineRow>,
	classification_rows: Vec<ClassificationRow>,
	text_rows: Vec<TextRow>,
) -> Result<Vec<CatalogueLine>> {
	let mut classifications: HashMap<i64, Vec<Classification>> = HashMap::new();

	for row in classification_rows {
		classifications
			.entry(row.line_key)
			.or_default()
			.push(Classification { code: row.class_code, name: row.class_name });
	}

	let mut texts: HashMap<i64, Vec<LocalizedText>> = HashMap::new();

	for row in text_rows {
		let Some(field) = TextField::parse(&row.field) else {
			return Err(Error::Malformed(format!("Unknown line text field {:?}.", row.field)));
		};

		texts.entry(row.line_key).or_default().push(LocalizedText {
			language_id: row.language_id,
			field,
			value: row.value,
		});
	}

	let lines = rows
		.into_iter()
		.map(|row| CatalogueLine {
			line_id: row.line_id,
			manufacturer_item_id: row.manufacturer_item_id,
			manufacturer_party_id: row.manufacturer_party_id,
			item_name: row.item_name,
			price_amount: row.price_amount,
			classifications: classifications.remove(&row.line_key).unwrap_or_default(),
			texts: texts.remove(&row.line_key).unwrap_or_default(),
		})
		.collect();

	Ok(lines)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn descending_sort_pins_nulls_last() {
		assert_eq!(
			order_clause(SortOption::PriceHighToLow),
			"\nORDER BY line.price_amount DESC NULLS LAST"
		);
	}

	#[test]
	fn ascending_sort_leaves_nulls_placement_to_the_store() {
		assert_eq!(order_clause(SortOption::PriceLowToHigh), "\nORDER BY line.price_amount ASC");
	}

	#[test]
	fn unsorted_fetch_has_no_order_clause() {
		assert_eq!(order_clause(SortOption::None), "");
	}

	#[test]
	fn assembly_preserves_row_order_and_attaches_children() {
		let now = OffsetDateTime::UNIX_EPOCH;
		let rows = vec![
			LineRow {
				line_key: 2,
				line_id: "L2".to_string(),
				manufacturer_item_id: None,
				manufacturer_party_id: "P1".to_string(),
				item_name: "Hammer".to_string(),
				price_amount: Some(5.0),
				created_at: now,
				updated_at: now,
			},
			LineRow {
				line_key: 1,
				line_id: "L1".to_string(),
				manufacturer_item_id: None,
				manufacturer_party_id: "P1".to_string(),
				item_name: "Drill".to_string(),
				price_amount: Some(10.0),
				created_at: now,
				updated_at: now,
			},
		];
		let classification_rows = vec![ClassificationRow {
			line_key: 1,
			class_code: None,
			class_name: "Tools".to_string(),
		}];
		let text_rows = vec![TextRow {
			line_key: 2,
			language_id: "en".to_string(),
			field: "description".to_string(),
			value: "A claw hammer.".to_string(),
		}];
		let lines = assemble_lines(rows, classification_rows, text_rows)
			.expect("Assembly must succeed.");

		assert_eq!(lines.len(), 2);
		assert_eq!(lines[0].line_id, "L2");
		assert_eq!(lines[1].line_id, "L1");
		assert_eq!(lines[1].classifications[0].name, "Tools");
		assert_eq!(lines[0].texts[0].field, TextField::Description);
		assert!(lines[0].classifications.is_empty());
	}

	#[test]
	fn unknown_text_field_is_malformed() {
		let now = OffsetDateTime::UNIX_EPOCH;
		let rows = vec![LineRow {
			line_key: 1,
			line_id: "L1".to_string(),
			manufacturer_item_id: None,
			manufacturer_party_id: "P1".to_string(),
			item_name: "Drill".to_string(),
			price_amount: None,
			created_at: now,
			updated_at: now,
		}];
		let text_rows = vec![TextRow {
			line_key: 1,
			language_id: "en".to_string(),
			field: "subtitle".to_string(),
			value: "x".to_string(),
		}];
		let result = assemble_lines(rows, Vec::new(), text_rows);

		assert!(matches!(result, Err(Error::Malformed(_))));
	}
}
