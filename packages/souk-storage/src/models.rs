use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
pub struct CatalogueRow {
	pub catalogue_key: i64,
	pub catalogue_id: String,
	pub uuid: Uuid,
	pub provider_party_id: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct LineRow {
	pub line_key: i64,
	pub line_id: String,
	pub manufacturer_item_id: Option<String>,
	pub manufacturer_party_id: String,
	pub item_name: String,
	pub price_amount: Option<f64>,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Debug, sqlx::FromRow)]
pub struct ClassificationRow {
	pub line_key: i64,
	pub class_code: Option<String>,
	pub class_name: String,
}

#[derive(Debug, sqlx::FromRow)]
pub struct TextRow {
	pub line_key: i64,
	pub language_id: String,
	pub field: String,
	pub value: String,
}
