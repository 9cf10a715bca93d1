use uuid::Uuid;

use souk_domain::Catalogue;

use crate::{Result, db::Db, models::CatalogueRow};

/// Resolves the globally unique catalogue uuid for a party-scoped business id.
/// Absent means the scope names no catalogue.
pub async fn catalogue_uuid_for_party(
	db: &Db,
	catalogue_id: &str,
	party_id: &str,
) -> Result<Option<Uuid>> {
	let uuid: Option<Uuid> = sqlx::query_scalar(
		"\
SELECT catalogue.uuid
FROM catalogues AS catalogue
WHERE catalogue.catalogue_id = $1
	AND catalogue.provider_party_id = $2",
	)
	.bind(catalogue_id)
	.bind(party_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(uuid)
}

pub async fn catalogue_by_uuid(db: &Db, catalogue_uuid: Uuid) -> Result<Option<Catalogue>> {
	let row: Option<CatalogueRow> =
		sqlx::query_as("SELECT * FROM catalogues WHERE uuid = $1")
			.bind(catalogue_uuid)
			.fetch_optional(&db.pool)
			.await?;

	Ok(row.map(|row| Catalogue {
		catalogue_id: row.catalogue_id,
		uuid: row.uuid,
		provider_party_id: row.provider_party_id,
	}))
}

pub async fn catalogue_exists_for_party(
	db: &Db,
	catalogue_id: &str,
	party_id: &str,
) -> Result<bool> {
	let count: i64 = sqlx::query_scalar(
		"\
SELECT count(catalogue.catalogue_key)
FROM catalogues AS catalogue
WHERE catalogue.catalogue_id = $1
	AND catalogue.provider_party_id = $2",
	)
	.bind(catalogue_id)
	.bind(party_id)
	.fetch_one(&db.pool)
	.await?;

	Ok(count > 0)
}

/// The uuids of every catalogue a party provides.
pub async fn catalogue_uuids_for_party(db: &Db, party_id: &str) -> Result<Vec<Uuid>> {
	let uuids: Vec<Uuid> = sqlx::query_scalar(
		"SELECT catalogue.uuid FROM catalogues AS catalogue WHERE catalogue.provider_party_id = $1",
	)
	.bind(party_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(uuids)
}

pub async fn insert_catalogue(db: &Db, catalogue: &Catalogue) -> Result<()> {
	sqlx::query(
		"INSERT INTO catalogues (catalogue_id, uuid, provider_party_id) VALUES ($1, $2, $3)",
	)
	.bind(catalogue.catalogue_id.as_str())
	.bind(catalogue.uuid)
	.bind(catalogue.provider_party_id.as_str())
	.execute(&db.pool)
	.await?;

	Ok(())
}
