use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use souk_domain::{CatalogueLine, validate_line};
use souk_storage::{catalogues, lines};

use crate::{CatalogueService, Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLineRequest {
	pub catalogue_uuid: Uuid,
	pub line: CatalogueLine,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLineResponse {
	pub line: CatalogueLine,
}

impl CatalogueService {
	/// Publishes a new line under an existing catalogue.
	///
	/// The line is validated in full first; the caller receives every failed
	/// check, not just the first. A line whose business id is already taken is
	/// a conflict.
	pub async fn add_line(&self, req: AddLineRequest) -> Result<AddLineResponse> {
		let now = OffsetDateTime::now_utc();
		let catalogue = catalogues::catalogue_by_uuid(&self.db, req.catalogue_uuid)
			.await?
			.ok_or_else(|| Error::NotFound {
				message: format!("Catalogue with uuid {} does not exist.", req.catalogue_uuid),
			})?;
		let messages = validate_line(&catalogue, &req.line);

		if !messages.is_empty() {
			tracing::info!(
				catalogue_uuid = %req.catalogue_uuid,
				failures = messages.len(),
				"Rejecting catalogue line on validation."
			);

			return Err(Error::InvalidLine { messages });
		}

		let Some(line_id) = req.line.extracted_id() else {
			return Err(Error::InvalidLine {
				messages: vec!["No id set for catalogue line.".to_string()],
			});
		};

		if lines::line_exists(&self.db, req.catalogue_uuid, line_id).await? {
			return Err(Error::Conflict {
				message: "There already exists a product with the given id.".to_string(),
			});
		}

		let mut tx = self.db.pool.begin().await?;

		lines::insert_line_tx(&mut tx, req.catalogue_uuid, &req.line, now).await?;

		tx.commit().await?;

		Ok(AddLineResponse { line: req.line })
	}
}
