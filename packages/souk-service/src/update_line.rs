use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use souk_domain::{CatalogueLine, validate_line};
use souk_storage::{catalogues, lines};

use crate::{CatalogueService, Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLineRequest {
	pub catalogue_uuid: Uuid,
	pub line: CatalogueLine,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateLineResponse {
	pub line: CatalogueLine,
}

impl CatalogueService {
	/// Replaces an existing line, child rows included. The line to replace is
	/// the one with the request's business id; renaming a line is not
	/// supported through this operation.
	pub async fn update_line(&self, req: UpdateLineRequest) -> Result<UpdateLineResponse> {
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

		let mut tx = self.db.pool.begin().await?;

		lines::update_line_tx(&mut tx, req.catalogue_uuid, &req.line, now).await?;

		tx.commit().await?;

		Ok(UpdateLineResponse { line: req.line })
	}
}
