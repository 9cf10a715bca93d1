use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souk_domain::CatalogueLine;
use souk_storage::{catalogues, lines};

use crate::{CatalogueService, Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineFetchRequest {
	pub catalogue_uuid: Uuid,
	pub line_id: String,
}

impl CatalogueService {
	/// Fetches one line by business id. An unknown catalogue is an error; an
	/// unknown line within an existing catalogue is simply absent.
	pub async fn get_line(&self, req: LineFetchRequest) -> Result<Option<CatalogueLine>> {
		if catalogues::catalogue_by_uuid(&self.db, req.catalogue_uuid).await?.is_none() {
			return Err(Error::NotFound {
				message: format!("Catalogue with uuid {} does not exist.", req.catalogue_uuid),
			});
		}

		let line = lines::find_line(&self.db, req.catalogue_uuid, req.line_id.trim()).await?;

		Ok(line)
	}
}
