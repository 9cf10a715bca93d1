use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souk_storage::{catalogues, lines};

use crate::{CatalogueService, Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLineRequest {
	pub catalogue_uuid: Uuid,
	pub line_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLineResponse {
	pub removed: bool,
}

impl CatalogueService {
	/// Removes a line by business id. Deleting a line that does not exist is
	/// a no-op success; only a missing catalogue is an error.
	pub async fn delete_line(&self, req: DeleteLineRequest) -> Result<DeleteLineResponse> {
		if catalogues::catalogue_by_uuid(&self.db, req.catalogue_uuid).await?.is_none() {
			return Err(Error::NotFound {
				message: format!("Catalogue with uuid {} does not exist.", req.catalogue_uuid),
			});
		}

		let removed = lines::delete_line(&self.db, req.catalogue_uuid, req.line_id.trim()).await?;

		Ok(DeleteLineResponse { removed })
	}
}
