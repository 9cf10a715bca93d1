use serde::{Deserialize, Serialize};
use uuid::Uuid;

use souk_domain::{CatalogueLine, LineFilter, PageRequest, SortOption};
use souk_storage::{catalogues, lines, plan::LineQueryPlan};

use crate::{CatalogueService, Error, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowseRequest {
	pub catalogue_id: String,
	pub party_id: String,
	pub category_name: Option<String>,
	pub search_text: Option<String>,
	pub language_id: Option<String>,
	#[serde(default)]
	pub sort: SortOption,
	pub limit: i64,
	pub offset: i64,
}

/// One page of catalogue lines plus catalogue-wide metadata.
///
/// `total_size` and `category_names` always describe the whole catalogue:
/// they are not reduced by an active category or text filter. The UI uses
/// them as catalogue chrome (facet candidates, inventory size) regardless of
/// what the current page shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse {
	pub total_size: i64,
	pub catalogue_uuid: Option<Uuid>,
	pub category_names: Vec<String>,
	pub lines: Vec<CatalogueLine>,
}
impl PageResponse {
	fn empty() -> Self {
		Self { total_size: 0, catalogue_uuid: None, category_names: Vec::new(), lines: Vec::new() }
	}
}

impl CatalogueService {
	/// Browses the lines of a party-scoped catalogue.
	///
	/// A scope that names no catalogue is not an error: it yields the defined
	/// empty page without touching the store again. Every other read failure
	/// propagates; no partial page is ever returned.
	pub async fn browse_lines(&self, req: BrowseRequest) -> Result<PageResponse> {
		let catalogue_id = req.catalogue_id.trim();
		let party_id = req.party_id.trim();

		if catalogue_id.is_empty() || party_id.is_empty() {
			return Err(Error::InvalidRequest {
				message: "catalogue_id and party_id are required.".to_string(),
			});
		}
		if req.limit < 0 || req.offset < 0 {
			return Err(Error::InvalidRequest {
				message: "limit and offset must be non-negative.".to_string(),
			});
		}
		if req.limit > self.cfg.query.max_page_limit {
			return Err(Error::InvalidRequest {
				message: format!("limit must not exceed {}.", self.cfg.query.max_page_limit),
			});
		}

		let filter = LineFilter::new(req.category_name, req.search_text, req.language_id)
			.map_err(|_| Error::InvalidFilter {
				message: "search_text requires a language_id.".to_string(),
			})?;

		let Some(catalogue_uuid) =
			catalogues::catalogue_uuid_for_party(&self.db, catalogue_id, party_id).await?
		else {
			tracing::info!(catalogue_id, party_id, "Catalogue not found; returning empty page.");

			return Ok(PageResponse::empty());
		};
		let total_size = lines::count_lines_for_party(&self.db, catalogue_id, party_id).await?;
		let category_names = lines::classification_names(&self.db, catalogue_uuid).await?;

		if req.limit == 0 {
			return Ok(PageResponse {
				total_size,
				catalogue_uuid: Some(catalogue_uuid),
				category_names,
				lines: Vec::new(),
			});
		}

		let plan = LineQueryPlan::build(
			catalogue_id,
			party_id,
			&filter,
			&self.cfg.query.text_search_config,
		);
		let page = PageRequest { limit: req.limit, offset: req.offset };
		let line_ids = lines::resolve_line_ids(&self.db, &plan, page).await?;
		let page_lines = if line_ids.is_empty() {
			Vec::new()
		} else {
			lines::fetch_lines_by_ids(&self.db, catalogue_uuid, &line_ids, req.sort).await?
		};

		Ok(PageResponse {
			total_size,
			catalogue_uuid: Some(catalogue_uuid),
			category_names,
			lines: page_lines,
		})
	}
}
