pub mod add_line;
pub mod browse;
pub mod delete_line;
pub mod line;
pub mod update_line;

mod error;

pub use add_line::{AddLineRequest, AddLineResponse};
pub use browse::{BrowseRequest, PageResponse};
pub use delete_line::{DeleteLineRequest, DeleteLineResponse};
pub use error::{Error, Result};
pub use line::LineFetchRequest;
pub use update_line::{UpdateLineRequest, UpdateLineResponse};

use souk_config::Config;
use souk_storage::db::Db;

pub struct CatalogueService {
	pub cfg: Config,
	pub db: Db,
}
impl CatalogueService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, db }
	}
}
