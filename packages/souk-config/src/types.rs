use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub query: Query,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Query {
	/// Upper bound accepted for a page `limit`; larger requests are rejected up front.
	pub max_page_limit: i64,
	/// Postgres text-search configuration used by the full-text line queries.
	#[serde(default = "default_text_search_config")]
	pub text_search_config: String,
}

fn default_text_search_config() -> String {
	"simple".to_string()
}
