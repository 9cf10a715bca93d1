pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Invalid filter: {message}")]
	InvalidFilter { message: String },
	#[error("Invalid catalogue line: {}", messages.join(" "))]
	InvalidLine { messages: Vec<String> },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Conflict: {message}")]
	Conflict { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
}
impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		Self::Storage { message: err.to_string() }
	}
}

impl From<souk_storage::Error> for Error {
	fn from(err: souk_storage::Error) -> Self {
		match err {
			souk_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			souk_storage::Error::NotFound(message) => Self::NotFound { message },
			souk_storage::Error::Conflict(message) => Self::Conflict { message },
			souk_storage::Error::Malformed(message) => Self::Storage { message },
		}
	}
}
