pub mod catalogue;
pub mod filter;
pub mod validator;

pub use catalogue::{Catalogue, CatalogueLine, Classification, LocalizedText, TextField};
pub use filter::{FilterError, LineFilter, PageRequest, SortOption, TextSearch};
pub use validator::validate_line;
