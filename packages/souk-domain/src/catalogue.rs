use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named collection of product lines owned by one trading party.
///
/// `catalogue_id` is assigned by the owning party and unique only within it;
/// `uuid` is globally unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalogue {
	pub catalogue_id: String,
	pub uuid: Uuid,
	pub provider_party_id: String,
}

/// One product entry within a catalogue.
///
/// `line_id` is the business key, unique within the catalogue. The price is
/// optional; lines without one still appear in unsorted and ascending-sorted
/// pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogueLine {
	pub line_id: String,
	pub manufacturer_item_id: Option<String>,
	pub manufacturer_party_id: String,
	pub item_name: String,
	pub price_amount: Option<f64>,
	pub classifications: Vec<Classification>,
	pub texts: Vec<LocalizedText>,
}

/// A category/taxonomy tag attached to a line's item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
	pub code: Option<String>,
	pub name: String,
}

/// Free text attached to a line, tagged with the language it is written in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
	pub language_id: String,
	pub field: TextField,
	pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
	Name,
	Description,
}
impl TextField {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Name => "name",
			Self::Description => "description",
		}
	}

	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"name" => Some(Self::Name),
			"description" => Some(Self::Description),
			_ => None,
		}
	}
}

impl CatalogueLine {
	/// The id used to refer to the line in messages: the business id when set,
	/// otherwise the manufacturer item id.
	pub fn extracted_id(&self) -> Option<&str> {
		if !self.line_id.trim().is_empty() {
			return Some(self.line_id.as_str());
		}

		self.manufacturer_item_id.as_deref().filter(|id| !id.trim().is_empty())
	}
}
