use crate::catalogue::{Catalogue, CatalogueLine};

/// Field-presence checks applied to a line before it is written under a
/// catalogue. All checks run; the caller receives every failure, not just the
/// first.
pub fn validate_line(catalogue: &Catalogue, line: &CatalogueLine) -> Vec<String> {
	let mut errors = Vec::new();
	let line_ref = line.extracted_id().unwrap_or("<unset>");

	if line.extracted_id().is_none() {
		errors.push("No id set for catalogue line.".to_string());
	}
	if line.manufacturer_party_id.trim().is_empty() {
		errors.push(format!("No manufacturer party id set for catalogue line: {line_ref}"));
	}
	if let Some(manufacturer_item_id) = line.manufacturer_item_id.as_deref()
		&& !manufacturer_item_id.trim().is_empty()
		&& !line.line_id.trim().is_empty()
		&& line.line_id != manufacturer_item_id
	{
		errors.push(format!(
			"Catalogue line id and manufacturer item id do not match. line id: {line_ref}, manufacturer item id: {manufacturer_item_id}"
		));
	}
	if line.item_name.trim().is_empty() {
		errors.push(format!("No name set for catalogue line. id: {line_ref}"));
	}
	if line.classifications.is_empty() {
		errors.push(format!("No commodity classification is set for catalogue line. id: {line_ref}"));
	}
	if catalogue.provider_party_id != line.manufacturer_party_id {
		errors.push(format!(
			"Catalogue provider party and manufacturer party ids do not match for catalogue line. id: {line_ref}, catalogue provider party id: {}, line manufacturer party id: {}",
			catalogue.provider_party_id, line.manufacturer_party_id
		));
	}

	errors
}
