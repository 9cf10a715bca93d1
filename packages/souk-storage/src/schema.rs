/// The full DDL for the catalogue store. Statements are separated by
/// semicolons; [`crate::db::Db::ensure_schema`] applies them one at a time.
pub fn render_schema() -> &'static str {
	include_str!("../../../sql/init.sql")
}
