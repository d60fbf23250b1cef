use super::{field_list, Format};

pub const NAME: &str = "flareMetrics";

// "company" has no source field of its own; see the override table.
static FIELDS: &[&str] = &["company", "address", "nodeId", "url", "logo"];

pub fn format() -> Format {
    Format::new(NAME, field_list(FIELDS))
}
