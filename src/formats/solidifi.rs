use super::{field_list, Format};

pub const NAME: &str = "solidifi";

static FIELDS: &[&str] = &["name", "address", "nodeID", "url", "logo_uri"];

pub fn format() -> Format {
    Format::new(NAME, field_list(FIELDS))
}
