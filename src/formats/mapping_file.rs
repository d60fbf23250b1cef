//! Dictionary formats loaded from a JSON file of `canonical -> source field` pairs.

use super::{Format, FormatSpec};
use crate::config::OrderedPairs;
use crate::error::ConfigLoadError;
use serde::Deserializer;
use std::path::Path;
use tracing::{debug, info};

pub const NAME: &str = "mapping";

/// Reads and parses the mapping file once. Key order in the file is the output order.
pub fn load(path: &Path) -> Result<Format, ConfigLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let format = parse(&text).map_err(|source| ConfigLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        path = %path.display(),
        fields = format.spec.lookups().len(),
        "loaded mapping file"
    );
    Ok(format)
}

pub fn parse(text: &str) -> Result<Format, serde_json::Error> {
    let mut de = serde_json::Deserializer::from_str(text);
    let pairs = (&mut de).deserialize_map(OrderedPairs::<String>::new(
        "an object mapping canonical field names to source field names",
    ))?;
    de.end()?;
    for (canonical, source) in &pairs {
        debug!(%canonical, %source, "mapping entry");
    }
    Ok(Format::new(NAME, FormatSpec::Mapping(pairs)))
}
