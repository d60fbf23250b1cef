pub mod flare_metrics;
pub mod mapping_file;
pub mod solidifi;

use anyhow::{anyhow, Result};

/// Which canonical fields a format produces and where each one is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSpec {
    /// Canonical names that double as source lookup names. Unresolved keys stay, empty.
    Fields(Vec<String>),
    /// Canonical name -> source field name. Unresolved keys are dropped.
    Mapping(Vec<(String, String)>),
}

impl FormatSpec {
    /// Canonical keys paired with the source name to look up, in declaration order.
    pub fn lookups(&self) -> Vec<(&str, &str)> {
        match self {
            FormatSpec::Fields(keys) => keys.iter().map(|k| (k.as_str(), k.as_str())).collect(),
            FormatSpec::Mapping(pairs) => pairs
                .iter()
                .map(|(canonical, source)| (canonical.as_str(), source.as_str()))
                .collect(),
        }
    }

    pub fn keeps_missing(&self) -> bool {
        matches!(self, FormatSpec::Fields(_))
    }

    pub fn canonical_keys(&self) -> Vec<String> {
        self.lookups().into_iter().map(|(k, _)| k.to_string()).collect()
    }
}

/// A registry format: its field spec plus any hardcoded source overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    pub name: String,
    pub spec: FormatSpec,
}

impl Format {
    pub fn new(name: &str, spec: FormatSpec) -> Self {
        Self {
            name: name.to_string(),
            spec,
        }
    }

    /// Constant source key forced for `canonical` under this format, if any.
    pub fn override_for(&self, canonical: &str) -> Option<&'static str> {
        OVERRIDES
            .iter()
            .find(|(format, _)| *format == self.name)
            .and_then(|(_, rules)| {
                rules
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(canonical))
                    .map(|(_, source)| *source)
            })
    }
}

// format name -> (canonical key -> source key)
static OVERRIDES: &[(&str, &[(&str, &str)])] = &[
    (flare_metrics::NAME, &[("company", "name")]),
    (mapping_file::NAME, &[("company", "name")]),
];

pub fn builtin(name: &str) -> Result<Format> {
    match name {
        solidifi::NAME => Ok(solidifi::format()),
        flare_metrics::NAME => Ok(flare_metrics::format()),
        _ => Err(anyhow!("Unknown format: {}", name)),
    }
}

pub(crate) fn field_list(keys: &[&str]) -> FormatSpec {
    FormatSpec::Fields(keys.iter().map(|k| k.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_resolves_known_names() {
        assert_eq!(builtin("solidifi").unwrap().name, "solidifi");
        assert_eq!(builtin("flareMetrics").unwrap().name, "flareMetrics");
        assert!(builtin("custom").is_err());
    }

    #[test]
    fn overrides_are_scoped_to_their_format() {
        let flare = builtin("flareMetrics").unwrap();
        assert_eq!(flare.override_for("company"), Some("name"));
        assert_eq!(flare.override_for("Company"), Some("name"));
        assert_eq!(flare.override_for("address"), None);
        assert_eq!(builtin("solidifi").unwrap().override_for("company"), None);
    }

    #[test]
    fn mapping_lookups_follow_declaration_order() {
        let spec = FormatSpec::Mapping(vec![
            ("url".into(), "website".into()),
            ("address".into(), "address".into()),
        ]);
        assert_eq!(spec.lookups(), [("url", "website"), ("address", "address")]);
        assert_eq!(spec.canonical_keys(), ["url", "address"]);
        assert!(!spec.keeps_missing());
    }
}
