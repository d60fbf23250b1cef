use crate::config::{OutputRecord, SourceRecord};
use crate::formats::Format;
use crate::normalizer::normalize;
use tracing::{debug, trace};

/// Renames and normalizes `source` into the canonical fields of `format`. Never fails.
pub fn remap(source: &SourceRecord, format: &Format) -> OutputRecord {
    let mut out = OutputRecord::new();

    for (canonical, lookup) in format.spec.lookups() {
        // overrides read their key verbatim; everything else matches ignoring case
        let (lookup, found) = match format.override_for(canonical) {
            Some(forced) => {
                trace!(canonical, forced, "source key overridden");
                (forced, source.get(forced))
            }
            None => (lookup, source.get_ignore_case(lookup)),
        };

        match found {
            Some(value) => out.push(canonical, normalize(Some(value))),
            None if format.spec.keeps_missing() => {
                debug!(canonical, lookup, "no source field, emitting empty");
                out.push(canonical, Vec::new());
            }
            None => debug!(canonical, lookup, "no source field, omitting"),
        }
    }

    out
}

/// Applies `remap` to each record in order.
pub fn remap_all(sources: &[SourceRecord], format: &Format) -> Vec<OutputRecord> {
    sources.iter().map(|s| remap(s, format)).collect()
}
