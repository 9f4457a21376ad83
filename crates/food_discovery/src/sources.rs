use model::source::{AttributedSource, Source};
use utility::id::Id;

use crate::config::SourceExclusions;

/// All sources of a listing plus the one designated as primary.
#[derive(Debug, Clone)]
pub struct SourceAttribution {
    pub sources: Vec<AttributedSource>,
    pub primary: Option<Id<Source>>,
}

/// Picks the primary source out of the association rows. The data promises at
/// most one primary per listing; if it lies, the first one wins.
pub fn resolve_attribution(sources: Vec<AttributedSource>) -> SourceAttribution {
    let mut primaries = sources.iter().filter(|s| s.is_primary);
    let primary = primaries.next().map(|s| s.source_id().clone());
    if let Some(extra) = primaries.next() {
        log::warn!(
            "more than one primary source, keeping {:?} and ignoring {:?}",
            primary,
            extra.source_id()
        );
    }
    SourceAttribution { sources, primary }
}

/// The exclusion rule for the default discovery surface. A listing is only
/// suppressed when every one of its sources is excluded; a listing without
/// sources stays in (fail-open).
pub fn is_discoverable(sources: &[AttributedSource], exclusions: &SourceExclusions) -> bool {
    sources.is_empty()
        || sources
            .iter()
            .any(|s| !exclusions.is_excluded(s.source_id()))
}
