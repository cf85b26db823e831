//! Naming-convention resolution of "our" adapter among adapters of one driver.
//!
//! When several adapters would share a connection name, Windows appends
//! `-N` to de-duplicate. Resolution tries the bare base name first, then
//! `base-0` through `base-9` in ascending order. The suffix range is bounded
//! on purpose: more collisions than that resolve to nothing.

use std::collections::BTreeSet;

use super::AdapterRecord;

pub use crate::config::defaults::MAX_ALIAS_SUFFIX;

/// Returns the connection aliases tried for `base`, in priority order.
///
/// The bare name comes first, followed by `base-0` through `base-9`.
pub fn candidate_aliases(base: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(base.to_string())
        .chain((0..=MAX_ALIAS_SUFFIX).map(move |suffix| format!("{base}-{suffix}")))
}

/// Finds the adapter whose connection alias follows the naming convention for `base`.
///
/// Aliases are compared case-insensitively. The first candidate alias (in
/// [`candidate_aliases`] order) that matches any adapter wins, regardless of
/// the adapters' own order in the set.
#[must_use]
pub fn resolve_by_naming_convention<'a>(
    adapters: &'a BTreeSet<AdapterRecord>,
    base: &str,
) -> Option<&'a AdapterRecord> {
    if adapters.is_empty() {
        return None;
    }

    candidate_aliases(base).find_map(|candidate| {
        adapters
            .iter()
            .find(|adapter| alias_matches(adapter.connection_alias(), &candidate))
    })
}

fn alias_matches(alias: &str, candidate: &str) -> bool {
    alias.to_lowercase() == candidate.to_lowercase()
}
