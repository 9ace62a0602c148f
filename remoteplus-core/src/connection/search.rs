//! Profile list filtering.

use crate::models::Profile;

/// Returns the profiles whose name or host contains `query`, case-insensitively,
/// in their original order. An empty query matches everything.
#[must_use]
pub fn filter_profiles<'a>(profiles: &'a [Profile], query: &str) -> Vec<&'a Profile> {
    let query_lower = query.to_lowercase();

    profiles
        .iter()
        .filter(|profile| {
            profile.name.to_lowercase().contains(&query_lower)
                || profile.host.to_lowercase().contains(&query_lower)
        })
        .collect()
}
