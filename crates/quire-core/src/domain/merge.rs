//! First-write-wins merging of keyed data.

use crate::domain::data::KeyedData;

/// Result of [`merge`]: the merged map and every key that was defined more
/// than once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeOutcome {
    pub merged: KeyedData,
    /// Each repeated key once, in order of its first conflict.
    pub conflicts: Vec<String>,
}

/// Merge containers in the order given. The first container to define a key
/// keeps it; later definitions are dropped and recorded as conflicts.
pub fn merge<'a, I>(containers: I) -> MergeOutcome
where
    I: IntoIterator<Item = &'a KeyedData>,
{
    let mut outcome = MergeOutcome::default();

    for container in containers {
        for (key, value) in container {
            if outcome.merged.contains_key(key) {
                if !outcome.conflicts.contains(key) {
                    outcome.conflicts.push(key.clone());
                }
                continue;
            }
            outcome.merged.insert(key.clone(), value.clone());
        }
    }

    outcome
}
