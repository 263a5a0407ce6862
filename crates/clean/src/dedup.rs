//! Duplicate sentence-pair elimination.
//!
//! Two policies exist and they are not symmetric: `keep_first` keeps the
//! first row of every duplicate group, while the default drops every member
//! of a group that occurs more than once, leaving no survivor.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

pub const DEDUP_KEY_SEPARATOR: &str = " ||| ";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupPolicy {
    /// Compare keys after Unicode lowercasing.
    pub case_insensitive: bool,
    /// Keep the first occurrence instead of dropping the whole group.
    pub keep_first: bool,
}

pub fn dedup_key(source: &str, target: &str, case_insensitive: bool) -> String {
    let key = format!("{source}{DEDUP_KEY_SEPARATOR}{target}");
    if case_insensitive {
        key.to_lowercase()
    } else {
        key
    }
}

/// One flag per key, `true` for rows that survive under `policy`.
pub fn retain_mask(keys: &[String], policy: DedupPolicy) -> Vec<bool> {
    if policy.keep_first {
        let mut seen: HashSet<&str> = HashSet::with_capacity(keys.len());
        keys.iter().map(|k| seen.insert(k.as_str())).collect()
    } else {
        let mut counts: HashMap<&str, usize> = HashMap::with_capacity(keys.len());
        for k in keys {
            *counts.entry(k.as_str()).or_default() += 1;
        }
        keys.iter().map(|k| counts[k.as_str()] == 1).collect()
    }
}
