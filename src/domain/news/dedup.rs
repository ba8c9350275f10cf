//! Content fingerprinting and first-occurrence deduplication

use std::collections::HashSet;

use sha2::{Digest, Sha256};

use super::item::Item;

/// Deterministic fingerprint of a title: hex SHA-256 of the trimmed, case-preserved text
pub fn fingerprint(title: &str) -> String {
    hex::encode(Sha256::digest(title.trim().as_bytes()))
}

/// Drops every item whose fingerprint was already seen, keeping the first occurrence.
///
/// Output order follows input order, so which feed "wins" a duplicate depends only on
/// the order adapters were concatenated in.
pub fn deduplicate(items: Vec<Item>) -> Vec<Item> {
    let mut seen = HashSet::with_capacity(items.len());

    items
        .into_iter()
        .filter(|item| seen.insert(fingerprint(&item.title)))
        .collect()
}
