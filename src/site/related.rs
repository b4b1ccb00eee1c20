// src/site/related.rs
//! Deterministic "related items" selection.

use crate::model::Entry;
use crate::types::PageId;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a.
pub fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Up to `count` candidates other than `current`.
///
/// The candidate list is rotated by an offset derived from the current id,
/// so a page always shows the same neighbours and different pages show
/// different ones.
pub fn related<'a>(current: &PageId, candidates: &'a [Entry], count: usize) -> Vec<&'a Entry> {
    let others: Vec<&Entry> = candidates.iter().filter(|e| &e.id != current).collect();
    if others.is_empty() {
        return others;
    }

    let offset = (fnv1a(current.as_str().as_bytes()) % others.len() as u64) as usize;
    others
        .iter()
        .cycle()
        .skip(offset)
        .take(count.min(others.len()))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(id: &str) -> Entry {
        Entry {
            id: PageId::from_raw(id),
            ..Entry::default()
        }
    }

    #[test]
    fn fnv1a_known_values() {
        assert_eq!(fnv1a(b""), 0xcbf29ce484222325);
        assert_eq!(fnv1a(b"a"), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn excludes_current_and_is_stable() {
        let entries: Vec<Entry> = ["a", "b", "c", "d", "e"].iter().map(|id| entry(id)).collect();
        let current = PageId::from_raw("c");

        let first = related(&current, &entries, 3);
        let second = related(&current, &entries, 3);
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        assert!(first.iter().all(|e| e.id != current));

        let mut ids: Vec<&str> = first.iter().map(|e| e.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn fewer_candidates_than_requested() {
        let entries = vec![entry("a"), entry("b")];
        let picked = related(&PageId::from_raw("a"), &entries, 3);
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0].id.as_str(), "b");
        assert!(related(&PageId::from_raw("a"), &entries[..1], 3).is_empty());
    }
}
