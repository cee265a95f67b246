//! Merkle root over per-event hashes, BLAKE2b-256 as the node combiner.

use crate::hash::{compute_hash, HashAlgorithm};

/// Pairs adjacent hashes left-to-right, duplicating the last on an odd
/// count, combining each pair with BLAKE2b-256. Returns `None` for an empty
/// input (an empty ledger has no root).
pub fn merkle_root(leaf_hashes: &[String]) -> Option<String> {
    if leaf_hashes.is_empty() {
        return None;
    }
    let mut level: Vec<String> = leaf_hashes.to_vec();
    while level.len() > 1 {
        let mut next = Vec::with_capacity((level.len() + 1) / 2);
        let mut i = 0;
        while i < level.len() {
            let left = &level[i];
            let right = if i + 1 < level.len() { &level[i + 1] } else { left };
            let mut combined = Vec::with_capacity(left.len() + right.len());
            combined.extend_from_slice(left.as_bytes());
            combined.extend_from_slice(right.as_bytes());
            next.push(compute_hash(&combined, HashAlgorithm::Blake2b256));
            i += 2;
        }
        level = next;
    }
    level.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_root() {
        assert!(merkle_root(&[]).is_none());
    }

    #[test]
    fn single_leaf_is_its_own_root() {
        let h = compute_hash(b"only", HashAlgorithm::Blake2b256);
        assert_eq!(merkle_root(&[h.clone()]), Some(h));
    }

    #[test]
    fn odd_count_duplicates_last() {
        let a = compute_hash(b"a", HashAlgorithm::Blake2b256);
        let b = compute_hash(b"b", HashAlgorithm::Blake2b256);
        let c = compute_hash(b"c", HashAlgorithm::Blake2b256);
        let root_three = merkle_root(&[a.clone(), b.clone(), c.clone()]).unwrap();
        let root_four = merkle_root(&[a, b, c.clone(), c]).unwrap();
        assert_eq!(root_three, root_four);
    }

    #[test]
    fn order_matters() {
        let a = compute_hash(b"a", HashAlgorithm::Blake2b256);
        let b = compute_hash(b"b", HashAlgorithm::Blake2b256);
        assert_ne!(
            merkle_root(&[a.clone(), b.clone()]),
            merkle_root(&[b, a])
        );
    }
}
