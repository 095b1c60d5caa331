//! Merkle root over transaction hashes
//!
//! The tree is a flat array of `2L - 1` slots where `L` is the leaf count
//! rounded up to a power of two. Missing leaves are empty; a node whose left
//! child is empty is empty, and a lone left child is paired with itself.

use crate::proto::Tx;
use crate::utils::sha256_concat;

pub const HASH_LENGTH: usize = 32;

/// Build the flat tree for `entries`. The last slot holds the root.
pub fn calculate_merkle_tree(entries: &[Vec<u8>]) -> Vec<Option<Vec<u8>>> {
    let n = entries.len();
    if n == 0 {
        return Vec::new();
    }
    let leaves = n.next_power_of_two();
    let mut tree: Vec<Option<Vec<u8>>> = Vec::with_capacity(2 * leaves - 1);
    tree.extend(entries.iter().cloned().map(Some));
    tree.resize(leaves, None);

    for i in leaves..2 * leaves - 1 {
        let left = 2 * (i - leaves);
        let right = left + 1;
        let node = match tree[left].clone() {
            None => None,
            Some(l) => {
                let r = match tree[right].clone() {
                    Some(r) => r,
                    None => {
                        tree[right] = Some(l.clone());
                        l.clone()
                    }
                };
                Some(sha256_concat(&[l.as_slice(), r.as_slice()]))
            }
        };
        tree.push(node);
    }
    tree
}

/// Root hash of `entries`; 32 zero bytes when there are none
pub fn calculate_merkle_root(entries: &[Vec<u8>]) -> Vec<u8> {
    calculate_merkle_tree(entries)
        .pop()
        .flatten()
        .unwrap_or_else(|| vec![0u8; HASH_LENGTH])
}

pub fn txs_merkle_root(txs: &[Tx]) -> Vec<u8> {
    let hashes: Vec<Vec<u8>> = txs.iter().map(|tx| tx.hash.clone()).collect();
    calculate_merkle_root(&hashes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::sha256_digest;

    fn entries(n: u64) -> Vec<Vec<u8>> {
        (0..n).map(|i| sha256_digest(&i.to_le_bytes())).collect()
    }

    #[test]
    fn test_empty_root_is_zero() {
        assert_eq!(calculate_merkle_root(&[]), vec![0u8; 32]);
        assert_eq!(txs_merkle_root(&[]), vec![0u8; 32]);
    }

    #[test]
    fn test_single_entry_is_root() {
        let e = entries(1);
        assert_eq!(calculate_merkle_root(&e), e[0]);
    }

    #[test]
    fn test_two_and_three_entries() {
        let e = entries(2);
        assert_eq!(calculate_merkle_root(&e), sha256_concat(&[e[0].as_slice(), e[1].as_slice()]));

        let e = entries(3);
        let left = sha256_concat(&[e[0].as_slice(), e[1].as_slice()]);
        let right = sha256_concat(&[e[2].as_slice(), e[2].as_slice()]);
        assert_eq!(calculate_merkle_root(&e), sha256_concat(&[left.as_slice(), right.as_slice()]));
    }

    #[test]
    fn test_ten_entries_layout() {
        let tree = calculate_merkle_tree(&entries(10));
        assert_eq!(tree.len(), 31);
        for slot in &tree[10..16] {
            assert!(slot.is_none());
        }
        assert!(tree[20].is_some());
        assert_eq!(tree[20], tree[21]);
        assert_eq!(tree[26], tree[27]);
        assert!(tree[30].is_some());
    }

    #[test]
    fn test_each_leaf_changes_root() {
        let e = entries(5);
        let root = calculate_merkle_root(&e);
        for i in 0..e.len() {
            let mut changed = e.clone();
            changed[i][0] ^= 1;
            assert_ne!(calculate_merkle_root(&changed), root, "leaf {i}");
        }
    }
}
