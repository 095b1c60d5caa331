//! Block hashing
//!
//! The header is serialized field by field in the node's declared order
//! (`chain_id` .. `pub_key`, `sign`, `coinbase_account`, `consensus`),
//! integers little-endian fixed width and byte fields raw. The block hash
//! covers the fields up to and including `sign`; the signing digest stops
//! before it. `coinbase_account` and `consensus` come after `sign` and are
//! never hashed, whatever their protobuf tags.

use ring::digest::{Context, SHA256};

use crate::core::merkle::txs_merkle_root;
use crate::proto::{Block, BlockHeader};

impl BlockHeader {
    fn write_fields(&self, context: &mut Context, include_sign: bool) {
        context.update(&self.chain_id);
        context.update(&self.prev_block_hash);
        context.update(&self.block_no.to_le_bytes());
        context.update(&self.timestamp.to_le_bytes());
        context.update(&self.blocks_root_hash);
        context.update(&self.txs_root_hash);
        context.update(&self.receipts_root_hash);
        context.update(&self.confirms.to_le_bytes());
        context.update(&self.pub_key);
        if include_sign {
            context.update(&self.sign);
        }
    }

    pub fn calculate_hash(&self) -> Vec<u8> {
        let mut context = Context::new(&SHA256);
        self.write_fields(&mut context, true);
        context.finish().as_ref().to_vec()
    }

    /// Digest signed by the block producer
    pub fn signing_digest(&self) -> Vec<u8> {
        let mut context = Context::new(&SHA256);
        self.write_fields(&mut context, false);
        context.finish().as_ref().to_vec()
    }
}

impl Block {
    pub fn calculate_hash(&self) -> Vec<u8> {
        match &self.header {
            Some(header) => header.calculate_hash(),
            None => BlockHeader::default().calculate_hash(),
        }
    }

    pub fn block_no(&self) -> u64 {
        self.header.as_ref().map_or(0, |h| h.block_no)
    }

    /// Merkle root of the body's transactions
    pub fn calculate_txs_root_hash(&self) -> Vec<u8> {
        let txs = self.body.as_ref().map(|b| b.txs.as_slice()).unwrap_or(&[]);
        txs_merkle_root(txs)
    }

    /// True when the stored hash and transaction root match the contents
    pub fn verify(&self) -> bool {
        let header_ok = self
            .header
            .as_ref()
            .map_or(false, |h| h.txs_root_hash == self.calculate_txs_root_hash());
        header_ok && self.hash == self.calculate_hash()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{BlockBody, Tx};
    use crate::utils::sha256_digest;

    fn header() -> BlockHeader {
        BlockHeader {
            chain_id: vec![1],
            prev_block_hash: vec![2],
            block_no: 3,
            timestamp: 4,
            blocks_root_hash: vec![5],
            txs_root_hash: vec![6],
            receipts_root_hash: vec![7],
            confirms: 8,
            pub_key: vec![9],
            coinbase_account: vec![10],
            sign: vec![11],
            consensus: vec![12],
        }
    }

    #[test]
    fn test_header_serialization_order() {
        let mut stream = vec![1, 2];
        stream.extend_from_slice(&3u64.to_le_bytes());
        stream.extend_from_slice(&4i64.to_le_bytes());
        stream.extend_from_slice(&[5, 6, 7]);
        stream.extend_from_slice(&8u64.to_le_bytes());
        stream.push(9);
        let digest = sha256_digest(&stream);
        stream.push(11);

        let h = header();
        assert_eq!(h.signing_digest(), digest);
        assert_eq!(h.calculate_hash(), sha256_digest(&stream));
    }

    #[test]
    fn test_coinbase_account_not_hashed() {
        let mut h = header();
        let (hash, digest) = (h.calculate_hash(), h.signing_digest());
        h.coinbase_account = vec![0xAB; 33];
        assert_eq!(h.calculate_hash(), hash);
        assert_eq!(h.signing_digest(), digest);

        // the hash ends with sign
        let mut stream = vec![1, 2];
        stream.extend_from_slice(&3u64.to_le_bytes());
        stream.extend_from_slice(&4i64.to_le_bytes());
        stream.extend_from_slice(&[5, 6, 7]);
        stream.extend_from_slice(&8u64.to_le_bytes());
        stream.extend_from_slice(&[9, 11]);
        assert_eq!(h.calculate_hash(), sha256_digest(&stream));
    }

    #[test]
    fn test_consensus_not_hashed() {
        let mut h = header();
        let before = h.calculate_hash();
        h.consensus = vec![99];
        assert_eq!(before, h.calculate_hash());
        h.sign = vec![99];
        assert_ne!(before, h.calculate_hash());
    }

    #[test]
    fn test_block_verify() {
        let tx = Tx {
            hash: vec![7u8; 32],
            body: None,
        };
        let mut h = header();
        h.txs_root_hash = tx.hash.clone();
        let mut block = Block {
            hash: vec![],
            header: Some(h),
            body: Some(BlockBody { txs: vec![tx] }),
        };
        block.hash = block.calculate_hash();
        assert!(block.verify());
        assert_eq!(block.block_no(), 3);

        block.hash[0] ^= 1;
        assert!(!block.verify());
    }
}
