use alloy_primitives::{Address, B64, B256, Bloom, U256, b256};
use alloy_rlp::{BufMut, Encodable, Header as RlpHeader};

use super::{BASE_DIFFICULTY, INITIAL_GAS_LIMIT, INITIAL_NUMBER};
use crate::pow::schedule::keccak256;

/// Parent hash of the first synthetic block.
pub const INITIAL_PARENT_HASH: B256 =
    b256!("384525b16fcfda97e6cb019fc9baff53736079f52340ac4bc3a6cad8e63aa546");

/// Synthetic block header. Only `number` and `timestamp` move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub parent_hash: B256,
    pub uncles_hash: B256,
    pub coinbase: Address,
    pub state_root: B256,
    pub tx_root: B256,
    pub receipt_root: B256,
    pub logs_bloom: Bloom,
    pub difficulty: U256,
    pub number: U256,
    pub gas_limit: u64,
    pub gas_used: u64,
    pub timestamp: u64, // unix seconds
    pub nonce: B64,     // header field, not the mining nonce
    pub mix_hash: B256, // fixed placeholder
}

impl Header {
    /// Header the process starts from.
    pub fn initial(timestamp: u64) -> Self {
        Self {
            parent_hash: INITIAL_PARENT_HASH,
            uncles_hash: B256::ZERO,
            coinbase: Address::ZERO,
            state_root: B256::ZERO,
            tx_root: B256::ZERO,
            receipt_root: B256::ZERO,
            logs_bloom: Bloom::ZERO,
            difficulty: U256::from(BASE_DIFFICULTY),
            number: U256::from(INITIAL_NUMBER),
            gas_limit: INITIAL_GAS_LIMIT,
            gas_used: 0,
            timestamp,
            nonce: B64::ZERO,
            mix_hash: B256::ZERO,
        }
    }

    fn seal_payload_length(&self) -> usize {
        self.parent_hash.length()
            + self.uncles_hash.length()
            + self.coinbase.length()
            + self.state_root.length()
            + self.tx_root.length()
            + self.receipt_root.length()
            + self.logs_bloom.length()
            + self.difficulty.length()
            + self.number.length()
            + self.gas_limit.length()
            + self.gas_used.length()
            + self.timestamp.length()
            + self.nonce.length()
    }

    fn encode_seal_fields(&self, out: &mut dyn BufMut) {
        self.parent_hash.encode(out);
        self.uncles_hash.encode(out);
        self.coinbase.encode(out);
        self.state_root.encode(out);
        self.tx_root.encode(out);
        self.receipt_root.encode(out);
        self.logs_bloom.encode(out);
        self.difficulty.encode(out);
        self.number.encode(out);
        self.gas_limit.encode(out);
        self.gas_used.encode(out);
        self.timestamp.encode(out);
        self.nonce.encode(out);
    }

    /// RLP list of every field except `mix_hash`, in seal order.
    pub fn seal_rlp(&self) -> Vec<u8> {
        let mut out = Vec::new();
        RlpHeader {
            list: true,
            payload_length: self.seal_payload_length(),
        }
        .encode(&mut out);
        self.encode_seal_fields(&mut out);
        out
    }

    /// The hash miners search nonces against.
    pub fn seal_hash(&self) -> B256 {
        keccak256(&self.seal_rlp())
    }

    /// Block hash reported to clients: the seal fields followed by `mix_hash`.
    pub fn hash(&self) -> B256 {
        let mut out = Vec::new();
        RlpHeader {
            list: true,
            payload_length: self.seal_payload_length() + self.mix_hash.length(),
        }
        .encode(&mut out);
        self.encode_seal_fields(&mut out);
        self.mix_hash.encode(&mut out);
        keccak256(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seal_hash_is_deterministic() {
        let h = Header::initial(1_700_000_000);
        assert_eq!(h.seal_hash(), h.clone().seal_hash());
        assert_eq!(h.seal_hash(), keccak256(&h.seal_rlp()));
    }

    #[test]
    fn seal_rlp_is_a_list() {
        let rlp = Header::initial(0).seal_rlp();
        // long-list prefix: the bloom alone is past 55 bytes
        assert!(rlp[0] > 0xf7);
    }

    #[test]
    fn seal_hash_tracks_number_and_timestamp() {
        let h = Header::initial(1_700_000_000);
        let mut next = h.clone();
        next.number += U256::from(1u64);
        assert_ne!(h.seal_hash(), next.seal_hash());

        let mut later = h.clone();
        later.timestamp += 1;
        assert_ne!(h.seal_hash(), later.seal_hash());
    }

    #[test]
    fn seal_hash_ignores_mix_hash() {
        let h = Header::initial(1_700_000_000);
        let mut tampered = h.clone();
        tampered.mix_hash = B256::from([0xaa; 32]);
        assert_eq!(h.seal_hash(), tampered.seal_hash());
        assert_ne!(h.hash(), tampered.hash());
    }

    #[test]
    fn seal_hash_covers_header_nonce() {
        let h = Header::initial(1_700_000_000);
        let mut other = h.clone();
        other.nonce = B64::from([1u8; 8]);
        assert_ne!(h.seal_hash(), other.seal_hash());
    }
}
