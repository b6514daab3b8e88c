//! Ethash size schedule and the fixed seed.
//!
//! Cache construction and the light mix live in the `ethash` crate; this
//! module decides how big things are for an epoch and where the size table
//! ends.

use alloy_primitives::{B256, U256};
use sha3::{Digest, Keccak256};

use crate::error::MinerError;

pub const HASH_BYTES: usize = 64;
pub const MIX_BYTES: usize = 128;

/// Seed used for every cache generation. Never derived from a genesis hash.
pub const ZERO_SEED: [u8; 32] = [0u8; 32];

/// Size schedule for caches and datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EthashParams {
    /// Blocks per epoch
    pub epoch_length: u64,
    pub cache_bytes_init: u64,
    pub cache_bytes_growth: u64,
    pub dataset_bytes_init: u64,
    pub dataset_bytes_growth: u64,
    /// First epoch outside the published size table
    pub max_epoch: u64,
}

impl Default for EthashParams {
    fn default() -> Self {
        Self {
            epoch_length: 30_000,
            cache_bytes_init: 1 << 24,
            cache_bytes_growth: 1 << 17,
            dataset_bytes_init: 1 << 30,
            dataset_bytes_growth: 1 << 23,
            max_epoch: 2048,
        }
    }
}

impl EthashParams {
    /// Scaled-down schedule: kilobyte caches that build instantly.
    #[cfg(test)]
    pub fn tiny() -> Self {
        Self {
            epoch_length: 30_000,
            cache_bytes_init: 1 << 10,
            cache_bytes_growth: 1 << 7,
            dataset_bytes_init: 1 << 14,
            dataset_bytes_growth: 1 << 10,
            max_epoch: 2048,
        }
    }

    /// `floor(number / epoch_length)`; saturates for numbers past `u64` epochs.
    pub fn epoch_of(&self, number: U256) -> u64 {
        let epoch = number / U256::from(self.epoch_length);
        u64::try_from(epoch).unwrap_or(u64::MAX)
    }

    /// Cache bytes for `epoch`: the largest prime count of 64-byte items
    /// below the linear schedule.
    pub fn cache_size(&self, epoch: u64) -> Result<usize, MinerError> {
        self.check_epoch(epoch)?;
        let step = HASH_BYTES as u64;
        let mut size = self.cache_bytes_init + self.cache_bytes_growth * epoch - step;
        while !is_prime(size / step) {
            size -= 2 * step;
        }
        Ok(size as usize)
    }

    pub fn full_size(&self, epoch: u64) -> Result<u64, MinerError> {
        self.check_epoch(epoch)?;
        let step = MIX_BYTES as u64;
        let mut size = self.dataset_bytes_init + self.dataset_bytes_growth * epoch - step;
        while !is_prime(size / step) {
            size -= 2 * step;
        }
        Ok(size)
    }

    fn check_epoch(&self, epoch: u64) -> Result<(), MinerError> {
        if epoch >= self.max_epoch {
            return Err(MinerError::UnsupportedEpoch(epoch));
        }
        Ok(())
    }
}

fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n < 4 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3u64;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

pub fn keccak256(data: &[u8]) -> B256 {
    B256::from_slice(&Keccak256::digest(data))
}

/// Seed hash handed out with every work package.
pub fn seed_hash() -> B256 {
    keccak256(&ZERO_SEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mainnet_sizes_match_published_table() {
        let params = EthashParams::default();
        assert_eq!(params.cache_size(0).unwrap(), 16_776_896);
        assert_eq!(params.full_size(0).unwrap(), 1_073_739_904);
        assert_eq!(params.cache_size(1).unwrap(), 16_907_456);
        assert_eq!(params.full_size(1).unwrap(), 1_082_130_304);
    }

    #[test]
    fn mainnet_sizes_agree_with_ethash_crate() {
        let params = EthashParams::default();
        for epoch in [0u64, 1, 188, 2047] {
            assert_eq!(
                params.cache_size(epoch).unwrap(),
                ethash::get_cache_size(epoch as usize)
            );
            assert_eq!(
                params.full_size(epoch).unwrap() as usize,
                ethash::get_full_size(epoch as usize)
            );
        }
    }

    #[test]
    fn sizes_are_prime_multiples() {
        let params = EthashParams::tiny();
        for epoch in [0, 1, 7, 188] {
            let cache = params.cache_size(epoch).unwrap() as u64;
            let full = params.full_size(epoch).unwrap();
            assert_eq!(cache % HASH_BYTES as u64, 0);
            assert_eq!(full % MIX_BYTES as u64, 0);
            assert!(is_prime(cache / HASH_BYTES as u64));
            assert!(is_prime(full / MIX_BYTES as u64));
        }
    }

    #[test]
    fn epoch_past_table_is_rejected() {
        let params = EthashParams::default();
        assert_eq!(
            params.cache_size(2048),
            Err(MinerError::UnsupportedEpoch(2048))
        );
        assert_eq!(
            params.full_size(5000),
            Err(MinerError::UnsupportedEpoch(5000))
        );
        assert!(params.cache_size(2047).is_ok());
    }

    #[test]
    fn epoch_of_floors() {
        let params = EthashParams::default();
        assert_eq!(params.epoch_of(U256::ZERO), 0);
        assert_eq!(params.epoch_of(U256::from(29_999u64)), 0);
        assert_eq!(params.epoch_of(U256::from(30_000u64)), 1);
        assert_eq!(params.epoch_of(U256::from(0x567f01u64)), 188);
        assert_eq!(params.epoch_of(U256::MAX), u64::MAX);
    }

    #[test]
    fn seed_hash_is_keccak_of_zero_word() {
        assert_eq!(
            hex::encode(seed_hash()),
            "290decd9548b62a8d60345a988386fc84ba6bc95484008f6362f93160ef3e563"
        );
        assert_eq!(ethash::get_seedhash(0).0, ZERO_SEED);
    }
}
