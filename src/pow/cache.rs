use std::time::Instant;

use alloy_primitives::B256;
use ethereum_types::{H64, H256};
use log::{debug, info};

use super::schedule::{EthashParams, ZERO_SEED};
use crate::error::MinerError;

/// Verification cache for a single epoch plus the dataset size it implies.
#[derive(Debug, Clone)]
pub struct EpochCache {
    params: EthashParams,
    epoch: u64,
    cache: Vec<u8>,
    full_size: u64,
}

impl EpochCache {
    /// Build the cache for `epoch`. Deterministic in `(epoch, params)`; the
    /// cost grows linearly with the epoch.
    pub fn generate(epoch: u64, params: EthashParams) -> Result<Self, MinerError> {
        let cache_size = params.cache_size(epoch)?;
        let full_size = params.full_size(epoch)?;

        let started = Instant::now();
        let mut cache = vec![0u8; cache_size];
        ethash::make_cache(&mut cache, H256::from(ZERO_SEED));
        info!(
            "EPOCH - generated cache for epoch {} ({} bytes, full size {}) in {:?}",
            epoch,
            cache.len(),
            full_size,
            started.elapsed()
        );

        Ok(Self {
            params,
            epoch,
            cache,
            full_size,
        })
    }

    /// Replace cache and full size with those of `epoch`. On error the
    /// current cache is kept.
    pub fn regenerate(&mut self, epoch: u64) -> Result<(), MinerError> {
        debug!("EPOCH - regenerating {} -> {}", self.epoch, epoch);
        *self = Self::generate(epoch, self.params)?;
        Ok(())
    }

    /// `(mix digest, result)` for a seal hash and a big-endian nonce.
    pub fn hashimoto(&self, seal_hash: &B256, nonce: &[u8; 8]) -> (B256, B256) {
        let (mix, result) = ethash::hashimoto_light(
            H256::from(seal_hash.0),
            H64::from(*nonce),
            self.full_size as usize,
            &self.cache,
        );
        (B256::from(mix.0), B256::from(result.0))
    }

    pub fn is_valid_for(&self, epoch: u64) -> bool {
        self.epoch == epoch
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn cache(&self) -> &[u8] {
        &self.cache
    }

    pub fn full_size(&self) -> u64 {
        self.full_size
    }

    pub fn params(&self) -> &EthashParams {
        &self.params
    }
}
