use alloy_primitives::{B256, U256};
use log::debug;

use super::Header;
use crate::error::MinerError;
use crate::pow::{EpochCache, EthashParams, schedule, target_for};

/// Work package handed to miners: `(seal hash, seed hash, target)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Work {
    pub seal_hash: B256,
    pub seed_hash: B256,
    pub target: U256,
}

/// The synthetic chain tip together with the epoch cache that verifies it.
#[derive(Debug)]
pub struct BlockState {
    header: Header,
    work: Work,
    cache: EpochCache,
}

impl BlockState {
    /// Build the state for `header`, generating the cache of its epoch.
    pub fn new(header: Header, params: EthashParams, rate_div: u64) -> Result<Self, MinerError> {
        let cache = EpochCache::generate(params.epoch_of(header.number), params)?;
        let work = Work {
            seal_hash: header.seal_hash(),
            seed_hash: schedule::seed_hash(),
            target: target_for(rate_div),
        };
        Ok(Self {
            header,
            work,
            cache,
        })
    }

    pub fn current_work(&self) -> &Work {
        &self.work
    }

    pub fn current_header(&self) -> &Header {
        &self.header
    }

    pub fn cache(&self) -> &EpochCache {
        &self.cache
    }

    pub fn epoch(&self) -> u64 {
        self.cache.epoch()
    }

    /// Move to the next block number and stamp it with `timestamp`.
    ///
    /// Crossing an epoch boundary regenerates the cache first; if that fails
    /// nothing is changed, so the header never runs ahead of its cache.
    pub fn advance(&mut self, timestamp: u64) -> Result<(), MinerError> {
        let number = self.header.number + U256::from(1u64);
        let epoch = self.cache.params().epoch_of(number);
        if !self.cache.is_valid_for(epoch) {
            self.cache.regenerate(epoch)?;
        }

        self.header.number = number;
        self.header.timestamp = timestamp;
        self.work.seal_hash = self.header.seal_hash();

        debug!(
            "BLOCK - advanced to #{} (epoch {}, seal {})",
            self.header.number, epoch, self.work.seal_hash
        );
        Ok(())
    }
}
