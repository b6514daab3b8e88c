use std::time::Instant;

use log::{debug, info, warn};

use crate::blockchain::{BlockState, Header, Work};
use crate::config::Config;
use crate::error::MinerError;
use crate::pow::{EthashParams, Submission, verify};
use crate::rate::RateEstimator;

/// Everything a submission or a timer tick mutates, kept together so one
/// lock serializes header, cache and rate window updates.
#[derive(Debug)]
pub struct Engine {
    block: BlockState,
    rate: RateEstimator,
    rate_div: u64,
    started: Instant,
}

impl Engine {
    pub fn new(block: BlockState, rate_div: u64) -> Self {
        Self {
            block,
            rate: RateEstimator::new(rate_div, 0.0),
            rate_div,
            started: Instant::now(),
        }
    }

    /// Engine at the initial header with mainnet cache sizes.
    pub fn start(config: &Config) -> Result<Self, MinerError> {
        let header = Header::initial(unix_now());
        let block = BlockState::new(header, EthashParams::default(), config.rate_div)?;
        Ok(Self::new(block, config.rate_div))
    }

    pub fn work(&self) -> &Work {
        self.block.current_work()
    }

    pub fn header(&self) -> &Header {
        self.block.current_header()
    }

    pub fn block(&self) -> &BlockState {
        &self.block
    }

    pub fn rate(&self) -> &RateEstimator {
        &self.rate
    }

    pub fn rate_div(&self) -> u64 {
        self.rate_div
    }

    fn elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn submit_work(&mut self, submission: &Submission) -> bool {
        let now = self.elapsed();
        self.submit_work_at(submission, now, unix_now())
    }

    /// Verify, record and advance. The header moves on whether or not the
    /// solution was accepted; `now` is monotonic seconds since start.
    pub fn submit_work_at(&mut self, submission: &Submission, now: f64, timestamp: u64) -> bool {
        if submission.seal_hash != self.block.current_work().seal_hash {
            debug!(
                "SUBMIT - seal {} is not the current work {}",
                submission.seal_hash,
                self.block.current_work().seal_hash
            );
        }

        let accepted = verify(
            self.block.cache(),
            &submission.seal_hash,
            &submission.nonce,
            &submission.mix_hash,
        );

        self.rate.record(now);
        if let Some(rate) = self.rate.maybe_report(now) {
            info!(
                "RATE - {:.3} MH/s over {} submissions",
                rate,
                self.rate.len()
            );
        }

        let advanced = match self.block.advance(timestamp) {
            Ok(()) => true,
            Err(e) => {
                warn!("SUBMIT - could not advance block: {e}");
                false
            }
        };

        if accepted {
            info!(
                "ACCEPTED nonce=0x{} seal={} -> block #{}",
                hex::encode(submission.nonce),
                submission.seal_hash,
                self.block.current_header().number
            );
        } else {
            debug!(
                "REJECTED nonce=0x{} seal={} mix={}",
                hex::encode(submission.nonce),
                submission.seal_hash,
                submission.mix_hash
            );
        }

        accepted && advanced
    }

    pub fn tick(&mut self) -> Result<(), MinerError> {
        let now = self.elapsed();
        self.tick_at(now, unix_now())
    }

    /// Timer-driven advance; also gives the rate report a chance to fire
    /// while no submissions arrive.
    pub fn tick_at(&mut self, now: f64, timestamp: u64) -> Result<(), MinerError> {
        self.block.advance(timestamp)?;
        if let Some(rate) = self.rate.maybe_report(now) {
            info!("RATE - {:.3} MH/s", rate);
        }
        debug!("TIMER - block #{}", self.block.current_header().number);
        Ok(())
    }
}

fn unix_now() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}
