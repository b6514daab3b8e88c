use alloy_primitives::{B256, U256};

use super::cache::EpochCache;
use crate::blockchain::BASE_DIFFICULTY;
use crate::error::MinerError;

/// A decoded `eth_submitWork` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub nonce: [u8; 8],
    pub seal_hash: B256,
    pub mix_hash: B256,
}

impl Submission {
    /// Decode the three hex fields. The `0x` prefix is optional and each
    /// field must be exactly the right length.
    pub fn parse(nonce: &str, seal_hash: &str, mix_hash: &str) -> Result<Self, MinerError> {
        Ok(Self {
            nonce: decode_fixed::<8>("nonce", nonce)?,
            seal_hash: B256::from(decode_fixed::<32>("seal hash", seal_hash)?),
            mix_hash: B256::from(decode_fixed::<32>("mix hash", mix_hash)?),
        })
    }
}

fn decode_fixed<const N: usize>(field: &str, value: &str) -> Result<[u8; N], MinerError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    if digits.len() != N * 2 {
        return Err(MinerError::MalformedSubmission(format!(
            "{} must be {} bytes, got {} hex digits",
            field,
            N,
            digits.len()
        )));
    }
    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out)
        .map_err(|e| MinerError::MalformedSubmission(format!("{field}: {e}")))?;
    Ok(out)
}

/// Recompute the mix digest for `(seal_hash, nonce)` and compare it with the
/// miner's claim. The result is not checked against the target.
pub fn verify(cache: &EpochCache, seal_hash: &B256, nonce: &[u8; 8], claimed_mix: &B256) -> bool {
    let (mix, _result) = cache.hashimoto(seal_hash, nonce);
    mix == *claimed_mix
}

/// `2^256 / (BASE_DIFFICULTY * rate_div)`, saturating at `U256::MAX`.
pub fn target_for(rate_div: u64) -> U256 {
    let divisor = U256::from(BASE_DIFFICULTY) * U256::from(rate_div);
    if divisor <= U256::from(1u64) {
        return U256::MAX;
    }
    // 2^256 = MAX + 1, so the quotient gains one when MAX leaves remainder divisor - 1.
    let quotient = U256::MAX / divisor;
    if U256::MAX % divisor == divisor - U256::from(1u64) {
        quotient + U256::from(1u64)
    } else {
        quotient
    }
}
