//! Input Validation
//!
//! The update engine trusts its inputs. Callers run these checks first.
//!
//! Functions:
//! - Probability range checks
//! - BKT parameter checks
//! - Probability clamping

use thiserror::Error;

use crate::types::BktParams;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("{name} must be within [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },
    #[error("{name} must be within [0, 1), got {value}")]
    Rate { name: &'static str, value: f64 },
    #[error("latency_ms must be non-negative, got {0}")]
    NegativeLatency(i64),
}

/// 检查数值是否为有效值 (非 NaN / Inf)
pub fn is_finite(value: f64) -> bool {
    !(value.is_nan() || value.is_infinite())
}

pub fn validate_probability(name: &'static str, value: f64) -> Result<f64, InvalidInput> {
    if is_finite(value) && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(InvalidInput::Probability { name, value })
    }
}

fn validate_rate(name: &'static str, value: f64) -> Result<f64, InvalidInput> {
    if is_finite(value) && (0.0..1.0).contains(&value) {
        Ok(value)
    } else {
        Err(InvalidInput::Rate { name, value })
    }
}

/// l0 and t are probabilities; slip and guess must stay below 1
pub fn validate_params(params: &BktParams) -> Result<(), InvalidInput> {
    validate_probability("l0", params.l0)?;
    validate_probability("t", params.t)?;
    validate_rate("s", params.s)?;
    validate_rate("g", params.g)?;
    Ok(())
}

pub fn validate_latency(latency_ms: i64) -> Result<u64, InvalidInput> {
    u64::try_from(latency_ms).map_err(|_| InvalidInput::NegativeLatency(latency_ms))
}

/// 将概率限制在 [0, 1]，无效值置为 fallback
pub fn clamp_probability(value: f64, fallback: f64) -> f64 {
    if is_finite(value) {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}
