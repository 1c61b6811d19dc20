//! Latency-Adjusted Bayesian Knowledge Tracing
//!
//! Posterior update of P(known) for one skill after one observed answer.
//!
//! Core theory:
//! - Response latency is first folded into a correctness signal c ∈ {1.0, 0.75, 0.25, 0.0}
//!   - correct and timely answers carry full confidence
//!   - slow correct answers may be careful guesses
//!   - very fast wrong answers may be slips / mis-clicks
//! - The Bayes step only distinguishes c == 1.0 from everything else
//!
//! Mathematical formulas:
//! - Fully correct: P' = P(1-s) / (P(1-s) + (1-P)g)
//! - Otherwise:     P' = Ps / (Ps + (1-P)(1-g))
//!   - s: slip rate, P(wrong | known)
//!   - g: guess rate, P(right | not known)
//!
//! The 0.75 / 0.25 signals are never interpolated into the formula. A slow correct
//! answer therefore takes the incorrect-answer branch, and both incorrect classes
//! land on the same posterior.
//!
//! References:
//! - Corbett, A. T., & Anderson, J. R. (1994). Knowledge tracing.

use serde::{Deserialize, Serialize};

use crate::types::BktParams;

// ==================== Constants ====================

/// Correct answers slower than this (exclusive) are discounted
pub const SLOW_CORRECT_MS: u64 = 6000;

/// Incorrect answers faster than this (exclusive) get partial credit
pub const FAST_INCORRECT_MS: u64 = 1500;

// ==================== Latency Signal ====================

/// Latency-adjusted classification of a single answer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LatencySignal {
    /// Correct within the time budget
    Confident,
    /// Correct but slow, possibly a lucky or laboured guess
    SlowCorrect,
    /// Wrong but very fast, possibly a slip
    FastIncorrect,
    /// Wrong after deliberating
    DeliberateIncorrect,
}

impl LatencySignal {
    pub fn classify(correct: bool, latency_ms: u64) -> Self {
        match (correct, latency_ms) {
            (true, ms) if ms > SLOW_CORRECT_MS => LatencySignal::SlowCorrect,
            (true, _) => LatencySignal::Confident,
            (false, ms) if ms < FAST_INCORRECT_MS => LatencySignal::FastIncorrect,
            (false, _) => LatencySignal::DeliberateIncorrect,
        }
    }

    /// Adjusted correctness value c
    pub fn value(&self) -> f64 {
        match self {
            LatencySignal::Confident => 1.0,
            LatencySignal::SlowCorrect => 0.75,
            LatencySignal::FastIncorrect => 0.25,
            LatencySignal::DeliberateIncorrect => 0.0,
        }
    }

    /// Bayes branch taken for this signal. Only full confidence counts as correct.
    pub fn branch(&self) -> UpdateBranch {
        match self {
            LatencySignal::Confident => UpdateBranch::Correct,
            LatencySignal::SlowCorrect
            | LatencySignal::FastIncorrect
            | LatencySignal::DeliberateIncorrect => UpdateBranch::Incorrect,
        }
    }
}

/// Which observation likelihood the posterior update uses
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateBranch {
    Correct,
    Incorrect,
}

// ==================== Update ====================

/// Latency-adjusted correctness signal in [0, 1]
pub fn adjust_for_latency(correct: bool, latency_ms: u64) -> f64 {
    LatencySignal::classify(correct, latency_ms).value()
}

/// Posterior P(known) after observing one answer.
///
/// Inputs are trusted: `p_known` in [0, 1], `s` and `g` in [0, 1). A zero denominator
/// returns `p_known` unchanged.
pub fn update_posterior(p_known: f64, correct: bool, latency_ms: u64, params: &BktParams) -> f64 {
    let signal = LatencySignal::classify(correct, latency_ms);
    apply_branch(p_known, signal.branch(), params)
}

/// Bayes step for an already chosen branch
pub fn apply_branch(p_known: f64, branch: UpdateBranch, params: &BktParams) -> f64 {
    let (numerator, denominator) = match branch {
        UpdateBranch::Correct => {
            let known = p_known * (1.0 - params.s);
            (known, known + (1.0 - p_known) * params.g)
        }
        UpdateBranch::Incorrect => {
            let known = p_known * params.s;
            (known, known + (1.0 - p_known) * (1.0 - params.g))
        }
    };

    if denominator == 0.0 {
        return p_known;
    }

    numerator / denominator
}
