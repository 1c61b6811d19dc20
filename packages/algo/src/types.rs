//! Common Types and Constants
//!
//! Shared data structures used by the update engine and the selector.

use std::collections::VecDeque;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Default prior probability of already knowing a skill
pub const DEFAULT_L0: f64 = 0.2;

/// Default learning transition rate
pub const DEFAULT_T: f64 = 0.15;

/// Default slip rate
pub const DEFAULT_S: f64 = 0.1;

/// Default guess rate
pub const DEFAULT_G: f64 = 0.2;

/// Number of answers kept per skill in the rolling history
pub const HISTORY_WINDOW: usize = 5;

// ==================== Skills & Mastery ====================

/// Opaque skill identifier, compared by exact string equality
pub type Skill = String;

/// Skill -> P(known). Iterates in insertion order, which the selector uses to break ties.
pub type MasteryVector = IndexMap<Skill, f64>;

/// Skill -> rolling answer history
pub type HistoryMap = IndexMap<Skill, RecentHistory>;

// ==================== BKT Parameters ====================

/// Per-skill Bayesian Knowledge Tracing parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BktParams {
    /// Prior probability of knowing the skill before any evidence
    pub l0: f64,
    /// Learning transition rate (not consumed by the posterior update)
    pub t: f64,
    /// Slip rate: P(incorrect | known)
    pub s: f64,
    /// Guess rate: P(correct | not known)
    pub g: f64,
}

impl Default for BktParams {
    fn default() -> Self {
        Self {
            l0: DEFAULT_L0,
            t: DEFAULT_T,
            s: DEFAULT_S,
            g: DEFAULT_G,
        }
    }
}

// ==================== Recent History ====================

/// Most-recent-last window of correctness bits for one skill.
///
/// Holds at most [`HISTORY_WINDOW`] entries; pushing past the cap drops the oldest.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<bool>", into = "Vec<bool>")]
pub struct RecentHistory {
    answers: VecDeque<bool>,
}

impl RecentHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, correct: bool) {
        self.answers.push_back(correct);
        while self.answers.len() > HISTORY_WINDOW {
            self.answers.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// True when the two most recent answers exist and are both wrong
    pub fn last_two_failed(&self) -> bool {
        let mut recent = self.answers.iter().rev();
        matches!((recent.next(), recent.next()), (Some(false), Some(false)))
    }

    pub fn to_vec(&self) -> Vec<bool> {
        self.answers.iter().copied().collect()
    }
}

impl From<Vec<bool>> for RecentHistory {
    fn from(answers: Vec<bool>) -> Self {
        let mut history = Self::new();
        for correct in answers {
            history.push(correct);
        }
        history
    }
}

impl From<RecentHistory> for Vec<bool> {
    fn from(history: RecentHistory) -> Self {
        history.answers.into_iter().collect()
    }
}

// ==================== Exercises ====================

/// Exercise difficulty tier, ordered easy < medium < hard
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable catalog item
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub skill: Skill,
    pub prompt: String,
    pub choices: Vec<String>,
    pub answer_index: usize,
    pub difficulty: Difficulty,
}

/// A single submitted answer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerEvent {
    pub exercise_id: String,
    pub correct: bool,
    pub latency_ms: u64,
}
