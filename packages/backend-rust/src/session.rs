//! In-process learner session: mastery vector, answer history and BKT parameters.
//!
//! A single lock guards the whole session so an answer's read-update-write-append
//! sequence is atomic with respect to other requests.

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::Serialize;

use birdbrain_algo::sanitize::clamp_probability;
use birdbrain_algo::{update_posterior, BktParams, HistoryMap, MasteryVector, RecentHistory, Skill};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("skill {0} is not tracked by this session")]
    UnknownSkill(String),
}

/// Outcome of applying one answer to the session
#[derive(Debug, Clone, PartialEq)]
pub struct MasteryChange {
    pub before: f64,
    pub after: f64,
    /// Whole mastery vector as left by this answer
    pub mastery: MasteryVector,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub mastery: MasteryVector,
    pub recent_answers: HistoryMap,
}

#[derive(Debug)]
struct SessionState {
    mastery: MasteryVector,
    history: HistoryMap,
}

#[derive(Debug)]
pub struct SessionStore {
    params: IndexMap<Skill, BktParams>,
    state: RwLock<SessionState>,
}

impl SessionStore {
    /// Every skill gets the same parameters. Skill order is kept and breaks selection ties.
    pub fn new(skills: &[Skill], params: BktParams) -> Self {
        Self::with_params(skills.iter().map(|skill| (skill.clone(), params)).collect())
    }

    pub fn with_params(params: IndexMap<Skill, BktParams>) -> Self {
        let state = initial_state(&params);
        Self {
            params,
            state: RwLock::new(state),
        }
    }

    pub fn current_mastery(&self) -> MasteryVector {
        self.state.read().mastery.clone()
    }

    pub fn recent_history(&self) -> HistoryMap {
        self.state.read().history.clone()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let guard = self.state.read();
        SessionSnapshot {
            mastery: guard.mastery.clone(),
            recent_answers: guard.history.clone(),
        }
    }

    pub fn params_for(&self, skill: &str) -> Result<BktParams, SessionError> {
        self.params
            .get(skill)
            .copied()
            .ok_or_else(|| SessionError::UnknownSkill(skill.to_string()))
    }

    /// Runs the posterior update for `skill`, stores the result and appends the raw
    /// correctness bit to the skill's history.
    pub fn record_answer(
        &self,
        skill: &str,
        correct: bool,
        latency_ms: u64,
    ) -> Result<MasteryChange, SessionError> {
        let params = self.params_for(skill)?;
        let mut guard = self.state.write();

        let before = guard
            .mastery
            .get(skill)
            .copied()
            .ok_or_else(|| SessionError::UnknownSkill(skill.to_string()))?;
        let after = clamp_probability(update_posterior(before, correct, latency_ms, &params), before);

        guard.mastery.insert(skill.to_string(), after);
        guard
            .history
            .entry(skill.to_string())
            .or_default()
            .push(correct);

        Ok(MasteryChange {
            before,
            after,
            mastery: guard.mastery.clone(),
        })
    }

    /// Back to each skill's prior with empty histories
    pub fn reset(&self) {
        let fresh = initial_state(&self.params);
        *self.state.write() = fresh;
    }
}

fn initial_state(params: &IndexMap<Skill, BktParams>) -> SessionState {
    SessionState {
        mastery: params
            .iter()
            .map(|(skill, p)| (skill.clone(), p.l0))
            .collect(),
        history: params
            .keys()
            .map(|skill| (skill.clone(), RecentHistory::new()))
            .collect(),
    }
}
