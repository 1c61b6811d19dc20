//! Adaptive Exercise Selection
//!
//! Picks the next practice item from a catalog given the learner's mastery vector
//! and a short per-skill answer history.
//!
//! Policy:
//! 1. Target the skill with the lowest mastery (ties: first skill in mastery order)
//! 2. Keep exercises of that skill, else fall back to the whole catalog
//! 3. Choose a difficulty tier from mastery, backing off after two misses in a row
//! 4. Keep exercises of that tier, else keep every tier of the skill
//! 5. Take the first remaining exercise in catalog order
//!
//! The result carries a short rationale the client can show to the learner.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Difficulty, Exercise, HistoryMap, MasteryVector, RecentHistory, Skill};

// ==================== Constants ====================

/// Below this mastery the policy starts with easy exercises
pub const LOW_MASTERY: f64 = 0.35;

/// At or above this mastery the policy moves to hard exercises
pub const HIGH_MASTERY: f64 = 0.7;

// ==================== Data Structures ====================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("No exercises available")]
    NoCandidates,
}

/// Which rule of the difficulty policy fired
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyBranch {
    /// Two consecutive misses, difficulty lowered
    Backoff,
    LowMastery,
    MediumMastery,
    HighMastery,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DifficultyDecision {
    pub difficulty: Difficulty,
    pub branch: PolicyBranch,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub exercise: Exercise,
    pub reason: String,
    pub target_skill: Skill,
    pub target_mastery: f64,
    pub difficulty: Difficulty,
    pub branch: PolicyBranch,
}

// ==================== Difficulty Policy ====================

pub fn suggest_difficulty(mastery: f64, recent: &RecentHistory) -> DifficultyDecision {
    if recent.last_two_failed() {
        let difficulty = if mastery > HIGH_MASTERY {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        };
        return DifficultyDecision {
            difficulty,
            branch: PolicyBranch::Backoff,
        };
    }

    if mastery < LOW_MASTERY {
        DifficultyDecision {
            difficulty: Difficulty::Easy,
            branch: PolicyBranch::LowMastery,
        }
    } else if mastery < HIGH_MASTERY {
        DifficultyDecision {
            difficulty: Difficulty::Medium,
            branch: PolicyBranch::MediumMastery,
        }
    } else {
        DifficultyDecision {
            difficulty: Difficulty::Hard,
            branch: PolicyBranch::HighMastery,
        }
    }
}

// ==================== Rationale ====================

/// Mastery as a truncated integer percentage
pub fn mastery_percent(mastery: f64) -> i64 {
    (mastery * 100.0) as i64
}

pub fn generate_reason(skill: &str, mastery: f64, decision: DifficultyDecision) -> String {
    let percent = mastery_percent(mastery);
    let difficulty = decision.difficulty;

    match decision.branch {
        PolicyBranch::Backoff => format!(
            "You've struggled with {skill} recently (last 2 wrong). Trying a {difficulty} exercise to reinforce your understanding."
        ),
        PolicyBranch::LowMastery => format!(
            "Your {skill} mastery is {percent}%. Starting with {difficulty} exercises to build confidence."
        ),
        PolicyBranch::MediumMastery => format!(
            "Your {skill} mastery is {percent}%. Moving to {difficulty} exercises to challenge you appropriately."
        ),
        PolicyBranch::HighMastery => format!(
            "Your {skill} mastery is {percent}%. Time for {difficulty} exercises to push your limits!"
        ),
    }
}

// ==================== Selection ====================

/// Skill with the numerically lowest mastery; first in iteration order on ties
pub fn weakest_skill(mastery: &MasteryVector) -> Option<(&Skill, f64)> {
    mastery
        .iter()
        .map(|(skill, &value)| (skill, value))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

pub fn select_next_exercise(
    exercises: &[Exercise],
    mastery: &MasteryVector,
    recent: &HistoryMap,
) -> Result<SelectionResult, SelectionError> {
    let first = exercises.first().ok_or(SelectionError::NoCandidates)?;

    let targeted = weakest_skill(mastery).and_then(|(skill, value)| {
        let matching: Vec<&Exercise> = exercises.iter().filter(|ex| &ex.skill == skill).collect();
        if matching.is_empty() {
            None
        } else {
            Some((skill.clone(), value, matching))
        }
    });

    let (target_skill, target_mastery, skill_exercises) = match targeted {
        Some(found) => found,
        None => {
            let skill = first.skill.clone();
            let value = mastery.get(&skill).copied().unwrap_or(0.0);
            (skill, value, exercises.iter().collect())
        }
    };

    let empty = RecentHistory::new();
    let history = recent.get(&target_skill).unwrap_or(&empty);
    let decision = suggest_difficulty(target_mastery, history);

    let chosen = skill_exercises
        .iter()
        .find(|ex| ex.difficulty == decision.difficulty)
        .or_else(|| skill_exercises.first())
        .copied()
        .ok_or(SelectionError::NoCandidates)?;

    Ok(SelectionResult {
        exercise: chosen.clone(),
        reason: generate_reason(&target_skill, target_mastery, decision),
        target_skill,
        target_mastery,
        difficulty: decision.difficulty,
        branch: decision.branch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(id: &str, skill: &str, difficulty: Difficulty) -> Exercise {
        Exercise {
            id: id.to_string(),
            skill: skill.to_string(),
            prompt: "test".to_string(),
            choices: vec!["a".to_string()],
            answer_index: 0,
            difficulty,
        }
    }

    fn mastery(entries: &[(&str, f64)]) -> MasteryVector {
        entries.iter().map(|(s, p)| (s.to_string(), *p)).collect()
    }

    fn history(entries: &[(&str, Vec<bool>)]) -> HistoryMap {
        entries
            .iter()
            .map(|(s, h)| (s.to_string(), RecentHistory::from(h.clone())))
            .collect()
    }

    // ==================== Difficulty Policy Tests ====================

    #[test]
    fn test_difficulty_low_mastery() {
        let decision = suggest_difficulty(0.2, &RecentHistory::new());
        assert_eq!(decision.difficulty, Difficulty::Easy);
        assert_eq!(decision.branch, PolicyBranch::LowMastery);
    }

    #[test]
    fn test_difficulty_medium_mastery() {
        let decision = suggest_difficulty(0.5, &RecentHistory::new());
        assert_eq!(decision.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_difficulty_high_mastery() {
        let decision = suggest_difficulty(0.8, &RecentHistory::new());
        assert_eq!(decision.difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_difficulty_thresholds() {
        let none = RecentHistory::new();
        assert_eq!(suggest_difficulty(0.35, &none).difficulty, Difficulty::Medium);
        assert_eq!(suggest_difficulty(0.7, &none).difficulty, Difficulty::Hard);
    }

    #[test]
    fn test_backoff_after_two_failures() {
        let misses = RecentHistory::from(vec![false, false]);

        let high = suggest_difficulty(0.8, &misses);
        assert_eq!(high.difficulty, Difficulty::Medium);
        assert_eq!(high.branch, PolicyBranch::Backoff);

        assert_eq!(suggest_difficulty(0.5, &misses).difficulty, Difficulty::Easy);
        assert_eq!(suggest_difficulty(0.1, &misses).difficulty, Difficulty::Easy);
        // exactly 0.7 is not above the backoff threshold
        assert_eq!(suggest_difficulty(0.7, &misses).difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_single_failure_does_not_back_off() {
        let decision = suggest_difficulty(0.8, &RecentHistory::from(vec![true, false]));
        assert_eq!(decision.difficulty, Difficulty::Hard);
    }

    // ==================== Rationale Tests ====================

    #[test]
    fn test_reason_low_mastery() {
        let decision = suggest_difficulty(0.2, &RecentHistory::new());
        let reason = generate_reason("TestSkill", 0.2, decision);
        assert!(reason.contains("TestSkill"));
        assert!(reason.contains("20%"));
        assert!(reason.contains("easy"));
    }

    #[test]
    fn test_reason_backoff() {
        let decision = suggest_difficulty(0.8, &RecentHistory::from(vec![false, false]));
        let reason = generate_reason("TestSkill", 0.8, decision);
        assert!(reason.to_lowercase().contains("struggled"));
        assert!(reason.contains("TestSkill"));
        assert!(reason.contains("medium"));
    }

    #[test]
    fn test_reason_high_mastery() {
        let decision = suggest_difficulty(0.91, &RecentHistory::new());
        let reason = generate_reason("Plurals", 0.91, decision);
        assert!(reason.contains("Plurals"));
        assert!(reason.contains("91%"));
        assert!(reason.contains("hard"));
    }

    #[test]
    fn test_mastery_percent_truncates() {
        assert_eq!(mastery_percent(0.2), 20);
        assert_eq!(mastery_percent(0.999), 99);
        assert_eq!(mastery_percent(0.0), 0);
        assert_eq!(mastery_percent(1.0), 100);
    }

    // ==================== Selection Tests ====================

    #[test]
    fn test_selects_lowest_mastery_skill() {
        let exercises = vec![
            exercise("1", "A", Difficulty::Easy),
            exercise("2", "B", Difficulty::Easy),
        ];
        let mastery = mastery(&[("A", 0.3), ("B", 0.1)]);
        let recent = history(&[("A", vec![]), ("B", vec![])]);

        let result = select_next_exercise(&exercises, &mastery, &recent).unwrap();
        assert_eq!(result.exercise.skill, "B");
        assert!(result.reason.contains('B'));
    }

    #[test]
    fn test_matches_suggested_difficulty() {
        let exercises = vec![
            exercise("1", "A", Difficulty::Easy),
            exercise("2", "A", Difficulty::Hard),
        ];
        let mastery = mastery(&[("A", 0.2)]);

        let result = select_next_exercise(&exercises, &mastery, &HistoryMap::new()).unwrap();
        assert_eq!(result.exercise.difficulty, Difficulty::Easy);
        assert_eq!(result.exercise.id, "1");
    }

    #[test]
    fn test_backoff_selects_medium_at_high_mastery() {
        let exercises = vec![
            exercise("e", "A", Difficulty::Easy),
            exercise("m", "A", Difficulty::Medium),
            exercise("h", "A", Difficulty::Hard),
        ];
        let recent = history(&[("A", vec![false, false])]);

        let high = select_next_exercise(&exercises, &mastery(&[("A", 0.8)]), &recent).unwrap();
        assert_eq!(high.exercise.difficulty, Difficulty::Medium);
        assert_eq!(high.branch, PolicyBranch::Backoff);
        assert!(high.reason.to_lowercase().contains("struggled"));

        let mid = select_next_exercise(&exercises, &mastery(&[("A", 0.5)]), &recent).unwrap();
        assert_eq!(mid.exercise.difficulty, Difficulty::Easy);
    }

    #[test]
    fn test_empty_catalog_is_error() {
        let result = select_next_exercise(&[], &MasteryVector::new(), &HistoryMap::new());
        assert_eq!(result, Err(SelectionError::NoCandidates));
        assert_eq!(
            SelectionError::NoCandidates.to_string(),
            "No exercises available"
        );
    }

    #[test]
    fn test_tie_breaks_on_first_skill_in_order() {
        let exercises = vec![
            exercise("z1", "Zeta", Difficulty::Easy),
            exercise("a1", "Alpha", Difficulty::Easy),
        ];
        let mastery = mastery(&[("Zeta", 0.2), ("Alpha", 0.2)]);

        let result = select_next_exercise(&exercises, &mastery, &HistoryMap::new()).unwrap();
        assert_eq!(result.target_skill, "Zeta");
        assert_eq!(result.exercise.id, "z1");
    }

    #[test]
    fn test_tie_after_update_goes_to_next_skill_in_order() {
        let exercises = vec![
            exercise("b1", "Basics", Difficulty::Easy),
            exercise("p1", "Plurals", Difficulty::Easy),
            exercise("i1", "IrregularVerbs", Difficulty::Easy),
        ];
        let mut mastery = mastery(&[("Basics", 0.2), ("Plurals", 0.2), ("IrregularVerbs", 0.2)]);
        mastery.insert("Basics".to_string(), 0.5);

        let result = select_next_exercise(&exercises, &mastery, &HistoryMap::new()).unwrap();
        assert_eq!(result.target_skill, "Plurals");
        assert_eq!(result.exercise.id, "p1");
    }

    #[test]
    fn test_candidate_ties_use_catalog_order() {
        let exercises = vec![
            exercise("first", "A", Difficulty::Easy),
            exercise("second", "A", Difficulty::Easy),
        ];
        let result =
            select_next_exercise(&exercises, &mastery(&[("A", 0.1)]), &HistoryMap::new()).unwrap();
        assert_eq!(result.exercise.id, "first");
    }

    #[test]
    fn test_falls_back_when_target_skill_has_no_exercises() {
        let exercises = vec![
            exercise("p1", "Plurals", Difficulty::Medium),
            exercise("p2", "Plurals", Difficulty::Easy),
        ];
        let mastery = mastery(&[("Basics", 0.05), ("Plurals", 0.5)]);

        let result = select_next_exercise(&exercises, &mastery, &HistoryMap::new()).unwrap();
        assert_eq!(result.target_skill, "Plurals");
        assert_eq!(result.target_mastery, 0.5);
        assert_eq!(result.exercise.id, "p1");
    }

    #[test]
    fn test_fallback_defaults_missing_mastery_to_zero() {
        let exercises = vec![
            exercise("x1", "Unseen", Difficulty::Hard),
            exercise("x2", "Unseen", Difficulty::Easy),
        ];

        let result =
            select_next_exercise(&exercises, &MasteryVector::new(), &HistoryMap::new()).unwrap();
        assert_eq!(result.target_skill, "Unseen");
        assert_eq!(result.target_mastery, 0.0);
        assert_eq!(result.exercise.id, "x2");
        assert!(result.reason.contains("0%"));
    }

    #[test]
    fn test_falls_back_to_any_difficulty() {
        let exercises = vec![
            exercise("h1", "A", Difficulty::Hard),
            exercise("m1", "A", Difficulty::Medium),
        ];

        let result =
            select_next_exercise(&exercises, &mastery(&[("A", 0.1)]), &HistoryMap::new()).unwrap();
        assert_eq!(result.difficulty, Difficulty::Easy);
        assert_eq!(result.exercise.id, "h1");
    }

    #[test]
    fn test_selection_is_deterministic() {
        let exercises = vec![
            exercise("1", "A", Difficulty::Easy),
            exercise("2", "B", Difficulty::Medium),
            exercise("3", "B", Difficulty::Easy),
        ];
        let mastery = mastery(&[("A", 0.6), ("B", 0.4)]);
        let recent = history(&[("B", vec![true, false])]);

        let first = select_next_exercise(&exercises, &mastery, &recent).unwrap();
        let second = select_next_exercise(&exercises, &mastery, &recent).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.exercise.id, "2");
    }
}
