//! # birdbrain-algo - 自适应练习选择核心算法库
//!
//! Pure Rust learner-model algorithms for BirdBrain:
//!
//! - **Latency-adjusted BKT** - Bayesian Knowledge Tracing posterior with response-time heuristics
//! - **Adaptive Selector** - lowest-mastery targeting with difficulty backoff and a rationale
//!
//! Both entry points are pure functions over value snapshots. The caller owns the
//! mastery vector and answer history and applies the results.
//!
//! ## 模块结构
//!
//! - [`bkt`] - posterior update and latency adjustment
//! - [`selector`] - next-exercise selection and difficulty policy
//! - [`sanitize`] - input validation for callers
//! - [`types`] - shared types and constants
//!
//! ## 使用示例
//!
//! ```rust
//! use birdbrain_algo::{select_next_exercise, update_posterior, BktParams, Difficulty, Exercise};
//! use birdbrain_algo::{HistoryMap, MasteryVector};
//!
//! let params = BktParams::default();
//! let p = update_posterior(params.l0, true, 2000, &params);
//! assert!(p > params.l0);
//!
//! let exercises = vec![Exercise {
//!     id: "plurals_1".to_string(),
//!     skill: "Plurals".to_string(),
//!     prompt: "What is the plural of 'child'?".to_string(),
//!     choices: vec!["childs".to_string(), "children".to_string()],
//!     answer_index: 1,
//!     difficulty: Difficulty::Easy,
//! }];
//! let mastery: MasteryVector = [("Plurals".to_string(), p)].into_iter().collect();
//! let result = select_next_exercise(&exercises, &mastery, &HistoryMap::new()).unwrap();
//! assert_eq!(result.exercise.id, "plurals_1");
//! ```

// ============================================================================
// 模块声明
// ============================================================================

pub mod bkt;
pub mod sanitize;
pub mod selector;
pub mod types;

// ============================================================================
// 重新导出
// ============================================================================

/// 重新导出所有公共类型
pub use types::*;

/// 重新导出 BKT 后验更新
pub use bkt::{adjust_for_latency, update_posterior, LatencySignal, UpdateBranch};

/// 重新导出自适应选择器
pub use selector::{
    select_next_exercise, suggest_difficulty, DifficultyDecision, PolicyBranch, SelectionError,
    SelectionResult,
};

/// 重新导出输入校验
pub use sanitize::InvalidInput;
