//! splitpot: rules engine for multi-variant poker
//!
//! Covers the three correctness-sensitive cores of a poker game:
//! - hand evaluation with pluggable rank hierarchies and hole-card usage
//!   constraints, including qualifying low hands for hi/lo splits;
//! - the betting-round state machine with pot-limit and no-limit sizing;
//! - pot settlement with multi-way all-in side pots and high/low splits,
//!   under a strict chip-conservation invariant.
//!
//! Rendering, prompting, rule-file loading and AI live in the host
//! application; they drive this crate through [`table::Table`] and the
//! [`engine::TableEngine`] boundary.
//!
//! ## Quick start: evaluate a hand
//! ```
//! use splitpot::cards::parse_cards;
//! use splitpot::evaluator::{HandRank, HandStrengthEvaluator, StandardEvaluator};
//! use splitpot::rules::RuleDescriptor;
//!
//! let rules = RuleDescriptor::texas_holdem(5, 10);
//! let hole = parse_cards("As Ah").unwrap();
//! let board = parse_cards("Kc Qd Jh 3s 2c").unwrap();
//!
//! let eval = StandardEvaluator.evaluate(&hole, &board, &rules).unwrap();
//! assert_eq!(eval.high.rank, HandRank::OnePair);
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod limits;
pub mod player;
pub mod rules;
pub mod settlement;
pub mod table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
