//! Hand evaluation under pluggable rank hierarchies.
//!
//! Categories are not globally ordered: each [`crate::rules::RuleDescriptor`]
//! carries a [`RankOrder`] that fixes the hierarchy and may insert
//! non-standard categories (skip straights) between the standard ones. The
//! evaluator tries one finder per category, strongest first, and the first
//! success wins.

pub(crate) mod analysis;
pub(crate) mod combos;
pub(crate) mod finders;
pub mod generator;
pub(crate) mod low;

use crate::cards::{Card, Rank};
use crate::rules::{HoleUseConstraint, RuleDescriptor};
use analysis::PoolAnalysis;
use core::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// Hand category tag. Deliberately not `Ord`: ordering is defined per rule
/// set by [`RankOrder`], never by enum declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum HandRank {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    SkipStraight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
    SkipStraightFlush,
    RoyalFlush,
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::SkipStraight => "Skip Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::SkipStraightFlush => "Skip Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        };
        f.write_str(s)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankOrderError {
    #[error("category already present in order: {0}")]
    AlreadyPresent(HandRank),
    #[error("anchor category not in order: {0}")]
    UnknownAnchor(HandRank),
}

/// Total order over hand categories for one rule set, weakest first.
/// A category's strength is its position, resolved by lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankOrder {
    order: Vec<HandRank>,
}

impl RankOrder {
    /// The conventional hierarchy, High Card up to Royal Flush.
    pub fn standard() -> Self {
        Self {
            order: vec![
                HandRank::HighCard,
                HandRank::OnePair,
                HandRank::TwoPair,
                HandRank::ThreeOfAKind,
                HandRank::Straight,
                HandRank::Flush,
                HandRank::FullHouse,
                HandRank::FourOfAKind,
                HandRank::StraightFlush,
                HandRank::RoyalFlush,
            ],
        }
    }

    pub fn contains(&self, rank: HandRank) -> bool {
        self.order.contains(&rank)
    }

    pub fn position(&self, rank: HandRank) -> Option<usize> {
        self.order.iter().position(|&r| r == rank)
    }

    /// Ordinal of a category within this order (0 = weakest).
    ///
    /// Panics when the category is not part of the order; use
    /// [`RankOrder::position`] for a fallible lookup.
    pub fn ordinal(&self, rank: HandRank) -> usize {
        match self.position(rank) {
            Some(p) => p,
            None => panic!("category {rank} not in rank order"),
        }
    }

    /// Insert a category directly above an existing one.
    pub fn insert_above(
        &mut self,
        new: HandRank,
        anchor: HandRank,
    ) -> Result<(), RankOrderError> {
        if self.contains(new) {
            return Err(RankOrderError::AlreadyPresent(new));
        }
        let at = self.position(anchor).ok_or(RankOrderError::UnknownAnchor(anchor))?;
        self.order.insert(at + 1, new);
        Ok(())
    }

    /// Insert a category directly below an existing one.
    pub fn insert_below(
        &mut self,
        new: HandRank,
        anchor: HandRank,
    ) -> Result<(), RankOrderError> {
        if self.contains(new) {
            return Err(RankOrderError::AlreadyPresent(new));
        }
        let at = self.position(anchor).ok_or(RankOrderError::UnknownAnchor(anchor))?;
        self.order.insert(at, new);
        Ok(())
    }

    pub fn strongest_first(&self) -> impl Iterator<Item = HandRank> + '_ {
        self.order.iter().rev().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Compact, comparable hand strength. Higher is better within one rule set;
/// values built under different rank orders are not comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HandValue(u64);

impl HandValue {
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Pack an ordinal and up to five rank tiebreakers into a comparable
    /// value. 6 bits per rank; the first tiebreaker is the most significant.
    fn from_parts(ordinal: usize, tie_break: &[Rank]) -> Self {
        const CAT_SHIFT: u32 = 48;
        const RANK_STRIDE: u32 = 6;
        let mut v: u64 = (ordinal as u64) << CAT_SHIFT;
        for (i, r) in tie_break.iter().take(5).enumerate() {
            let offset = CAT_SHIFT - RANK_STRIDE * (i as u32 + 1);
            v |= (r.value() as u64) << offset;
        }
        HandValue(v)
    }
}

/// Best five-card high hand: category, the cards, and the ranked tiebreakers.
/// Ordering is by the packed [`HandValue`], which already encodes the rule
/// set's category ordinal.
#[derive(Debug, Clone)]
pub struct HandResult {
    pub rank: HandRank,
    pub cards: [Card; 5],
    pub tie_break: Vec<Rank>,
    value: HandValue,
}

impl HandResult {
    pub const fn value(&self) -> HandValue {
        self.value
    }

    /// Human-readable description for the display/log sink.
    pub fn describe(&self) -> String {
        let tb = &self.tie_break;
        match self.rank {
            HandRank::HighCard => format!("High Card, {} high", tb[0]),
            HandRank::OnePair => format!("Pair of {}s", tb[0]),
            HandRank::TwoPair => format!("Two Pair, {}s and {}s", tb[0], tb[1]),
            HandRank::ThreeOfAKind => format!("Three of a Kind, {}s", tb[0]),
            HandRank::Straight => format!("Straight to the {}", tb[0]),
            HandRank::SkipStraight => format!("Skip Straight to the {}", tb[0]),
            HandRank::Flush => format!("Flush, {} high", tb[0]),
            HandRank::FullHouse => format!("Full House, {}s over {}s", tb[0], tb[1]),
            HandRank::FourOfAKind => format!("Four of a Kind, {}s", tb[0]),
            HandRank::StraightFlush => format!("Straight Flush to the {}", tb[0]),
            HandRank::SkipStraightFlush => {
                format!("Skip Straight Flush to the {}", tb[0])
            }
            HandRank::RoyalFlush => "Royal Flush".to_string(),
        }
    }
}

impl PartialEq for HandResult {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for HandResult {}

impl PartialOrd for HandResult {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandResult {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

/// Best qualifying low hand. `values` are the ace-low card values sorted
/// descending (highest card first); comparison is lexicographic with the
/// smaller sequence winning, so `min()` selects the best low.
#[derive(Debug, Clone)]
pub struct LowHand {
    pub cards: [Card; 5],
    pub values: [u8; 5],
}

impl LowHand {
    /// e.g. "8-5-4-3-A low"
    pub fn describe(&self) -> String {
        let parts: Vec<String> = self
            .values
            .iter()
            .map(|&v| {
                let ch = if v == 1 {
                    'A'
                } else {
                    Rank::from_value(v).map(Rank::to_char).unwrap_or('?')
                };
                ch.to_string()
            })
            .collect();
        format!("{} low", parts.join("-"))
    }
}

impl PartialEq for LowHand {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for LowHand {}

impl PartialOrd for LowHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LowHand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.values.cmp(&other.values)
    }
}

/// Complete showdown evaluation for one player: the best high hand and, when
/// the rule set plays hi/lo, the best qualifying low (or `None`, a normal
/// non-qualifying outcome).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowdownHand {
    pub high: HandResult,
    pub low: Option<LowHand>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("not enough cards to form a five-card hand")]
    NotEnoughCards,
    #[error("duplicate card in pool: {0}")]
    DuplicateCard(Card),
}

/// Strategy seam for hand strength. Injected at table construction; swapped
/// only by test harnesses.
pub trait HandStrengthEvaluator {
    fn evaluate(
        &self,
        hole: &[Card],
        community: &[Card],
        rules: &RuleDescriptor,
    ) -> Result<ShowdownHand, EvalError>;
}

/// Category-first, short-circuiting evaluator.
///
/// ```
/// use splitpot::cards::parse_cards;
/// use splitpot::evaluator::{HandRank, HandStrengthEvaluator, StandardEvaluator};
/// use splitpot::rules::RuleDescriptor;
///
/// let rules = RuleDescriptor::texas_holdem(5, 10);
/// let hole = parse_cards("As Ah").unwrap();
/// let board = parse_cards("Kc Qd Jh 3s 2c").unwrap();
/// let eval = StandardEvaluator.evaluate(&hole, &board, &rules).unwrap();
/// assert_eq!(eval.high.rank, HandRank::OnePair);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardEvaluator;

impl HandStrengthEvaluator for StandardEvaluator {
    fn evaluate(
        &self,
        hole: &[Card],
        community: &[Card],
        rules: &RuleDescriptor,
    ) -> Result<ShowdownHand, EvalError> {
        let mut seen = HashSet::new();
        for &c in hole.iter().chain(community.iter()) {
            if !seen.insert(c) {
                return Err(EvalError::DuplicateCard(c));
            }
        }

        let high = match rules.hole_use {
            HoleUseConstraint::Any => {
                // The pool can be scanned directly: every combination is legal,
                // so the finders locate the best hand without enumeration.
                let pool: Vec<Card> = hole.iter().chain(community.iter()).copied().collect();
                evaluate_pool(&pool, &rules.rank_order)?
            }
            constraint => {
                let mut best: Option<HandResult> = None;
                for candidate in generator::candidate_hands(hole, community, constraint) {
                    let result = evaluate_pool(&candidate, &rules.rank_order)?;
                    if best.as_ref().map_or(true, |b| result > *b) {
                        best = Some(result);
                    }
                }
                best.ok_or(EvalError::NotEnoughCards)?
            }
        };

        let low = low::find_low(hole, community, rules);
        Ok(ShowdownHand { high, low })
    }
}

/// Best hand in a 5-8 card pool under the given rank order: try each
/// category's finder from strongest to weakest, first success wins.
pub fn evaluate_pool(cards: &[Card], order: &RankOrder) -> Result<HandResult, EvalError> {
    if cards.len() < 5 {
        return Err(EvalError::NotEnoughCards);
    }
    let pool = PoolAnalysis::new(cards);
    for rank in order.strongest_first() {
        if let Some(found) = finders::finder_for(rank).find(&pool) {
            let ordinal = order.position(rank).unwrap_or(0);
            let value = HandValue::from_parts(ordinal, &found.tie_break);
            return Ok(HandResult { rank, cards: found.cards, tie_break: found.tie_break, value });
        }
    }
    unreachable!("high card finder matches any five-card pool")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn holdem() -> RuleDescriptor {
        RuleDescriptor::texas_holdem(5, 10)
    }

    fn eval(hole: &str, board: &str, rules: &RuleDescriptor) -> ShowdownHand {
        StandardEvaluator
            .evaluate(&parse_cards(hole).unwrap(), &parse_cards(board).unwrap(), rules)
            .unwrap()
    }

    #[test]
    fn not_enough_cards_is_a_distinct_error() {
        let err = StandardEvaluator
            .evaluate(
                &parse_cards("As Kd").unwrap(),
                &parse_cards("2c").unwrap(),
                &holdem(),
            )
            .unwrap_err();
        assert_eq!(err, EvalError::NotEnoughCards);
    }

    #[test]
    fn duplicate_cards_rejected() {
        let err = StandardEvaluator
            .evaluate(
                &parse_cards("As Kd").unwrap(),
                &parse_cards("As Qc Jh 3d 2c").unwrap(),
                &holdem(),
            )
            .unwrap_err();
        assert!(matches!(err, EvalError::DuplicateCard(_)));
    }

    #[test]
    fn categories_detected_in_standard_order() {
        let rules = holdem();
        assert_eq!(eval("As Ks", "Qs Js 10s 3d 2c", &rules).high.rank, HandRank::RoyalFlush);
        assert_eq!(eval("9s 8s", "7s 6s 5s 3d 2c", &rules).high.rank, HandRank::StraightFlush);
        assert_eq!(eval("Kc Kd", "Kh Ks 2s 3d 7c", &rules).high.rank, HandRank::FourOfAKind);
        assert_eq!(eval("10c 10d", "10h 2s 2h 3d 7c", &rules).high.rank, HandRank::FullHouse);
        assert_eq!(eval("Ah 9h", "7h 3h 2h Kc Qd", &rules).high.rank, HandRank::Flush);
        assert_eq!(eval("Ac 2d", "3h 4s 5c Kh Qd", &rules).high.rank, HandRank::Straight);
        assert_eq!(eval("Qc Qd", "Qh 9s 2c 3d 7h", &rules).high.rank, HandRank::ThreeOfAKind);
        assert_eq!(eval("Jc Jd", "9c 9h 2s 3d 7h", &rules).high.rank, HandRank::TwoPair);
        assert_eq!(eval("Ah Ad", "10s 9c 2d 3h 7s", &rules).high.rank, HandRank::OnePair);
        assert_eq!(eval("Ah Kd", "7s 5c 2d 9h Jc", &rules).high.rank, HandRank::HighCard);
    }

    #[test]
    fn skip_straight_only_with_inserted_category() {
        let hole = "2c 4d";
        let board = "6h 8s 10c Kh 3d";
        // Standard order has no skip straight category
        let standard = eval(hole, board, &holdem());
        assert_eq!(standard.high.rank, HandRank::HighCard);

        let skip = eval(hole, board, &RuleDescriptor::skip_straight_hi_lo(5, 10));
        assert_eq!(skip.high.rank, HandRank::SkipStraight);
        assert_eq!(skip.high.tie_break, vec![Rank::Ten]);
    }

    #[test]
    fn inserted_category_outranks_its_anchor() {
        let rules = RuleDescriptor::skip_straight_hi_lo(5, 10);
        let skip = eval("2c 4d", "6h 8s 10c Kh 3d", &rules);
        let straight = eval("9c 8d", "7h 6s 5c Kh 2d", &rules);
        assert!(skip.high > straight.high);

        let flush = eval("Ah 9h", "7h 3h 2h Kc Qd", &rules);
        assert!(flush.high > skip.high);
    }

    #[test]
    fn exact_constraint_limits_usable_hole_cards() {
        // Four suited hole cards but Omaha allows only two of them:
        // board supplies just two hearts, so no flush is possible.
        let rules = RuleDescriptor::omaha_hi_lo(25, 50);
        let result = eval("Ah Kh Qh Jh", "10h 9h 2c 3d 7s", &rules);
        assert_ne!(result.high.rank, HandRank::Flush);
    }

    #[test]
    fn evaluation_is_pure_and_repeatable() {
        let rules = RuleDescriptor::omaha_hi_lo(25, 50);
        let hole = parse_cards("Ah Kh 2d 3c").unwrap();
        let board = parse_cards("10h 9h 8c 4d 7s").unwrap();
        let a = StandardEvaluator.evaluate(&hole, &board, &rules).unwrap();
        let b = StandardEvaluator.evaluate(&hole, &board, &rules).unwrap();
        assert_eq!(a.high, b.high);
        assert_eq!(a.high.value().raw(), b.high.value().raw());
        assert_eq!(a.high.cards, b.high.cards);
        assert_eq!(a.low.is_some(), b.low.is_some());
    }

    #[test]
    fn compare_is_antisymmetric() {
        let rules = holdem();
        let a = eval("Ah Ad", "10s 9c 2d 3h 7s", &rules).high;
        let b = eval("Kh Kd", "10s 9c 2d 3h 7s", &rules).high;
        assert_eq!(a.cmp(&b), Ordering::Greater);
        assert_eq!(b.cmp(&a), Ordering::Less);
        assert_eq!(a.cmp(&a), Ordering::Equal);
    }

    #[test]
    fn insertion_errors() {
        let mut order = RankOrder::standard();
        assert_eq!(
            order.insert_above(HandRank::Flush, HandRank::Straight),
            Err(RankOrderError::AlreadyPresent(HandRank::Flush))
        );
        assert_eq!(
            order.insert_above(HandRank::SkipStraight, HandRank::SkipStraightFlush),
            Err(RankOrderError::UnknownAnchor(HandRank::SkipStraightFlush))
        );
        order.insert_below(HandRank::SkipStraight, HandRank::Flush).unwrap();
        assert_eq!(
            order.ordinal(HandRank::SkipStraight) + 1,
            order.ordinal(HandRank::Flush)
        );
    }

    #[test]
    fn describe_strings() {
        let rules = holdem();
        let fh = eval("10c 10d", "10h 2s 2h 3d 7c", &rules).high;
        assert_eq!(fh.describe(), "Full House, Ts over 2s");
        let st = eval("Ac 2d", "3h 4s 5c Kh Qd", &rules).high;
        assert_eq!(st.describe(), "Straight to the 5");
    }
}
