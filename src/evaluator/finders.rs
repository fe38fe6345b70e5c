use super::analysis::PoolAnalysis;
use super::HandRank;
use crate::cards::{Card, Rank};

/// A concrete best hand located by one category finder: the five cards and
/// the ranked tiebreakers used for kicker comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundHand {
    pub cards: [Card; 5],
    pub tie_break: Vec<Rank>,
}

/// Strategy object: each category knows how to locate its best hand in a pool.
/// Finders are attempted strongest-to-weakest per the active rank order, so
/// each may assume no stronger category succeeded.
pub trait CategoryFinder: Sync {
    fn find(&self, pool: &PoolAnalysis) -> Option<FoundHand>;
}

/// Resolve the finder for a category. Every [`HandRank`] has one.
pub fn finder_for(rank: HandRank) -> &'static dyn CategoryFinder {
    match rank {
        HandRank::RoyalFlush => &RoyalFlushFinder,
        HandRank::SkipStraightFlush => &SkipStraightFlushFinder,
        HandRank::StraightFlush => &StraightFlushFinder,
        HandRank::FourOfAKind => &FourOfAKindFinder,
        HandRank::FullHouse => &FullHouseFinder,
        HandRank::Flush => &FlushFinder,
        HandRank::SkipStraight => &SkipStraightFinder,
        HandRank::Straight => &StraightFinder,
        HandRank::ThreeOfAKind => &ThreeOfAKindFinder,
        HandRank::TwoPair => &TwoPairFinder,
        HandRank::OnePair => &OnePairFinder,
        HandRank::HighCard => &HighCardFinder,
    }
}

// ---------------------------------------------------------------------------
// Run detection (straights and skip straights)
// ---------------------------------------------------------------------------

/// Bitmask of rank values present in `cards`. Bit `v` is set for value `v`
/// (2..=14); an Ace additionally sets bit 1 so ace-low runs are found.
fn value_mask(cards: &[Card]) -> u16 {
    let mut mask = 0u16;
    for c in cards {
        mask |= 1 << c.rank().value();
        if c.rank() == Rank::Ace {
            mask |= 1 << 1;
        }
    }
    mask
}

/// Highest top value of a five-value run with the given spacing, scanning
/// descending. `min_top` bounds the weakest permitted run: 5 for straights
/// (the wheel), 9 for skip straights.
fn run_top(mask: u16, step: u8, min_top: u8) -> Option<u8> {
    let mut top = 14u8;
    while top >= min_top {
        if top >= 4 * step + 1 {
            let hit = (0..5u8).all(|i| mask & (1 << (top - i * step)) != 0);
            if hit {
                return Some(top);
            }
        }
        top -= 1;
    }
    None
}

/// Pick one card per run value, run order top first. Value 1 selects an Ace.
fn cards_for_run(cards: &[Card], top: u8, step: u8) -> Option<[Card; 5]> {
    let mut out = Vec::with_capacity(5);
    for i in 0..5u8 {
        let v = top - i * step;
        let want = if v == 1 { Rank::Ace } else { Rank::from_value(v)? };
        let card = cards.iter().copied().find(|c| c.rank() == want)?;
        out.push(card);
    }
    out.try_into().ok()
}

fn run_result(cards: &[Card], step: u8, min_top: u8) -> Option<FoundHand> {
    let top = run_top(value_mask(cards), step, min_top)?;
    let five = cards_for_run(cards, top, step)?;
    let top_rank = Rank::from_value(top)?;
    Some(FoundHand { cards: five, tie_break: vec![top_rank] })
}

// ---------------------------------------------------------------------------
// Finder implementations
// ---------------------------------------------------------------------------

/// Straight flush to the Ace.
pub struct RoyalFlushFinder;

impl CategoryFinder for RoyalFlushFinder {
    fn find(&self, pool: &PoolAnalysis) -> Option<FoundHand> {
        let suit = pool.flush_suit()?;
        let found = run_result(pool.suited(suit), 1, 5)?;
        if found.tie_break.first() == Some(&Rank::Ace) {
            Some(found)
        } else {
            None
        }
    }
}

/// Five cards of one suit with consecutive ranks (wheel included).
pub struct StraightFlushFinder;

impl CategoryFinder for StraightFlushFinder {
    fn find(&self, pool: &PoolAnalysis) -> Option<FoundHand> {
        let suit = pool.flush_suit()?;
        run_result(pool.suited(suit), 1, 5)
    }
}

/// Five cards of one suit with ranks spaced two apart.
pub struct SkipStraightFlushFinder;

impl CategoryFinder for SkipStraightFlushFinder {
    fn find(&self, pool: &PoolAnalysis) -> Option<FoundHand> {
        let suit = pool.flush_suit()?;
        run_result(pool.suited(suit), 2, 9)
    }
}

pub struct FourOfAKindFinder;

impl CategoryFinder for FourOfAKindFinder {
    fn find(&self, pool: &PoolAnalysis) -> Option<FoundHand> {
        let quad = pool.quad_rank()?;
        let mut cards = pool.cards_of_rank(quad, 4);
        let kicker = pool.find_kickers(&[quad], 1).into_iter().next()?;
        cards.push(kicker);
        Some(FoundHand {
            cards: cards.try_into().ok()?,
            tie_break: vec![quad, kicker.rank()],
        })
    }
}

pub struct FullHouseFinder;

impl CategoryFinder for FullHouseFinder {
    fn find(&self, pool: &PoolAnalysis) -> Option<FoundHand> {
        let trips = pool.trip_ranks().into_iter().next()?;
        let pair = pool.pair_ranks().into_iter().find(|&r| r != trips)?;
        let mut cards = pool.cards_of_rank(trips, 3);
        cards.extend(pool.cards_of_rank(pair, 2));
        Some(FoundHand { cards: cards.try_into().ok()?, tie_break: vec![trips, pair] })
    }
}

pub struct FlushFinder;

impl CategoryFinder for FlushFinder {
    fn find(&self, pool: &PoolAnalysis) -> Option<FoundHand> {
        let suit = pool.flush_suit()?;
        let top5: Vec<Card> = pool.suited(suit).iter().copied().take(5).collect();
        let tie_break: Vec<Rank> = top5.iter().map(|c| c.rank()).collect();
        Some(FoundHand { cards: top5.try_into().ok()?, tie_break })
    }
}

/// Five consecutive ranks; the wheel A-2-3-4-5 ranks by the Five.
pub struct StraightFinder;

impl CategoryFinder for StraightFinder {
    fn find(&self, pool: &PoolAnalysis) -> Option<FoundHand> {
        run_result(pool.cards(), 1, 5)
    }
}

/// Five ranks each exactly two apart (e.g. 2-4-6-8-10), ace-low variant
/// included. The top rank must be at least Nine, keeping the category clear
/// of ordinary straights at the low end.
pub struct SkipStraightFinder;

impl CategoryFinder for SkipStraightFinder {
    fn find(&self, pool: &PoolAnalysis) -> Option<FoundHand> {
        run_result(pool.cards(), 2, 9)
    }
}

pub struct ThreeOfAKindFinder;

impl CategoryFinder for ThreeOfAKindFinder {
    fn find(&self, pool: &PoolAnalysis) -> Option<FoundHand> {
        let trips = pool.trip_ranks().into_iter().next()?;
        let mut cards = pool.cards_of_rank(trips, 3);
        let kickers = pool.find_kickers(&[trips], 2);
        if kickers.len() < 2 {
            return None;
        }
        let mut tie_break = vec![trips];
        tie_break.extend(kickers.iter().map(|c| c.rank()));
        cards.extend(kickers);
        Some(FoundHand { cards: cards.try_into().ok()?, tie_break })
    }
}

pub struct TwoPairFinder;

impl CategoryFinder for TwoPairFinder {
    fn find(&self, pool: &PoolAnalysis) -> Option<FoundHand> {
        let pairs = pool.pair_ranks();
        if pairs.len() < 2 {
            return None;
        }
        let (hi, lo) = (pairs[0], pairs[1]);
        let mut cards = pool.cards_of_rank(hi, 2);
        cards.extend(pool.cards_of_rank(lo, 2));
        let kicker = pool.find_kickers(&[hi, lo], 1).into_iter().next()?;
        cards.push(kicker);
        Some(FoundHand {
            cards: cards.try_into().ok()?,
            tie_break: vec![hi, lo, kicker.rank()],
        })
    }
}

pub struct OnePairFinder;

impl CategoryFinder for OnePairFinder {
    fn find(&self, pool: &PoolAnalysis) -> Option<FoundHand> {
        let pair = pool.pair_ranks().into_iter().next()?;
        let mut cards = pool.cards_of_rank(pair, 2);
        let kickers = pool.find_kickers(&[pair], 3);
        if kickers.len() < 3 {
            return None;
        }
        let mut tie_break = vec![pair];
        tie_break.extend(kickers.iter().map(|c| c.rank()));
        cards.extend(kickers);
        Some(FoundHand { cards: cards.try_into().ok()?, tie_break })
    }
}

/// Always matches (given five cards): the five highest cards.
pub struct HighCardFinder;

impl CategoryFinder for HighCardFinder {
    fn find(&self, pool: &PoolAnalysis) -> Option<FoundHand> {
        if pool.len() < 5 {
            return None;
        }
        let top5: Vec<Card> = pool.cards().iter().copied().take(5).collect();
        let tie_break: Vec<Rank> = top5.iter().map(|c| c.rank()).collect();
        Some(FoundHand { cards: top5.try_into().ok()?, tie_break })
    }
}
