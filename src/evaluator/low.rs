use super::generator::candidate_hands;
use super::LowHand;
use crate::cards::Card;
use crate::rules::{HoleUseConstraint, RuleDescriptor};

/// Best qualifying low hand for the pool, or `None` when no low exists.
///
/// Low candidates respect the same hole/community usage constraint as high
/// hands: under `Exact(2)` an Omaha low must still use exactly two hole
/// cards. Only the `Any` constraint takes the direct pool scan.
pub fn find_low(hole: &[Card], community: &[Card], rules: &RuleDescriptor) -> Option<LowHand> {
    let low_rules = rules.low_hand?;
    let max_value = low_rules.max_rank.low_value();

    match rules.hole_use {
        HoleUseConstraint::Any => {
            let pool: Vec<Card> = hole.iter().chain(community.iter()).copied().collect();
            scan_pool(&pool, max_value)
        }
        _ => candidate_hands(hole, community, rules.hole_use)
            .into_iter()
            .filter_map(|hand| qualify(&hand, max_value))
            .min(),
    }
}

/// Pick the five lowest distinct qualifying values out of the whole pool.
fn scan_pool(pool: &[Card], max_value: u8) -> Option<LowHand> {
    // One card per qualifying value, lowest values first
    let mut picks: Vec<Card> = Vec::new();
    let mut values: Vec<u8> = Vec::new();
    let mut qualifying: Vec<Card> =
        pool.iter().copied().filter(|c| c.rank().low_value() <= max_value).collect();
    qualifying.sort_by_key(|c| c.rank().low_value());
    for card in qualifying {
        let v = card.rank().low_value();
        if values.last() != Some(&v) {
            values.push(v);
            picks.push(card);
        }
        if values.len() == 5 {
            break;
        }
    }
    if values.len() < 5 {
        return None;
    }
    picks.reverse(); // highest low-value first, matching the comparison order
    values.reverse();
    Some(LowHand {
        cards: picks.try_into().ok()?,
        values: values.try_into().ok()?,
    })
}

/// A five-card candidate qualifies when all five values are distinct and at
/// or below the cutoff (Ace counted as 1).
fn qualify(hand: &[Card; 5], max_value: u8) -> Option<LowHand> {
    let mut pairs: Vec<(u8, Card)> =
        hand.iter().map(|&c| (c.rank().low_value(), c)).collect();
    pairs.sort_by(|a, b| b.0.cmp(&a.0));
    if pairs[0].0 > max_value {
        return None;
    }
    if pairs.windows(2).any(|w| w[0].0 == w[1].0) {
        return None;
    }
    let values: Vec<u8> = pairs.iter().map(|p| p.0).collect();
    let cards: Vec<Card> = pairs.iter().map(|p| p.1).collect();
    Some(LowHand {
        cards: cards.try_into().ok()?,
        values: values.try_into().ok()?,
    })
}
