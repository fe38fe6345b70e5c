use super::combos::Combinations;
use crate::cards::Card;
use crate::rules::HoleUseConstraint;

/// All legal 5-card candidate hands for a hole/community split under the
/// rule set's usage constraint. Returns an empty list when the available
/// cards cannot form any legal hand; callers treat "no hand" as a distinct
/// outcome, not an error.
pub fn candidate_hands(
    hole: &[Card],
    community: &[Card],
    constraint: HoleUseConstraint,
) -> Vec<[Card; 5]> {
    match constraint {
        HoleUseConstraint::Any => {
            let pool: Vec<Card> = hole.iter().chain(community.iter()).copied().collect();
            if pool.len() < 5 {
                return Vec::new();
            }
            Combinations::new(pool.len(), 5)
                .filter_map(|idx| pick(&pool, &idx))
                .collect()
        }
        HoleUseConstraint::Exact(k) => exact_split(hole, community, k),
        HoleUseConstraint::AtMost(k) => {
            let mut out = Vec::new();
            for j in 0..=k.min(5) {
                out.extend(exact_split(hole, community, j));
            }
            out
        }
    }
}

/// Cross-product of `k` hole cards with `5 - k` community cards.
fn exact_split(hole: &[Card], community: &[Card], k: usize) -> Vec<[Card; 5]> {
    if k > 5 || hole.len() < k || community.len() < 5 - k {
        return Vec::new();
    }
    let mut out = Vec::new();
    for hole_idx in Combinations::new(hole.len(), k) {
        for community_idx in Combinations::new(community.len(), 5 - k) {
            let mut cards: Vec<Card> = hole_idx.iter().map(|&i| hole[i]).collect();
            cards.extend(community_idx.iter().map(|&i| community[i]));
            if let Ok(hand) = <[Card; 5]>::try_from(cards) {
                out.push(hand);
            }
        }
    }
    out
}

fn pick(pool: &[Card], idx: &[usize]) -> Option<[Card; 5]> {
    let cards: Vec<Card> = idx.iter().map(|&i| pool[i]).collect();
    cards.try_into().ok()
}
