use crate::cards::Card;
use crate::evaluator::{HandStrengthEvaluator, ShowdownHand};
use crate::player::Player;
use crate::rules::RuleDescriptor;
use log::{debug, warn};

/// One slice of the pot, bounded by an all-in threshold. Ephemeral: computed
/// fresh for each settlement, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotTier {
    pub amount: u64,
    /// The total-bet threshold this tier covers up to.
    pub threshold: u64,
    /// Showdown players eligible to win this tier.
    pub eligible: Vec<usize>,
}

/// Chip award for one player, with a human-readable description for the
/// display/log sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementResult {
    pub seat: usize,
    pub name: String,
    pub amount: u64,
    pub description: String,
}

/// Partition the pot into tiers over the distinct `total_bet` thresholds.
/// Folded players' chips remain in the tiers they funded even though they
/// can win none of them.
pub fn build_tiers(players: &[Player]) -> Vec<PotTier> {
    let showdown: Vec<usize> = players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.in_hand())
        .map(|(i, _)| i)
        .collect();

    let mut thresholds: Vec<u64> =
        players.iter().map(|p| p.total_bet()).filter(|&t| t > 0).collect();
    thresholds.sort_unstable();
    thresholds.dedup();

    let mut tiers = Vec::new();
    let mut prev = 0u64;
    for t in thresholds {
        let contribution = t - prev;
        let contributors = players.iter().filter(|p| p.total_bet() >= t).count() as u64;
        let amount = contribution * contributors;
        let eligible: Vec<usize> =
            showdown.iter().copied().filter(|&i| players[i].total_bet() >= t).collect();
        prev = t;
        if amount > 0 && !eligible.is_empty() {
            tiers.push(PotTier { amount, threshold: t, eligible });
        }
    }
    tiers
}

/// Distribute the pot at showdown: evaluate every eligible hand once, then
/// award each tier independently, splitting between the best high and best
/// qualifying low where the rule set plays hi/lo.
///
/// Panics when invoked with no eligible showdown players, or when the
/// distributed total does not equal `pot` — both are internal invariant
/// violations (chips must never be created or destroyed).
pub fn settle(
    players: &mut [Player],
    community: &[Card],
    rules: &RuleDescriptor,
    evaluator: &dyn HandStrengthEvaluator,
    dealer: usize,
    pot: u64,
) -> Vec<SettlementResult> {
    let n = players.len();
    let showdown_count = players.iter().filter(|p| p.in_hand()).count();
    assert!(showdown_count > 0, "settlement invoked with no eligible players");

    // Evaluate each showdown hand once; players whose pool cannot form a
    // hand are excluded rather than failing the whole settlement.
    let mut hands: Vec<Option<ShowdownHand>> = vec![None; n];
    for (i, p) in players.iter().enumerate() {
        if !p.in_hand() {
            continue;
        }
        match evaluator.evaluate(p.hole(), community, rules) {
            Ok(hand) => hands[i] = Some(hand),
            Err(e) => warn!("settlement: excluding {} from showdown: {e}", p.name()),
        }
    }

    let tiers = build_tiers(players);
    let mut awards = vec![0u64; n];
    let mut won_high = vec![false; n];
    let mut won_low = vec![false; n];
    let mut scooped = vec![false; n];

    for tier in &tiers {
        let contenders: Vec<usize> =
            tier.eligible.iter().copied().filter(|&i| hands[i].is_some()).collect();
        if contenders.is_empty() {
            warn!("settlement: tier at {} has no evaluable hands", tier.threshold);
            continue;
        }
        if contenders.len() == 1 {
            debug!(
                "settlement: tier at {} has a single eligible winner",
                tier.threshold
            );
        }

        let high_winners = best_high(&contenders, &hands);
        let low_winners = best_low(&contenders, &hands);

        if low_winners.is_empty() {
            // No qualifying low: the whole tier scoops to the high winners.
            share(tier.amount, &high_winners, dealer, n, &mut awards);
            for &i in &high_winners {
                won_high[i] = true;
            }
        } else {
            // Integer split; the odd chip goes to the high half.
            let low_half = tier.amount / 2;
            let high_half = tier.amount - low_half;
            share(high_half, &high_winners, dealer, n, &mut awards);
            share(low_half, &low_winners, dealer, n, &mut awards);
            for &i in &high_winners {
                won_high[i] = true;
                if low_winners.contains(&i) {
                    scooped[i] = true;
                }
            }
            for &i in &low_winners {
                won_low[i] = true;
            }
        }
    }

    let distributed: u64 = awards.iter().sum();
    assert_eq!(
        distributed, pot,
        "settlement must distribute the exact pot: awarded {distributed}, pot {pot}"
    );

    let mut results = Vec::new();
    for i in 0..n {
        if awards[i] == 0 {
            continue;
        }
        players[i].chips += awards[i];
        let description = describe_win(
            hands[i].as_ref(),
            won_high[i],
            won_low[i],
            scooped[i],
        );
        results.push(SettlementResult {
            seat: i,
            name: players[i].name().to_string(),
            amount: awards[i],
            description,
        });
    }
    results
}

/// Award the whole pot to the one remaining contender; no showdown needed.
///
/// Panics unless exactly one non-folded, non-eliminated player remains.
pub fn award_to_last(players: &mut [Player], pot: u64) -> Vec<SettlementResult> {
    let remaining: Vec<usize> = players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.in_hand())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(remaining.len(), 1, "award_to_last requires exactly one contender");
    let seat = remaining[0];
    players[seat].chips += pot;
    vec![SettlementResult {
        seat,
        name: players[seat].name().to_string(),
        amount: pot,
        description: "wins uncontested".to_string(),
    }]
}

fn best_high(contenders: &[usize], hands: &[Option<ShowdownHand>]) -> Vec<usize> {
    let mut winners: Vec<usize> = Vec::new();
    for &i in contenders {
        let hand = match &hands[i] {
            Some(h) => &h.high,
            None => continue,
        };
        match winners.first().and_then(|&w| hands[w].as_ref()) {
            None => winners.push(i),
            Some(best) => {
                if *hand > best.high {
                    winners.clear();
                    winners.push(i);
                } else if *hand == best.high {
                    winners.push(i);
                }
            }
        }
    }
    winners
}

fn best_low(contenders: &[usize], hands: &[Option<ShowdownHand>]) -> Vec<usize> {
    let mut winners: Vec<usize> = Vec::new();
    for &i in contenders {
        let low = match hands[i].as_ref().and_then(|h| h.low.as_ref()) {
            Some(l) => l,
            None => continue,
        };
        let best = winners
            .first()
            .and_then(|&w| hands[w].as_ref())
            .and_then(|h| h.low.as_ref());
        match best {
            None => winners.push(i),
            Some(b) => {
                if low < b {
                    winners.clear();
                    winners.push(i);
                } else if low == b {
                    winners.push(i);
                }
            }
        }
    }
    winners
}

/// Split `amount` equally among `winners`; remainder chips go one each to
/// the earliest winners clockwise from the dealer, so no chip is ever lost.
fn share(amount: u64, winners: &[usize], dealer: usize, n: usize, awards: &mut [u64]) {
    if winners.is_empty() || amount == 0 {
        return;
    }
    let start = (dealer + 1) % n;
    let mut order: Vec<usize> = winners.to_vec();
    order.sort_by_key(|&i| (i + n - start) % n);
    let per = amount / order.len() as u64;
    let rem = (amount % order.len() as u64) as usize;
    for (k, &i) in order.iter().enumerate() {
        awards[i] += per + u64::from(k < rem);
    }
}

fn describe_win(
    hand: Option<&ShowdownHand>,
    won_high: bool,
    won_low: bool,
    scooped: bool,
) -> String {
    let high_desc = hand.map(|h| h.high.describe()).unwrap_or_default();
    let low_desc = hand
        .and_then(|h| h.low.as_ref())
        .map(|l| l.describe())
        .unwrap_or_default();
    if scooped || (won_high && won_low) {
        format!("scoops high and low with {high_desc} and {low_desc}")
    } else if won_low {
        format!("wins low with {low_desc}")
    } else if won_high {
        format!("wins with {high_desc}")
    } else {
        "wins".to_string()
    }
}
