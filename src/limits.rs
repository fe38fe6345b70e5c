use crate::betting::BettingRound;
use crate::player::Player;
use crate::rules::BettingKind;

/// Legal total-bet bounds for the acting player, as computed by the active
/// betting structure. Both are totals (the player's new round bet), not
/// deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BetLimits {
    pub min_total: u64,
    pub max_total: u64,
}

/// Strategy seam for bet sizing, selected once per game from the rule set
/// and injected at table construction.
pub trait BettingLimitCalculator {
    fn limits(&self, round: &BettingRound, pot: u64, player: &Player) -> BetLimits;
}

pub fn calculator_for(kind: BettingKind) -> Box<dyn BettingLimitCalculator> {
    match kind {
        BettingKind::NoLimit => Box::new(NoLimitCalculator),
        BettingKind::PotLimit => Box::new(PotLimitCalculator),
    }
}

/// Shared minimum-raise total: the price plus the minimum raise increment.
fn min_raise_total(round: &BettingRound) -> u64 {
    round.bet_to_call() + round.min_raise_increment()
}

/// Clamp bounds to the player's full stack. A stack too short for the
/// minimum raise collapses both bounds to the all-in total: a short all-in
/// raise is legal but does not reopen the action.
fn clamp_to_stack(min_total: u64, max_total: u64, player: &Player) -> BetLimits {
    let stack_total = player.chips() + player.current_bet();
    if stack_total <= min_total {
        return BetLimits { min_total: stack_total, max_total: stack_total };
    }
    BetLimits { min_total, max_total: max_total.min(stack_total) }
}

/// No-limit: minimum raise as usual, maximum is the full stack.
pub struct NoLimitCalculator;

impl BettingLimitCalculator for NoLimitCalculator {
    fn limits(&self, round: &BettingRound, _pot: u64, player: &Player) -> BetLimits {
        let min_total = min_raise_total(round);
        let stack_total = player.chips() + player.current_bet();
        clamp_to_stack(min_total, stack_total, player)
    }
}

/// Pot-limit: the maximum total is the pot after a hypothetical call, i.e.
/// `bet_to_call + (pot + amount_to_call)`.
pub struct PotLimitCalculator;

impl BettingLimitCalculator for PotLimitCalculator {
    fn limits(&self, round: &BettingRound, pot: u64, player: &Player) -> BetLimits {
        let min_total = min_raise_total(round);
        let to_call = round.bet_to_call().saturating_sub(player.current_bet());
        let max_total = round.bet_to_call() + pot + to_call;
        // A tiny pot never caps the bet below the legal minimum.
        clamp_to_stack(min_total, max_total.max(min_total), player)
    }
}
