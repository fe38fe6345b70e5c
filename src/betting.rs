use crate::player::{Player, PlayerStatus};
use log::trace;

/// An action submitted by the action-provider collaborator. `Bet`/`Raise`
/// amounts are the player's new total bet for the round, not the delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    Bet { to: u64 },
    Raise { to: u64 },
}

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// True for a bet or raise that moved the price.
    pub was_aggressive: bool,
    /// Chips actually moved into the pot by this action.
    pub posted: u64,
    /// Human-readable event line for the display/log sink.
    pub event: String,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ActionError {
    #[error("not seat {0}'s turn")]
    NotPlayersTurn(usize),
    #[error("no betting round in progress")]
    NoRound,
    #[error("player is not able to act")]
    PlayerCannotAct,
    #[error("check not allowed: {owed} to call")]
    CheckNotAllowed { owed: u64 },
    #[error("betting is not allowed when facing a bet")]
    BetNotAllowed,
    #[error("raising is not allowed without a bet")]
    RaiseNotAllowed,
    #[error("action was not reopened by a full raise")]
    RaiseNotReopened,
    #[error("amount too small: min {min}, got {got}")]
    AmountTooSmall { min: u64, got: u64 },
    #[error("amount too large: max {max}, got {got}")]
    AmountTooLarge { max: u64, got: u64 },
    #[error("target must exceed current bet: current {current}, target {target}")]
    TargetTooLow { current: u64, target: u64 },
}

/// Per-round betting state machine. Reset at the start of every betting
/// round; owns whose turn it is, the price to call, and round-completion
/// bookkeeping. Blind posts count as zero actions taken, which gives the
/// big blind its closing option pre-flop.
#[derive(Debug, Clone)]
pub struct BettingRound {
    bet_to_call: u64,
    last_raise: u64,
    big_blind: u64,
    current_actor: Option<usize>,
    action_closer: usize,
    aggressor: Option<usize>,
    actions_taken: u32,
    acted: Vec<bool>,
}

impl BettingRound {
    /// Pre-flop round: blinds are already posted and stay as current bets.
    /// `opening_price` is the largest blind actually paid (possibly short of
    /// the nominal big blind when a blind seat is all-in).
    pub fn preflop(
        players: &[Player],
        bb_seat: usize,
        opening_price: u64,
        big_blind: u64,
    ) -> Self {
        let current_actor = next_playing(players, bb_seat);
        Self {
            bet_to_call: opening_price,
            last_raise: 0,
            big_blind,
            current_actor,
            action_closer: bb_seat,
            aggressor: None,
            actions_taken: 0,
            acted: vec![false; players.len()],
        }
    }

    /// Post-flop round: clears per-round bets; first actor is the first
    /// playing seat left of the dealer, the closer sits just before them.
    pub fn postflop(players: &mut [Player], dealer: usize, big_blind: u64) -> Self {
        for p in players.iter_mut() {
            p.current_bet = 0;
        }
        let current_actor = next_playing(players, dealer);
        let action_closer = match current_actor {
            Some(first) => prev_non_eliminated(players, first),
            None => dealer,
        };
        Self {
            bet_to_call: 0,
            last_raise: 0,
            big_blind,
            current_actor,
            action_closer,
            aggressor: None,
            actions_taken: 0,
            acted: vec![false; players.len()],
        }
    }

    pub fn bet_to_call(&self) -> u64 {
        self.bet_to_call
    }

    pub fn last_raise(&self) -> u64 {
        self.last_raise
    }

    pub fn big_blind(&self) -> u64 {
        self.big_blind
    }

    /// Seat currently asked to act, if any seat can.
    pub fn current_actor(&self) -> Option<usize> {
        self.current_actor
    }

    /// Seat whose completed turn, absent a raise, ends the round.
    pub fn action_closer(&self) -> usize {
        self.action_closer
    }

    pub fn aggressor(&self) -> Option<usize> {
        self.aggressor
    }

    pub fn actions_taken(&self) -> u32 {
        self.actions_taken
    }

    /// Minimum legal raise increment over the current price: the larger of
    /// the last raise and the bet to call, or the big blind for an opening bet.
    pub fn min_raise_increment(&self) -> u64 {
        if self.bet_to_call == 0 {
            self.last_raise.max(self.big_blind)
        } else {
            self.last_raise.max(self.bet_to_call)
        }
    }

    /// True when no further prompting is possible: fewer than two seats are
    /// still Playing (the rest folded or all-in).
    pub fn is_skippable(&self, players: &[Player]) -> bool {
        count_playing(players) < 2
    }

    /// Round-over predicate, evaluated before each turn. True when (a) fewer
    /// than two non-folded players remain, or (b) every seat able to act has
    /// acted at least once and every Playing seat has matched the price.
    pub fn is_over(&self, players: &[Player]) -> bool {
        let in_hand = players.iter().filter(|p| p.in_hand()).count();
        if in_hand < 2 {
            return true;
        }
        let bets_match = players
            .iter()
            .filter(|p| matches!(p.status(), PlayerStatus::Playing))
            .all(|p| p.current_bet() == self.bet_to_call);
        if count_playing(players) < 2 {
            // Skip shortcut: nobody left to respond once the price is matched.
            return bets_match;
        }
        let all_acted = players
            .iter()
            .enumerate()
            .filter(|(_, p)| matches!(p.status(), PlayerStatus::Playing))
            .all(|(i, _)| self.acted[i]);
        all_acted && bets_match
    }

    /// Apply one pre-validated action for `seat`. Amount-range validation
    /// against the active limit strategy happens at the table boundary; the
    /// round machine still clamps to stack and enforces turn order, check
    /// legality and the reopen rule.
    pub fn apply(
        &mut self,
        players: &mut [Player],
        seat: usize,
        action: PlayerAction,
    ) -> Result<ActionOutcome, ActionError> {
        if self.current_actor != Some(seat) {
            return Err(ActionError::NotPlayersTurn(seat));
        }
        if !matches!(players[seat].status(), PlayerStatus::Playing) {
            return Err(ActionError::PlayerCannotAct);
        }

        let name = players[seat].name().to_string();
        let outcome = match action {
            PlayerAction::Fold => {
                players[seat].status = PlayerStatus::Folded;
                self.note_passive(seat);
                ActionOutcome {
                    was_aggressive: false,
                    posted: 0,
                    event: format!("{name} folds"),
                }
            }
            PlayerAction::Check => {
                let owed = self.bet_to_call.saturating_sub(players[seat].current_bet());
                if owed > 0 {
                    return Err(ActionError::CheckNotAllowed { owed });
                }
                self.note_passive(seat);
                ActionOutcome {
                    was_aggressive: false,
                    posted: 0,
                    event: format!("{name} checks"),
                }
            }
            PlayerAction::Call => {
                let owed = self.bet_to_call.saturating_sub(players[seat].current_bet());
                let posted = players[seat].post(owed);
                self.note_passive(seat);
                let event = if owed == 0 {
                    format!("{name} checks")
                } else if matches!(players[seat].status(), PlayerStatus::AllIn) {
                    format!("{name} calls {posted}, all-in")
                } else {
                    format!("{name} calls {posted}")
                };
                ActionOutcome { was_aggressive: false, posted, event }
            }
            PlayerAction::Bet { to } => {
                if self.bet_to_call > 0 {
                    return Err(ActionError::BetNotAllowed);
                }
                self.post_to_total(players, seat, to, false)?
            }
            PlayerAction::Raise { to } => {
                if self.bet_to_call == 0 {
                    return Err(ActionError::RaiseNotAllowed);
                }
                if self.acted[seat] {
                    return Err(ActionError::RaiseNotReopened);
                }
                self.post_to_total(players, seat, to, true)?
            }
        };

        trace!("betting: {}", outcome.event);
        self.current_actor = next_playing(players, seat);
        Ok(outcome)
    }

    /// Passive action bookkeeping: one more action taken, seat has acted.
    fn note_passive(&mut self, seat: usize) {
        self.acted[seat] = true;
        self.actions_taken += 1;
    }

    /// Raise the seat's total round bet to `to` (clamped to stack). A full
    /// raise reopens the action: the counter resets to 1 with this seat the
    /// sole already-acted seat and it becomes the aggressor. A short all-in
    /// still moves the price but reopens nothing.
    fn post_to_total(
        &mut self,
        players: &mut [Player],
        seat: usize,
        to: u64,
        raising: bool,
    ) -> Result<ActionOutcome, ActionError> {
        let current = players[seat].current_bet();
        if to <= current {
            return Err(ActionError::TargetTooLow { current, target: to });
        }
        let required = self.min_raise_increment();
        let prev_price = self.bet_to_call;
        let posted = players[seat].post(to - current);
        let new_total = players[seat].current_bet();

        let all_in = matches!(players[seat].status(), PlayerStatus::AllIn);
        let mut was_aggressive = false;
        if new_total > prev_price {
            was_aggressive = true;
            let raise_amount = new_total - prev_price;
            self.bet_to_call = new_total;
            let full = !raising || raise_amount >= required;
            if full {
                self.last_raise = raise_amount;
                self.aggressor = Some(seat);
                self.actions_taken = 1;
                self.acted.iter_mut().for_each(|a| *a = false);
                self.acted[seat] = true;
            } else {
                self.note_passive(seat);
            }
        } else {
            // Stack could not even cover the call; treat as a passive under-call.
            self.note_passive(seat);
        }

        let name = players[seat].name();
        let verb = if raising { format!("raises to {new_total}") } else { format!("bets {new_total}") };
        let event = if all_in {
            format!("{name} {verb}, all-in")
        } else {
            format!("{name} {verb}")
        };
        Ok(ActionOutcome { was_aggressive, posted, event })
    }
}

fn count_playing(players: &[Player]) -> usize {
    players.iter().filter(|p| matches!(p.status(), PlayerStatus::Playing)).count()
}

/// Next seat with status Playing after `from`, cycling; eliminated, folded
/// and all-in seats are skipped for prompting.
fn next_playing(players: &[Player], from: usize) -> Option<usize> {
    let n = players.len();
    if n == 0 {
        return None;
    }
    (1..=n)
        .map(|step| (from + step) % n)
        .find(|&i| matches!(players[i].status(), PlayerStatus::Playing))
}

/// Previous seat that is not eliminated, scanning right of `from`.
fn prev_non_eliminated(players: &[Player], from: usize) -> usize {
    let n = players.len();
    (1..=n)
        .map(|step| (from + n - step) % n)
        .find(|&i| !matches!(players[i].status(), PlayerStatus::Eliminated))
        .unwrap_or(from)
}
