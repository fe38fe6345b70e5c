// Engine API boundary. The trait exposes the core operations so hosts
// (CLIs, servers, bots) can drive a hand without depending on table
// internals; `ActionProvider` is the collaborator seam for human input or
// AI decisions.

use crate::betting::{ActionError, ActionOutcome, PlayerAction};
use crate::limits::BetLimits;
use crate::settlement::SettlementResult;
use crate::table::{Phase, Table};
use log::warn;
use rand::RngCore;

pub trait TableEngine {
    // Hand lifecycle
    fn start_hand(&mut self, rng: &mut dyn RngCore);
    fn advance_phase(&mut self);

    // Betting
    fn process_action(&mut self, action: PlayerAction) -> Result<ActionOutcome, ActionError>;
    fn is_betting_round_over(&self) -> bool;
    fn betting_limits(&self) -> Option<BetLimits>;

    // Settlement
    fn distribute_pot(&mut self) -> Vec<SettlementResult>;
    fn award_pot_to_last_player(&mut self) -> Vec<SettlementResult>;

    // Queries
    fn current_actor(&self) -> Option<usize>;
    fn phase(&self) -> Phase;
    fn pot(&self) -> u64;
    fn contenders(&self) -> usize;
}

impl TableEngine for Table {
    fn start_hand(&mut self, rng: &mut dyn RngCore) {
        Table::start_hand(self, rng);
    }
    fn advance_phase(&mut self) {
        Table::advance_phase(self);
    }

    fn process_action(&mut self, action: PlayerAction) -> Result<ActionOutcome, ActionError> {
        Table::process_action(self, action)
    }
    fn is_betting_round_over(&self) -> bool {
        Table::is_betting_round_over(self)
    }
    fn betting_limits(&self) -> Option<BetLimits> {
        Table::betting_limits(self)
    }

    fn distribute_pot(&mut self) -> Vec<SettlementResult> {
        Table::distribute_pot(self)
    }
    fn award_pot_to_last_player(&mut self) -> Vec<SettlementResult> {
        Table::award_pot_to_last_player(self)
    }

    fn current_actor(&self) -> Option<usize> {
        Table::current_actor(self)
    }
    fn phase(&self) -> Phase {
        Table::phase(self)
    }
    fn pot(&self) -> u64 {
        Table::pot(self)
    }
    fn contenders(&self) -> usize {
        Table::contenders(self)
    }
}

/// Decides one action when its seat is asked to act. May block on terminal
/// or network input in the surrounding application; from the engine's point
/// of view it returns exactly one action.
pub trait ActionProvider {
    fn act(&mut self, table: &Table, seat: usize) -> PlayerAction;
}

/// Drive the current betting round to completion, asking each seat's
/// provider in turn. An action the validator rejects is replaced by the
/// default fallback (check when free, otherwise fold), so a misbehaving
/// provider cannot stall or corrupt the round.
pub fn play_betting_round(
    table: &mut Table,
    providers: &mut [Box<dyn ActionProvider>],
) -> Result<(), ActionError> {
    while !table.is_betting_round_over() {
        let seat = match table.current_actor() {
            Some(seat) => seat,
            None => break,
        };
        let action = providers
            .get_mut(seat)
            .map(|p| p.act(table, seat))
            .unwrap_or(PlayerAction::Fold);
        if let Err(e) = table.process_action(action) {
            warn!("seat {seat}: rejected action ({e}); applying fallback");
            let owes = table
                .betting_round()
                .map(|r| r.bet_to_call() > table.players()[seat].current_bet())
                .unwrap_or(false);
            let fallback = if owes { PlayerAction::Fold } else { PlayerAction::Check };
            table.process_action(fallback)?;
        }
    }
    Ok(())
}
