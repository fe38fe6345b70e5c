use crate::betting::{ActionError, ActionOutcome, BettingRound, PlayerAction};
use crate::cards::Card;
use crate::deck::Deck;
use crate::evaluator::{HandStrengthEvaluator, StandardEvaluator};
use crate::limits::{calculator_for, BetLimits, BettingLimitCalculator};
use crate::player::{Player, PlayerStatus};
use crate::rules::RuleDescriptor;
use crate::settlement::{self, SettlementResult};
use log::debug;
use rand::RngCore;

/// Hand phases. Betting happens in the first four; `Showdown` settles the
/// pot and `HandOver` awaits the next deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Phase {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    HandOver,
}

/// One table running one rule set. Owns all mutable hand state; strategies
/// for hand strength and bet sizing are injected at construction and never
/// swapped mid-game outside test harnesses.
pub struct Table {
    rules: RuleDescriptor,
    deck: Deck,
    community: Vec<Card>,
    players: Vec<Player>,
    pot: u64,
    dealer: usize,
    phase: Phase,
    round: Option<BettingRound>,
    evaluator: Box<dyn HandStrengthEvaluator>,
    limiter: Box<dyn BettingLimitCalculator>,
    /// Fixed at construction; the conservation invariant checks against it.
    total_chips: u64,
}

impl Table {
    pub fn new(rules: RuleDescriptor, players: Vec<Player>) -> Self {
        let limiter = calculator_for(rules.betting);
        Self::with_strategies(rules, players, Box::new(StandardEvaluator), limiter)
    }

    /// Construct with explicit strategies. Intended for tests and hosts that
    /// need a non-standard evaluator.
    pub fn with_strategies(
        rules: RuleDescriptor,
        players: Vec<Player>,
        evaluator: Box<dyn HandStrengthEvaluator>,
        limiter: Box<dyn BettingLimitCalculator>,
    ) -> Self {
        let total_chips = players.iter().map(|p| p.chips()).sum();
        Self {
            rules,
            deck: Deck::standard(),
            community: Vec::new(),
            players,
            pot: 0,
            dealer: 0,
            phase: Phase::HandOver,
            round: None,
            evaluator,
            limiter,
            total_chips,
        }
    }

    pub fn rules(&self) -> &RuleDescriptor {
        &self.rules
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn community(&self) -> &[Card] {
        &self.community
    }

    pub fn pot(&self) -> u64 {
        self.pot
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn betting_round(&self) -> Option<&BettingRound> {
        self.round.as_ref()
    }

    /// Seat currently asked to act, if a betting round is in progress.
    pub fn current_actor(&self) -> Option<usize> {
        self.round.as_ref().and_then(|r| r.current_actor())
    }

    /// Start a new hand: rotate the dealer, shuffle with the supplied
    /// randomness source, deal hole cards and post blinds.
    ///
    /// Panics unless at least two seats still have chips.
    pub fn start_hand(&mut self, rng: &mut dyn RngCore) {
        for p in &mut self.players {
            p.reset_for_hand();
        }
        let playing = self.count_playing();
        assert!(playing >= 2, "a hand needs at least two funded seats");

        self.dealer = self.next_playing_from(self.dealer);
        self.deck = Deck::standard();
        self.deck.shuffle_with(rng);
        self.community.clear();
        self.pot = 0;

        let count = self.rules.hole_card_count;
        for p in &mut self.players {
            if matches!(p.status(), PlayerStatus::Playing) {
                p.hole = self.deck.deal_n(count);
            }
        }

        // Heads-up: the dealer posts the small blind.
        let sb_seat =
            if playing == 2 { self.dealer } else { self.next_playing_from(self.dealer) };
        let bb_seat = self.next_playing_from(sb_seat);
        let sb_posted = self.players[sb_seat].post(self.rules.small_blind);
        let bb_posted = self.players[bb_seat].post(self.rules.big_blind);
        self.pot += sb_posted + bb_posted;
        debug!("hand started: dealer {}, blinds {sb_posted}/{bb_posted}", self.dealer);

        self.phase = Phase::PreFlop;
        self.round = Some(BettingRound::preflop(
            &self.players,
            bb_seat,
            bb_posted.max(sb_posted),
            self.rules.big_blind,
        ));
        self.check_conservation();
    }

    /// Open a fresh betting round for the current phase. Called by
    /// [`Table::advance_phase`] after dealing; exposed for hosts that manage
    /// the deal themselves.
    pub fn prepare_betting_round(&mut self) {
        self.round = match self.phase {
            // The pre-flop round is built by start_hand when blinds post.
            Phase::PreFlop => self.round.take(),
            Phase::Flop | Phase::Turn | Phase::River => Some(BettingRound::postflop(
                &mut self.players,
                self.dealer,
                self.rules.big_blind,
            )),
            Phase::Showdown | Phase::HandOver => None,
        };
    }

    /// Move to the next phase, dealing community cards as needed.
    pub fn advance_phase(&mut self) {
        self.phase = match self.phase {
            Phase::PreFlop => {
                let flop = self.deck.deal_n(3);
                self.community.extend(flop);
                Phase::Flop
            }
            Phase::Flop => {
                self.community.extend(self.deck.deal());
                Phase::Turn
            }
            Phase::Turn => {
                self.community.extend(self.deck.deal());
                Phase::River
            }
            Phase::River => Phase::Showdown,
            Phase::Showdown | Phase::HandOver => Phase::HandOver,
        };
        debug!("phase advanced to {:?}", self.phase);
        self.prepare_betting_round();
    }

    /// True when the current betting round requires no further action.
    pub fn is_betting_round_over(&self) -> bool {
        match &self.round {
            Some(round) => round.is_over(&self.players),
            None => true,
        }
    }

    /// Legal total-bet bounds for the current actor under the active
    /// betting structure.
    pub fn betting_limits(&self) -> Option<BetLimits> {
        let round = self.round.as_ref()?;
        let seat = round.current_actor()?;
        Some(self.limiter.limits(round, self.pot, &self.players[seat]))
    }

    /// Validate and apply one action for the current actor. Bet and raise
    /// totals are checked against the limit strategy here, at the provider
    /// boundary; a rejected action leaves all state untouched and may be
    /// retried.
    pub fn process_action(&mut self, action: PlayerAction) -> Result<ActionOutcome, ActionError> {
        let round = self.round.as_mut().ok_or(ActionError::NoRound)?;
        let seat = round.current_actor().ok_or(ActionError::PlayerCannotAct)?;

        if let PlayerAction::Bet { to } | PlayerAction::Raise { to } = action {
            let limits = self.limiter.limits(round, self.pot, &self.players[seat]);
            let stack_total = self.players[seat].chips() + self.players[seat].current_bet();
            if to > limits.max_total {
                return Err(ActionError::AmountTooLarge { max: limits.max_total, got: to });
            }
            if to < limits.min_total && to < stack_total {
                return Err(ActionError::AmountTooSmall { min: limits.min_total, got: to });
            }
        }

        let outcome = round.apply(&mut self.players, seat, action)?;
        self.pot += outcome.posted;
        self.check_conservation();
        Ok(outcome)
    }

    /// Settle the pot at showdown: side-pot tiers, high/low halves, scoop
    /// detection. Ends the hand.
    pub fn distribute_pot(&mut self) -> Vec<SettlementResult> {
        assert!(
            matches!(self.phase, Phase::Showdown),
            "distribute_pot requires the showdown phase"
        );
        let results = settlement::settle(
            &mut self.players,
            &self.community,
            &self.rules,
            self.evaluator.as_ref(),
            self.dealer,
            self.pot,
        );
        self.pot = 0;
        self.round = None;
        self.phase = Phase::HandOver;
        self.check_conservation();
        results
    }

    /// Award the pot to the single remaining contender without a showdown.
    pub fn award_pot_to_last_player(&mut self) -> Vec<SettlementResult> {
        let results = settlement::award_to_last(&mut self.players, self.pot);
        self.pot = 0;
        self.round = None;
        self.phase = Phase::HandOver;
        self.check_conservation();
        results
    }

    /// Number of contenders still in the hand (playing or all-in).
    pub fn contenders(&self) -> usize {
        self.players.iter().filter(|p| p.in_hand()).count()
    }

    fn count_playing(&self) -> usize {
        self.players
            .iter()
            .filter(|p| matches!(p.status(), PlayerStatus::Playing))
            .count()
    }

    fn next_playing_from(&self, seat: usize) -> usize {
        let n = self.players.len();
        (1..=n)
            .map(|step| (seat + step) % n)
            .find(|&i| matches!(self.players[i].status(), PlayerStatus::Playing))
            .unwrap_or(seat)
    }

    /// Chips are moved, never created or destroyed.
    fn check_conservation(&self) {
        let held: u64 = self.players.iter().map(|p| p.chips()).sum();
        debug_assert_eq!(
            held + self.pot,
            self.total_chips,
            "chip conservation violated"
        );
    }
}
