use splitpot::cards::{parse_cards, Rank};
use splitpot::evaluator::{
    evaluate_pool, HandRank, HandStrengthEvaluator, RankOrder, ShowdownHand, StandardEvaluator,
};
use splitpot::rules::RuleDescriptor;

fn holdem() -> RuleDescriptor {
    RuleDescriptor::texas_holdem(5, 10)
}

fn eval(hole: &str, board: &str, rules: &RuleDescriptor) -> ShowdownHand {
    StandardEvaluator
        .evaluate(&parse_cards(hole).unwrap(), &parse_cards(board).unwrap(), rules)
        .unwrap()
}

#[test]
fn kickers_break_ties_between_equal_categories() {
    let rules = holdem();
    let board = "Qs Jd 9h 3c 2d";
    let ace_kicker = eval("Ah Kd", board, &rules);
    let king_kicker = eval("Kh 10d", board, &rules);
    assert_eq!(ace_kicker.high.rank, HandRank::HighCard);
    assert!(ace_kicker.high > king_kicker.high);

    let top_pair_big = eval("Qh Ad", board, &rules);
    let top_pair_small = eval("Qd 10h", board, &rules);
    assert!(top_pair_big.high > top_pair_small.high);
}

#[test]
fn full_tiebreak_chain_for_two_pair() {
    let rules = holdem();
    let a = eval("As Kd", "Ah Kh 9c 3d 2s", &rules);
    let b = eval("As Qd", "Ah Qh 9c 3d 2s", &rules);
    assert_eq!(a.high.rank, HandRank::TwoPair);
    assert_eq!(b.high.rank, HandRank::TwoPair);
    assert!(a.high > b.high, "kings-up beats queens-up");
    assert_eq!(a.high.tie_break[0], Rank::Ace);
    assert_eq!(a.high.tie_break[1], Rank::King);
}

#[test]
fn wheel_loses_to_six_high_straight() {
    let rules = holdem();
    let wheel = eval("Ac 2d", "3h 4s 5c Kh Qd", &rules);
    let six_high = eval("6c 2d", "3h 4s 5c Kh Qd", &rules);
    assert_eq!(wheel.high.rank, HandRank::Straight);
    assert_eq!(wheel.high.tie_break, vec![Rank::Five]);
    assert!(six_high.high > wheel.high);
}

#[test]
fn skip_straight_ranks_between_straight_and_flush() {
    let rules = RuleDescriptor::skip_straight_hi_lo(5, 10);
    let skip = eval("2c 4d", "6h 8s 10c Kh 3d", &rules);
    let straight = eval("9c 8d", "7h 6s 5c Kh 2d", &rules);
    let flush = eval("Ah 9h", "7h 3h 2h Kc Qd", &rules);
    assert_eq!(skip.high.rank, HandRank::SkipStraight);
    assert!(skip.high > straight.high);
    assert!(flush.high > skip.high);
}

#[test]
fn ace_low_skip_straight_is_the_weakest_skip_straight() {
    let rules = RuleDescriptor::skip_straight_hi_lo(5, 10);
    let ace_low = eval("Ac 3d", "5h 7s 9c Kh Qd", &rules);
    let two_to_ten = eval("2c 4d", "6h 8s 10c Kh Jd", &rules);
    assert_eq!(ace_low.high.rank, HandRank::SkipStraight);
    assert_eq!(ace_low.high.tie_break, vec![Rank::Nine]);
    assert!(two_to_ten.high > ace_low.high);
}

#[test]
fn skip_straight_flush_outranks_straight_flush() {
    let rules = RuleDescriptor::skip_straight_hi_lo(5, 10);
    let skip_flush = eval("2h 4h", "6h 8h 10h Kc Qd", &rules);
    let straight_flush = eval("9s 8s", "7s 6s 5s Kc Qd", &rules);
    assert_eq!(skip_flush.high.rank, HandRank::SkipStraightFlush);
    assert_eq!(straight_flush.high.rank, HandRank::StraightFlush);
    assert!(skip_flush.high > straight_flush.high);
}

#[test]
fn standard_rules_see_no_skip_straight() {
    let skip_pool = eval("2c 4d", "6h 8s 10c Kh 3d", &holdem());
    assert_eq!(skip_pool.high.rank, HandRank::HighCard);
}

#[test]
fn low_hand_requires_five_distinct_qualifying_ranks() {
    let rules = RuleDescriptor::skip_straight_hi_lo(5, 10);
    let wheel = eval("Ac 2d", "3h 4s 5c Kh Qd", &rules);
    let low = wheel.low.expect("wheel qualifies");
    assert_eq!(low.values, [5, 4, 3, 2, 1]);
    assert_eq!(low.describe(), "5-4-3-2-A low");

    let paired = eval("Ac Ad", "2h 3s 4c 9h 9d", &rules);
    assert!(paired.low.is_none(), "duplicates reduce unique ranks below five");

    let high_board = eval("Ac 2d", "9h 10s Jc Qh Kd", &rules);
    assert!(high_board.low.is_none());
}

#[test]
fn high_only_rules_never_produce_a_low() {
    let hand = eval("Ac 2d", "3h 4s 5c Kh Qd", &holdem());
    assert!(hand.low.is_none());
}

#[test]
fn nine_is_too_high_for_an_eight_or_better_low() {
    let rules = RuleDescriptor::skip_straight_hi_lo(5, 10);
    let hand = eval("Ac 2d", "3h 4s 9c Kh Qd", &rules);
    assert!(hand.low.is_none(), "A-2-3-4-9 does not qualify");
}

#[test]
fn evaluate_pool_matches_known_eight_card_case() {
    let order = RankOrder::standard();
    let pool = parse_cards("As Ah Ks Kh 9c 9d 3s 2c").unwrap();
    let result = evaluate_pool(&pool, &order).unwrap();
    assert_eq!(result.rank, HandRank::TwoPair);
    assert_eq!(result.tie_break, vec![Rank::Ace, Rank::King, Rank::Nine]);
}

#[test]
fn royal_flush_tops_the_standard_order() {
    let royal = eval("As Ks", "Qs Js 10s 9s 8s", &holdem());
    assert_eq!(royal.high.rank, HandRank::RoyalFlush);
    assert_eq!(royal.high.describe(), "Royal Flush");
}
