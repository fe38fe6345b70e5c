use crate::cards::{Card, Rank, Suit};

/// Pre-computed analysis of a 5-8 card pool.
/// Built once per pool and shared by all category finders.
#[derive(Debug, Clone)]
pub struct PoolAnalysis {
    /// All cards, sorted by rank descending then suit descending.
    cards: Vec<Card>,
    /// Count per rank value (indices 2..=14 used).
    rank_counts: [u8; 15],
    /// Cards per suit, each list sorted by rank descending.
    by_suit: [Vec<Card>; 4],
    /// Distinct ranks present, descending.
    unique_ranks: Vec<Rank>,
}

impl PoolAnalysis {
    pub fn new(pool: &[Card]) -> Self {
        let mut cards = pool.to_vec();
        cards.sort_by(|a, b| b.rank().cmp(&a.rank()).then(b.suit().cmp(&a.suit())));

        let mut rank_counts = [0u8; 15];
        let mut by_suit: [Vec<Card>; 4] = Default::default();
        let mut unique_ranks = Vec::with_capacity(cards.len());
        for &c in &cards {
            rank_counts[c.rank().value() as usize] += 1;
            by_suit[c.suit().index()].push(c);
            if unique_ranks.last() != Some(&c.rank()) {
                unique_ranks.push(c.rank());
            }
        }

        Self { cards, rank_counts, by_suit, unique_ranks }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn unique_ranks(&self) -> &[Rank] {
        &self.unique_ranks
    }

    pub fn count_of(&self, rank: Rank) -> u8 {
        self.rank_counts[rank.value() as usize]
    }

    /// Highest rank appearing at least four times.
    pub fn quad_rank(&self) -> Option<Rank> {
        self.unique_ranks.iter().copied().find(|&r| self.count_of(r) >= 4)
    }

    /// Ranks appearing at least three times, descending.
    pub fn trip_ranks(&self) -> Vec<Rank> {
        self.unique_ranks.iter().copied().filter(|&r| self.count_of(r) >= 3).collect()
    }

    /// Ranks appearing at least twice, descending.
    pub fn pair_ranks(&self) -> Vec<Rank> {
        self.unique_ranks.iter().copied().filter(|&r| self.count_of(r) >= 2).collect()
    }

    /// Cards of one suit, sorted descending.
    pub fn suited(&self, suit: Suit) -> &[Card] {
        &self.by_suit[suit.index()]
    }

    /// The suit holding five or more cards, if any. A pool of at most eight
    /// cards can contain only one such suit.
    pub fn flush_suit(&self) -> Option<Suit> {
        Suit::ALL.iter().copied().find(|&s| self.by_suit[s.index()].len() >= 5)
    }

    /// Up to `count` cards of the given rank, strongest suits first.
    pub fn cards_of_rank(&self, rank: Rank, count: usize) -> Vec<Card> {
        self.cards.iter().copied().filter(|c| c.rank() == rank).take(count).collect()
    }

    /// Next-highest cards whose ranks are not in `used`, sorted descending.
    pub fn find_kickers(&self, used: &[Rank], need: usize) -> Vec<Card> {
        self.cards.iter().copied().filter(|c| !used.contains(&c.rank())).take(need).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn pool(s: &str) -> PoolAnalysis {
        PoolAnalysis::new(&parse_cards(s).unwrap())
    }

    #[test]
    fn cards_sorted_descending() {
        let a = pool("3s Ah 5d Kc 9s");
        let ranks: Vec<Rank> = a.cards().iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![Rank::Ace, Rank::King, Rank::Nine, Rank::Five, Rank::Three]);
    }

    #[test]
    fn groups_from_seven_card_pool() {
        let a = pool("Ks Kh Kd Qc Qs 9h 2c");
        assert_eq!(a.quad_rank(), None);
        assert_eq!(a.trip_ranks(), vec![Rank::King]);
        assert_eq!(a.pair_ranks(), vec![Rank::King, Rank::Queen]);
        assert_eq!(a.count_of(Rank::Queen), 2);
    }

    #[test]
    fn flush_suit_needs_five_cards() {
        let a = pool("Ah 9h 7h 3h 2h Ks Qd");
        assert_eq!(a.flush_suit(), Some(Suit::Hearts));
        assert_eq!(a.suited(Suit::Hearts).len(), 5);

        let b = pool("Ah 9h 7h 3h Ks Qd 2c");
        assert_eq!(b.flush_suit(), None);
    }

    #[test]
    fn kickers_exclude_used_ranks() {
        let a = pool("As Ah Kd Qc 9s 5h 2c");
        let ks = a.find_kickers(&[Rank::Ace], 3);
        let ranks: Vec<Rank> = ks.iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![Rank::King, Rank::Queen, Rank::Nine]);
    }

    #[test]
    fn unique_ranks_deduplicate() {
        let a = pool("As Ah Ad Kc Ks");
        assert_eq!(a.unique_ranks(), &[Rank::Ace, Rank::King]);
    }
}
