use crate::model::seat::{Seat, SeatSet};
use crate::model::suit::Suit;

/// Public knowledge every player can deduce from the table talk: which seats
/// have shown themselves void of a suit, and which suits the bidder has ruled
/// out as trump by leading them before the reveal. Facts only accumulate.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeLedger {
    empty_by_suit: [SeatSet; 4],
    not_trump: [bool; 4],
}

impl KnowledgeLedger {
    pub fn new() -> KnowledgeLedger {
        KnowledgeLedger::default()
    }

    pub fn mark_void(&mut self, seat: Seat, suit: Suit) {
        self.empty_by_suit[suit.index()].insert(seat);
    }

    pub fn seats_known_empty(&self, suit: Suit) -> SeatSet {
        self.empty_by_suit[suit.index()]
    }

    pub fn is_known_empty(&self, seat: Seat, suit: Suit) -> bool {
        self.empty_by_suit[suit.index()].contains(seat)
    }

    pub fn mark_not_trump(&mut self, suit: Suit) {
        self.not_trump[suit.index()] = true;
    }

    pub fn is_known_not_trump(&self, suit: Suit) -> bool {
        self.not_trump[suit.index()]
    }

    /// Suits the concealed trump could still belong to.
    pub fn possible_trump_suits(&self) -> impl Iterator<Item = Suit> + '_ {
        Suit::ALL
            .into_iter()
            .filter(|s| !self.not_trump[s.index()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voids_accumulate_per_suit() {
        let mut ledger = KnowledgeLedger::new();
        ledger.mark_void(Seat::East, Suit::Hearts);
        ledger.mark_void(Seat::West, Suit::Hearts);
        assert!(ledger.is_known_empty(Seat::East, Suit::Hearts));
        assert!(!ledger.is_known_empty(Seat::East, Suit::Clubs));
        assert_eq!(ledger.seats_known_empty(Suit::Hearts).len(), 2);
    }

    #[test]
    fn ruled_out_trump_suits_shrink_the_candidates() {
        let mut ledger = KnowledgeLedger::new();
        assert_eq!(ledger.possible_trump_suits().count(), 4);
        ledger.mark_not_trump(Suit::Clubs);
        ledger.mark_not_trump(Suit::Hearts);
        assert!(ledger.is_known_not_trump(Suit::Clubs));
        let left: Vec<Suit> = ledger.possible_trump_suits().collect();
        assert_eq!(left, vec![Suit::Diamonds, Suit::Spades]);
    }
}
