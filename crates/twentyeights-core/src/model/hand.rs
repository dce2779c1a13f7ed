use crate::model::card::Card;
use crate::model::suit::Suit;

/// The cards held by one seat, kept sorted by suit then descending strength.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Hand {
        Hand::default()
    }

    pub fn with_cards(cards: impl IntoIterator<Item = Card>) -> Hand {
        let mut hand = Hand::new();
        for card in cards {
            hand.add(card);
        }
        hand
    }

    pub fn add(&mut self, card: Card) {
        debug_assert!(!self.contains(card));
        self.cards.push(card);
        self.cards
            .sort_by_key(|c| (c.suit, std::cmp::Reverse(c.face.rank())));
    }

    /// Removes the card if held. Returns false when the card is absent.
    pub fn remove(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|c| *c == card) {
            Some(at) => {
                self.cards.remove(at);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn cards_of_suit(&self, suit: Suit) -> impl Iterator<Item = Card> + '_ {
        self.cards.iter().copied().filter(move |c| c.suit == suit)
    }

    pub fn count_of_suit(&self, suit: Suit) -> usize {
        self.cards_of_suit(suit).count()
    }

    pub fn is_void_of(&self, suit: Suit) -> bool {
        self.count_of_suit(suit) == 0
    }

    /// True when every card held in the suit is an honor. Such a holding can
    /// be shaken loose by an opponent leading the suit, so the play evaluator
    /// treats it specially.
    pub fn holds_only_honors_in(&self, suit: Suit) -> bool {
        let mut any = false;
        for card in self.cards_of_suit(suit) {
            if !card.is_honor() {
                return false;
            }
            any = true;
        }
        any
    }

    /// Applies the trump reveal boost to every held card of the suit.
    pub fn boost_suit_ranks(&mut self, suit: Suit) {
        for card in &mut self.cards {
            if card.suit == suit {
                card.boost_rank();
            }
        }
    }
}
