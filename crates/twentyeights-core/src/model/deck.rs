use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::model::card::Card;
use crate::model::face::Face;
use crate::model::suit::Suit;

/// The 32-card deck used in 28: sevens through aces in each suit.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub const SIZE: usize = 32;

    /// Unshuffled deck in suit-major order.
    pub fn standard() -> Deck {
        let mut cards = Vec::with_capacity(Deck::SIZE);
        for suit in Suit::ALL {
            for face in Face::ORDERED {
                cards.push(Card::new(face, suit));
            }
        }
        Deck { cards }
    }

    pub fn shuffled(rng: &mut impl Rng) -> Deck {
        let mut deck = Deck::standard();
        deck.cards.shuffle(rng);
        deck
    }

    /// Deterministic shuffle for replay and tests.
    pub fn shuffled_with_seed(seed: u64) -> Deck {
        let mut rng = StdRng::seed_from_u64(seed);
        Deck::shuffled(&mut rng)
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
