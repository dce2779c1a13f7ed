use std::fmt;
use std::hash::{Hash, Hasher};

use crate::consts::TRUMP_RANK_BOOST;
use crate::model::face::Face;
use crate::model::suit::Suit;

/// A playing card. Identity is face and suit only; `current_rank` is mutable
/// play state that starts at the face rank and is raised once for trump-suit
/// cards when trump is revealed.
#[derive(Debug, Clone, Copy)]
pub struct Card {
    pub face: Face,
    pub suit: Suit,
    current_rank: u8,
}

impl Card {
    pub const fn new(face: Face, suit: Suit) -> Card {
        Card {
            face,
            suit,
            current_rank: face.rank(),
        }
    }

    /// Trick-taking strength right now, trump boost included.
    pub const fn current_rank(self) -> u8 {
        self.current_rank
    }

    pub const fn points(self) -> u8 {
        self.face.points()
    }

    pub const fn is_honor(self) -> bool {
        self.face.points() > 0
    }

    pub const fn is_boosted(self) -> bool {
        self.current_rank >= TRUMP_RANK_BOOST
    }

    /// Raises this card above every unboosted card. Must be applied at most
    /// once per card per round.
    pub fn boost_rank(&mut self) {
        debug_assert!(!self.is_boosted());
        self.current_rank += TRUMP_RANK_BOOST;
    }
}

impl PartialEq for Card {
    fn eq(&self, other: &Card) -> bool {
        self.face == other.face && self.suit == other.suit
    }
}

impl Eq for Card {}

impl Hash for Card {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.face.hash(state);
        self.suit.hash(state);
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face, self.suit)
    }
}
