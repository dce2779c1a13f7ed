use std::error::Error;
use std::fmt;

use crate::model::card::Card;
use crate::model::seat::{Seat, SeatSet};
use crate::model::suit::Suit;

/// One card committed to the current trick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Play {
    pub seat: Seat,
    pub card: Card,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    OutOfTurn { expected: Seat, actual: Seat },
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already has four cards"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play, got {actual}")
            }
        }
    }
}

impl Error for TrickError {}

/// A single trick in progress or just completed. The winner is tracked
/// incrementally; only cards of the lead suit, or of trump once it has been
/// called, can take the lead.
#[derive(Debug, Clone)]
pub struct Trick {
    leader: Seat,
    plays: Vec<Play>,
    winning_seat: Option<Seat>,
    winning_rank: u8,
}

impl Trick {
    pub fn new(leader: Seat) -> Trick {
        Trick {
            leader,
            plays: Vec::with_capacity(4),
            winning_seat: None,
            winning_rank: 0,
        }
    }

    pub fn leader(&self) -> Seat {
        self.leader
    }

    pub fn plays(&self) -> &[Play] {
        &self.plays
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == 4
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|p| p.card.suit)
    }

    /// The seat due to act. For a completed trick this is the winner, who
    /// leads the next trick.
    pub fn seat_to_play(&self) -> Seat {
        if self.is_complete() {
            return self.winning_seat.unwrap_or(self.leader);
        }
        match self.plays.last() {
            Some(play) => play.seat.next(),
            None => self.leader,
        }
    }

    /// Seats that have not yet contributed a card, the seat due next included.
    pub fn seats_yet_to_play(&self) -> SeatSet {
        let played: SeatSet = self.plays.iter().map(|p| p.seat).collect();
        SeatSet::ALL.difference(played)
    }

    /// Seats acting after the seat currently due.
    pub fn following_seats(&self) -> SeatSet {
        if self.is_complete() {
            return SeatSet::EMPTY;
        }
        let mut following = self.seats_yet_to_play();
        following.remove(self.seat_to_play());
        following
    }

    pub fn points(&self) -> u8 {
        self.plays.iter().map(|p| p.card.points()).sum()
    }

    pub fn winning_seat(&self) -> Option<Seat> {
        self.winning_seat
    }

    pub fn winning_rank(&self) -> u8 {
        self.winning_rank
    }

    /// Commits a card. `contests_win` must hold exactly when the card is of
    /// the lead suit or of the called trump suit; other cards never capture
    /// the trick no matter their rank.
    pub fn play(&mut self, seat: Seat, card: Card, contests_win: bool) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }
        let expected = self.seat_to_play();
        if seat != expected {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: seat,
            });
        }
        if self.plays.is_empty() || (contests_win && card.current_rank() > self.winning_rank) {
            self.winning_seat = Some(seat);
            self.winning_rank = card.current_rank();
        }
        self.plays.push(Play { seat, card });
        Ok(())
    }

    /// Applies the trump reveal boost to cards already on the table. The
    /// recorded winning rank is deliberately left untouched; a boost only
    /// matters for cards played from here on.
    pub fn boost_suit_ranks(&mut self, suit: Suit) {
        for play in &mut self.plays {
            if play.card.suit == suit {
                play.card.boost_rank();
            }
        }
    }
}
