use crate::model::card::Card;
use crate::model::seat::Seat;
use crate::model::suit::Suit;

/// The concealed trump slot. During bidding it holds the provisional card set
/// aside by the current winning bidder; once play starts it holds the locked
/// trump until it is called (revealed) and returned to the bidder's hand.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trump {
    card: Option<Card>,
    bidder: Option<Seat>,
    is_called: bool,
    been_played: bool,
}

impl Trump {
    pub fn new() -> Trump {
        Trump::default()
    }

    pub fn card(&self) -> Option<Card> {
        self.card
    }

    pub fn bidder(&self) -> Option<Seat> {
        self.bidder
    }

    pub fn suit(&self) -> Option<Suit> {
        self.card.map(|c| c.suit)
    }

    pub fn is_called(&self) -> bool {
        self.is_called
    }

    /// Whether the set-aside trump card itself has been played to a trick.
    pub fn been_played(&self) -> bool {
        self.been_played
    }

    /// Whether the seat can see the trump suit: everyone after the call, only
    /// the bidder before it.
    pub fn known_to(&self, seat: Seat) -> bool {
        self.is_called || self.bidder == Some(seat)
    }

    pub(crate) fn select(&mut self, card: Card, bidder: Seat) -> Option<Card> {
        let displaced = self.card.take();
        self.card = Some(card);
        self.bidder = Some(bidder);
        displaced
    }

    pub(crate) fn unselect(&mut self) -> Option<Card> {
        self.card.take()
    }

    pub(crate) fn mark_called(&mut self) {
        self.is_called = true;
    }

    pub(crate) fn mark_played(&mut self) {
        self.been_played = true;
    }
}
