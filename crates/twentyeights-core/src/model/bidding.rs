use std::fmt;

use crate::model::card::Card;
use crate::model::seat::Seat;

/// The two bidding rounds. The first happens on four cards per hand, the
/// second after the remaining four are dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidStage {
    First,
    Second,
}

impl BidStage {
    pub const fn min_bid(self) -> u8 {
        match self {
            BidStage::First => 14,
            BidStage::Second => 24,
        }
    }

    pub const fn max_bid(self) -> u8 {
        match self {
            BidStage::First => 20,
            BidStage::Second => 28,
        }
    }
}

impl fmt::Display for BidStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidStage::First => write!(f, "first bidding stage"),
            BidStage::Second => write!(f, "second bidding stage"),
        }
    }
}

/// A bid that has been accepted: the points promised, the card set aside as
/// the concealed trump, and who made it in which stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bid {
    pub points: u8,
    pub card: Card,
    pub bidder: Seat,
    pub stage: BidStage,
}

/// Auction bookkeeping for a round: the current stage, the standing winning
/// bid, and the pass count that decides when the stage ends.
#[derive(Debug, Clone)]
pub struct Bidding {
    stage: BidStage,
    pass_count: u8,
    bid_made_this_stage: bool,
    winning_bid: Option<Bid>,
}

impl Default for Bidding {
    fn default() -> Bidding {
        Bidding::new()
    }
}

impl Bidding {
    pub fn new() -> Bidding {
        Bidding {
            stage: BidStage::First,
            pass_count: 0,
            bid_made_this_stage: false,
            winning_bid: None,
        }
    }

    pub fn stage(&self) -> BidStage {
        self.stage
    }

    pub fn winning_bid(&self) -> Option<Bid> {
        self.winning_bid
    }

    /// Passes needed to close the stage: three once someone has bid in it,
    /// otherwise all four seats must decline.
    pub fn passes_to_advance(&self) -> u8 {
        if self.bid_made_this_stage { 3 } else { 4 }
    }

    pub fn should_advance(&self) -> bool {
        self.pass_count >= self.passes_to_advance()
    }

    /// Lowest bid the seat may legally make right now. A new bid must beat
    /// the standing one, and the winning bidder's partner re-entering the
    /// same stage must go all the way to the stage maximum.
    pub fn min_bid_for(&self, seat: Seat) -> u8 {
        let mut floor = self.stage.min_bid();
        if let Some(winning) = self.winning_bid {
            if winning.bidder == seat.partner() && winning.stage == self.stage {
                floor = floor.max(self.stage.max_bid());
            }
            floor = floor.max(winning.points + 1);
        }
        floor
    }

    pub fn record_bid(&mut self, bid: Bid) {
        self.pass_count = 0;
        self.bid_made_this_stage = true;
        self.winning_bid = Some(bid);
    }

    pub fn record_pass(&mut self) {
        self.pass_count += 1;
    }

    /// Moves to the second stage. The winning bid carries over but no longer
    /// counts as made within the new stage.
    pub fn advance_stage(&mut self) {
        debug_assert_eq!(self.stage, BidStage::First);
        self.stage = BidStage::Second;
        self.pass_count = 0;
        self.bid_made_this_stage = false;
    }
}
