use std::error::Error;
use std::fmt;

use crate::consts::{INITIAL_HAND_SIZE, POINTS_IN_DECK};
use crate::model::action::{ActionKind, PlayerAction};
use crate::model::bidding::{Bid, BidStage, Bidding};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::knowledge::KnowledgeLedger;
use crate::model::seat::Seat;
use crate::model::team::Team;
use crate::model::trick::{Trick, TrickError};
use crate::model::trump::Trump;

/// Where a round is in its life: the two-stage auction, trick play, or done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStage {
    Bidding(BidStage),
    Playing,
    Ending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidError {
    NotBidding,
    OutOfTurn { expected: Seat, actual: Seat },
    CardNotHeld(Card),
    BelowMinimum { minimum: u8, points: u8 },
    AboveMaximum { maximum: u8, points: u8 },
    OpeningSeatMustBid,
}

impl fmt::Display for BidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidError::NotBidding => write!(f, "the auction is over"),
            BidError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to act, got {actual}")
            }
            BidError::CardNotHeld(card) => write!(f, "{card} is not in hand"),
            BidError::BelowMinimum { minimum, points } => {
                write!(f, "bid of {points} is below the minimum of {minimum}")
            }
            BidError::AboveMaximum { maximum, points } => {
                write!(f, "bid of {points} is above the maximum of {maximum}")
            }
            BidError::OpeningSeatMustBid => {
                write!(f, "the starting seat cannot pass before any bid is made")
            }
        }
    }
}

impl Error for BidError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrumpError {
    NotBidding,
    OutOfTurn { expected: Seat, actual: Seat },
    CardNotHeld(Card),
    NotProvisionalBidder,
    NothingSelected,
}

impl fmt::Display for TrumpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrumpError::NotBidding => write!(f, "trump can only be set aside during the auction"),
            TrumpError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to act, got {actual}")
            }
            TrumpError::CardNotHeld(card) => write!(f, "{card} is not in hand"),
            TrumpError::NotProvisionalBidder => {
                write!(f, "only the seat that set the trump aside may take it back")
            }
            TrumpError::NothingSelected => write!(f, "no trump card is set aside"),
        }
    }
}

impl Error for TrumpError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayError {
    NotPlaying,
    OutOfTurn { expected: Seat, actual: Seat },
    NotEligible(Card),
    Trick(TrickError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::NotPlaying => write!(f, "trick play has not started or is over"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play, got {actual}")
            }
            PlayError::NotEligible(card) => write!(f, "{card} is not eligible to play"),
            PlayError::Trick(err) => err.fmt(f),
        }
    }
}

impl Error for PlayError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallError {
    NotPlaying,
    AlreadyCalled,
    NotEligible,
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallError::NotPlaying => write!(f, "trump can only be called during trick play"),
            CallError::AlreadyCalled => write!(f, "trump has already been called"),
            CallError::NotEligible => write!(f, "the seat may not call trump right now"),
        }
    }
}

impl Error for CallError {}

/// What a pass did to the auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassProgress {
    /// Auction continues with the next seat.
    Continue,
    /// First stage closed; four more cards dealt, second stage open.
    SecondStage,
    /// Second stage closed on a standing bid; trick play begins.
    PlayBegins,
    /// Second stage closed with no bid ever made; the round is dead.
    DeadRound,
}

/// What a play did to the trick and the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Continue,
    TrickComplete { winner: Seat, points: u8 },
    RoundOver { winner: Team },
}

/// One round of 28: the deal, the two-stage auction with its concealed trump,
/// eight tricks of play, and the running team points that decide the winner.
///
/// All mutation goes through the action methods, which validate before
/// touching any state. Queries such as [`Round::legal_cards`] are pure.
#[derive(Debug, Clone)]
pub struct Round {
    starting: Seat,
    stock: Vec<Card>,
    hands: [Hand; 4],
    stage: RoundStage,
    bidding: Bidding,
    trump: Trump,
    trick: Trick,
    tricks_completed: u8,
    knowledge: KnowledgeLedger,
    round_points: [u8; 2],
    winning_team: Option<Team>,
    active: Seat,
    just_called: Option<Seat>,
    next_action_id: u32,
    actions: Vec<PlayerAction>,
}

impl Round {
    /// Deals the opening four cards to each seat and opens the auction.
    pub fn deal(deck: &Deck, starting: Seat) -> Round {
        let mut round = Round {
            starting,
            stock: deck.cards().to_vec(),
            hands: std::array::from_fn(|_| Hand::new()),
            stage: RoundStage::Bidding(BidStage::First),
            bidding: Bidding::new(),
            trump: Trump::new(),
            trick: Trick::new(starting),
            tricks_completed: 0,
            knowledge: KnowledgeLedger::new(),
            round_points: [0; 2],
            winning_team: None,
            active: starting,
            just_called: None,
            next_action_id: 0,
            actions: Vec::new(),
        };
        round.deal_four_each();
        round
    }

    /// Scenario constructor for tests and tooling: fixed hands, no stock.
    pub fn from_hands(hands: [Hand; 4], starting: Seat, stage: RoundStage) -> Round {
        Round {
            starting,
            stock: Vec::new(),
            hands,
            stage,
            bidding: Bidding::new(),
            trump: Trump::new(),
            trick: Trick::new(starting),
            tricks_completed: 0,
            knowledge: KnowledgeLedger::new(),
            round_points: [0; 2],
            winning_team: None,
            active: starting,
            just_called: None,
            next_action_id: 0,
            actions: Vec::new(),
        }
    }

    /// Scenario helper: forces the round into Ending with the given winner.
    pub fn end_with_winner(&mut self, winner: Option<Team>) {
        self.stage = RoundStage::Ending;
        self.winning_team = winner;
    }

    /// Scenario helper: records a winning bid and moves its card into the
    /// concealed trump slot.
    pub fn install_winning_bid(&mut self, bid: Bid) {
        self.hands[bid.bidder.index()].remove(bid.card);
        self.trump.select(bid.card, bid.bidder);
        self.bidding.record_bid(bid);
    }

    fn deal_four_each(&mut self) {
        for seat in Seat::LOOP {
            for _ in 0..4 {
                if let Some(card) = self.stock.pop() {
                    self.hands[seat.index()].add(card);
                }
            }
        }
    }

    pub fn starting_seat(&self) -> Seat {
        self.starting
    }

    pub fn stage(&self) -> RoundStage {
        self.stage
    }

    pub fn active_seat(&self) -> Seat {
        self.active
    }

    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn bidding(&self) -> &Bidding {
        &self.bidding
    }

    pub fn trump(&self) -> &Trump {
        &self.trump
    }

    pub fn current_trick(&self) -> &Trick {
        &self.trick
    }

    pub fn tricks_completed(&self) -> u8 {
        self.tricks_completed
    }

    /// True while the eighth and final trick is on the table.
    pub fn is_last_trick(&self) -> bool {
        self.tricks_completed as usize == INITIAL_HAND_SIZE - 1
    }

    pub fn knowledge(&self) -> &KnowledgeLedger {
        &self.knowledge
    }

    /// Scenario access for tests that set up mid-round knowledge.
    pub fn knowledge_mut(&mut self) -> &mut KnowledgeLedger {
        &mut self.knowledge
    }

    pub fn round_points(&self, team: Team) -> u8 {
        self.round_points[team.index()]
    }

    pub fn winning_team(&self) -> Option<Team> {
        self.winning_team
    }

    /// The seat granted the out-of-turn window after calling trump, if any.
    pub fn just_called(&self) -> Option<Seat> {
        self.just_called
    }

    pub fn actions(&self) -> &[PlayerAction] {
        &self.actions
    }

    fn log(&mut self, seat: Seat, kind: ActionKind) {
        let id = self.next_action_id;
        self.next_action_id += 1;
        self.actions.push(PlayerAction { id, seat, kind });
    }

    fn bidding_stage(&self) -> Result<BidStage, BidError> {
        match self.stage {
            RoundStage::Bidding(stage) => Ok(stage),
            _ => Err(BidError::NotBidding),
        }
    }

    /// Sets a card aside as the provisional trump ahead of a bid. A card
    /// already in the slot goes back to whoever put it there.
    pub fn select_trump(&mut self, seat: Seat, card: Card) -> Result<(), TrumpError> {
        if self.bidding_stage().is_err() {
            return Err(TrumpError::NotBidding);
        }
        if seat != self.active {
            return Err(TrumpError::OutOfTurn {
                expected: self.active,
                actual: seat,
            });
        }
        if !self.hands[seat.index()].contains(card) {
            return Err(TrumpError::CardNotHeld(card));
        }
        self.restore_provisional_trump();
        self.hands[seat.index()].remove(card);
        self.trump.select(card, seat);
        self.log(seat, ActionKind::SelectTrump(card));
        Ok(())
    }

    /// Returns the provisional trump to the hand of the seat that set it.
    pub fn unselect_trump(&mut self, seat: Seat) -> Result<(), TrumpError> {
        if self.bidding_stage().is_err() {
            return Err(TrumpError::NotBidding);
        }
        if self.trump.bidder() != Some(seat) {
            return Err(TrumpError::NotProvisionalBidder);
        }
        let card = self.trump.unselect().ok_or(TrumpError::NothingSelected)?;
        self.hands[seat.index()].add(card);
        self.log(seat, ActionKind::UnselectTrump);
        Ok(())
    }

    fn restore_provisional_trump(&mut self) {
        if let (Some(card), Some(bidder)) = (self.trump.card(), self.trump.bidder()) {
            self.trump.unselect();
            self.hands[bidder.index()].add(card);
        }
    }

    /// Makes a bid, setting `card` aside as the concealed trump.
    pub fn submit_bid(&mut self, seat: Seat, points: u8, card: Card) -> Result<(), BidError> {
        let stage = self.bidding_stage()?;
        if seat != self.active {
            return Err(BidError::OutOfTurn {
                expected: self.active,
                actual: seat,
            });
        }
        let already_selected =
            self.trump.bidder() == Some(seat) && self.trump.card() == Some(card);
        if !already_selected && !self.hands[seat.index()].contains(card) {
            return Err(BidError::CardNotHeld(card));
        }
        let minimum = self.bidding.min_bid_for(seat);
        if points < minimum {
            return Err(BidError::BelowMinimum { minimum, points });
        }
        let maximum = stage.max_bid();
        if points > maximum {
            return Err(BidError::AboveMaximum { maximum, points });
        }
        if !already_selected {
            self.restore_provisional_trump();
            self.hands[seat.index()].remove(card);
            self.trump.select(card, seat);
        }
        self.bidding.record_bid(Bid {
            points,
            card,
            bidder: seat,
            stage,
        });
        self.log(seat, ActionKind::MakeBid { points, card });
        self.active = seat.next();
        Ok(())
    }

    /// Declines to bid. Closing the first stage deals the rest of the cards;
    /// closing the second locks the winning bid and starts play.
    pub fn pass(&mut self, seat: Seat) -> Result<PassProgress, BidError> {
        let stage = self.bidding_stage()?;
        if seat != self.active {
            return Err(BidError::OutOfTurn {
                expected: self.active,
                actual: seat,
            });
        }
        if self.bidding.winning_bid().is_none() && seat == self.starting {
            return Err(BidError::OpeningSeatMustBid);
        }
        self.bidding.record_pass();
        // A winning bidder may have taken the trump card back to reconsider;
        // it goes back in the slot as soon as the auction moves on.
        if let Some(winning) = self.bidding.winning_bid()
            && self.trump.card().is_none()
        {
            self.hands[winning.bidder.index()].remove(winning.card);
            self.trump.select(winning.card, winning.bidder);
        }
        self.log(seat, ActionKind::Pass);
        if !self.bidding.should_advance() {
            self.active = seat.next();
            return Ok(PassProgress::Continue);
        }
        match stage {
            BidStage::First => {
                self.bidding.advance_stage();
                self.deal_four_each();
                self.stage = RoundStage::Bidding(BidStage::Second);
                self.active = match self.bidding.winning_bid() {
                    Some(winning) => winning.bidder,
                    None => self.starting,
                };
                Ok(PassProgress::SecondStage)
            }
            BidStage::Second => {
                if self.bidding.winning_bid().is_some() {
                    self.stage = RoundStage::Playing;
                    self.trick = Trick::new(self.starting);
                    self.active = self.starting;
                    Ok(PassProgress::PlayBegins)
                } else {
                    self.stage = RoundStage::Ending;
                    Ok(PassProgress::DeadRound)
                }
            }
        }
    }

    /// Cards the seat may legally play or bid on right now. Pure; never
    /// records anything.
    pub fn legal_cards(&self, seat: Seat) -> Vec<Card> {
        let hand = &self.hands[seat.index()];
        match self.stage {
            RoundStage::Bidding(_) => hand.cards().to_vec(),
            RoundStage::Ending => Vec::new(),
            RoundStage::Playing => {
                let mut eligible = hand.cards().to_vec();
                if !self.trick.is_empty() {
                    let must_follow = if self.just_called == Some(seat) {
                        self.trump.suit()
                    } else {
                        self.trick.lead_suit()
                    };
                    if let Some(suit) = must_follow {
                        let following: Vec<Card> = hand.cards_of_suit(suit).collect();
                        if !following.is_empty() {
                            eligible = following;
                        }
                    }
                }
                // Until the reveal the bidder keeps the trump suit hidden,
                // so they may not play from it voluntarily.
                if self.trump.bidder() == Some(seat)
                    && !self.trump.is_called()
                    && self.trick.lead_suit() != self.trump.suit()
                {
                    let non_trump: Vec<Card> = eligible
                        .iter()
                        .copied()
                        .filter(|c| Some(c.suit) != self.trump.suit())
                        .collect();
                    if !non_trump.is_empty() {
                        eligible = non_trump;
                    }
                }
                eligible
            }
        }
    }

    /// Whether the seat may demand the trump reveal right now: it must be
    /// their turn, with trump uncalled, and they must be void of the lead
    /// suit, or be the bidder leading the final trick.
    pub fn can_call_trump(&self, seat: Seat) -> bool {
        if self.stage != RoundStage::Playing || self.trump.is_called() || seat != self.active {
            return false;
        }
        if self.trump.card().is_none() {
            return false;
        }
        match self.trick.lead_suit() {
            Some(lead) => self.hands[seat.index()].is_void_of(lead),
            None => self.trump.bidder() == Some(seat) && self.is_last_trick(),
        }
    }

    /// Reveals trump: the concealed card rejoins the bidder's hand and every
    /// trump-suit card in hands and on the table gets its rank boost.
    pub fn call_trump(&mut self, seat: Seat) -> Result<(), CallError> {
        if self.stage != RoundStage::Playing {
            return Err(CallError::NotPlaying);
        }
        if self.trump.is_called() {
            return Err(CallError::AlreadyCalled);
        }
        if !self.can_call_trump(seat) {
            return Err(CallError::NotEligible);
        }
        self.reveal_trump();
        self.just_called = Some(seat);
        self.log(seat, ActionKind::CallTrump);
        Ok(())
    }

    /// The reveal mutation itself, also usable when building mid-round
    /// scenarios in tests.
    pub fn reveal_trump(&mut self) {
        let (Some(card), Some(bidder)) = (self.trump.card(), self.trump.bidder()) else {
            return;
        };
        self.trump.mark_called();
        self.hands[bidder.index()].add(card);
        for hand in &mut self.hands {
            hand.boost_suit_ranks(card.suit);
        }
        self.trick.boost_suit_ranks(card.suit);
    }

    /// Plays a card to the current trick, updating the public knowledge
    /// ledger and, on trick completion, the round score.
    pub fn play_card(&mut self, seat: Seat, card: Card) -> Result<PlayOutcome, PlayError> {
        if self.stage != RoundStage::Playing {
            return Err(PlayError::NotPlaying);
        }
        if seat != self.active {
            return Err(PlayError::OutOfTurn {
                expected: self.active,
                actual: seat,
            });
        }
        // Play the hand's own copy so the current rank is the boosted one.
        let legal = self.legal_cards(seat);
        let Some(held) = legal.iter().copied().find(|c| *c == card) else {
            return Err(PlayError::NotEligible(card));
        };

        let led_trick = self.trick.is_empty();
        let lead_suit = self.trick.lead_suit();
        let contests_win = led_trick
            || Some(held.suit) == lead_suit
            || (self.trump.is_called() && Some(held.suit) == self.trump.suit());

        self.trick
            .play(seat, held, contests_win)
            .map_err(PlayError::Trick)?;
        self.hands[seat.index()].remove(held);

        if led_trick {
            // A bidder leading a suit before the reveal shows it cannot be
            // trump. Leading the trump suit itself only happens when forced,
            // and recording it would put a lie in the ledger.
            if self.trump.bidder() == Some(seat)
                && !self.trump.is_called()
                && Some(held.suit) != self.trump.suit()
            {
                self.knowledge.mark_not_trump(held.suit);
            }
        } else if let Some(lead) = lead_suit
            && held.suit != lead
        {
            self.knowledge.mark_void(seat, lead);
        }

        if self.trump.is_called() && self.trump.card() == Some(held) {
            self.trump.mark_played();
        }
        if self.just_called == Some(seat) {
            self.just_called = None;
        }
        self.log(seat, ActionKind::PlayCard(held));

        if !self.trick.is_complete() {
            self.active = self.trick.seat_to_play();
            return Ok(PlayOutcome::Continue);
        }

        let winner = self.trick.winning_seat().unwrap_or(self.trick.leader());
        let points = self.trick.points();
        self.round_points[winner.team().index()] += points;

        if let Some(team) = self.decided_winner() {
            self.stage = RoundStage::Ending;
            self.winning_team = Some(team);
            return Ok(PlayOutcome::RoundOver { winner: team });
        }

        debug_assert!((self.tricks_completed as usize) < INITIAL_HAND_SIZE - 1);
        self.tricks_completed += 1;
        self.trick = Trick::new(winner);
        self.active = winner;
        Ok(PlayOutcome::TrickComplete { winner, points })
    }

    /// The bidding side wins on reaching its bid; the defenders win the
    /// moment the bidder can no longer get there.
    fn decided_winner(&self) -> Option<Team> {
        let winning = self.bidding.winning_bid()?;
        let bid_team = winning.bidder.team();
        let defenders = bid_team.opponent();
        if self.round_points[bid_team.index()] >= winning.points {
            Some(bid_team)
        } else if self.round_points[defenders.index()] > POINTS_IN_DECK - winning.points {
            Some(defenders)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::face::Face;
    use crate::model::suit::Suit;

    fn card(face: Face, suit: Suit) -> Card {
        Card::new(face, suit)
    }

    fn full_hands() -> [Hand; 4] {
        // North gets spades, East hearts, South diamonds, West clubs.
        let suits = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
        std::array::from_fn(|i| Hand::with_cards(Face::ORDERED.map(|f| card(f, suits[i]))))
    }

    fn playing_round() -> Round {
        let mut round = Round::from_hands(full_hands(), Seat::North, RoundStage::Playing);
        round.install_winning_bid(Bid {
            points: 16,
            card: card(Face::Seven, Suit::Spades),
            bidder: Seat::North,
            stage: BidStage::First,
        });
        round
    }

    #[test]
    fn deal_gives_four_then_eight_cards() {
        let deck = Deck::shuffled_with_seed(1);
        let mut round = Round::deal(&deck, Seat::North);
        for seat in Seat::LOOP {
            assert_eq!(round.hand(seat).len(), 4);
        }
        let trump = round.hand(Seat::North).cards()[0];
        round.submit_bid(Seat::North, 14, trump).unwrap();
        round.pass(Seat::East).unwrap();
        round.pass(Seat::South).unwrap();
        assert_eq!(round.pass(Seat::West).unwrap(), PassProgress::SecondStage);
        assert_eq!(round.stage(), RoundStage::Bidding(BidStage::Second));
        assert_eq!(round.hand(Seat::East).len(), 8);
        // The winning bidder's hand is one short: a card sits in the slot.
        assert_eq!(round.hand(Seat::North).len(), 7);
        assert_eq!(round.active_seat(), Seat::North);
    }

    #[test]
    fn opening_seat_cannot_pass_without_a_bid() {
        let deck = Deck::shuffled_with_seed(2);
        let mut round = Round::deal(&deck, Seat::East);
        assert_eq!(round.pass(Seat::East), Err(BidError::OpeningSeatMustBid));
        let trump = round.hand(Seat::East).cards()[0];
        round.submit_bid(Seat::East, 14, trump).unwrap();
        round.pass(Seat::South).unwrap();
    }

    #[test]
    fn a_new_bid_displaces_the_provisional_trump() {
        let deck = Deck::shuffled_with_seed(3);
        let mut round = Round::deal(&deck, Seat::North);
        let first = round.hand(Seat::North).cards()[0];
        round.submit_bid(Seat::North, 14, first).unwrap();
        assert_eq!(round.trump().card(), Some(first));
        assert_eq!(round.hand(Seat::North).len(), 3);

        let second = round.hand(Seat::East).cards()[0];
        round.submit_bid(Seat::East, 15, second).unwrap();
        assert_eq!(round.trump().card(), Some(second));
        assert_eq!(round.trump().bidder(), Some(Seat::East));
        // North's card came back.
        assert_eq!(round.hand(Seat::North).len(), 4);
        assert!(round.hand(Seat::North).contains(first));
    }

    #[test]
    fn bids_outside_the_stage_range_are_rejected() {
        let deck = Deck::shuffled_with_seed(4);
        let mut round = Round::deal(&deck, Seat::North);
        let trump = round.hand(Seat::North).cards()[0];
        assert_eq!(
            round.submit_bid(Seat::North, 13, trump),
            Err(BidError::BelowMinimum {
                minimum: 14,
                points: 13
            })
        );
        assert_eq!(
            round.submit_bid(Seat::North, 21, trump),
            Err(BidError::AboveMaximum {
                maximum: 20,
                points: 21
            })
        );
        round.submit_bid(Seat::North, 14, trump).unwrap();
        let other = round.hand(Seat::East).cards()[0];
        assert_eq!(
            round.submit_bid(Seat::East, 14, other),
            Err(BidError::BelowMinimum {
                minimum: 15,
                points: 14
            })
        );
    }

    #[test]
    fn unselect_and_pass_reinstates_the_winning_trump() {
        let deck = Deck::shuffled_with_seed(5);
        let mut round = Round::deal(&deck, Seat::North);
        let trump = round.hand(Seat::North).cards()[0];
        round.submit_bid(Seat::North, 14, trump).unwrap();
        round.unselect_trump(Seat::North).unwrap();
        assert_eq!(round.trump().card(), None);
        assert!(round.hand(Seat::North).contains(trump));
        round.pass(Seat::East).unwrap();
        assert_eq!(round.trump().card(), Some(trump));
        assert!(!round.hand(Seat::North).contains(trump));
    }

    #[test]
    fn closing_the_second_stage_begins_play() {
        let mut round =
            Round::from_hands(full_hands(), Seat::North, RoundStage::Bidding(BidStage::Second));
        // The starting seat cannot pass its way out even here.
        round.pass(Seat::North).unwrap_err();
        let opening = round.hand(Seat::North).cards()[0];
        round.submit_bid(Seat::North, 24, opening).unwrap();
        round.pass(Seat::East).unwrap();
        round.pass(Seat::South).unwrap();
        assert_eq!(round.pass(Seat::West).unwrap(), PassProgress::PlayBegins);
        assert_eq!(round.stage(), RoundStage::Playing);
    }

    #[test]
    fn following_suit_is_enforced() {
        let mut round = playing_round();
        round.play_card(Seat::North, card(Face::Jack, Suit::Spades)).unwrap();
        // East holds no spades, so the whole hand is legal.
        assert_eq!(round.legal_cards(Seat::East).len(), 8);
        // Give East a spade and the rule bites.
        let mut hands = full_hands();
        hands[Seat::East.index()] = Hand::with_cards([
            card(Face::Jack, Suit::Spades),
            card(Face::Seven, Suit::Hearts),
        ]);
        let mut round = Round::from_hands(hands, Seat::North, RoundStage::Playing);
        round.install_winning_bid(Bid {
            points: 16,
            card: card(Face::Seven, Suit::Clubs),
            bidder: Seat::West,
            stage: BidStage::First,
        });
        round.play_card(Seat::North, card(Face::Nine, Suit::Spades)).unwrap();
        let legal = round.legal_cards(Seat::East);
        assert_eq!(legal, vec![card(Face::Jack, Suit::Spades)]);
    }

    #[test]
    fn bidder_may_not_play_from_the_hidden_trump_suit() {
        let mut hands = full_hands();
        hands[Seat::North.index()] = Hand::with_cards([
            card(Face::Jack, Suit::Spades),
            card(Face::Nine, Suit::Spades),
            card(Face::Seven, Suit::Hearts),
        ]);
        let mut round = Round::from_hands(hands, Seat::North, RoundStage::Playing);
        round.install_winning_bid(Bid {
            points: 16,
            card: card(Face::Ace, Suit::Spades),
            bidder: Seat::North,
            stage: BidStage::First,
        });
        let legal = round.legal_cards(Seat::North);
        assert_eq!(legal, vec![card(Face::Seven, Suit::Hearts)]);
        // Once only trump remains, the restriction yields.
        let mut round2 = {
            let mut hands = full_hands();
            hands[Seat::North.index()] =
                Hand::with_cards([card(Face::Jack, Suit::Spades), card(Face::Nine, Suit::Spades)]);
            Round::from_hands(hands, Seat::North, RoundStage::Playing)
        };
        round2.install_winning_bid(Bid {
            points: 16,
            card: card(Face::Ace, Suit::Spades),
            bidder: Seat::North,
            stage: BidStage::First,
        });
        assert_eq!(round2.legal_cards(Seat::North).len(), 2);
    }

    #[test]
    fn discarding_marks_the_seat_void_and_bidder_leads_rule_out_trump() {
        let mut round = playing_round();
        // North is the bidder; leading a spade rules spades out as trump...
        round.play_card(Seat::North, card(Face::Jack, Suit::Spades)).unwrap();
        assert!(!round.knowledge().is_known_not_trump(Suit::Spades));
        // ...except North's trump IS a spade, so nothing was revealed there.
        // East discards a heart and is now known void of spades.
        round.play_card(Seat::East, card(Face::Seven, Suit::Hearts)).unwrap();
        assert!(round.knowledge().is_known_empty(Seat::East, Suit::Spades));
        assert!(!round.knowledge().is_known_empty(Seat::South, Suit::Spades));
    }

    #[test]
    fn bidder_lead_records_a_ruled_out_trump_suit() {
        let mut hands = full_hands();
        // Bidder North holds hearts besides the concealed spade trump.
        hands[Seat::North.index()] = Hand::with_cards([
            card(Face::Jack, Suit::Spades),
            card(Face::King, Suit::Hearts),
        ]);
        hands[Seat::East.index()] = Hand::with_cards([card(Face::Ace, Suit::Hearts)]);
        let mut round = Round::from_hands(hands, Seat::North, RoundStage::Playing);
        round.install_winning_bid(Bid {
            points: 16,
            card: card(Face::Jack, Suit::Spades),
            bidder: Seat::North,
            stage: BidStage::First,
        });
        round.play_card(Seat::North, card(Face::King, Suit::Hearts)).unwrap();
        assert!(round.knowledge().is_known_not_trump(Suit::Hearts));
        assert!(!round.knowledge().is_known_not_trump(Suit::Spades));
    }

    #[test]
    fn call_trump_boosts_ranks_and_forces_the_caller_to_follow_trump() {
        let mut hands = full_hands();
        hands[Seat::East.index()] = Hand::with_cards([
            card(Face::Seven, Suit::Hearts),
            card(Face::Seven, Suit::Diamonds),
        ]);
        let mut round = Round::from_hands(hands, Seat::North, RoundStage::Playing);
        round.install_winning_bid(Bid {
            points: 16,
            card: card(Face::Nine, Suit::Hearts),
            bidder: Seat::South,
            stage: BidStage::First,
        });
        round.play_card(Seat::North, card(Face::Jack, Suit::Spades)).unwrap();
        assert!(round.can_call_trump(Seat::East));
        round.call_trump(Seat::East).unwrap();
        assert!(round.trump().is_called());
        assert_eq!(round.just_called(), Some(Seat::East));
        // The concealed nine of hearts is back in South's hand, boosted.
        assert!(round.hand(Seat::South).contains(card(Face::Nine, Suit::Hearts)));
        let nine = round
            .hand(Seat::South)
            .cards_of_suit(Suit::Hearts)
            .next()
            .unwrap();
        assert!(nine.is_boosted());
        // The caller holds a heart, so they must play it.
        assert_eq!(round.legal_cards(Seat::East), vec![card(Face::Seven, Suit::Hearts)]);
        round.play_card(Seat::East, card(Face::Seven, Suit::Hearts)).unwrap();
        assert_eq!(round.just_called(), None);
        // The boosted seven of hearts captured the jack of spades.
        assert_eq!(round.current_trick().winning_seat(), Some(Seat::East));
    }

    #[test]
    fn mid_trick_call_boosts_the_table_but_not_the_cached_winner() {
        let hands = [
            Hand::with_cards([card(Face::King, Suit::Hearts)]),
            Hand::with_cards([card(Face::Seven, Suit::Diamonds)]),
            Hand::with_cards([card(Face::Nine, Suit::Hearts), card(Face::Ace, Suit::Hearts)]),
            Hand::with_cards([card(Face::Seven, Suit::Spades)]),
        ];
        let mut round = Round::from_hands(hands, Seat::North, RoundStage::Playing);
        round.install_winning_bid(Bid {
            points: 16,
            card: card(Face::Nine, Suit::Hearts),
            bidder: Seat::South,
            stage: BidStage::First,
        });
        // A heart leads before anyone knows hearts are trump.
        round.play_card(Seat::North, card(Face::King, Suit::Hearts)).unwrap();
        assert_eq!(round.current_trick().winning_rank(), Face::King.rank());
        round.call_trump(Seat::East).unwrap();
        // The king on the table is boosted; the cached winning rank is not.
        assert!(round.current_trick().plays()[0].card.is_boosted());
        assert_eq!(round.current_trick().winning_rank(), Face::King.rank());
        // So are the bidder's hearts, the returned nine included.
        assert!(round.hand(Seat::South).cards_of_suit(Suit::Hearts).all(|c| c.is_boosted()));
        // A trump played after the call beats the unboosted record.
        round.play_card(Seat::East, card(Face::Seven, Suit::Diamonds)).unwrap();
        round.play_card(Seat::South, card(Face::Ace, Suit::Hearts)).unwrap();
        assert_eq!(round.current_trick().winning_seat(), Some(Seat::South));
    }

    #[test]
    fn bidder_may_call_when_leading_the_last_trick() {
        let mut hands: [Hand; 4] = std::array::from_fn(|i| {
            let suits = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
            Hand::with_cards([card(Face::Seven, suits[i])])
        });
        hands[Seat::North.index()] = Hand::new();
        let mut round = Round::from_hands(hands, Seat::North, RoundStage::Playing);
        round.install_winning_bid(Bid {
            points: 24,
            card: card(Face::Jack, Suit::Spades),
            bidder: Seat::North,
            stage: BidStage::Second,
        });
        assert!(!round.can_call_trump(Seat::North));
        for _ in 0..7 {
            // Not actually playable here; force the trick counter instead.
            round.tricks_completed += 1;
        }
        assert!(round.is_last_trick());
        assert!(round.can_call_trump(Seat::North));
        round.call_trump(Seat::North).unwrap();
        assert_eq!(round.legal_cards(Seat::North), vec![card(Face::Jack, Suit::Spades)]);
    }

    #[test]
    fn round_ends_when_the_bid_is_made_or_broken() {
        // North/South hold every honor in spades and diamonds; East/West
        // cannot stop a 16 bid once North runs spades.
        let mut round = playing_round();
        let mut outcome = PlayOutcome::Continue;
        'outer: for face in Face::ORDERED {
            for seat in [Seat::North, Seat::East, Seat::South, Seat::West] {
                let suits = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
                let played = card(face, suits[seat.index()]);
                outcome = round.play_card(seat, played).unwrap();
                if matches!(outcome, PlayOutcome::RoundOver { .. }) {
                    break 'outer;
                }
            }
        }
        // North wins every trick. Four jacks are 12 points, four nines 8
        // more, so the 16 bid lands when the second trick closes.
        assert_eq!(
            outcome,
            PlayOutcome::RoundOver {
                winner: Team::NorthSouth
            }
        );
        assert_eq!(round.stage(), RoundStage::Ending);
        assert_eq!(round.winning_team(), Some(Team::NorthSouth));
        assert_eq!(round.round_points(Team::NorthSouth), 20);
    }

    #[test]
    fn action_log_ids_are_round_scoped_and_monotonic() {
        let deck = Deck::shuffled_with_seed(9);
        let mut round = Round::deal(&deck, Seat::North);
        let trump = round.hand(Seat::North).cards()[0];
        round.submit_bid(Seat::North, 14, trump).unwrap();
        round.pass(Seat::East).unwrap();
        round.pass(Seat::South).unwrap();
        round.pass(Seat::West).unwrap();
        let ids: Vec<u32> = round.actions().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);

        let other = Round::deal(&deck, Seat::East);
        assert!(other.actions().is_empty());
    }

    #[test]
    fn card_accounting_holds_through_a_trick() {
        let mut round = playing_round();
        let in_hands = |r: &Round| -> usize { Seat::LOOP.iter().map(|s| r.hand(*s).len()).sum() };
        let slot = |r: &Round| usize::from(r.trump().card().is_some() && !r.trump().is_called());
        assert_eq!(in_hands(&round) + slot(&round), 32);
        round.play_card(Seat::North, card(Face::Jack, Suit::Spades)).unwrap();
        round.play_card(Seat::East, card(Face::Jack, Suit::Hearts)).unwrap();
        assert_eq!(
            in_hands(&round) + slot(&round) + round.current_trick().plays().len(),
            32
        );
    }
}
