pub mod action;
pub mod bidding;
pub mod card;
pub mod deck;
pub mod face;
pub mod hand;
pub mod knowledge;
pub mod round;
pub mod seat;
pub mod suit;
pub mod team;
pub mod trick;
pub mod trump;

pub use action::{ActionKind, PlayerAction};
pub use bidding::{Bid, BidStage, Bidding};
pub use card::Card;
pub use deck::Deck;
pub use face::Face;
pub use hand::Hand;
pub use knowledge::KnowledgeLedger;
pub use round::{
    BidError, CallError, PassProgress, PlayError, PlayOutcome, Round, RoundStage, TrumpError,
};
pub use seat::{Seat, SeatSet};
pub use suit::Suit;
pub use team::Team;
pub use trick::{Play, Trick, TrickError};
pub use trump::Trump;
