use std::fmt;

use crate::model::card::Card;
use crate::model::seat::Seat;

/// What a player asked the game to do on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    SelectTrump(Card),
    UnselectTrump,
    MakeBid { points: u8, card: Card },
    Pass,
    PlayCard(Card),
    CallTrump,
    StartNewRound,
    StartNewGame,
}

/// An accepted action, stamped with a round-scoped id for ordering and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerAction {
    pub id: u32,
    pub seat: Seat,
    pub kind: ActionKind,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seat = self.seat;
        match self.kind {
            ActionKind::SelectTrump(card) => write!(f, "{seat} sets {card} aside as trump"),
            ActionKind::UnselectTrump => write!(f, "{seat} takes back the trump card"),
            ActionKind::MakeBid { points, card } => {
                write!(f, "{seat} bids {points} on {card}")
            }
            ActionKind::Pass => write!(f, "{seat} passes"),
            ActionKind::PlayCard(card) => write!(f, "{seat} plays {card}"),
            ActionKind::CallTrump => write!(f, "{seat} calls for trump"),
            ActionKind::StartNewRound => write!(f, "{seat} starts a new round"),
            ActionKind::StartNewGame => write!(f, "{seat} starts a new game"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::face::Face;
    use crate::model::suit::Suit;

    #[test]
    fn actions_describe_themselves() {
        let action = PlayerAction {
            id: 3,
            seat: Seat::West,
            kind: ActionKind::MakeBid {
                points: 16,
                card: Card::new(Face::Jack, Suit::Spades),
            },
        };
        assert_eq!(action.to_string(), "West bids 16 on J♠");
    }
}
