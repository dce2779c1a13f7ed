use std::error::Error;
use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::consts::{TEAM_STARTING_SCORE, game_points_for_bid};
use crate::model::{
    ActionKind, BidError, CallError, Deck, PlayError, PlayOutcome, Round, RoundStage, Seat, Team,
    TrumpError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    Bid(BidError),
    Trump(TrumpError),
    Play(PlayError),
    Call(CallError),
    RoundStillRunning,
    GameOver,
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Bid(err) => err.fmt(f),
            ActionError::Trump(err) => err.fmt(f),
            ActionError::Play(err) => err.fmt(f),
            ActionError::Call(err) => err.fmt(f),
            ActionError::RoundStillRunning => {
                write!(f, "a new round cannot start while one is running")
            }
            ActionError::GameOver => write!(f, "the game is over"),
        }
    }
}

impl Error for ActionError {}

impl From<BidError> for ActionError {
    fn from(err: BidError) -> ActionError {
        ActionError::Bid(err)
    }
}

impl From<TrumpError> for ActionError {
    fn from(err: TrumpError) -> ActionError {
        ActionError::Trump(err)
    }
}

impl From<PlayError> for ActionError {
    fn from(err: PlayError) -> ActionError {
        ActionError::Play(err)
    }
}

impl From<CallError> for ActionError {
    fn from(err: CallError) -> ActionError {
        ActionError::Call(err)
    }
}

/// A full game of 28: successive rounds with a rotating starting seat, team
/// game scores settled after each round, and a loser once a score goes
/// negative.
#[derive(Debug)]
pub struct GameState {
    seed: u64,
    rng: StdRng,
    first_starting: Seat,
    starting: Seat,
    round_number: u32,
    scores: [i32; 2],
    winner: Option<Team>,
    round: Round,
}

impl GameState {
    pub fn new(starting: Seat) -> GameState {
        GameState::with_seed(starting, rand::random())
    }

    pub fn with_seed(starting: Seat, seed: u64) -> GameState {
        let mut rng = StdRng::seed_from_u64(seed);
        let deck = Deck::shuffled(&mut rng);
        GameState {
            seed,
            rng,
            first_starting: starting,
            starting,
            round_number: 1,
            scores: [TEAM_STARTING_SCORE; 2],
            winner: None,
            round: Round::deal(&deck, starting),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn first_starting_seat(&self) -> Seat {
        self.first_starting
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn score(&self, team: Team) -> i32 {
        self.scores[team.index()]
    }

    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    /// Routes a player action into the current round, settling the game
    /// score when a round ends.
    pub fn apply(&mut self, seat: Seat, kind: ActionKind) -> Result<(), ActionError> {
        if self.winner.is_some() && kind != ActionKind::StartNewGame {
            return Err(ActionError::GameOver);
        }
        match kind {
            ActionKind::SelectTrump(card) => self.round.select_trump(seat, card)?,
            ActionKind::UnselectTrump => self.round.unselect_trump(seat)?,
            ActionKind::MakeBid { points, card } => self.round.submit_bid(seat, points, card)?,
            ActionKind::Pass => {
                self.round.pass(seat)?;
            }
            ActionKind::CallTrump => self.round.call_trump(seat)?,
            ActionKind::PlayCard(card) => {
                if let PlayOutcome::RoundOver { .. } = self.round.play_card(seat, card)? {
                    self.settle_round();
                }
            }
            ActionKind::StartNewRound => {
                if self.round.stage() != RoundStage::Ending {
                    return Err(ActionError::RoundStillRunning);
                }
                self.start_next_round();
            }
            ActionKind::StartNewGame => self.restart(),
        }
        Ok(())
    }

    fn settle_round(&mut self) {
        let Some(winner) = self.round.winning_team() else {
            return;
        };
        let Some(bid) = self.round.bidding().winning_bid() else {
            return;
        };
        let stake = game_points_for_bid(bid.points);
        // A failed bid costs the bidding side one extra; the defenders still
        // gain only the stake.
        let mut forfeit = stake;
        if bid.bidder.team() != winner {
            forfeit += 1;
        }
        let loser = winner.opponent();
        self.scores[winner.index()] += stake;
        self.scores[loser.index()] -= forfeit;
        if self.scores[loser.index()] < TEAM_STARTING_SCORE {
            self.winner = Some(winner);
        }
    }

    pub(crate) fn set_scores(&mut self, scores: [i32; 2]) {
        self.scores = scores;
    }

    pub(crate) fn start_next_round(&mut self) {
        self.starting = self.starting.next();
        self.round_number += 1;
        let deck = Deck::shuffled(&mut self.rng);
        self.round = Round::deal(&deck, self.starting);
    }

    fn restart(&mut self) {
        *self = GameState::with_seed(self.first_starting, rand::random());
    }
}
