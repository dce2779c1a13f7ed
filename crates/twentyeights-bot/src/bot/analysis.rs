//! What a seat can and cannot see of the table.

use twentyeights_core::model::{ActionKind, Card, Face, Round, Seat, SeatSet, Suit, Team};

/// What remains unseen of one suit from a single seat's point of view.
#[derive(Debug, Clone, Default)]
pub struct SuitUnseen {
    /// Unseen cards of the suit.
    pub count: usize,
    /// Highest current rank among them, zero when none remain.
    pub top_rank: u8,
    /// The unseen honors, strongest first.
    pub honor_cards: Vec<Card>,
    /// Their combined point value.
    pub honor_points: u8,
}

/// The cards a seat cannot account for: everything outside its own hand that
/// has not been played to a trick. The concealed trump card counts as unseen
/// to everyone but the bidder until it is called.
#[derive(Debug, Clone)]
pub struct OtherHands {
    suits: [SuitUnseen; 4],
    population: usize,
}

impl OtherHands {
    pub fn project(round: &Round, seat: Seat) -> OtherHands {
        let mut seen: Vec<Card> = round.hand(seat).cards().to_vec();
        for action in round.actions() {
            if let ActionKind::PlayCard(card) = action.kind {
                seen.push(card);
            }
        }
        let trump = round.trump();
        if trump.bidder() == Some(seat)
            && !trump.is_called()
            && let Some(card) = trump.card()
        {
            seen.push(card);
        }

        let mut suits: [SuitUnseen; 4] = Default::default();
        let mut population = 0;
        for suit in Suit::ALL {
            for face in Face::ORDERED {
                let mut card = Card::new(face, suit);
                if seen.contains(&card) {
                    continue;
                }
                if trump.is_called() && trump.suit() == Some(suit) {
                    card.boost_rank();
                }
                let entry = &mut suits[suit.index()];
                entry.count += 1;
                entry.top_rank = entry.top_rank.max(card.current_rank());
                if card.is_honor() {
                    entry.honor_cards.push(card);
                    entry.honor_points += card.points();
                }
                population += 1;
            }
        }
        OtherHands { suits, population }
    }

    pub fn suit(&self, suit: Suit) -> &SuitUnseen {
        &self.suits[suit.index()]
    }

    /// Total number of unseen cards across all suits.
    pub fn population(&self) -> usize {
        self.population
    }
}

/// The seats still to act in the current trick, snapshotted together with the
/// public void record so the chance calculations can filter cheaply.
#[derive(Debug, Clone, Copy)]
pub struct Following {
    seats: SeatSet,
    known_empty: [SeatSet; 4],
}

impl Following {
    pub fn of_round(round: &Round) -> Following {
        Following {
            seats: round.current_trick().following_seats(),
            known_empty: std::array::from_fn(|i| {
                round.knowledge().seats_known_empty(Suit::ALL[i])
            }),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_parts(seats: SeatSet, known_empty: [SeatSet; 4]) -> Following {
        Following { seats, known_empty }
    }

    pub fn all(self) -> SeatSet {
        self.seats
    }

    pub fn of_team(self, team: Team) -> SeatSet {
        self.seats.intersection(SeatSet::of_team(team))
    }

    /// Following seats that could still hold a card of the suit.
    pub fn not_empty(self, suit: Suit) -> SeatSet {
        self.seats.difference(self.known_empty[suit.index()])
    }

    pub fn of_team_not_empty(self, team: Team, suit: Suit) -> SeatSet {
        self.of_team(team)
            .difference(self.known_empty[suit.index()])
    }

    pub fn of_team_known_empty(self, team: Team, suit: Suit) -> SeatSet {
        self.of_team(team)
            .intersection(self.known_empty[suit.index()])
    }
}
