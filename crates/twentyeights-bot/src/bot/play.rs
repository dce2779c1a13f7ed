//! Choosing a card: every legal play is scored by its chance of taking the
//! trick and the honor points riding on either outcome, then a few overrides
//! correct the raw ranking when the trick is already decided.

use tracing::{Level, event};

use twentyeights_core::model::{Card, Round, Seat, SeatSet, Suit, Team};

use crate::bot::BotContext;
use crate::bot::analysis::{Following, OtherHands};
use crate::bot::expected::{ExpectedPoints, team_points_for_suit};
use crate::bot::params;
use crate::bot::prob::hyper_geo_prob;

/// The verdict on one legal card.
#[derive(Debug, Clone, Copy)]
pub struct CardEvaluation {
    pub card: Card,
    pub win_chance: f64,
    /// Trick points banked if the side takes the trick.
    pub win_points: f64,
    /// Trick points surrendered if it does not.
    pub lose_points: f64,
}

impl CardEvaluation {
    pub fn net_expected_points(&self) -> f64 {
        self.win_chance * self.win_points - (1.0 - self.win_chance) * self.lose_points
    }
}

/// What is already known about one following seat, relative to the suit
/// under evaluation. Two partner seats with identical knowledge are pooled
/// into a single distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct SeatKnown {
    empty_of_lead: bool,
    empty_of_trump: bool,
    holds_the_trump: bool,
}

/// A team's prospects against one candidate suit.
#[derive(Debug, Clone, Copy, Default)]
struct TeamOutlook {
    /// Chance the team takes the trick with a trump.
    trump_chance: f64,
    /// Honor points the team is expected to play to the trick.
    expected: ExpectedPoints,
}

/// The expected value of the card a seat plays, split by what it follows
/// with: the suit led, a trump, or a throwaway from elsewhere.
#[derive(Debug, Clone, Copy, Default)]
struct PointsWhenPlaying {
    lead: ExpectedPoints,
    trump: ExpectedPoints,
    other: ExpectedPoints,
}

enum TrickOutlook {
    CertainWin,
    CertainLoss,
    Contested,
}

/// Picks the card with the best expected points swing.
pub struct PlayPlanner;

impl PlayPlanner {
    pub fn choose(legal: &[Card], ctx: &BotContext<'_>) -> Option<Card> {
        let first = *legal.first()?;
        if legal.len() == 1 {
            return Some(first);
        }
        let evaluator = Evaluator::new(ctx);
        let ranked = evaluator.rank_candidates(legal);
        let chosen = evaluator.apply_overrides(&ranked);
        log_play(ctx, &ranked, chosen);
        Some(chosen)
    }
}

struct Evaluator<'a> {
    seat: Seat,
    round: &'a Round,
    hand_size: usize,
    other: OtherHands,
    following: Following,
    /// The trump suit as far as this seat knows it.
    trump_suit: Option<Suit>,
    /// Per relevant suit, per team: trump chance and expected points.
    outlooks: [[TeamOutlook; 2]; 4],
    opponents_out_trump_partner: f64,
}

impl<'a> Evaluator<'a> {
    fn new(ctx: &BotContext<'a>) -> Evaluator<'a> {
        let round = ctx.round;
        let seat = ctx.seat;
        let trump_suit = if round.trump().known_to(seat) {
            round.trump().suit()
        } else {
            None
        };
        let mut evaluator = Evaluator {
            seat,
            round,
            hand_size: ctx.hand_size(),
            other: OtherHands::project(round, seat),
            following: Following::of_round(round),
            trump_suit,
            outlooks: Default::default(),
            opponents_out_trump_partner: 0.0,
        };
        evaluator.opponents_out_trump_partner = evaluator.chance_opponents_out_trump_partner();
        for suit in Suit::ALL {
            evaluator.outlooks[suit.index()] = evaluator.build_outlooks(suit);
        }
        evaluator
    }

    fn rank_candidates(&self, legal: &[Card]) -> Vec<CardEvaluation> {
        let mut ranked: Vec<CardEvaluation> =
            legal.iter().map(|c| self.evaluate(*c)).collect();
        ranked.sort_by(|a, b| {
            b.net_expected_points()
                .total_cmp(&a.net_expected_points())
                .then(b.win_chance.total_cmp(&a.win_chance))
                .then(a.card.current_rank().cmp(&b.card.current_rank()))
        });
        ranked
    }

    fn evaluate(&self, card: Card) -> CardEvaluation {
        let trick = self.round.current_trick();
        let relevant = trick.lead_suit().unwrap_or(card.suit);
        let my_team = self.seat.team();
        let opponents = my_team.opponent();
        let outlook = &self.outlooks[relevant.index()];

        // Once trump is out, a card above every unseen trump cannot be cut.
        let beats_all_trumps = match self.trump_suit {
            Some(trump) if self.round.trump().is_called() => {
                card.current_rank() > self.other.suit(trump).top_rank
            }
            _ => false,
        };
        let (ours, theirs) = if beats_all_trumps {
            (0.0, 0.0)
        } else {
            (
                outlook[my_team.index()].trump_chance,
                outlook[opponents.index()].trump_chance,
            )
        };

        let top_rank = self.chance_my_side_plays_top_rank(card, relevant);
        let no_cut = 1.0 - (ours + theirs).min(1.0);
        let win_chance = (top_rank * no_cut
            + ours * (1.0 - theirs)
            + ours * theirs * (1.0 - self.opponents_out_trump_partner))
            .min(1.0);

        let on_table = f64::from(trick.points()) + f64::from(card.points());
        let my_points = outlook[my_team.index()].expected;
        let their_points = outlook[opponents.index()].expected;
        CardEvaluation {
            card,
            win_chance,
            win_points: on_table + my_points.winning + their_points.losing,
            lose_points: on_table + my_points.losing + their_points.winning,
        }
    }

    /// Chance the trick falls to this card or to the partner's best card of
    /// the relevant suit, before any cutting is accounted for.
    fn chance_my_side_plays_top_rank(&self, card: Card, relevant: Suit) -> f64 {
        let trick = self.round.current_trick();
        let unseen = self.other.suit(relevant);
        let follows = trick.is_empty()
            || trick.lead_suit() == Some(card.suit)
            || (self.round.trump().is_called() && self.round.trump().suit() == Some(card.suit));
        let wins_now = (card.current_rank() > unseen.top_rank || trick.plays().len() == 3)
            && card.current_rank() > trick.winning_rank();
        if follows && wins_now {
            return 1.0;
        }

        let partner = self.seat.partner();
        let partner_can_play = self.following.not_empty(relevant).contains(partner);
        let top_rank_beaten = trick.winning_rank() > unseen.top_rank;
        if !partner_can_play {
            return if top_rank_beaten && trick.winning_seat() == Some(partner) {
                1.0
            } else {
                0.0
            };
        }

        // The bidder knows when the top card of the suit is the concealed
        // trump itself; nobody is going to play it to this trick.
        let trump = self.round.trump();
        let top_is_concealed_trump = !trump.is_called()
            && trump.bidder() == Some(self.seat)
            && trump
                .card()
                .is_some_and(|c| c.suit == relevant && c.current_rank() > unseen.top_rank);
        if !top_is_concealed_trump && !top_rank_beaten {
            let contenders = self
                .following
                .not_empty(relevant)
                .intersection(SeatSet::of_team(self.seat.team().opponent()))
                .len();
            1.0 / (1.0 + contenders as f64)
        } else {
            0.0
        }
    }

    fn build_outlooks(&self, relevant: Suit) -> [TeamOutlook; 2] {
        let population = self.other.population();
        let mut out = [TeamOutlook::default(); 2];
        for team in Team::ALL {
            let points = PointsWhenPlaying {
                lead: team_points_for_suit(
                    self.other.suit(relevant),
                    self.following,
                    team,
                    relevant,
                    self.hand_size,
                    population,
                ),
                trump: match self.trump_suit {
                    Some(trump) => team_points_for_suit(
                        self.other.suit(trump),
                        self.following,
                        team,
                        trump,
                        self.hand_size,
                        population,
                    ),
                    None => ExpectedPoints::default(),
                },
                other: self.off_suit_points(relevant),
            };
            out[team.index()] = self.team_outlook(team, relevant, &points);
        }
        out
    }

    /// Combines, for each following seat of the team, the chance it is void
    /// of the relevant suit with the chance it can produce a trump. Partner
    /// seats with identical knowledge collapse into one pooled pass.
    fn team_outlook(&self, team: Team, relevant: Suit, points: &PointsWhenPlaying) -> TeamOutlook {
        let known: Vec<SeatKnown> = self
            .following
            .of_team(team)
            .iter()
            .map(|s| self.seat_known(s, relevant))
            .collect();
        let pooled = known.len() == 2 && known[0] == known[1];
        let states = if pooled { &known[..1] } else { &known[..] };

        let mut outlook = TeamOutlook::default();
        for state in states {
            let has_trumps = if state.holds_the_trump {
                1.0
            } else if state.empty_of_trump {
                0.0
            } else {
                self.chance_has_trumps(team, relevant, pooled)
            };
            let can_cut = if state.empty_of_lead {
                1.0
            } else {
                self.chance_empty_of_suit(team, relevant, pooled)
            };
            let plays_trump = can_cut * has_trumps;
            outlook.trump_chance += plays_trump;
            outlook.expected += seat_points(points, can_cut, plays_trump);
        }
        outlook.trump_chance = outlook.trump_chance.min(1.0);
        outlook
    }

    fn seat_known(&self, seat: Seat, relevant: Suit) -> SeatKnown {
        let ledger = self.round.knowledge();
        let empty_of_lead = ledger.is_known_empty(seat, relevant)
            || self.other.suit(relevant).count == 0;
        let empty_of_trump = match self.trump_suit {
            Some(trump) => {
                ledger.is_known_empty(seat, trump) || self.other.suit(trump).count == 0
            }
            None => false,
        };
        let trump = self.round.trump();
        let holds_the_trump = trump.bidder() == Some(seat) && !trump.been_played();
        SeatKnown {
            empty_of_lead,
            empty_of_trump,
            holds_the_trump,
        }
    }

    /// Chance a following hand of the team was dealt none of the suit.
    fn chance_empty_of_suit(&self, team: Team, suit: Suit, pooled: bool) -> f64 {
        let candidates = SeatSet::ALL.difference(self.round.knowledge().seats_known_empty(suit));
        let population = candidates.len() * self.hand_size;
        let sample = if pooled {
            self.following.of_team_not_empty(team, suit).len() * self.hand_size
        } else {
            self.hand_size
        };
        if population == 0 || sample == 0 {
            return 0.0;
        }
        hyper_geo_prob(0, self.other.suit(suit).count, sample.min(population), population)
    }

    /// Chance at least one trump sits in the team's following hands.
    fn chance_has_trumps(&self, team: Team, relevant: Suit, pooled: bool) -> f64 {
        let (trumps_out, sample, population) = match self.trump_suit {
            Some(trump) => {
                let candidates =
                    SeatSet::ALL.difference(self.round.knowledge().seats_known_empty(relevant));
                let population = candidates.len() * self.hand_size;
                let sample = if pooled {
                    self.following.of_team_not_empty(team, trump).len() * self.hand_size
                } else {
                    self.hand_size
                };
                (self.other.suit(trump).count, sample, population)
            }
            None => {
                let hands = if pooled { 2 } else { 1 };
                (
                    self.expected_trump_count(),
                    hands * self.hand_size,
                    self.other.population(),
                )
            }
        };
        if trumps_out == 0 || sample == 0 || population == 0 {
            return 0.0;
        }
        1.0 - hyper_geo_prob(0, trumps_out, sample.min(population), population)
    }

    /// How many unseen cards the concealed trump suit probably has, judged
    /// from the suits the bidder has not ruled out.
    fn expected_trump_count(&self) -> usize {
        let candidates: Vec<Suit> = self.round.knowledge().possible_trump_suits().collect();
        match candidates.len() {
            0 => 0,
            1 => self.other.suit(candidates[0]).count,
            n => {
                let total: usize = candidates.iter().map(|s| self.other.suit(*s).count).sum();
                (total as f64 / n as f64).round() as usize
            }
        }
    }

    /// Expected value of a throwaway: the average unseen honor outside the
    /// relevant suit and, when this seat knows it, the trump suit.
    fn off_suit_points(&self, relevant: Suit) -> ExpectedPoints {
        let mut cards = 0usize;
        let mut honors = 0usize;
        let mut honor_points = 0.0;
        for suit in Suit::ALL {
            if suit == relevant || self.trump_suit == Some(suit) {
                continue;
            }
            let unseen = self.other.suit(suit);
            cards += unseen.count;
            honors += unseen.honor_cards.len();
            honor_points += f64::from(unseen.honor_points);
        }
        if honors == 0 || cards == 0 {
            return ExpectedPoints::default();
        }
        let average = honor_points / honors as f64;
        ExpectedPoints {
            winning: average,
            losing: honors as f64 / cards as f64 * average,
        }
    }

    fn chance_opponents_out_trump_partner(&self) -> f64 {
        let team = self.seat.team();
        let opponents = team.opponent();
        let (partner_count, opponent_count) = match self.trump_suit {
            Some(trump) => (
                self.following.of_team_not_empty(team, trump).len(),
                self.following.of_team_not_empty(opponents, trump).len(),
            ),
            None => (
                self.following.of_team(team).len(),
                self.following.of_team(opponents).len(),
            ),
        };
        if let Some(trump) = self.trump_suit
            && self.other.suit(trump).top_rank < self.round.current_trick().winning_rank()
        {
            return 0.0;
        }
        if opponent_count == 0 {
            return 0.0;
        }
        if partner_count == 0 {
            return 1.0;
        }
        opponent_count as f64 / (1.0 + opponent_count as f64)
    }

    fn classify(&self, top: &CardEvaluation) -> TrickOutlook {
        if top.win_chance >= params::CERTAIN_WIN {
            return TrickOutlook::CertainWin;
        }
        let trick = self.round.current_trick();
        let following = !trick.is_empty();
        let discard = following && trick.lead_suit() != Some(top.card.suit);
        if following && (top.win_chance <= params::CERTAIN_LOSS || discard) {
            return TrickOutlook::CertainLoss;
        }
        TrickOutlook::Contested
    }

    /// The best card is not always the one to play: a trick that is already
    /// decided should not consume a card the rest of the round needs.
    fn apply_overrides(&self, ranked: &[CardEvaluation]) -> Card {
        let top = &ranked[0];
        match self.classify(top) {
            TrickOutlook::Contested => top.card,
            // Losing anyway: hold on to a sole remaining top card unless the
            // suit is already being cut.
            TrickOutlook::CertainLoss => ranked
                .iter()
                .find(|e| !self.is_master(e.card) || self.suit_cuttable(e.card.suit))
                .map_or(top.card, |e| e.card),
            TrickOutlook::CertainWin => {
                let winners =
                    || ranked.iter().filter(|e| e.win_chance >= params::CERTAIN_WIN);
                // Bank a stranded honor while the trick is safe.
                let shake = winners().find(|e| {
                    self.round.hand(self.seat).holds_only_honors_in(e.card.suit)
                        && !self.unbeatable_later(e.card)
                });
                let keeps_master = winners()
                    .find(|e| !self.is_master(e.card) || self.suit_cuttable(e.card.suit));
                let spends_least = winners().find(|e| !self.unbeatable_later(e.card));
                shake
                    .or(keeps_master)
                    .or(spends_least)
                    .map_or(top.card, |e| e.card)
            }
        }
    }

    /// Above every unseen card of its suit.
    fn is_master(&self, card: Card) -> bool {
        card.current_rank() > self.other.suit(card.suit).top_rank
    }

    fn suit_cuttable(&self, suit: Suit) -> bool {
        !self.round.knowledge().seats_known_empty(suit).is_empty()
    }

    /// Whether the card would also win any later trick it contests. Unseen
    /// trump ranks only carry their boost once trump has been called, so the
    /// rank comparison is meaningless before the reveal.
    fn unbeatable_later(&self, card: Card) -> bool {
        let Some(trump) = self.trump_suit else {
            return false;
        };
        let trumps = self.other.suit(trump);
        if trumps.count == 0 {
            return self.is_master(card);
        }
        self.round.trump().is_called() && card.current_rank() > trumps.top_rank
    }
}

fn seat_points(points: &PointsWhenPlaying, can_cut: f64, plays_trump: f64) -> ExpectedPoints {
    let plays_lead = 1.0 - can_cut;
    let plays_other = 1.0 - plays_lead - plays_trump;
    points.lead * plays_lead + points.trump * plays_trump + points.other * plays_other
}

fn log_play(ctx: &BotContext<'_>, ranked: &[CardEvaluation], chosen: Card) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    let top = &ranked[0];
    event!(
        target: "twentyeights_bot::play",
        Level::DEBUG,
        seat = %ctx.seat,
        chosen = %chosen,
        best = %top.card,
        win_chance = top.win_chance,
        net = top.net_expected_points(),
    );
}
