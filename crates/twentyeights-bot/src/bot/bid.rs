//! Sizing a bid from the cards in hand.

use tracing::{Level, event};

use twentyeights_core::consts::POINTS_IN_DECK;
use twentyeights_core::model::{BidStage, Card, Face, Hand, RoundStage, Suit};

use crate::bot::BotContext;
use crate::bot::params;

/// One suit's contribution to the hand evaluation.
#[derive(Debug, Clone, Copy)]
struct SuitStrength {
    suit: Suit,
    count: usize,
    points: f64,
}

/// Chooses between bidding and passing during the auction.
pub struct BidPlanner;

impl BidPlanner {
    /// The points and trump card to bid, or `None` to pass. The round rejects
    /// a pass from the opening seat before any bid exists, so the planner
    /// falls back to the minimum bid in that spot.
    pub fn choose(ctx: &BotContext<'_>) -> Option<(u8, Card)> {
        let RoundStage::Bidding(stage) = ctx.round.stage() else {
            return None;
        };
        let hand = ctx.hand();
        let strengths = suit_strengths(hand, ctx.config.cautious_bidder);
        let best = strengths.iter().max_by(|a, b| {
            a.points
                .total_cmp(&b.points)
                .then(a.count.cmp(&b.count))
        })?;
        let total: f64 = strengths.iter().map(|s| s.points).sum();

        // The opening four cards hold an eighth of the deck's points on
        // average, the full hand a quarter.
        let stage_mean = match stage {
            BidStage::First => f64::from(POINTS_IN_DECK) / 8.0,
            BidStage::Second => f64::from(POINTS_IN_DECK) / 4.0,
        };
        let suggestion = (params::BID_BASE + total - stage_mean).ceil() as i32;
        let minimum = i32::from(ctx.round.bidding().min_bid_for(ctx.seat));
        let maximum = i32::from(stage.max_bid());
        let must_bid = ctx.seat == ctx.round.starting_seat()
            && ctx.round.bidding().winning_bid().is_none();

        let points = if minimum > maximum {
            // A standing bid at the stage maximum cannot be beaten, and its
            // existence makes passing legal.
            None
        } else if suggestion > minimum + i32::from(params::MIN_BID_BUFFER) {
            Some(suggestion.min(maximum))
        } else if must_bid {
            Some(minimum)
        } else {
            None
        };
        log_decision(ctx, suggestion, minimum, points);

        let points = points?;
        let card = hand
            .cards_of_suit(best.suit)
            .min_by_key(|c| c.face.rank())?;
        Some((points as u8, card))
    }
}

fn suit_strengths(hand: &Hand, cautious: bool) -> Vec<SuitStrength> {
    Suit::ALL
        .into_iter()
        .filter_map(|suit| {
            let count = hand.count_of_suit(suit);
            if count == 0 {
                return None;
            }
            let honors: f64 = hand
                .cards_of_suit(suit)
                .map(|c| f64::from(c.points()))
                .sum();
            let length = count.saturating_sub(params::EXTRA_CARD_OF_SUIT_LIMIT) as f64
                * params::BID_POINTS_PER_EXTRA_CARD;
            let mut points = honors + length;
            // A lone honor below the jack is likely to be dragged out early;
            // a cautious bidder counts it at half value.
            if cautious
                && count == 1
                && honors > 0.0
                && hand.cards_of_suit(suit).next().map(|c| c.face) != Some(Face::Jack)
            {
                points -= points / 2.0;
            }
            Some(SuitStrength {
                suit,
                count,
                points,
            })
        })
        .collect()
}

fn log_decision(ctx: &BotContext<'_>, suggestion: i32, minimum: i32, points: Option<i32>) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    match points {
        Some(points) => event!(
            target: "twentyeights_bot::bid",
            Level::DEBUG,
            seat = %ctx.seat,
            suggestion,
            minimum,
            bid = points,
        ),
        None => event!(
            target: "twentyeights_bot::bid",
            Level::DEBUG,
            seat = %ctx.seat,
            suggestion,
            minimum,
            bid = "pass",
        ),
    }
}
