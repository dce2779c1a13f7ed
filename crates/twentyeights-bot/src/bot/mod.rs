//! The computer player: a turn selector on top of two planners, one for the
//! auction and one for trick play. Both work only from what the seat can
//! legitimately see, so the same code plays fairly in any seat.

pub mod analysis;
pub mod bid;
pub mod expected;
pub mod params;
pub mod play;
pub mod prob;

use std::sync::OnceLock;

use twentyeights_core::consts::INITIAL_HAND_SIZE;
use twentyeights_core::model::{ActionKind, Hand, Round, RoundStage, Seat};

use crate::bot::bid::BidPlanner;
use crate::bot::play::PlayPlanner;

/// Behavior switches, read once from the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BotConfig {
    /// Count lone honors below the jack at half value when sizing a bid.
    pub cautious_bidder: bool,
}

impl BotConfig {
    /// Process-wide config, read from the environment on first use.
    pub fn from_env() -> BotConfig {
        static CONFIG: OnceLock<BotConfig> = OnceLock::new();
        *CONFIG.get_or_init(|| BotConfig::from_reader(|key| std::env::var(key).ok()))
    }

    fn from_reader(read: impl Fn(&str) -> Option<String>) -> BotConfig {
        let flag = |key: &str| {
            read(key)
                .map(|raw| matches!(raw.trim(), "1" | "true" | "on"))
                .unwrap_or(false)
        };
        BotConfig {
            cautious_bidder: flag("T28_CAUTIOUS_BIDDER"),
        }
    }
}

/// Everything the planners need to act for one seat.
pub struct BotContext<'a> {
    pub seat: Seat,
    pub round: &'a Round,
    pub config: BotConfig,
}

impl<'a> BotContext<'a> {
    pub fn new(seat: Seat, round: &'a Round, config: BotConfig) -> BotContext<'a> {
        BotContext {
            seat,
            round,
            config,
        }
    }

    pub fn hand(&self) -> &'a Hand {
        self.round.hand(self.seat)
    }

    pub fn is_bidder(&self) -> bool {
        self.round.trump().bidder() == Some(self.seat)
    }

    pub fn trump_known(&self) -> bool {
        self.round.trump().known_to(self.seat)
    }

    /// Nominal cards per hand at this point in the round. Seats that already
    /// played to the open trick hold one fewer; the chance math works off
    /// the nominal size.
    pub fn hand_size(&self) -> usize {
        INITIAL_HAND_SIZE - self.round.tricks_completed() as usize
    }
}

/// The seat's whole move for the current state, or `None` once the round has
/// ended. A seat that may call trump always does.
pub fn choose_action(ctx: &BotContext<'_>) -> Option<ActionKind> {
    match ctx.round.stage() {
        RoundStage::Bidding(_) => Some(match BidPlanner::choose(ctx) {
            Some((points, card)) => ActionKind::MakeBid { points, card },
            None => ActionKind::Pass,
        }),
        RoundStage::Playing => {
            if ctx.round.can_call_trump(ctx.seat) {
                return Some(ActionKind::CallTrump);
            }
            PlayPlanner::choose(&ctx.round.legal_cards(ctx.seat), ctx).map(ActionKind::PlayCard)
        }
        RoundStage::Ending => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_reads_flags_from_the_reader() {
        let on = BotConfig::from_reader(|key| {
            (key == "T28_CAUTIOUS_BIDDER").then(|| "1".to_string())
        });
        assert!(on.cautious_bidder);
        let off = BotConfig::from_reader(|_| None);
        assert_eq!(off, BotConfig::default());
        let garbage = BotConfig::from_reader(|_| Some("sideways".to_string()));
        assert!(!garbage.cautious_bidder);
    }
}
