#![deny(warnings)]

pub mod bot;

pub use bot::analysis::{Following, OtherHands, SuitUnseen};
pub use bot::bid::BidPlanner;
pub use bot::expected::ExpectedPoints;
pub use bot::play::{CardEvaluation, PlayPlanner};
pub use bot::{BotConfig, BotContext, choose_action};
