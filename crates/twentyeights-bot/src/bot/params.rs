//! Tuning knobs for the decision engine.

/// Baseline a bid suggestion grows from before hand strength is added.
pub const BID_BASE: f64 = 14.0;

/// Margin the suggestion must clear above the legal minimum before the
/// planner bids rather than passes.
pub const MIN_BID_BUFFER: u8 = 1;

/// Cards of one suit beyond this count add length points to a hand.
pub const EXTRA_CARD_OF_SUIT_LIMIT: usize = 2;

/// Length points per card beyond the limit.
pub const BID_POINTS_PER_EXTRA_CARD: f64 = 2.0;

/// Win chances at or above this are treated as certain.
pub const CERTAIN_WIN: f64 = 0.999;

/// Win chances at or below this are treated as hopeless.
pub const CERTAIN_LOSS: f64 = 0.001;
