//! Fixed game constants for 28.

/// Sum of the honor point values of all 32 cards. The game's namesake.
pub const POINTS_IN_DECK: u8 = 28;

/// Cards held per seat once both bidding deals are complete.
pub const INITIAL_HAND_SIZE: usize = 8;

/// Offset added to the current rank of every trump-suit card when trump is
/// called, so any trump outranks every non-trump card.
pub const TRUMP_RANK_BOOST: u8 = 8;

/// Match score each partnership starts the game with. A partnership whose
/// score drops below zero loses the game.
pub const TEAM_STARTING_SCORE: i32 = 0;

/// Game points at stake for a round, scaled by how high the winning bid was.
/// The losing side forfeits the same amount, plus one if they were the
/// bidding side.
pub const fn game_points_for_bid(bid: u8) -> i32 {
    match bid {
        0..=19 => 1,
        20..=24 => 2,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::game_points_for_bid;

    #[test]
    fn game_points_scale_with_bid() {
        assert_eq!(game_points_for_bid(14), 1);
        assert_eq!(game_points_for_bid(19), 1);
        assert_eq!(game_points_for_bid(20), 2);
        assert_eq!(game_points_for_bid(24), 2);
        assert_eq!(game_points_for_bid(25), 3);
        assert_eq!(game_points_for_bid(28), 3);
    }
}
