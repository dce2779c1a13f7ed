use twentyeights_bot::{BotConfig, BotContext, choose_action};
use twentyeights_core::consts::POINTS_IN_DECK;
use twentyeights_core::game::GameState;
use twentyeights_core::model::{ActionKind, Deck, RoundStage, Seat, Team};

fn card_accounting(game: &GameState) -> usize {
    let round = game.round();
    let in_hands: usize = Seat::LOOP.iter().map(|s| round.hand(*s).len()).sum();
    let in_slot = usize::from(round.trump().card().is_some() && !round.trump().is_called());
    let on_table = round.current_trick().plays().len();
    let captured = round.tricks_completed() as usize * 4;
    in_hands + in_slot + on_table + captured
}

/// Lets the bots play the current round to its end.
fn play_round_out(game: &mut GameState, seed: u64) {
    let mut steps = 0;
    while game.round().stage() != RoundStage::Ending {
        let seat = game.round().active_seat();
        let action = {
            let ctx = BotContext::new(seat, game.round(), BotConfig::default());
            choose_action(&ctx).expect("a running round always offers an action")
        };
        game.apply(seat, action)
            .unwrap_or_else(|err| panic!("seed {seed}: {seat} chose an illegal action: {err}"));
        if game.round().stage() == RoundStage::Playing {
            assert_eq!(card_accounting(game), Deck::SIZE, "seed {seed}");
        }
        steps += 1;
        assert!(steps < 200, "seed {seed}: round did not terminate");
    }
}

#[test]
fn bots_play_legal_rounds_to_a_decision() {
    for seed in 0..30u64 {
        let mut game = GameState::with_seed(Seat::North, seed);
        play_round_out(&mut game, seed);

        let round = game.round();
        let winner = round.winning_team().expect("played rounds decide a winner");
        let bid = round.bidding().winning_bid().expect("someone must bid");
        if winner == bid.bidder.team() {
            assert!(round.round_points(winner) >= bid.points, "seed {seed}");
        } else {
            assert!(
                round.round_points(winner) > POINTS_IN_DECK - bid.points,
                "seed {seed}"
            );
        }
        let total = round.round_points(Team::NorthSouth) + round.round_points(Team::EastWest);
        assert!(total <= POINTS_IN_DECK, "seed {seed}");
    }
}

#[test]
fn round_results_settle_the_game_score() {
    let mut game = GameState::with_seed(Seat::East, 99);
    play_round_out(&mut game, 99);

    let winner = game.round().winning_team().unwrap();
    let bid = game.round().bidding().winning_bid().unwrap();
    let gained = game.score(winner);
    let forfeited = -game.score(winner.opponent());
    assert!(gained > 0);
    // A failed bid costs its side one point beyond the winner's gain.
    if bid.bidder.team() == winner {
        assert_eq!(forfeited, gained);
    } else {
        assert_eq!(forfeited, gained + 1);
    }
    // Both teams started level, so the losing side is already below zero.
    assert_eq!(game.winner(), Some(winner));
    assert_eq!(
        game.apply(Seat::East, ActionKind::StartNewRound),
        Err(twentyeights_core::game::ActionError::GameOver)
    );
}

#[test]
fn bids_scale_with_hand_strength() {
    // Across many deals the bots should land bids above the floor at least
    // some of the time, and never outside the legal range.
    let mut above_minimum = 0;
    for seed in 100..140u64 {
        let mut game = GameState::with_seed(Seat::North, seed);
        play_round_out(&mut game, seed);
        let bid = game.round().bidding().winning_bid().unwrap();
        assert!((14..=28).contains(&bid.points), "seed {seed}");
        if bid.points > 14 {
            above_minimum += 1;
        }
    }
    assert!(above_minimum > 0);
}
