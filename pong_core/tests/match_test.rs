use pong_core::*;

fn short_match(max_score: u32) -> GameSession {
    let config = Config {
        max_score,
        ..Config::default()
    };
    GameSession::new(config).unwrap()
}

#[test]
fn test_absent_player_loses() {
    let mut game = short_match(3);

    // Hold up forever: the player's paddle leaves the field and never returns a ball
    let mut outcome = game.step(&[InputEvent::KeyDown(Key::Up)]);
    let mut ticks = 1;
    while outcome == Outcome::Continue && ticks < 20_000 {
        outcome = game.step(&[]);
        ticks += 1;
    }

    let winner = match outcome {
        Outcome::GameOver(winner) => winner,
        other => panic!("match did not finish: {other:?} after {ticks} ticks"),
    };
    let stats = game.stats();
    assert_eq!(stats.winner, Some(winner));
    assert_eq!(stats.score(winner), 3);
    assert!(stats.score(winner.opposite()) < 3);

    // Level went up once per goal
    assert_eq!(stats.level, 1 + stats.player_score + stats.cpu_score);
}

#[test]
fn test_player_paddle_is_not_clamped() {
    let mut game = short_match(10);

    game.step(&[InputEvent::KeyDown(Key::Up)]);
    for _ in 0..40 {
        game.step(&[]);
    }

    // 41 ticks at 4 units per tick from y = 100
    assert_eq!(game.player().top_y, 100.0 - 41.0 * 4.0);
    assert!(game.player().borders().top < 0.0);
}

#[test]
fn test_quit_ends_session() {
    let mut game = short_match(10);

    for _ in 0..10 {
        assert_eq!(game.step(&[]), Outcome::Continue);
    }
    assert_eq!(game.step(&[InputEvent::Quit]), Outcome::Quit);
    assert_eq!(game.stats().winner, None);
}

#[test]
fn test_frame_draws_every_object() {
    let mut game = short_match(10);
    game.step(&[InputEvent::KeyDown(Key::Down)]);

    let mut frame = CommandList::new();
    game.render(&mut frame);

    assert_eq!(frame.background(), Some(game.field().background_color));
    assert!(frame.commands.contains(&DrawCommand::Circle(
        Point::new(game.ball().center_x, game.ball().center_y),
        game.ball().radius,
        game.ball().color,
    )));
    assert!(frame
        .commands
        .contains(&DrawCommand::Rect(game.player().rect(), game.player().color)));
    assert!(frame
        .commands
        .contains(&DrawCommand::Rect(game.computer().rect(), game.computer().color)));
}

#[test]
fn test_bad_config_fails_fast() {
    let config = Config {
        fps: 0,
        ..Config::default()
    };

    assert!(matches!(GameSession::new(config), Err(ConfigError::ZeroFps)));
}
