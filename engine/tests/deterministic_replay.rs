use number_ladder_core::{Command, Event, GameConfig, GameError, NumberRange, StateError};
use number_ladder_engine::{self as engine, query, GameEngine};

#[test]
fn seeded_replays_produce_identical_event_streams() {
    let script = play_script();
    let first = replay(0xc0ff_ee11, &script);
    let second = replay(0xc0ff_ee11, &script);

    assert_eq!(first, second, "replay diverged");
    assert!(first
        .events
        .iter()
        .any(|event| matches!(event, Event::GameEnded { .. })));
}

#[test]
fn rejected_commands_emit_no_events() {
    let config = GameConfig::new(NumberRange::new(0, 50).expect("range"), 4).expect("config");
    let mut game = GameEngine::seeded(config, 1);
    let mut events = Vec::new();

    assert_eq!(
        engine::apply(&mut game, Command::Place { index: 0 }, &mut events),
        Err(GameError::InvalidState(StateError::NoPendingNumber))
    );
    assert!(events.is_empty());

    engine::apply(&mut game, Command::DrawNumber, &mut events).expect("draw");
    assert_eq!(
        engine::apply(&mut game, Command::DrawNumber, &mut events),
        Err(GameError::InvalidState(StateError::PendingNumberOutstanding))
    );
    assert_eq!(events.len(), 1, "only the first draw is broadcast");
}

#[test]
fn placement_events_mirror_board() {
    let config = GameConfig::new(NumberRange::new(0, 50).expect("range"), 3).expect("config");
    let mut game = GameEngine::seeded(config, 9);
    let mut events = Vec::new();

    engine::apply(&mut game, Command::DrawNumber, &mut events).expect("draw");
    engine::apply(&mut game, Command::Place { index: 2 }, &mut events).expect("place");

    let Some(Event::NumberPlaced { index, value }) = events.get(1).copied() else {
        panic!("expected placement event, got {events:?}");
    };
    assert_eq!(index, 2);
    assert_eq!(query::board(&game)[2], Some(value));
    assert_eq!(events[0], Event::NumberDrawn { value });
}

fn play_script() -> Vec<Command> {
    let mut script = Vec::new();
    for _ in 0..3 {
        script.push(Command::ResetGame);
        for index in 0..6 {
            script.push(Command::DrawNumber);
            script.push(Command::Place { index });
        }
    }
    script
}

#[derive(Debug, PartialEq, Eq)]
struct ReplayOutcome {
    events: Vec<Event>,
    rejected: usize,
}

fn replay(seed: u64, script: &[Command]) -> ReplayOutcome {
    let config = GameConfig::new(NumberRange::new(0, 100).expect("range"), 6).expect("config");
    let mut game = GameEngine::seeded(config, seed);
    let mut events = Vec::new();
    let mut rejected = 0;

    for command in script {
        if engine::apply(&mut game, *command, &mut events).is_err() {
            rejected += 1;
        }
    }

    ReplayOutcome { events, rejected }
}
