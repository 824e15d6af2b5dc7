use std::cell::{Cell as StdCell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use embassy_futures::block_on;

use snake_lightbox::config::CELL_COUNT;
use snake_lightbox::grid::CellIndex;
use snake_lightbox::seed::SeedPath;
use snake_lightbox::traits::{GameDisplay, GameInput, GamePlatform, Modulation};
use snake_lightbox::{
    BoundaryPolicy, Cell, Color, Direction, Frame, GameConfig, GameEngine, InputEvent, MoveOutcome,
    Phase, StartMode,
};

/// Button queue shared between the test and the engine.
#[derive(Clone, Default)]
struct ScriptedInput {
    queue: Rc<RefCell<VecDeque<Result<InputEvent, ()>>>>,
}

impl ScriptedInput {
    fn press(&self, events: impl IntoIterator<Item = InputEvent>) {
        self.queue.borrow_mut().extend(events.into_iter().map(Ok));
    }

    fn fail(&self) {
        self.queue.borrow_mut().push_back(Err(()));
    }

    fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl GameInput for ScriptedInput {
    type Error = ();

    async fn read_input(&mut self) -> Result<InputEvent, ()> {
        self.queue.borrow_mut().pop_front().unwrap_or(Ok(InputEvent::None))
    }

    fn discard_pending(&mut self) {
        self.queue.borrow_mut().clear();
    }
}

#[derive(Default)]
struct RecordingDisplay {
    pending: Frame,
    shown: Vec<Frame>,
}

impl GameDisplay for RecordingDisplay {
    type Error = ();

    fn clear(&mut self, color: Color) {
        self.pending = Frame::filled(color);
    }

    fn set_pixel(&mut self, index: CellIndex, color: Color) {
        self.pending.set(index, color);
    }

    async fn update(&mut self) -> Result<(), ()> {
        self.shown.push(self.pending.clone());
        Ok(())
    }
}

/// Sleeps advance a fake clock instead of waiting.
#[derive(Default)]
struct InstantPlatform {
    slept_ms: StdCell<u32>,
}

impl GamePlatform for InstantPlatform {
    async fn delay_ms(&self, ms: u32) {
        self.slept_ms.set(self.slept_ms.get() + ms);
    }

    fn current_time_ms(&self) -> u32 {
        self.slept_ms.get()
    }
}

struct FixedDial(u8);

impl Modulation for FixedDial {
    async fn level(&mut self) -> u8 {
        self.0
    }
}

type TestEngine = GameEngine<ScriptedInput, InstantPlatform, RecordingDisplay, FixedDial>;

fn engine(config: GameConfig) -> (TestEngine, ScriptedInput) {
    let input = ScriptedInput::default();
    let engine = GameEngine::new(
        input.clone(),
        InstantPlatform::default(),
        RecordingDisplay::default(),
        FixedDial(0),
        config,
    );
    (engine, input)
}

fn starting_at(cell: Cell) -> GameConfig {
    GameConfig::default().with_start(StartMode::Cell(cell))
}

fn clock(engine: &TestEngine) -> u32 {
    engine.platform().current_time_ms()
}

fn moves(directions: &[Direction]) -> Vec<InputEvent> {
    directions.iter().map(|d| InputEvent::Direction(*d)).collect()
}

fn directions_along(path: &[Cell]) -> Vec<InputEvent> {
    path.windows(2)
        .map(|pair| {
            let d = [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
                .into_iter()
                .find(|d| pair[0].neighbor(*d, BoundaryPolicy::Clamp) == Some(pair[1]))
                .unwrap();
            InputEvent::Direction(d)
        })
        .collect()
}

/// Ticks through every move of a full-board path but the last.
fn advance_to_last_move(engine: &mut TestEngine) {
    for _ in 0..CELL_COUNT - 2 {
        assert!(matches!(block_on(engine.tick()), MoveOutcome::Advanced(_)));
    }
}

#[test]
fn test_start_shows_splash_then_single_cell() {
    let (mut engine, _input) = engine(starting_at(Cell::new(3, 3)));
    block_on(engine.start(&mut 7u32));

    let shown = &engine.display().shown;
    assert_eq!(shown.len(), 3);
    assert_eq!(shown[0].lit_count(), CELL_COUNT);
    assert_eq!(shown[1].lit_count(), 0);
    assert_eq!(shown[2].lit_count(), 1);
    assert_eq!(shown[2].get(Cell::new(3, 3).index().unwrap()), Color::WHITE);
    assert_eq!(engine.state().len(), 1);
    assert_eq!(engine.state().head(), Cell::new(3, 3));
}

#[test]
fn test_seed_reveal_leaves_head_at_rotation_start() {
    let sample = 0x1234_5678u32;
    let (mut engine, _input) = engine(GameConfig::default());
    block_on(engine.start(&mut sample.clone()));

    let rotation = SeedPath::offset_from_entropy(sample);
    assert_eq!(engine.rotation(), rotation);

    // splash (2) + full path (1) + one frame per retraction (63)
    let shown = &engine.display().shown;
    assert_eq!(shown.len(), 2 + 1 + 63);
    assert_eq!(shown[2].lit_count(), CELL_COUNT);
    assert_eq!(shown[3].lit_count(), CELL_COUNT - 1);
    assert_eq!(shown.last().unwrap().lit_count(), 1);

    let expected_head = SeedPath::new().rotate(rotation)[0];
    assert_eq!(engine.state().head(), expected_head);
    assert_eq!(engine.state().len(), 1);
    assert!(engine.state().is_consistent());
}

#[test]
fn test_tick_consumes_one_event_and_renders() {
    let (mut engine, input) = engine(starting_at(Cell::new(3, 3)));
    block_on(engine.start(&mut 0u32));
    input.press(moves(&[Direction::Right, Direction::Up]));

    assert_eq!(block_on(engine.tick()), MoveOutcome::Advanced(Cell::new(4, 3)));
    assert_eq!(engine.state().len(), 2);
    assert_eq!(input.pending(), 1);
    assert_eq!(block_on(engine.tick()), MoveOutcome::Advanced(Cell::new(4, 4)));
    assert_eq!(block_on(engine.tick()), MoveOutcome::Idle);

    let last = engine.display().shown.last().unwrap();
    assert_eq!(last.get(Cell::new(4, 4).index().unwrap()), Color::WHITE);
    assert_eq!(last.lit_count(), 3);
    // 2 splash frames + the board + 3 ticks
    assert_eq!(engine.display().shown.len(), 6);
}

#[test]
fn test_input_error_is_an_idle_tick() {
    let (mut engine, input) = engine(starting_at(Cell::new(0, 0)));
    block_on(engine.start(&mut 0u32));
    input.fail();
    input.press(moves(&[Direction::Up]));

    assert_eq!(block_on(engine.tick()), MoveOutcome::Idle);
    assert_eq!(block_on(engine.tick()), MoveOutcome::Advanced(Cell::new(0, 1)));
}

#[test]
fn test_interact_button_does_nothing() {
    let (mut engine, input) = engine(starting_at(Cell::new(3, 3)));
    block_on(engine.start(&mut 0u32));
    input.press([InputEvent::Interact]);

    assert_eq!(block_on(engine.tick()), MoveOutcome::Idle);
    assert_eq!(engine.state().len(), 1);
}

#[test]
fn test_presses_during_start_are_dropped() {
    let (mut engine, input) = engine(starting_at(Cell::new(3, 3)));
    input.press(moves(&[Direction::Right, Direction::Right]));
    block_on(engine.start(&mut 0u32));

    assert_eq!(input.pending(), 0);
    assert_eq!(block_on(engine.tick()), MoveOutcome::Idle);
    assert_eq!(engine.state().len(), 1);
}

#[test]
fn test_victory_plays_shrink_then_resets() {
    let path = SeedPath::new().path().to_vec();
    let start = path[0];
    let (mut engine, input) = engine(starting_at(start));
    block_on(engine.start(&mut 0u32));
    input.press(directions_along(&path));

    advance_to_last_move(&mut engine);
    let before = engine.display().shown.len();

    assert_eq!(block_on(engine.tick()), MoveOutcome::Solved);

    // solved board (1) + 63 collapse frames + the fresh board (1)
    let shown = &engine.display().shown[before..];
    assert_eq!(shown.len(), 1 + 63 + 1);
    assert_eq!(shown[0].lit_count(), CELL_COUNT);
    for (i, frame) in shown[1..64].iter().enumerate() {
        assert_eq!(frame.lit_count(), CELL_COUNT - 1 - i);
    }
    assert_eq!(shown[64].lit_count(), 1);

    assert_eq!(engine.state().phase(), Phase::Playing);
    assert_eq!(engine.state().len(), 1);
    assert_eq!(engine.state().head(), start);
    assert!(engine.state().is_consistent());
}

#[test]
fn test_seed_reveal_victory_reveals_again() {
    let sample = 0xBEEFu32;
    let (mut engine, input) = engine(GameConfig::default());
    block_on(engine.start(&mut sample.clone()));

    let path = SeedPath::new().rotate(engine.rotation());
    assert_eq!(engine.state().head(), path[0]);
    input.press(directions_along(&path));

    advance_to_last_move(&mut engine);
    let before = engine.display().shown.len();
    assert_eq!(block_on(engine.tick()), MoveOutcome::Solved);

    // solved board and its collapse, then the same path revealed and collapsed
    let shown = &engine.display().shown[before..];
    assert_eq!(shown.len(), (1 + 63) * 2);
    assert_eq!(shown[0].lit_count(), CELL_COUNT);
    assert_eq!(shown[63].lit_count(), 1);
    assert_eq!(shown[64].lit_count(), CELL_COUNT);
    assert_eq!(shown.last().unwrap().lit_count(), 1);

    assert_eq!(engine.rotation(), SeedPath::offset_from_entropy(sample));
    assert_eq!(engine.state().head(), path[0]);
    assert_eq!(engine.state().len(), 1);
    assert_eq!(engine.state().phase(), Phase::Playing);
    assert!(engine.state().is_consistent());
}

#[test]
fn test_presses_during_victory_are_dropped() {
    let path = SeedPath::new().path().to_vec();
    let (mut engine, input) = engine(starting_at(path[0]));
    block_on(engine.start(&mut 0u32));
    input.press(directions_along(&path));
    // mashed while the collapse plays
    input.press(moves(&[Direction::Left, Direction::Up, Direction::Up]));

    advance_to_last_move(&mut engine);
    assert_eq!(block_on(engine.tick()), MoveOutcome::Solved);

    assert_eq!(input.pending(), 0);
    assert_eq!(block_on(engine.tick()), MoveOutcome::Idle);
    assert_eq!(engine.state().len(), 1);
}

#[test]
fn test_paced_tick_fills_the_frame_budget() {
    let config = starting_at(Cell::new(3, 3));
    let (mut engine, input) = engine(config);
    block_on(engine.start(&mut 0u32));
    input.press(moves(&[Direction::Right]));

    let before = clock(&engine);
    assert_eq!(block_on(engine.paced_tick()), MoveOutcome::Advanced(Cell::new(4, 3)));
    assert_eq!(clock(&engine) - before, config.frame_time_ms);

    let before = clock(&engine);
    assert_eq!(block_on(engine.paced_tick()), MoveOutcome::Idle);
    assert_eq!(clock(&engine) - before, config.frame_time_ms);
}

#[test]
fn test_paced_tick_skips_sleep_after_long_frame() {
    let path = SeedPath::new().path().to_vec();
    let config = starting_at(path[0]);
    let (mut engine, input) = engine(config);
    block_on(engine.start(&mut 0u32));
    input.press(directions_along(&path));
    advance_to_last_move(&mut engine);

    let before = clock(&engine);
    assert_eq!(block_on(engine.paced_tick()), MoveOutcome::Solved);

    // hold on the solved board plus one hold per collapse frame, nothing more
    assert_eq!(clock(&engine) - before, config.animation_delay_ms * (1 + 63));
}

#[test]
fn test_wraparound_variant() {
    let config = GameConfig::wraparound().with_start(StartMode::Cell(Cell::new(0, 3)));
    let (mut engine, input) = engine(config);
    block_on(engine.start(&mut 0u32));
    input.press(moves(&[Direction::Left, Direction::Right]));

    assert_eq!(block_on(engine.tick()), MoveOutcome::Advanced(Cell::new(7, 3)));
    // Retraction is off in this variant: the neck blocks.
    assert_eq!(block_on(engine.tick()), MoveOutcome::Blocked(Cell::new(0, 3)));
}
