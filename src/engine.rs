use crate::config::{GameConfig, StartMode, SPLASH_HUE_STEP};
use crate::game::{GameState, MoveOutcome};
use crate::render::{Frame, Renderer, ShrinkAnimation};
use crate::seed::SeedPath;
use crate::traits::{EntropySource, GameDisplay, GameInput, GamePlatform, Modulation};

pub struct GameEngine<I, P, D, M>
where
    I: GameInput,
    P: GamePlatform,
    D: GameDisplay,
    M: Modulation,
{
    input: I,
    platform: P,
    display: D,
    dial: M,
    state: GameState,
    renderer: Renderer,
    seed: SeedPath,
    config: GameConfig,
    rotation: usize,
}

impl<I, P, D, M> GameEngine<I, P, D, M>
where
    I: GameInput,
    P: GamePlatform,
    D: GameDisplay,
    M: Modulation,
{
    pub fn new(input: I, platform: P, display: D, dial: M, config: GameConfig) -> Self {
        Self {
            input,
            platform,
            display,
            dial,
            state: GameState::from_config(&config),
            renderer: Renderer::from_config(&config),
            seed: SeedPath::new(),
            config,
            rotation: 0,
        }
    }

    /// Start-up sequence: rainbow splash, pick the seed rotation from one
    /// entropy sample, lay out the first board.
    pub async fn start<E: EntropySource>(&mut self, entropy: &mut E) {
        self.splash().await;
        self.rotation = SeedPath::offset_from_entropy(entropy.sample());
        info!("starting, seed rotation {}", self.rotation);
        self.new_board().await;
    }

    async fn splash(&mut self) {
        let hold = self.config.splash_hold_ms;
        present(&mut self.display, &Renderer::rainbow_fill(0, SPLASH_HUE_STEP)).await;
        self.platform.delay_ms(hold).await;
        present(&mut self.display, &Frame::new()).await;
        self.platform.delay_ms(hold).await;
    }

    /// Lays out and shows a fresh board, then drops any presses that queued
    /// up while it was being drawn.
    async fn new_board(&mut self) {
        match self.config.start {
            StartMode::Cell(cell) => {
                self.state.reset(cell);
                self.render().await;
            }
            StartMode::SeedReveal => {
                let path = self.seed.rotate(self.rotation);
                self.state.seed(&path);
                self.render().await;
                self.platform.delay_ms(self.config.animation_delay_ms).await;
                self.play_shrink().await;
            }
        }
        self.input.discard_pending();
    }

    /// Collapses the current tail frame by frame, one frame per released
    /// cell. Returns the number of frames shown.
    pub async fn play_shrink(&mut self) -> usize {
        let delay = self.config.animation_delay_ms;
        let modulation = self.dial.level().await;

        let mut animation =
            ShrinkAnimation::new(&mut self.state, &self.renderer, modulation, delay);
        let mut shown = 0;
        while let Some(step) = animation.next() {
            present(&mut self.display, &step.frame).await;
            self.platform.delay_ms(step.delay_ms).await;
            animation.set_modulation(self.dial.level().await);
            shown += 1;
        }
        shown
    }

    /// One pass of the loop: at most one input, one move, one frame.
    pub async fn tick(&mut self) -> MoveOutcome {
        let outcome = match self.input.read_input().await {
            Ok(event) => self.state.handle(event),
            Err(_) => {
                warn!("input read failed, skipping tick");
                MoveOutcome::Idle
            }
        };

        self.render().await;

        if outcome == MoveOutcome::Solved {
            self.platform.delay_ms(self.config.animation_delay_ms).await;
            let frames = self.play_shrink().await;
            info!("victory sequence done after {} frames", frames);
            self.new_board().await;
        }
        outcome
    }

    async fn render(&mut self) {
        let modulation = self.dial.level().await;
        let frame = self.renderer.frame(self.state.history(), modulation);
        present(&mut self.display, &frame).await;
    }

    /// One tick, then sleeps out whatever is left of the frame budget.
    pub async fn paced_tick(&mut self) -> MoveOutcome {
        let frame_start = self.platform.current_time_ms();
        let outcome = self.tick().await;

        let elapsed = self.platform.current_time_ms().wrapping_sub(frame_start);
        if let Some(rest) = frame_delay(self.config.frame_time_ms, elapsed) {
            self.platform.delay_ms(rest).await;
        }
        outcome
    }

    pub async fn run(&mut self) -> ! {
        loop {
            self.paced_tick().await;
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn rotation(&self) -> usize {
        self.rotation
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }
}

async fn present<D: GameDisplay>(display: &mut D, frame: &Frame) {
    frame.draw(display);
    if display.update().await.is_err() {
        warn!("display update failed");
    }
}

/// Time left to sleep so a frame lasts `frame_time_ms`, or `None` when the
/// frame already took that long.
pub fn frame_delay(frame_time_ms: u32, elapsed_ms: u32) -> Option<u32> {
    frame_time_ms.checked_sub(elapsed_ms).filter(|rest| *rest > 0)
}
