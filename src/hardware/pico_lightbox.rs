use crate::config::{BRIGHTNESS, CELL_COUNT};
use crate::grid::CellIndex;
use crate::traits::{
    Color, EntropySource, GameDisplay, GameInput, GamePlatform, InputEvent, Modulation,
};

use core::convert::Infallible;

use embassy_rp::adc::{Adc, Async, Channel};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Duration, Instant, Timer};
use smart_leds::RGB8;

/// Depth of the button event queue between the input task and the game.
pub const INPUT_QUEUE_DEPTH: usize = 8;

pub type InputReceiver = Receiver<'static, CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH>;

pub type MatrixDriver = PioWs2812<'static, PIO0, 0, CELL_COUNT>;

// Convert our generic Color to the LED strip pixel type
impl From<Color> for RGB8 {
    fn from(color: Color) -> Self {
        RGB8::new(color.r, color.g, color.b)
    }
}

/// The 8x8 WS2812 matrix on a PIO state machine.
pub struct LedMatrix {
    driver: MatrixDriver,
    pixels: [RGB8; CELL_COUNT],
    brightness: u8,
}

impl LedMatrix {
    pub fn new(driver: MatrixDriver) -> Self {
        Self {
            driver,
            pixels: [RGB8::default(); CELL_COUNT],
            brightness: BRIGHTNESS,
        }
    }
}

impl GameDisplay for LedMatrix {
    type Error = Infallible;

    fn clear(&mut self, color: Color) {
        self.pixels = [color.scale(self.brightness).into(); CELL_COUNT];
    }

    fn set_pixel(&mut self, index: CellIndex, color: Color) {
        self.pixels[index.get()] = color.scale(self.brightness).into();
    }

    async fn update(&mut self) -> Result<(), Self::Error> {
        self.driver.write(&self.pixels).await;
        Ok(())
    }
}

/// Game side of the button channel: hands over at most one queued press
/// per call.
pub struct ButtonInput {
    receiver: InputReceiver,
}

impl ButtonInput {
    pub fn new(receiver: InputReceiver) -> Self {
        Self { receiver }
    }
}

impl GameInput for ButtonInput {
    type Error = Infallible;

    async fn read_input(&mut self) -> Result<InputEvent, Self::Error> {
        Ok(self.receiver.try_receive().unwrap_or(InputEvent::None))
    }

    fn discard_pending(&mut self) {
        let mut dropped = 0;
        while self.receiver.try_receive().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            debug!("dropped {} stale presses", dropped);
        }
    }
}

/// The dial potentiometer plus a floating pin used as a noise source.
pub struct AnalogPanel {
    adc: Adc<'static, Async>,
    dial: Channel<'static>,
    noise: Channel<'static>,
    temperature: Channel<'static>,
    last_level: u8,
}

impl AnalogPanel {
    pub fn new(
        adc: Adc<'static, Async>,
        dial: Channel<'static>,
        noise: Channel<'static>,
        temperature: Channel<'static>,
    ) -> Self {
        Self {
            adc,
            dial,
            noise,
            temperature,
            last_level: 0,
        }
    }
}

impl Modulation for AnalogPanel {
    async fn level(&mut self) -> u8 {
        match self.adc.read(&mut self.dial).await {
            // 12-bit reading down to 8 bits
            Ok(raw) => self.last_level = (raw >> 4) as u8,
            Err(_) => warn!("dial read failed, keeping last level"),
        }
        self.last_level
    }
}

impl EntropySource for AnalogPanel {
    fn sample(&mut self) -> u32 {
        // Gather the least significant bit of many noisy readings.
        let mut acc: u32 = 0;
        for i in 0..32 {
            let noise = self.adc.blocking_read(&mut self.noise).unwrap_or(0);
            let temp = self.adc.blocking_read(&mut self.temperature).unwrap_or(0);
            acc ^= (((noise ^ temp) & 1) as u32) << i;
            acc = acc.rotate_left(5) ^ noise as u32;
        }
        acc
    }
}

pub struct PicoPlatform {
    start_time: Instant,
}

impl PicoPlatform {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
        }
    }
}

impl Default for PicoPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl GamePlatform for PicoPlatform {
    async fn delay_ms(&self, ms: u32) {
        Timer::after(Duration::from_millis(ms as u64)).await;
    }

    fn current_time_ms(&self) -> u32 {
        self.start_time.elapsed().as_millis() as u32
    }
}
