#![no_std]
#![no_main]

use defmt::{debug, info};
use embassy_executor::Spawner;
use embassy_rp::adc::{self, Adc, Channel as AdcChannel};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{self, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use snake_lightbox::config::{DEBOUNCE_MS, TICK_MS};
use snake_lightbox::hardware::pico_lightbox::{
    AnalogPanel, ButtonInput, LedMatrix, PicoPlatform, INPUT_QUEUE_DEPTH,
};
use snake_lightbox::input::ButtonPanel;
use snake_lightbox::traits::EntropySource;
use snake_lightbox::{GameConfig, GameEngine, InputEvent};

bind_interrupts!(struct Irqs {
    ADC_IRQ_FIFO => adc::InterruptHandler;
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
});

// Button presses from the input task to the game loop
static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_QUEUE_DEPTH> =
    Channel::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Snake Lightbox Starting!");

    // Pin map
    // gp2  - up
    // gp3  - down
    // gp4  - left
    // gp5  - right
    // gp6  - interact
    // gp16 - WS2812 data in
    // gp26 - dial wiper (ADC0)
    // gp27 - floating, ADC noise (ADC1)
    let up = Input::new(p.PIN_2, Pull::Up);
    let down = Input::new(p.PIN_3, Pull::Up);
    let left = Input::new(p.PIN_4, Pull::Up);
    let right = Input::new(p.PIN_5, Pull::Up);
    let interact = Input::new(p.PIN_6, Pull::Up);

    spawner
        .spawn(input_handler(up, down, left, right, interact))
        .unwrap();

    // LED matrix on PIO0 state machine 0
    let Pio { mut common, sm0, .. } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let ws2812 = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_16, &program);
    let display = LedMatrix::new(ws2812);

    let adc = Adc::new(p.ADC, Irqs, adc::Config::default());
    let dial = AdcChannel::new_pin(p.PIN_26, Pull::None);
    let noise = AdcChannel::new_pin(p.PIN_27, Pull::None);
    let temperature = AdcChannel::new_temp_sensor(p.ADC_TEMP_SENSOR);
    let mut analog = AnalogPanel::new(adc, dial, noise, temperature);

    // Sampled before the panel moves into the engine as the dial.
    let mut entropy = analog.sample();
    debug!("entropy sample {=u32:x}", entropy);

    let input = ButtonInput::new(INPUT_CHANNEL.receiver());
    let platform = PicoPlatform::new();
    let mut engine = GameEngine::new(input, platform, display, analog, GameConfig::default());

    info!("Matrix initialized, starting game loop");
    engine.start(&mut entropy).await;
    engine.run().await
}

// Input handler task
#[embassy_executor::task]
async fn input_handler(
    up: Input<'static>,
    down: Input<'static>,
    left: Input<'static>,
    right: Input<'static>,
    interact: Input<'static>,
) {
    let sender = INPUT_CHANNEL.sender();
    let mut panel = ButtonPanel::new(DEBOUNCE_MS);

    loop {
        Timer::after_millis(TICK_MS as u64 / 4).await;

        let now = Instant::now().as_millis();
        let levels = [
            up.is_low(),
            down.is_low(),
            left.is_low(),
            right.is_low(),
            interact.is_low(),
        ];
        panel.poll(levels, now, |event| {
            // A full queue drops the press rather than stalling the scan.
            if sender.try_send(event).is_ok() {
                debug!("input: {}", event);
            }
        });
    }
}
