//! Counts from 95 to 102 on a calloop event loop, logging every slot update.
//!
//! Run with `RUST_LOG=info cargo run --example spring_counter`.

use std::time::Duration;

use calloop::timer::{TimeoutAction, Timer};
use calloop::{EventLoop, LoopSignal};
use spring_digits::prelude::*;

const START: u64 = 95;
const END: u64 = 102;

/// Renderer that prints each slot as a line of text
#[derive(Default)]
struct LogRenderer {
    digit_height: f32,
}

impl DigitRenderer for LogRenderer {
    fn install_style(&mut self, style: &'static DigitStyle) {
        log::info!("Using digit style with {} mask stops", style.mask.len());
    }

    fn rebuild(&mut self, count: usize, layout: &DigitLayout) {
        self.digit_height = layout.digit_height;
        log::info!("{} slots of {}x{}", count, layout.digit_width, layout.digit_height);
    }

    fn apply(&mut self, index: usize, frame: &DigitFrame) {
        let position = -frame.offset / self.digit_height;
        log::info!(
            "slot {} at {:5.2} opacity {:.2} blur {:.2}",
            index,
            position,
            frame.opacity,
            frame.blur.unwrap_or(0.0)
        );
    }

    fn clear(&mut self) {
        log::info!("cleared");
    }
}

struct Demo {
    number: SpringNumber<LogRenderer, CalloopHost<Demo>>,
    signal: LoopSignal,
}

fn route(demo: &mut Demo, event: HostEvent) {
    demo.number.handle_event(event);
}

fn main() {
    env_logger::init();

    let mut event_loop: EventLoop<'static, Demo> =
        EventLoop::try_new().expect("Failed to create event loop");
    let handle = event_loop.handle();

    let mut demo = Demo {
        number: SpringNumber::new(
            LogRenderer::default(),
            CalloopHost::new(handle.clone(), route),
            SpringNumberConfig::new().value(START),
        ),
        signal: event_loop.get_signal(),
    };

    handle
        .insert_source(
            Timer::from_duration(Duration::from_millis(700)),
            |_, _, demo: &mut Demo| {
                let next = demo.number.value() + 1;
                demo.number.set_value(next);
                if next < END {
                    TimeoutAction::ToDuration(Duration::from_millis(700))
                } else {
                    TimeoutAction::Drop
                }
            },
        )
        .expect("Failed to insert counter timer");

    event_loop
        .run(Some(Duration::from_millis(50)), &mut demo, |demo| {
            if demo.number.value() >= END && !demo.number.is_animating() {
                demo.signal.stop();
            }
        })
        .expect("Event loop failed");

    demo.number.destroy();
}
