//! # npad Demo
//!
//! Polls a pad once per frame and reports press/release edges, stick
//! values, and connectivity until the Plus button (or Ctrl+C) exits.
//!
//! The demo drives the simulated backend with a scripted input session
//! so it runs anywhere; on the console toolchain the same loop works
//! against the real pad library via the `libnx` feature.

use anyhow::Result;
use tokio::time::{interval, Duration};
use tracing::info;

use npad::config::Config;
use npad::hid::{SimFrame, SimulatedHid};
use npad::pad::{configure_input, AnalogStickState, NpadButton, PadController};
use npad::trace::{FrameRecord, TraceRecorder};

/// Configuration file consulted when present
const CONFIG_PATH: &str = "config/default.toml";

/// Scripted input session fed to the simulated backend: idle, a few
/// button presses, a left-stick deflection, then Plus to exit.
fn demo_script() -> Vec<SimFrame> {
    fn hold(frames: &mut Vec<SimFrame>, buttons: NpadButton, count: usize) {
        frames.extend(std::iter::repeat(SimFrame::with_buttons(buttons.bits())).take(count));
    }

    let mut frames = Vec::new();
    hold(&mut frames, NpadButton::empty(), 30);
    hold(&mut frames, NpadButton::A, 20);
    hold(&mut frames, NpadButton::A | NpadButton::B, 20);
    hold(&mut frames, NpadButton::empty(), 15);

    // Stick deflection: the native layer reports it both as an analog
    // reading and as a direction pseudo-button
    let deflected = SimFrame {
        buttons: NpadButton::STICK_L_LEFT.bits(),
        sticks: [
            AnalogStickState { x: -28000, y: 0 },
            AnalogStickState::default(),
        ],
        gc_triggers: [0, 0],
    };
    frames.extend(std::iter::repeat(deflected).take(25));

    hold(&mut frames, NpadButton::empty(), 15);
    hold(&mut frames, NpadButton::PLUS, 1);
    frames
}

/// Main entry point for the npad demo
///
/// Initializes logging and configuration, opens a pad over the
/// simulated backend, then polls it on a fixed interval until the
/// scripted Plus press (or Ctrl+C) ends the session.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("npad demo v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = if std::path::Path::new(CONFIG_PATH).exists() {
        Config::load(CONFIG_PATH)?
    } else {
        Config::default()
    };

    let mut hid = SimulatedHid::with_script(demo_script());
    configure_input(&mut hid, config.input.max_players, config.style_set()?);

    let ids = config.id_list()?;
    let mut pad = PadController::with_ids(hid, &ids)?;
    info!("pad opened for ids {:?}, styles {:?}", ids, pad.style_set());

    let mut recorder = if config.trace.enabled {
        Some(TraceRecorder::new(&config.trace)?)
    } else {
        None
    };

    let period_ms = 1000 / config.demo.poll_rate_hz;
    let mut frame_interval = interval(Duration::from_millis(u64::from(period_ms)));

    info!(
        "polling at {}Hz; Plus (or Ctrl+C) exits",
        config.demo.poll_rate_hz
    );

    let mut frame_count: u64 = 0;

    // Main frame loop
    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                pad.update();
                frame_count += 1;

                let down = pad.buttons_down();
                let up = pad.buttons_up();
                if !down.is_empty() {
                    info!("pressed: {:?}", down);
                }
                if !up.is_empty() {
                    info!("released: {:?}", up);
                }

                if let Some(recorder) = recorder.as_mut() {
                    recorder.record(&FrameRecord::from_state(pad.state()))?;
                }

                if pad.is_pressed(NpadButton::PLUS) {
                    info!("Plus pressed, exiting");
                    break;
                }

                if frame_count % config.demo.log_interval_frames == 0 {
                    let stick = pad.left_stick();
                    info!(
                        "frame {}: held {:?}, left stick x={} y={}",
                        frame_count,
                        pad.buttons(),
                        stick.x,
                        stick.y
                    );
                }
            }

            // Handle Ctrl+C for graceful shutdown
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    if let Some(recorder) = recorder.as_mut() {
        recorder.flush()?;
    }
    info!("Total frames polled: {}", frame_count);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_script_starts_idle() {
        let script = demo_script();
        assert_eq!(script[0].buttons, 0, "history must be seeded with an idle frame");
    }

    #[test]
    fn test_demo_script_ends_with_plus() {
        let script = demo_script();
        let last = script.last().unwrap();
        assert_eq!(last.buttons, NpadButton::PLUS.bits());
    }

    #[test]
    fn test_demo_script_deflects_left_stick() {
        let script = demo_script();
        assert!(script
            .iter()
            .any(|frame| frame.buttons == NpadButton::STICK_L_LEFT.bits()
                && frame.sticks[0].x < 0));
    }

    #[test]
    fn test_period_calculation() {
        // 60Hz polls every 16ms (integer division, same as the native vsync demos)
        let period_ms = 1000 / 60;
        assert_eq!(period_ms, 16);
    }
}
