#![allow(dead_code)]

use ocelli_face::{FaceConfig, FaceEngine};
use ocelli_paint::{Color, PaintContext, Size};

pub const FRAME_MS: f32 = 10.0;
pub const SIZE: Size = Size::new(800.0, 600.0);
pub const DOT: u32 = 0x3297a0;

/// Engine with idle blinking and glancing pushed far out of the way
pub fn quiet_engine() -> FaceEngine {
    let mut config = FaceConfig::default();
    config.timing.idle_delay_min_ms = 1.0e9;
    config.timing.idle_delay_max_ms = 2.0e9;
    FaceEngine::new(config, SIZE, Color::BLACK, Color::from_hex(DOT)).unwrap()
}

pub fn engine() -> FaceEngine {
    FaceEngine::new(FaceConfig::default(), SIZE, Color::BLACK, Color::from_hex(DOT)).unwrap()
}

/// Step until the virtual clock reaches `until_ms`
pub fn run_until(engine: &mut FaceEngine, until_ms: f64) {
    while engine.now_ms() < until_ms {
        engine.step(FRAME_MS);
    }
}

pub fn run_for(engine: &mut FaceEngine, ms: f64) {
    let until = engine.now_ms() + ms;
    run_until(engine, until);
}

pub fn surface() -> PaintContext {
    PaintContext::new(SIZE)
}
