mod utils;
pub mod browser;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod frame_loop;
pub mod particle;
pub mod surface;

use wasm_bindgen::prelude::*;
use web_sys::console;

pub use browser::ParticleFieldHandle;
pub use color::Color;
pub use config::FieldConfig;
pub use error::{FieldError, Result};
pub use field::{Link, ParticleField};
pub use frame_loop::{FrameLoop, FrameScheduler, LoopState};
pub use particle::{Particle, Size};
pub use surface::{DrawCommand, RecordingSurface, Surface};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}

/// Times a scope with console.time, ends when dropped
pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
