//! Particle Field entry point
//!
//! On web, starts the animation on the page's particle canvas.
//! Natively, runs a short headless simulation and logs frame stats.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;

    use wasm_bindgen::prelude::*;

    use particle_field::FieldConfig;
    use particle_field::platform::web::{self, AnimationLoop};

    thread_local! {
        static ACTIVE: RefCell<Option<AnimationLoop>> = const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Particle field starting...");

        let config = FieldConfig::load();
        match web::start(config) {
            Some(anim) => {
                log::info!("Particle field running with {} particles", anim.particle_count());
                ACTIVE.with(|a| *a.borrow_mut() = Some(anim));
            }
            None => log::info!("No particle canvas on this page"),
        }
    }

    /// Stop the animation (callable from page scripts)
    #[wasm_bindgen]
    pub fn stop_particles() {
        ACTIVE.with(|a| {
            if let Some(anim) = a.borrow_mut().take() {
                anim.stop();
            }
        });
    }

    /// Recreate particles, e.g. after the page layout changes
    #[wasm_bindgen]
    pub fn reseed_particles() {
        ACTIVE.with(|a| {
            if let Some(anim) = a.borrow().as_ref() {
                anim.reseed(None);
            }
        });
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec2;
    use particle_field::platform::run_frames;
    use particle_field::render::RecordingSurface;
    use particle_field::{Dimensions, FieldConfig, FieldPreset, Simulator};

    env_logger::init();
    log::info!("Particle field (native) starting...");
    log::info!("Native mode renders headless - build for wasm32 to see the canvas");

    let preset = std::env::args()
        .nth(1)
        .and_then(|s| FieldPreset::from_str(&s))
        .unwrap_or_default();
    let dims = Dimensions::new(1920.0, 1080.0);
    let mut sim = Simulator::with_seed(
        Some(RecordingSurface::new(dims)),
        dims,
        FieldConfig::from_preset(preset),
        0x5EED,
    );

    // Sweep the pointer across the middle of the surface
    let frames = 300;
    let stats = run_frames(&mut sim, frames, |f| {
        Some(Vec2::new(dims.width * f as f32 / frames as f32, dims.height / 2.0))
    });

    let total_lines: usize = stats.iter().map(|s| s.connections).sum();
    println!(
        "{} preset: {} particles, {} frames, {:.1} connections/frame",
        preset.as_str(),
        sim.particles().len(),
        stats.len(),
        total_lines as f32 / stats.len().max(1) as f32
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
