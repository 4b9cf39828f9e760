//! Browser driver
//!
//! Owns frame cadence for a `Simulator` drawing to the page's particle
//! canvas, and feeds it pointer, touch and resize events.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use web_sys::{MouseEvent, TouchEvent, TransitionEvent};

use crate::Dimensions;
use crate::config::FieldConfig;
use crate::platform::check_health;
use crate::render::CanvasSurface;
use crate::simulator::Simulator;

/// Element id of the particle canvas
pub const CANVAS_ID: &str = "particleCanvas";
/// Element id of the loading overlay whose fade-out triggers a reseed
pub const LOADING_SCREEN_ID: &str = "loading-screen";
/// Watchdog period (ms)
pub const WATCHDOG_INTERVAL_MS: i32 = 2000;

struct Driver {
    sim: Simulator<CanvasSurface>,
    /// Latest pointer position (last write wins)
    pointer: Option<Vec2>,
    frame_id: Option<i32>,
    watchdog_id: Option<i32>,
}

/// Handle to a running animation loop
#[derive(Clone)]
pub struct AnimationLoop {
    driver: Rc<RefCell<Driver>>,
}

impl AnimationLoop {
    /// Cancel the pending frame and the watchdog, and stop the simulator
    pub fn stop(&self) {
        let mut d = self.driver.borrow_mut();
        if let Some(window) = web_sys::window() {
            if let Some(id) = d.frame_id.take() {
                let _ = window.cancel_animation_frame(id);
            }
            if let Some(id) = d.watchdog_id.take() {
                window.clear_interval_with_handle(id);
            }
        }
        d.sim.stop();
    }

    pub fn is_running(&self) -> bool {
        self.driver.borrow().sim.is_running()
    }

    pub fn reseed(&self, count: Option<usize>) {
        self.driver.borrow_mut().sim.reseed(count);
    }

    pub fn particle_count(&self) -> usize {
        self.driver.borrow().sim.particles().len()
    }
}

/// Current window inner size
fn window_size(window: &web_sys::Window) -> Dimensions {
    let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Dimensions::new(w as f32, h as f32)
}

/// Find the particle canvas and start animating it.
///
/// Returns `None` when the page has no particle canvas; that is a normal
/// outcome, not an error.
pub fn start(config: FieldConfig) -> Option<AnimationLoop> {
    let window = web_sys::window()?;
    let surface = CanvasSurface::from_element_id(CANVAS_ID);
    let seed = js_sys::Date::now() as u64;

    let sim = Simulator::with_seed(surface, window_size(&window), config, seed);
    if !sim.is_running() {
        return None;
    }
    log::info!("Particle field started with seed: {}", seed);

    let driver = Rc::new(RefCell::new(Driver {
        sim,
        pointer: None,
        frame_id: None,
        watchdog_id: None,
    }));

    setup_pointer_handlers(&window, driver.clone());
    setup_resize_handler(&window, driver.clone());
    setup_loading_screen_hook(driver.clone());
    setup_watchdog(&window, driver.clone());
    request_animation_frame(driver.clone());

    Some(AnimationLoop { driver })
}

fn setup_pointer_handlers(window: &web_sys::Window, driver: Rc<RefCell<Driver>>) {
    // Mouse move
    {
        let driver = driver.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            driver.borrow_mut().pointer =
                Some(Vec2::new(event.client_x() as f32, event.client_y() as f32));
        });
        let _ = window
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Mouse leaves the window
    {
        let driver = driver.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            driver.borrow_mut().pointer = None;
        });
        let _ = window
            .add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Touch move (first touch only)
    {
        let driver = driver.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
            if let Some(touch) = event.touches().get(0) {
                driver.borrow_mut().pointer =
                    Some(Vec2::new(touch.client_x() as f32, touch.client_y() as f32));
            }
        });
        let _ = window
            .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // Touch end
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
            driver.borrow_mut().pointer = None;
        });
        let _ = window
            .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn setup_resize_handler(window: &web_sys::Window, driver: Rc<RefCell<Driver>>) {
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        let Some(window) = web_sys::window() else {
            return;
        };
        driver.borrow_mut().sim.resize(window_size(&window));
    });
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Reseed once the loading overlay has faded out, so the revealed page
/// starts with a fresh distribution
fn setup_loading_screen_hook(driver: Rc<RefCell<Driver>>) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(loading) = document.get_element_by_id(LOADING_SCREEN_ID) else {
        return;
    };

    let closure = Closure::<dyn FnMut(_)>::new(move |event: TransitionEvent| {
        let from_overlay = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .is_some_and(|el| el.id() == LOADING_SCREEN_ID);
        if from_overlay && event.property_name() == "opacity" {
            log::info!("Loading screen hidden, reseeding particles");
            driver.borrow_mut().sim.reseed(None);
        }
    });
    let _ = loading
        .add_event_listener_with_callback("transitionend", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// Periodically repopulate a field that ended up empty, and restart the
/// frame loop if a frame request was lost
fn setup_watchdog(window: &web_sys::Window, driver: Rc<RefCell<Driver>>) {
    let watched = driver.clone();
    let closure = Closure::<dyn FnMut()>::new(move || {
        let restart = {
            let mut d = watched.borrow_mut();
            let recovery = check_health(&d.sim, d.frame_id.is_some());
            if recovery.reseed {
                log::warn!("Reactivating particle field...");
                d.sim.reseed(None);
            }
            recovery.restart_loop
        };
        if restart {
            log::warn!("No frame scheduled, restarting animation loop");
            request_animation_frame(watched.clone());
        }
    });
    match window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        WATCHDOG_INTERVAL_MS,
    ) {
        Ok(id) => driver.borrow_mut().watchdog_id = Some(id),
        Err(e) => log::warn!("Failed to start watchdog: {:?}", e),
    }
    closure.forget();
}

fn request_animation_frame(driver: Rc<RefCell<Driver>>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let next = driver.clone();
    let callback = Closure::once_into_js(move |_time: f64| {
        frame(next);
    });
    match window.request_animation_frame(callback.unchecked_ref()) {
        Ok(id) => driver.borrow_mut().frame_id = Some(id),
        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
    }
}

fn frame(driver: Rc<RefCell<Driver>>) {
    let running = {
        let mut d = driver.borrow_mut();
        d.frame_id = None;
        let pointer = d.pointer;
        d.sim.tick_at(pointer).is_some()
    };

    if running {
        request_animation_frame(driver);
    }
}
