//! Platform layer
//!
//! The simulator never schedules itself. Drivers here decide cadence:
//! - `web` (wasm32): `requestAnimationFrame`, DOM events
//! - `run_frames`: synchronous fixed-count loop for native runs and tests
//!
//! `check_health` is the watchdog decision shared by drivers.

#[cfg(target_arch = "wasm32")]
pub mod web;

use glam::Vec2;
use rand::Rng;

use crate::render::Surface;
use crate::simulator::{FrameStats, Simulator};

/// Tick `frames` times, asking `pointer` for the pointer position each frame.
/// Stops early if the simulator stops running.
pub fn run_frames<S, R, F>(
    sim: &mut Simulator<S, R>,
    frames: usize,
    mut pointer: F,
) -> Vec<FrameStats>
where
    S: Surface,
    R: Rng,
    F: FnMut(usize) -> Option<Vec2>,
{
    let mut stats = Vec::with_capacity(frames);
    for frame in 0..frames {
        match sim.tick_at(pointer(frame)) {
            Some(s) => stats.push(s),
            None => break,
        }
    }
    stats
}

/// What a periodic health check should repair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Recovery {
    /// Running on a surface that should hold particles, but the field is empty
    pub reseed: bool,
    /// Running, but no frame is scheduled
    pub restart_loop: bool,
}

/// Inspect a simulator between frames. `frame_pending` tells whether the
/// driver has a frame callback scheduled.
pub fn check_health<S, R>(sim: &Simulator<S, R>, frame_pending: bool) -> Recovery
where
    S: Surface,
    R: Rng,
{
    if !sim.is_running() {
        return Recovery::default();
    }
    let has_area = match (sim.dimensions(), sim.config()) {
        (Some(dims), Some(config)) => config.particle_count(dims) > 0,
        _ => false,
    };
    Recovery {
        reseed: sim.particles().is_empty() && has_area,
        restart_loop: !frame_pending,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Dimensions;
    use crate::config::FieldConfig;
    use crate::render::RecordingSurface;

    #[test]
    fn test_run_frames_counts() {
        let dims = Dimensions::new(800.0, 600.0);
        let surface = RecordingSurface::new(dims);
        let mut sim = Simulator::with_seed(Some(surface), dims, FieldConfig::default(), 11);
        let stats = run_frames(&mut sim, 10, |f| Some(Vec2::new(f as f32 * 10.0, 300.0)));
        assert_eq!(stats.len(), 10);
        assert!(stats.iter().all(|s| s.particles == sim.particles().len()));
        assert_eq!(sim.surface().unwrap().frames, 10);
    }

    #[test]
    fn test_run_frames_on_disabled_sim() {
        let mut sim: Simulator<RecordingSurface> =
            Simulator::with_seed(None, Dimensions::new(800.0, 600.0), FieldConfig::default(), 11);
        assert!(run_frames(&mut sim, 10, |_| None).is_empty());
    }

    fn hd_sim() -> Simulator<RecordingSurface> {
        let dims = Dimensions::new(1920.0, 1080.0);
        Simulator::with_seed(Some(RecordingSurface::new(dims)), dims, FieldConfig::default(), 3)
    }

    #[test]
    fn test_healthy_sim_needs_nothing() {
        let sim = hd_sim();
        assert_eq!(check_health(&sim, true), Recovery::default());
    }

    #[test]
    fn test_lost_frame_restarts_loop() {
        let sim = hd_sim();
        let recovery = check_health(&sim, false);
        assert!(recovery.restart_loop);
        assert!(!recovery.reseed);
    }

    #[test]
    fn test_empty_field_is_reseeded() {
        let mut sim = hd_sim();
        sim.reseed(Some(0));
        assert!(check_health(&sim, true).reseed);
    }

    #[test]
    fn test_empty_field_on_zero_area_is_left_alone() {
        let mut sim = hd_sim();
        sim.resize(Dimensions::new(0.0, 1080.0));
        assert!(sim.particles().is_empty());
        assert!(!check_health(&sim, true).reseed);
    }

    #[test]
    fn test_stopped_or_disabled_sim_is_not_revived() {
        let mut sim = hd_sim();
        sim.stop();
        assert_eq!(check_health(&sim, false), Recovery::default());

        let disabled: Simulator<RecordingSurface> = Simulator::disabled();
        assert_eq!(check_health(&disabled, false), Recovery::default());
    }
}
