//! Proximity lines between nearby particles

use super::particle::Particle;
use crate::config::FieldConfig;
use crate::render::Line;

/// A pair of particles close enough to be linked (`a < b`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
}

impl Connection {
    /// Line opacity: linear in distance, full at 0, gone at `max_distance`
    pub fn strength(&self, max_distance: f32) -> f32 {
        1.0 - self.distance / max_distance
    }
}

/// Every unordered pair closer than `max_distance`, each exactly once.
/// Self-pairs are skipped.
pub fn connections(
    particles: &[Particle],
    max_distance: f32,
) -> impl Iterator<Item = Connection> + '_ {
    let max_sq = max_distance * max_distance;
    (0..particles.len()).flat_map(move |a| {
        (a + 1..particles.len()).filter_map(move |b| {
            let dist_sq = particles[a].pos.distance_squared(particles[b].pos);
            (dist_sq < max_sq).then(|| Connection {
                a,
                b,
                distance: dist_sq.sqrt(),
            })
        })
    })
}

/// Line for a connection, colored after the lower-indexed particle
pub fn connection_line(particles: &[Particle], conn: &Connection, config: &FieldConfig) -> Line {
    let from = &particles[conn.a];
    let to = &particles[conn.b];
    Line {
        from: from.pos,
        to: to.pos,
        color: from.color,
        alpha: conn.strength(config.connection_max_distance) * config.connection_alpha,
        width: config.connection_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use glam::Vec2;

    fn at(x: f32, y: f32, color: Color) -> Particle {
        Particle::new(Vec2::new(x, y), Vec2::ZERO, 3.0, color)
    }

    #[test]
    fn test_pairs_are_unique_and_ordered() {
        let particles = vec![
            at(0.0, 0.0, Color::HOT_PINK),
            at(10.0, 0.0, Color::SALMON),
            at(20.0, 0.0, Color::DEEP_PINK),
        ];
        let found: Vec<_> = connections(&particles, 150.0).map(|c| (c.a, c.b)).collect();
        assert_eq!(found, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let particles = vec![at(0.0, 0.0, Color::HOT_PINK), at(150.0, 0.0, Color::SALMON)];
        assert_eq!(connections(&particles, 150.0).count(), 0);
        assert_eq!(connections(&particles, 150.5).count(), 1);
    }

    #[test]
    fn test_coincident_particles_link_at_full_strength() {
        let particles = vec![at(5.0, 5.0, Color::HOT_PINK), at(5.0, 5.0, Color::SALMON)];
        let conn = connections(&particles, 100.0).next().unwrap();
        assert_eq!(conn.distance, 0.0);
        assert_eq!(conn.strength(100.0), 1.0);
    }

    #[test]
    fn test_line_style() {
        let config = FieldConfig::default();
        let particles = vec![at(0.0, 0.0, Color::HOT_PINK), at(75.0, 0.0, Color::SALMON)];
        let conn = connections(&particles, config.connection_max_distance).next().unwrap();
        let line = connection_line(&particles, &conn, &config);

        assert_eq!(line.color, Color::HOT_PINK);
        assert!((line.alpha - 0.25).abs() < 1e-6);
        assert_eq!(line.width, config.connection_width);
        assert_eq!(line.from, Vec2::ZERO);
        assert_eq!(line.to, Vec2::new(75.0, 0.0));
    }

    #[test]
    fn test_single_particle_has_no_connections() {
        let particles = vec![at(0.0, 0.0, Color::HOT_PINK)];
        assert_eq!(connections(&particles, 150.0).count(), 0);
    }
}
