//! Field tuning and presets
//!
//! Persisted as JSON in LocalStorage on web.

use serde::{Deserialize, Serialize};

use crate::color::{Color, Palette};
use crate::consts::*;
use crate::error::ConfigError;
use crate::{Dimensions, Range};

/// Named configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FieldPreset {
    /// Dense, bright field behind the hero section
    #[default]
    Hero,
    /// Sparser, dimmer field for secondary sections
    Ambient,
}

impl FieldPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldPreset::Hero => "Hero",
            FieldPreset::Ambient => "Ambient",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "hero" => Some(FieldPreset::Hero),
            "ambient" => Some(FieldPreset::Ambient),
            _ => None,
        }
    }
}

/// Everything that shapes the look and feel of the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    // === Population ===
    /// Upper bound on particle count, reached at the reference resolution
    pub base_particle_count: usize,
    pub reference_width: f32,
    pub reference_height: f32,

    // === Appearance at creation ===
    /// Base radius range (pixels)
    pub size_range: Range,
    pub palette: Palette,
    /// Colors that get a bright inner core
    pub highlight_colors: Vec<Color>,
    /// Fraction of particles whose glow pulses
    pub glow_probability: f32,
    pub glow_intensity_range: Range,
    pub opacity_range: Range,
    /// Scales how hard the pointer pushes a particle
    pub density_range: Range,
    /// Width of the initial per-axis velocity range
    pub initial_speed: f32,

    // === Pointer ===
    pub pointer_influence_radius: f32,
    pub narrow_pointer_influence_radius: f32,
    pub narrow_viewport_width: f32,
    pub pointer_coupling: f32,
    pub swell: f32,
    pub relax_step: f32,

    // === Motion ===
    pub damping_factor: f32,
    pub bounce_restitution: f32,
    pub jitter: f32,
    pub glow_step: f32,

    // === Connections ===
    pub connection_max_distance: f32,
    pub connection_alpha: f32,
    pub connection_width: f32,

    // === Drawing ===
    pub glow_blur_base: f32,
    pub glow_pad: f32,
    pub core_scale: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            base_particle_count: BASE_PARTICLE_COUNT,
            reference_width: REFERENCE_WIDTH,
            reference_height: REFERENCE_HEIGHT,

            size_range: Range::new(2.0, 8.0),
            palette: Palette::hero(),
            highlight_colors: vec![Color::HOT_PINK, Color::PALE_ORANGE],
            glow_probability: 0.7,
            glow_intensity_range: Range::new(5.0, 13.0),
            opacity_range: Range::new(0.5, 1.0),
            density_range: Range::new(5.0, 15.0),
            initial_speed: INITIAL_SPEED,

            pointer_influence_radius: POINTER_RADIUS,
            narrow_pointer_influence_radius: NARROW_POINTER_RADIUS,
            narrow_viewport_width: NARROW_VIEWPORT_WIDTH,
            pointer_coupling: POINTER_COUPLING,
            swell: POINTER_SWELL,
            relax_step: RADIUS_RELAX_STEP,

            damping_factor: DAMPING,
            bounce_restitution: BOUNCE_RESTITUTION,
            jitter: JITTER,
            glow_step: GLOW_STEP,

            connection_max_distance: CONNECTION_MAX_DISTANCE,
            connection_alpha: CONNECTION_ALPHA,
            connection_width: CONNECTION_WIDTH,

            glow_blur_base: GLOW_BLUR_BASE,
            glow_pad: GLOW_PAD,
            core_scale: CORE_SCALE,
        }
    }
}

impl FieldConfig {
    /// Create a config from a preset
    pub fn from_preset(preset: FieldPreset) -> Self {
        match preset {
            FieldPreset::Hero => Self::default(),
            FieldPreset::Ambient => Self {
                base_particle_count: 100,
                size_range: Range::new(1.5, 6.0),
                palette: Palette::ambient(),
                highlight_colors: Vec::new(),
                glow_probability: 0.5,
                glow_intensity_range: Range::new(3.0, 9.0),
                opacity_range: Range::new(0.4, 1.0),
                connection_max_distance: 120.0,
                connection_alpha: 0.35,
                connection_width: 0.8,
                glow_blur_base: 25.0,
                glow_pad: 0.0,
                ..Self::default()
            },
        }
    }

    /// Reference area at which `base_particle_count` applies
    pub fn reference_area(&self) -> f32 {
        self.reference_width * self.reference_height
    }

    /// `floor(base * min(1, area / reference_area))`
    pub fn particle_count(&self, dims: Dimensions) -> usize {
        let reference = self.reference_area();
        if reference <= 0.0 {
            return 0;
        }
        let scale = (dims.area() / reference).min(1.0);
        (self.base_particle_count as f32 * scale).floor() as usize
    }

    /// Influence radius for a viewport of the given width
    pub fn pointer_radius_for_width(&self, width: f32) -> f32 {
        if width < self.narrow_viewport_width {
            self.narrow_pointer_influence_radius
        } else {
            self.pointer_influence_radius
        }
    }

    /// Check that every knob is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if !(self.reference_width > 0.0 && self.reference_height > 0.0) {
            return Err(ConfigError::ZeroReferenceArea);
        }
        if self.base_particle_count > MAX_PARTICLE_COUNT {
            return Err(ConfigError::InvalidValue {
                field: "base_particle_count",
                value: self.base_particle_count as f32,
            });
        }

        check_range("size_range", self.size_range, true)?;
        check_range("glow_intensity_range", self.glow_intensity_range, true)?;
        check_range("density_range", self.density_range, true)?;
        check_range("opacity_range", self.opacity_range, false)?;
        if self.opacity_range.min < 0.0 || self.opacity_range.max > 1.0 {
            return Err(ConfigError::InvalidRange {
                field: "opacity_range",
                min: self.opacity_range.min,
                max: self.opacity_range.max,
            });
        }

        for (field, value) in [
            ("glow_probability", self.glow_probability),
            ("connection_alpha", self.connection_alpha),
            ("damping_factor", self.damping_factor),
            ("bounce_restitution", self.bounce_restitution),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidProbability { field, value });
            }
        }

        for (field, value) in [
            ("pointer_influence_radius", self.pointer_influence_radius),
            ("narrow_pointer_influence_radius", self.narrow_pointer_influence_radius),
            ("connection_max_distance", self.connection_max_distance),
            ("relax_step", self.relax_step),
            ("core_scale", self.core_scale),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        for (field, value) in [
            ("initial_speed", self.initial_speed),
            ("pointer_coupling", self.pointer_coupling),
            ("swell", self.swell),
            ("jitter", self.jitter),
            ("glow_step", self.glow_step),
            ("connection_width", self.connection_width),
            ("glow_blur_base", self.glow_blur_base),
            ("glow_pad", self.glow_pad),
            ("narrow_viewport_width", self.narrow_viewport_width),
        ] {
            if !(value >= 0.0) {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }

        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "particle_field_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded field config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored field config: {}", e),
                }
            }
        }

        log::info!("Using default field config");
        Self::default()
    }

    /// Save config to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Field config saved");
                }
                Err(e) => log::error!("Failed to serialize field config: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        log::debug!("No {} storage on native, using defaults", Self::STORAGE_KEY);
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

fn check_range(field: &'static str, range: Range, positive: bool) -> Result<(), ConfigError> {
    let bad_order = !(range.min <= range.max);
    let bad_sign = positive && !(range.min > 0.0);
    if bad_order || bad_sign {
        return Err(ConfigError::InvalidRange {
            field,
            min: range.min,
            max: range.max,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_presets_validate() {
        assert!(FieldConfig::from_preset(FieldPreset::Hero).validate().is_ok());
        assert!(FieldConfig::from_preset(FieldPreset::Ambient).validate().is_ok());
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(FieldPreset::from_str("AMBIENT"), Some(FieldPreset::Ambient));
        assert_eq!(FieldPreset::from_str(FieldPreset::Hero.as_str()), Some(FieldPreset::Hero));
        assert_eq!(FieldPreset::from_str("sparkles"), None);
    }

    #[test]
    fn test_particle_count_formula() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count(Dimensions::new(1920.0, 1080.0)), 150);
        assert_eq!(config.particle_count(Dimensions::new(960.0, 540.0)), 37);
        // Capped on very large screens
        assert_eq!(config.particle_count(Dimensions::new(3840.0, 2160.0)), 150);
        assert_eq!(config.particle_count(Dimensions::new(0.0, 1080.0)), 0);
    }

    proptest! {
        #[test]
        fn prop_particle_count_never_exceeds_base(
            width in 0.0f32..8000.0,
            height in 0.0f32..5000.0,
            base in 0usize..500,
        ) {
            let config = FieldConfig {
                base_particle_count: base,
                ..Default::default()
            };
            let dims = Dimensions::new(width, height);
            let count = config.particle_count(dims);
            prop_assert!(count <= base);
            let scale = (dims.area() / config.reference_area()).min(1.0);
            let expected = (base as f32 * scale).floor() as usize;
            prop_assert_eq!(count, expected);
        }
    }

    #[test]
    fn test_pointer_radius_for_width() {
        let config = FieldConfig::default();
        assert_eq!(config.pointer_radius_for_width(375.0), 70.0);
        assert_eq!(config.pointer_radius_for_width(768.0), 150.0);
        assert_eq!(config.pointer_radius_for_width(1920.0), 150.0);
    }

    #[test]
    fn test_validate_rejects_empty_palette() {
        let config = FieldConfig {
            palette: Palette(Vec::new()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPalette)));
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        let config = FieldConfig {
            size_range: Range::new(8.0, 2.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { field: "size_range", .. })
        ));

        let config = FieldConfig {
            size_range: Range::new(0.0, 2.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_factors() {
        let config = FieldConfig {
            glow_probability: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability { field: "glow_probability", .. })
        ));

        let config = FieldConfig {
            connection_max_distance: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));

        let config = FieldConfig {
            jitter: f32::NAN,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_reference_axes() {
        // Two negative axes multiply to a positive area
        let json = r#"{"reference_width": -1920, "reference_height": -1080}"#;
        let result = FieldConfig::from_json(json);
        assert!(matches!(result, Err(ConfigError::ZeroReferenceArea)));

        let config = FieldConfig {
            reference_height: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroReferenceArea)));
    }

    #[test]
    fn test_validate_caps_particle_count() {
        let config = FieldConfig {
            base_particle_count: MAX_PARTICLE_COUNT,
            ..Default::default()
        };
        assert!(config.validate().is_ok());

        let result = FieldConfig::from_json(r#"{"base_particle_count": 100000000}"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field: "base_particle_count", .. })
        ));
    }

    #[test]
    fn test_json_partial_override() {
        let config = FieldConfig::from_json(
            r##"{"base_particle_count": 40, "palette": ["#FFB6C1"], "damping_factor": 0.9}"##,
        )
        .unwrap();
        assert_eq!(config.base_particle_count, 40);
        assert_eq!(config.palette.0, vec![Color::LIGHT_PINK]);
        assert_eq!(config.damping_factor, 0.9);
        assert_eq!(config.connection_max_distance, CONNECTION_MAX_DISTANCE);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(FieldConfig::from_json("{not json"), Err(ConfigError::Json(_))));
        assert!(matches!(
            FieldConfig::from_json(r#"{"palette": []}"#),
            Err(ConfigError::EmptyPalette)
        ));
    }

    #[test]
    fn test_json_keeps_preset() {
        let ambient = FieldConfig::from_preset(FieldPreset::Ambient);
        let json = ambient.to_json().unwrap();
        assert_eq!(FieldConfig::from_json(&json).unwrap(), ambient);
    }
}
