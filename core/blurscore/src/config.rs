//! Configuration for the sharpness service
//!
//! Holds the face detector setup (model file and search parameters), the
//! face-size policy, and annotation styling. Loaded from TOML; every field has
//! a default so partial files are accepted.

use crate::error::BlurScoreError;
use crate::region::{SelectionPolicy, MIN_FACE_SCALE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlurScoreConfig {
    /// Face detector backend settings
    pub detector: DetectorConfig,
    /// Face-size policy
    pub selection: SelectionConfig,
    /// Outline styling for annotated images
    pub annotation: AnnotationConfig,
}

/// Face detector configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Path to the face model file, loaded once at detector construction
    pub model_path: PathBuf,
    /// Smallest face side the detector searches for (pixels, >= 20)
    pub min_face_size: u32,
    /// Largest face side the detector searches for (pixels)
    pub max_face_size: u32,
    /// Minimum classifier score for a window to count as a face (> 0)
    pub score_threshold: f64,
    /// Image pyramid down-scaling factor (0.01-0.99)
    pub pyramid_scale_factor: f32,
    /// Sliding window step in both directions (pixels)
    pub slide_window_step: u32,
}

/// Face selection policy configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Faces must be strictly larger than this scale to be used
    pub min_face_scale: i32,
}

/// Face outline styling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationConfig {
    /// Outline thickness in pixels (>= 1)
    pub thickness: u32,
    /// Outline color as [r, g, b, a]
    pub color: [u8; 4],
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("model/seeta_fd_frontal_v1.0.bin"),
            min_face_size: 20,
            max_face_size: 1000,
            score_threshold: 2.0,
            pyramid_scale_factor: 0.8,
            slide_window_step: 4,
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_face_scale: MIN_FACE_SCALE,
        }
    }
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            thickness: 1,
            color: [255, 0, 0, 255],
        }
    }
}

impl SelectionConfig {
    /// Selection policy built from this section
    pub fn policy(&self) -> SelectionPolicy {
        SelectionPolicy {
            min_scale: self.min_face_scale,
        }
    }
}

impl BlurScoreConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(contents: &str) -> Result<Self, BlurScoreError> {
        let config: BlurScoreConfig = toml::from_str(contents)
            .map_err(|e| BlurScoreError::Config(format!("failed to parse config: {}", e)))?;
        config.validate().map_err(BlurScoreError::Config)?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, BlurScoreError> {
        let path = path.as_ref();

        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| BlurScoreError::Config(format!("failed to read config file: {}", e)))?;

        let config = Self::from_toml_str(&contents)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), BlurScoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                BlurScoreError::Config(format!("failed to create config directory: {}", e))
            })?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| BlurScoreError::Config(format!("failed to serialize config: {}", e)))?;

        fs::write(path, toml_string)
            .map_err(|e| BlurScoreError::Config(format!("failed to write config file: {}", e)))?;

        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Get default config file path
    pub fn default_path() -> PathBuf {
        PathBuf::from("blurscore.toml")
    }

    /// Load from default location, falling back to defaults on any error
    pub fn load_or_default() -> Self {
        Self::load_from_file(Self::default_path()).unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        self.detector.validate()?;

        if self.selection.min_face_scale < 0 {
            return Err("Minimum face scale must not be negative".to_string());
        }

        if self.annotation.thickness == 0 {
            return Err("Outline thickness must be at least 1".to_string());
        }

        Ok(())
    }
}

impl DetectorConfig {
    /// Check the detector settings against the ranges the SeetaFace engine
    /// accepts; out-of-range values abort inside the engine.
    pub fn validate(&self) -> Result<(), String> {
        let detector = self;
        if detector.min_face_size < 20 {
            return Err("Minimum face size must be at least 20".to_string());
        }
        if detector.min_face_size > detector.max_face_size {
            return Err("Minimum face size exceeds maximum face size".to_string());
        }
        if !(0.01..=0.99).contains(&detector.pyramid_scale_factor) {
            return Err("Pyramid scale factor must be between 0.01 and 0.99".to_string());
        }
        if !(detector.score_threshold > 0.0) {
            return Err("Score threshold must be > 0".to_string());
        }
        if detector.slide_window_step == 0 {
            return Err("Slide window step must be > 0".to_string());
        }
        Ok(())
    }
}
