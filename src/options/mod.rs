//! Centralized control and viewer options with TOML preset support.
//!
//! Orbit-control bounds, viewer coordination and gallery layout are
//! consolidated here. Options serialize to/from TOML so a page can ship
//! presets next to its models.

mod controls;
mod gallery;
mod viewer;

use std::path::Path;

pub use controls::OrbitSettings;
pub use gallery::{GalleryOptions, GalleryVariant};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use viewer::ViewerOptions;

use crate::error::OrbitError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[controls]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Orbit-control bounds and sensitivities.
    pub controls: OrbitSettings,
    /// Multi-viewer coordination.
    pub viewer: ViewerOptions,
    /// Model file layout.
    pub gallery: GalleryOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, OrbitError> {
        let content = std::fs::read_to_string(path).map_err(OrbitError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults; viewer
    /// timings that cannot drive idle rotation are rejected.
    pub fn from_toml(content: &str) -> Result<Self, OrbitError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| OrbitError::OptionsParse(e.to_string()))?;
        options.viewer.validate()?;
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), OrbitError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrbitError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrbitError::Io)?;
        }
        std::fs::write(path, content).map_err(OrbitError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .filter_map(|path| {
                path.file_stem().and_then(|s| s.to_str()).map(str::to_owned)
            })
            .collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[controls]
max_zoom = 12.0
orbit_speed = 0.5

[viewer]
auto_rotate = false
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.controls.max_zoom, 12.0);
        assert_eq!(opts.controls.orbit_speed, 0.5);
        assert!(!opts.viewer.auto_rotate);
        // Everything else should be default
        assert_eq!(opts.controls.damping, 0.12);
        assert_eq!(opts.controls.max_pan_distance, None);
        assert_eq!(opts.gallery.default_model, "stone_1");
        assert_eq!(opts.viewer.initial_pose.radius, 5.0);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err =
            Options::from_toml("[controls]\ndamping = \"fast\"").unwrap_err();
        assert!(matches!(err, OrbitError::OptionsParse(_)));
    }

    #[test]
    fn unrepresentable_idle_delay_is_rejected() {
        for value in ["inf", "1e30", "nan", "-1.0"] {
            let toml_str = format!("[viewer]\nidle_delay_secs = {value}\n");
            let err = Options::from_toml(&toml_str).unwrap_err();
            assert!(
                matches!(err, OrbitError::OptionsParse(ref msg)
                    if msg.contains("idle_delay_secs")),
                "{value}: {err}"
            );
        }
        let opts = Options::from_toml("[viewer]\nidle_delay_secs = 3600.0\n")
            .unwrap();
        assert_eq!(opts.viewer.idle_delay_secs, 3600.0);
    }

    #[test]
    fn infinite_rotate_speed_is_rejected() {
        let err = Options::from_toml("[viewer]\nauto_rotate_speed = inf\n")
            .unwrap_err();
        assert!(matches!(err, OrbitError::OptionsParse(_)));
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("splat-orbit-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.controls.max_pan_distance = Some(3.5);
        opts.save(&dir.join("tight.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(Options::list_presets(&dir), vec!["tight".to_owned()]);
        assert_eq!(Options::load(&dir.join("tight.toml")).unwrap(), opts);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("controls"));
        assert!(props.contains_key("viewer"));
        assert!(props.contains_key("gallery"));

        // Skipped fields should be absent
        let controls = &props["controls"]["properties"];
        assert!(controls.get("damping").is_some());
        assert!(controls.get("max_pan_distance").is_none());
        let viewer = &props["viewer"]["properties"];
        assert!(viewer.get("auto_rotate_speed").is_some());
        assert!(viewer.get("initial_pose").is_none());
    }
}
