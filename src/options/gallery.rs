use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
/// One viewer of a gallery group and the file suffix it displays.
pub struct GalleryVariant {
    /// Viewer (canvas) ID.
    pub viewer: String,
    /// Suffix appended to the model name, extension included.
    pub suffix: String,
}

impl GalleryVariant {
    fn new(viewer: &str, suffix: &str) -> Self {
        Self {
            viewer: viewer.to_owned(),
            suffix: suffix.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[schemars(title = "Gallery", inline)]
#[serde(default)]
/// Where model files live and which variant each viewer shows.
pub struct GalleryOptions {
    /// Directory (or URL prefix) holding the model files, with trailing
    /// separator.
    #[schemars(skip)]
    pub base_path: String,
    /// Model shown before the user picks one.
    #[schemars(title = "Default Model")]
    pub default_model: String,
    /// Side-by-side comparison viewers.
    #[schemars(skip)]
    pub comparison: Vec<GalleryVariant>,
    /// Infill demonstration viewers.
    #[schemars(skip)]
    pub infill: Vec<GalleryVariant>,
}

impl Default for GalleryOptions {
    fn default() -> Self {
        Self {
            base_path: "./static/splats/".into(),
            default_model: "stone_1".into(),
            comparison: vec![
                GalleryVariant::new("main-viewer-1", "_3dgs.ply"),
                GalleryVariant::new("main-viewer-2", "_3dgs_infill.ply"),
                GalleryVariant::new("main-viewer-3", "_ngs.ply"),
                GalleryVariant::new("main-viewer-4", "_ngs_infill.ply"),
            ],
            infill: vec![GalleryVariant::new(
                "infill-viewer-main",
                "_noise.ply",
            )],
        }
    }
}
