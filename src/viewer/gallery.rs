//! Model path resolution for the viewer groups on the page.

use crate::options::{GalleryOptions, GalleryVariant};

/// Viewer groups that switch models together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryGroup {
    /// Side-by-side reconstructions of the same model.
    Comparison,
    /// Single viewer showing the infill input.
    Infill,
}

/// One model file to load into one viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    /// Target viewer ID.
    pub viewer: String,
    /// Model source path.
    pub path: String,
}

/// Resolve the model files every viewer of `group` should show for
/// `model`, e.g. `./static/splats/stone_1_ngs.ply`.
#[must_use]
pub fn model_requests(
    options: &GalleryOptions,
    group: GalleryGroup,
    model: &str,
) -> Vec<ModelRequest> {
    let variants: &[GalleryVariant] = match group {
        GalleryGroup::Comparison => &options.comparison,
        GalleryGroup::Infill => &options.infill,
    };
    variants
        .iter()
        .map(|variant| ModelRequest {
            viewer: variant.viewer.clone(),
            path: format!("{}{model}{}", options.base_path, variant.suffix),
        })
        .collect()
}

/// Every viewer ID named by the gallery, comparison group first.
#[must_use]
pub fn viewer_ids(options: &GalleryOptions) -> Vec<&str> {
    options
        .comparison
        .iter()
        .chain(&options.infill)
        .map(|v| v.viewer.as_str())
        .collect()
}
