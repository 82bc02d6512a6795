//! Headless demo: drives the gallery's synchronized viewers with scripted
//! input and logs the camera each viewer would render from.
//!
//! Usage: `splat-orbit [options.toml] [--schema schema.json]`

use std::path::PathBuf;

use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use splat_orbit::camera::CameraPose;
use splat_orbit::input::MouseButton;
use splat_orbit::viewer::{
    gallery, GalleryGroup, ModelLoader, SplatRenderer, SplatScene,
};
use splat_orbit::{
    InputEvent, InputSurface, Options, OrbitError, ViewerRegistry,
};
use web_time::{Duration, Instant};

const FRAMES: u64 = 600;
const FRAME_TIME: Duration = Duration::from_millis(16);

/// Scene that only remembers which file it shows.
#[derive(Default)]
struct PathScene {
    model: Option<String>,
}

impl SplatScene for PathScene {
    type Model = String;

    fn insert(&mut self, model: String, _rotation: glam::Quat) {
        self.model = Some(model);
    }

    fn clear(&mut self) -> Option<String> {
        self.model.take()
    }
}

/// Renderer that logs the camera once a second.
struct LogRenderer {
    id: String,
    frames: u64,
}

impl SplatRenderer<PathScene> for LogRenderer {
    fn render(&mut self, scene: &PathScene, camera: CameraPose) {
        if self.frames % 60 == 0 {
            log::info!(
                "{} [{}] eye {:.2} euler {:.2}",
                self.id,
                scene.model.as_deref().unwrap_or("empty"),
                camera.position,
                camera.euler(),
            );
        }
        self.frames += 1;
    }
}

/// Loader that accepts any path present on disk.
struct FileLoader;

impl ModelLoader for FileLoader {
    type Model = String;

    fn load<'a>(
        &'a self,
        path: &'a str,
    ) -> LocalBoxFuture<'a, Result<String, OrbitError>> {
        async move {
            std::fs::metadata(path)
                .map(|_| path.to_owned())
                .map_err(|e| OrbitError::model_load(path, e))
        }
        .boxed_local()
    }
}

struct Args {
    options: Option<PathBuf>,
    schema: Option<PathBuf>,
}

fn parse_args() -> Args {
    let mut args = std::env::args().skip(1);
    let mut parsed = Args {
        options: None,
        schema: None,
    };
    while let Some(arg) = args.next() {
        if arg == "--schema" {
            parsed.schema = args.next().map(PathBuf::from);
        } else {
            parsed.options = Some(PathBuf::from(arg));
        }
    }
    parsed
}

#[allow(clippy::cast_precision_loss)]
fn scripted_input(frame: u64) -> Option<InputEvent> {
    match frame {
        30 => Some(InputEvent::PointerDown {
            button: MouseButton::Left,
            x: 400.0,
            y: 300.0,
        }),
        31..=90 => {
            let step = (frame - 30) as f32;
            Some(InputEvent::PointerMove {
                x: 400.0 + step * 4.0,
                y: 300.0 + step,
            })
        }
        91 => Some(InputEvent::PointerUp {
            button: MouseButton::Left,
        }),
        120..=140 => Some(InputEvent::Wheel { delta_y: -2.0 }),
        _ => None,
    }
}

fn run() -> Result<(), OrbitError> {
    let args = parse_args();

    if let Some(path) = args.schema {
        let json = serde_json::to_string_pretty(&Options::json_schema())
            .map_err(|e| OrbitError::OptionsParse(e.to_string()))?;
        std::fs::write(&path, json)?;
        log::info!("options schema written to {}", path.display());
        return Ok(());
    }

    let options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    let model = options.gallery.default_model.clone();
    let ids: Vec<String> = gallery::viewer_ids(&options.gallery)
        .into_iter()
        .map(str::to_owned)
        .collect();

    let mut viewers = ViewerRegistry::new(options);
    for id in &ids {
        let renderer = LogRenderer {
            id: id.clone(),
            frames: 0,
        };
        let _ = viewers.add_viewer(
            id.as_str(),
            InputSurface::new(id.as_str()),
            PathScene::default(),
            renderer,
        );
    }

    let mut loaded = 0;
    for group in [GalleryGroup::Comparison, GalleryGroup::Infill] {
        loaded += block_on(viewers.load_gallery(&FileLoader, group, &model));
    }
    log::info!("{loaded} of {} viewers have a model", ids.len());

    let master = viewers.master().unwrap_or_default().to_owned();
    let start = Instant::now();
    let mut transition = None;
    for frame in 0..FRAMES {
        let now = start + FRAME_TIME * u32::try_from(frame).unwrap_or(u32::MAX);
        if let Some(event) = scripted_input(frame) {
            let _ = viewers.dispatch(&master, &event, now)?;
        }
        if frame == 300 {
            transition = viewers
                .viewer(&master)
                .and_then(|v| v.controls().set_pose(0.0, 0.3, 4.0, true));
        }
        viewers.frame(now);
    }

    if let Some(mut handle) = transition {
        if (&mut handle).now_or_never().is_some() {
            log::info!("transition to the front view settled");
        } else {
            log::warn!("transition still running after {FRAMES} frames");
        }
    }
    log::info!("average {:.1} fps (simulated)", viewers.fps());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
