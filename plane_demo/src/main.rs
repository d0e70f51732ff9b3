//! Plane demo
//!
//! Replays a scripted tracking session against the scene core: a floor plane is
//! detected and refined, the user taps it a few times, and the resulting scene tree
//! is logged.
//!
//! Usage: `plane_demo [config-path] [manifest-path]`

use std::path::Path;

use ar_scene::foundation::logging;
use ar_scene::prelude::*;
use ar_scene::scene::Material;

const DEFAULT_MANIFEST: &str = "plane_demo/assets/manifest.ron";

/// Viewport of the simulated device, in pixels
const VIEWPORT: (u32, u32) = (1170, 2532);

/// Camera height above the floor, in meters
const CAMERA_HEIGHT: f32 = 1.4;

fn load_config(path: Option<&str>) -> Result<ArConfig, ArError> {
    let config = match path {
        Some(path) => ArConfig::load_from_file(path)?,
        None => ArConfig::default(),
    };
    config.validate().map_err(ArError::Invalid)?;
    Ok(config)
}

fn load_assets(path: Option<&str>, config: &ArConfig) -> Result<AssetCatalog, ArError> {
    let path = path.unwrap_or(DEFAULT_MANIFEST);
    if Path::new(path).exists() {
        log::info!("Loading asset manifest {}", path);
        return Ok(AssetCatalog::load_manifest(path)?);
    }

    log::info!("No manifest at {}, using built-in assets", path);
    let placement = &config.placement;
    let scene = NodeTemplate::named("scene").with_child(
        NodeTemplate::named(placement.asset_node.as_str()).with_geometry(
            Geometry::cuboid(0.3, 0.3, 0.3).with_materials(vec![Material::color([0.9, 0.9, 0.9, 1.0])]),
        ),
    );
    Ok(AssetCatalog::new()
        .with_scene(placement.asset_scene.as_str(), scene)
        .with_image(
            config.plane.grid_texture.as_str(),
            ImageData::grid(256, 8, 2, [255, 255, 255, 200], [255, 255, 255, 40]),
        ))
}

fn run(view: &mut ArSceneView<SimulatedSession, AssetCatalog>) -> Result<(), ArError> {
    view.start()?;

    let floor = PlaneAnchor::horizontal(
        "floor",
        Transform::identity(),
        Vec3::new(0.0, 0.0, -0.2),
        PlaneExtent::new(0.8, 1.2),
    );
    view.session_mut().detect_plane(floor.clone());
    view.pump();

    // Tracking refines the estimate
    let refined = PlaneAnchor {
        extent: PlaneExtent::new(1.6, 2.0),
        ..floor
    };
    view.session_mut().update_plane(refined);
    view.pump();

    let (width, height) = VIEWPORT;
    let center = view.session().camera().center();
    let taps = [
        Some(center),
        Some(ScreenPoint::new(width as f32 * 0.3, height as f32 * 0.6)),
        // Top-left corner, inside the refined extent only
        Some(ScreenPoint::new(0.0, 0.0)),
        None,
    ];
    for tap in taps {
        view.session_mut().tap(tap);
    }
    let handled = view.pump();
    log::info!("Handled {} tap event(s)", handled);

    view.pause();
    Ok(())
}

fn main() -> Result<(), ArError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first().map(String::as_str))?;
    logging::init_with_level(&config.log_level);

    log::info!("Starting plane demo");
    let assets = load_assets(args.get(1).map(String::as_str), &config)?;
    let (width, height) = VIEWPORT;
    let session = SimulatedSession::new(Camera::looking_down(CAMERA_HEIGHT, width, height));

    let mut view = ArSceneView::new(config, session, assets);
    if let Err(err) = run(&mut view) {
        log::error!("Demo failed: {}", err);
        return Err(err);
    }

    log::info!(
        "{} plane visual(s), {} placed object(s), {} node(s)",
        view.plane_registry().len(),
        view.placement().placed_count(),
        view.graph().len()
    );
    view.log_tree();
    Ok(())
}
