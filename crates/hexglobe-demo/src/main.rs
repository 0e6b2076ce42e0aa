//! Demo binary that generates a tiled globe and reports what it built.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p hexglobe-demo` for the default 25-subdivision globe.
//! Run with `cargo run -p hexglobe-demo -- -n 8 --seed 7 --json` for machine-readable stats.

use std::process::ExitCode;

use clap::Parser;
use glam::{Quat, Vec3};
use hexglobe_config::{CliArgs, Config, default_config_dir};
use hexglobe_mesh::{GeometryBuffer, HoverTracker, Ray};
use hexglobe_terrain::{Globe, GlobeParams};
use tracing::{error, info, warn};

/// Camera positions visited when sweeping the pick ray around the globe.
const SWEEP_STEPS: usize = 8;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = args.config.clone().or_else(default_config_dir);

    let mut config = match config_dir.as_deref() {
        Some(dir) => Config::load_or_create(dir).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}, using defaults");
            Config::default()
        }),
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    if config.debug.log_dir.is_none() {
        config.debug.log_dir = config_dir.as_ref().map(|dir| dir.join("logs"));
    }
    hexglobe_log::init_logging(&config.debug, cfg!(debug_assertions));

    if let Err(e) = config.validate() {
        error!("{e}");
        return ExitCode::FAILURE;
    }

    let params = GlobeParams {
        subdivisions: config.globe.subdivisions,
        seed: config.globe.seed,
        separate_cap_chance: config.globe.separate_cap_chance,
    };

    let globe = match Globe::generate_seeded(&params) {
        Ok(globe) => globe,
        Err(e) => {
            error!("Globe generation failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    report_meshes(&globe);
    sweep_pick_ray(&globe, Vec3::from_array(config.pick.camera_position));

    let stats = globe.stats();
    info!(
        tiles = stats.tiles,
        separate_caps = stats.separate_caps,
        column_vertices = stats.column_vertices,
        "Globe ready"
    );

    if args.json {
        match serde_json::to_string_pretty(&stats) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("Failed to serialize stats: {e}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

fn report_meshes(globe: &Globe) {
    let merged = globe.merged_meshes();

    for (terrain, mesh) in &merged.columns {
        let material = terrain.column_material();
        let arrays = mesh.to_attribute_arrays();
        info!(
            terrain = terrain.name(),
            vertices = mesh.vertex_count(),
            normal_floats = arrays.normals.len(),
            color = ?material.color,
            casts_shadow = material.casts_shadow,
            "Column mesh"
        );
        log_bounds(terrain.name(), mesh);
    }

    for (terrain, mesh) in &merged.caps {
        if let Some(material) = terrain.cap_material() {
            info!(
                terrain = terrain.name(),
                vertices = mesh.vertex_count(),
                color = ?material.color,
                "Cap mesh"
            );
        }
    }

    match &merged.hit_test {
        Some(mesh) => {
            let arrays = mesh.to_attribute_arrays();
            info!(
                triangles = mesh.triangle_count(),
                tile_id_floats = arrays.tile_ids.len(),
                "Hit-test mesh"
            );
        }
        None => warn!("Globe produced no hit-test geometry"),
    }
}

fn log_bounds(name: &str, mesh: &GeometryBuffer) {
    if let Some((center, radius)) = mesh.bounding_sphere() {
        tracing::debug!(terrain = name, ?center, radius, "Bounding sphere");
    }
}

/// Orbit the camera around the Y axis, casting a ray at the globe center each step, and log
/// hover transitions the way a pointer sweeping across the globe would produce them.
fn sweep_pick_ray(globe: &Globe, camera: Vec3) {
    let Some(hit_mesh) = globe.merged_hit_test() else {
        return;
    };

    let mut tracker = HoverTracker::new();
    for step in 0..SWEEP_STEPS {
        let angle = std::f32::consts::TAU * step as f32 / SWEEP_STEPS as f32;
        let eye = Quat::from_rotation_y(angle) * camera;
        let picked = hit_mesh.pick_tile(&Ray::toward(eye, Vec3::ZERO));

        let transition = tracker.pointer_moved(picked);
        if let Some(left) = transition.left {
            info!(tile = %left, "Pointer left tile");
        }
        if let Some(entered) = transition.entered {
            info!(
                tile = %entered,
                terrain = ?globe.terrain_of(entered),
                cap = ?globe.cap_mode_of(entered),
                "Pointer entered tile"
            );
        }
    }

    if let Some(left) = tracker.pointer_left().left {
        info!(tile = %left, "Pointer left globe");
    }
}
