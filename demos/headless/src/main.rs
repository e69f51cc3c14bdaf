// Copyright 2025 the Tri Raster Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless

#![allow(
    clippy::cast_possible_truncation,
    reason = "pixel values are clamped before they are cast"
)]

mod scenes;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use image::{GrayImage, Luma, Rgb, RgbImage};
use tri_raster::{FaceCulling, Mesh, RasterBuffers, RasterSettings, Rasterizer};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scene = scenes::build(args.scene, args.distance, args.width, args.height);
    let mesh = Mesh::new(&scene.vertices, &scene.triangles).context("building the mesh")?;
    let settings = RasterSettings {
        num_layers: args.layers,
        face_culling: args.culling.into(),
        num_threads: args.threads,
    };
    let rasterizer = Rasterizer::new_with(settings)?;

    let mut buffers = RasterBuffers::new();
    rasterizer.rasterize(&mesh, args.width, args.height, &mut buffers)?;
    log::info!(
        "rasterized {} triangles of scene {:?}",
        mesh.triangle_count(),
        args.scene
    );

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    for layer in 0..buffers.layers() {
        write_layer(&buffers, layer, &args.out_dir)?;
    }
    println!(
        "Wrote {} layers ({}x{}) to {}",
        buffers.layers(),
        args.width,
        args.height,
        args.out_dir.display()
    );
    Ok(())
}

/// Write the triangle ids, depths and barycentrics of one layer as PNG files.
///
/// Image row 0 is the top, so rows are flipped to show NDC y pointing up.
fn write_layer(buffers: &RasterBuffers, layer: u16, directory: &Path) -> Result<()> {
    let (width, height) = (u32::from(buffers.width()), u32::from(buffers.height()));
    let mut ids = RgbImage::new(width, height);
    let mut depth = GrayImage::new(width, height);
    let mut bary = RgbImage::new(width, height);

    for y in 0..buffers.height() {
        for x in 0..buffers.width() {
            let Some(fragment) = buffers.fragment(x, y, layer) else {
                continue;
            };
            let (px, py) = (u32::from(x), height - 1 - u32::from(y));

            ids.put_pixel(px, py, Rgb(id_color(fragment.triangle_id)));
            // Near is bright.
            let d = ((1.0 - fragment.depth) * 0.5).clamp(0.0, 1.0);
            depth.put_pixel(px, py, Luma([(d * 255.0).round() as u8]));
            bary.put_pixel(
                px,
                py,
                Rgb(fragment
                    .barycentric
                    .map(|b| (b.clamp(0.0, 1.0) * 255.0).round() as u8)),
            );
        }
    }

    for (name, result) in [
        ("ids", ids.save(directory.join(format!("ids_{layer}.png")))),
        ("depth", depth.save(directory.join(format!("depth_{layer}.png")))),
        ("bary", bary.save(directory.join(format!("bary_{layer}.png")))),
    ] {
        result.with_context(|| format!("writing the {name} image of layer {layer}"))?;
    }
    Ok(())
}

/// A stable, well spread colour for a triangle id.
fn id_color(id: i32) -> [u8; 3] {
    let hash = (id as u32).wrapping_add(1).wrapping_mul(0x9E37_79B9);
    let [r, g, b, _] = hash.to_le_bytes();
    // Keep every colour away from the black background.
    [r | 0x40, g | 0x40, b | 0x40]
}

#[derive(Parser, Debug)]
#[command(about, long_about = None, bin_name = "cargo run -p headless --")]
struct Args {
    /// Which scene to rasterize
    #[arg(long, short, value_enum, default_value_t = SceneKind::Cube)]
    scene: SceneKind,
    #[arg(long, default_value_t = 512)]
    width: u16,
    #[arg(long, default_value_t = 512)]
    height: u16,
    /// Number of depth layers to keep per pixel
    #[arg(long, short, default_value_t = 1)]
    layers: u16,
    #[arg(long, value_enum, default_value_t = Culling::None)]
    culling: Culling,
    /// Number of worker threads, 0 to rasterize on the main thread
    #[arg(long, short, default_value_t = 0)]
    threads: u16,
    /// Distance of the camera from the cube centre; values below 1 put the camera inside it
    #[arg(long, default_value_t = 3.0)]
    distance: f32,
    /// Directory to store the results into
    #[arg(long, default_value_os_t = default_directory())]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SceneKind {
    /// Two triangles forming a square
    Quad,
    /// Three overlapping triangles at different depths
    Overlap,
    /// A cube seen through a perspective camera
    Cube,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Culling {
    None,
    Front,
    Back,
}

impl From<Culling> for FaceCulling {
    fn from(culling: Culling) -> Self {
        match culling {
            Culling::None => Self::None,
            Culling::Front => Self::Front,
            Culling::Back => Self::Back,
        }
    }
}

fn default_directory() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("outputs")
}
