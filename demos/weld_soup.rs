//! Weld a triangle soup back into an indexed mesh
//!
//! Run with: cargo run --bin weld_soup -- --size 32 --match normal --match color
//!
//! The demo builds a curved grid where every triangle owns its vertices,
//! welds it, then expands the result and welds it again.

use anyhow::{ensure, Context, Result};
use clap::{Parser, ValueEnum};
use vertweld_core::{ColorRGBA, MeshData, Point3f, Vector3f};
use vertweld_geometry::{GeometryTool, MatchCondition, MatchConditions, VertexReducer, VertGroupData};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Condition {
    Normal,
    Uvs,
    Color,
    Group,
}

impl From<Condition> for MatchCondition {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Normal => MatchCondition::Normal,
            Condition::Uvs => MatchCondition::UVs,
            Condition::Color => MatchCondition::Color,
            Condition::Group => MatchCondition::Group,
        }
    }
}

#[derive(Parser)]
#[command(name = "weld_soup")]
#[command(about = "Weld duplicate vertices of a generated triangle soup")]
struct Args {
    /// Grid points per side
    #[arg(short, long, default_value_t = 16)]
    size: usize,

    /// Attributes that must match for vertices to be welded (repeatable)
    #[arg(short = 'm', long = "match", value_enum)]
    conditions: Vec<Condition>,

    /// Give the left and right half of the grid different vertex colors
    #[arg(long)]
    two_tone: bool,

    /// Snap tolerance; 0 welds exact matches only
    #[arg(short, long, default_value_t = 0.0)]
    tolerance: f32,
}

/// Curved grid where every triangle owns its three vertices
fn grid_soup(size: usize, two_tone: bool) -> MeshData {
    let height = |x: usize, y: usize| ((x as f32 * 0.4).sin() + (y as f32 * 0.3).cos()) * 0.5;
    let corner = |x: usize, y: usize| Point3f::new(x as f32, y as f32, height(x, y));
    let tone = |x: usize| -> ColorRGBA {
        if two_tone && x < size / 2 {
            [0.8, 0.2, 0.2, 1.0]
        } else {
            [0.2, 0.2, 0.8, 1.0]
        }
    };

    let mut vertices = Vec::new();
    let mut normals = Vec::new();
    let mut colors = Vec::new();
    for y in 0..size - 1 {
        for x in 0..size - 1 {
            let quad = [(x, y), (x, y + 1), (x + 1, y), (x + 1, y), (x, y + 1), (x + 1, y + 1)];
            for tri in quad.chunks_exact(3) {
                let p: Vec<Point3f> = tri.iter().map(|&(cx, cy)| corner(cx, cy)).collect();
                let n: Vector3f = (p[1] - p[0]).cross(&(p[2] - p[0])).normalize();
                vertices.extend(p);
                normals.extend([n; 3]);
                colors.extend(tri.iter().map(|&(cx, _)| tone(cx)));
            }
        }
    }

    let mut mesh = MeshData::from_positions(&vertices);
    mesh.set_normals(&normals);
    mesh.set_colors(&colors);
    mesh
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    ensure!(args.size >= 2, "grid size must be at least 2, got {}", args.size);

    let conditions: MatchConditions = args
        .conditions
        .iter()
        .map(|&c| MatchCondition::from(c))
        .collect();
    let tool = GeometryTool::with_params(args.tolerance);
    let group_data = VertGroupData::uniform(conditions);

    let mut mesh = grid_soup(args.size, args.two_tone);
    let soup_count = mesh.vertex_count();
    println!("Triangle soup: {} vertices, conditions {:?}", soup_count, conditions);

    let map = tool
        .reduce(&mut mesh, &group_data)
        .context("welding the triangle soup")?;
    let welded_count = mesh.vertex_count();
    let index_count = mesh.indices.as_ref().map_or(0, |i| i.len());
    println!(
        "Welded: {} vertices, {} indices ({:.1}% of the soup)",
        welded_count,
        index_count,
        100.0 * welded_count as f32 / soup_count as f32
    );
    if let Some(first) = map.new_index(0) {
        println!("Soup vertex 0 now lives in slot {}", first);
    }

    tool.convert_indexed_geometry_into_non_indexed_geometry(&mut mesh)
        .context("expanding the welded mesh")?;
    println!("Expanded: {} vertices", mesh.vertex_count());

    tool.reduce(&mut mesh, &group_data)
        .context("welding the expanded mesh")?;
    println!(
        "Re-welded: {} vertices (first weld: {})",
        mesh.vertex_count(),
        welded_count
    );

    Ok(())
}
