use clap::{Parser, Subcommand};
use glam::Vec3;
use shadowcast_common::ChunkPos;
use shadowcast_mesh::{mesh_chunk, ChunkVolume};
use shadowcast_migrate::{checksum_of, MigrationLedger, MigrationStatus};
use shadowcast_render::{ChunkDraw, DebugShadowRenderer, DirectionalLight, ShadowFrame, ShadowRenderer};
use shadowcast_vertex::PackedVertex;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shadowcast-cli", about = "CLI for shadowcast operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Decode a packed vertex attribute
    Decode {
        /// Raw attribute value (decimal, or hex with 0x prefix)
        packed: String,
        /// Chunk grid X coordinate
        #[arg(long, default_value = "0")]
        chunk_x: i32,
        /// Chunk grid Y coordinate
        #[arg(long, default_value = "0")]
        chunk_y: i32,
    },
    /// Pack local coordinates into an attribute value
    Pack {
        x: u32,
        y: u32,
        z: i32,
    },
    /// Mesh a demo chunk and run the CPU shadow pass over it
    Demo {
        /// Edge length of the demo platform (cells)
        #[arg(short, long, default_value = "8")]
        size: i32,
    },
    /// Inspect or verify a migration ledger
    Ledger {
        /// Path to the ledger JSON file
        path: PathBuf,
        /// Check a migration source file against its record
        #[arg(long)]
        check: Option<PathBuf>,
        /// Id of the migration to check
        #[arg(long, requires = "check")]
        id: Option<i32>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("shadowcast-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", shadowcast_common::crate_info());
            println!("vertex: {}", shadowcast_vertex::crate_info());
            println!("mesh: {}", shadowcast_mesh::crate_info());
            println!("render: {}", shadowcast_render::crate_info());
            println!("migrate: {}", shadowcast_migrate::crate_info());
        }
        Commands::Decode {
            packed,
            chunk_x,
            chunk_y,
        } => {
            let raw = parse_u32(&packed)?;
            let vertex = PackedVertex::from_raw(raw);
            let local = vertex.unpack();
            let offset = ChunkPos::new(chunk_x, chunk_y).world_offset();
            let world = vertex.decode(offset);

            println!("raw:    {raw:#010x}");
            println!("local:  ({}, {}, {})", local.x, local.y, local.z);
            println!(
                "offset: ({:.1}, {:.1}, {:.1})",
                offset.x, offset.y, offset.z
            );
            println!(
                "world:  ({:.1}, {:.1}, {:.1}, {:.1})",
                world.x, world.y, world.z, world.w
            );
        }
        Commands::Pack { x, y, z } => {
            let vertex = PackedVertex::pack(x, y, z)?;
            println!("{:#010x}", vertex.raw());
        }
        Commands::Demo { size } => {
            let mut volume = ChunkVolume::new();
            let size = size.clamp(1, 32);
            for x in 0..size {
                for y in 0..size {
                    volume.fill(x, y, 0)?;
                }
            }
            // A pillar so the depth range is not flat.
            for z in 1..=4 {
                volume.fill(size / 2, size / 2, z)?;
            }

            let mesh = mesh_chunk(&volume)?;
            let mut frame = ShadowFrame::new();
            frame.push(ChunkDraw::new(ChunkPos::new(0, 0), mesh));

            let light = DirectionalLight {
                focus: Vec3::new(size as f32 / 2.0, size as f32 / 2.0, 0.0),
                ..Default::default()
            };
            let stats = DebugShadowRenderer::new().render(&frame, &light);

            println!("cells:     {}", volume.len());
            println!("draws:     {}", stats.draws);
            println!("vertices:  {}", stats.vertices);
            println!("triangles: {}", stats.triangles);
            println!(
                "depth:     [{:.4}, {:.4}]",
                stats.depth_min, stats.depth_max
            );
        }
        Commands::Ledger { path, check, id } => {
            let ledger = MigrationLedger::open(&path)?;
            println!("ledger: {} ({} records)", path.display(), ledger.len());
            for record in ledger.records() {
                println!(
                    "  [{:>4}] {} last_run={} checksum={}...",
                    record.id,
                    record.title,
                    record.last_run,
                    &record.checksum[..12.min(record.checksum.len())]
                );
            }
            ledger.verify_all()?;

            if let (Some(check), Some(id)) = (check, id) {
                let source = std::fs::read_to_string(&check)?;
                match ledger.status(id, &checksum_of(&source)) {
                    MigrationStatus::Applied => println!("migration {id}: applied"),
                    MigrationStatus::NotApplied => println!("migration {id}: not applied"),
                    MigrationStatus::ChecksumMismatch { recorded } => {
                        println!("migration {id}: CHECKSUM MISMATCH (recorded {recorded})");
                        std::process::exit(1);
                    }
                }
            }
        }
    }

    Ok(())
}

fn parse_u32(s: &str) -> anyhow::Result<u32> {
    let raw = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16)?
    } else {
        s.parse()?
    };
    Ok(raw)
}
