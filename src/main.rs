//! SmoothLife CLI - Run a field from JSON configuration and dump its frames.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Instant;

use smooth_life::{
    compute::{Field, FieldStats},
    frames::{FrameWriter, TextWriter, WriterConfig},
    schema::{FieldConfig, Seed},
};

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && args[1] == "--example" {
        print_example_config();
        return;
    }

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json> [frames] [output]", args[0]);
        eprintln!();
        eprintln!("Run a SmoothLife field from JSON configuration.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to field configuration file");
        eprintln!("  frames       Number of frames to write (default: 10)");
        eprintln!("  output       Output file; .txt for text (default: frames0.dat)");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    let config_path = PathBuf::from(&args[1]);
    let frames: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10);
    let output = args
        .get(3)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("frames0.dat"));

    // Load configuration
    let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
        eprintln!("Error reading config file: {}", e);
        std::process::exit(1);
    });

    let config: FieldConfig = serde_json::from_str(&config_str).unwrap_or_else(|e| {
        eprintln!("Error parsing config: {}", e);
        std::process::exit(1);
    });

    // Load or create seed
    let seed_path = config_path.with_extension("seed.json");
    let seed: Seed = if seed_path.exists() {
        let seed_str = fs::read_to_string(&seed_path).unwrap_or_else(|e| {
            eprintln!("Error reading seed file: {}", e);
            std::process::exit(1);
        });
        serde_json::from_str(&seed_str).unwrap_or_else(|e| {
            eprintln!("Error parsing seed: {}", e);
            std::process::exit(1);
        })
    } else {
        Seed::default()
    };

    let mut field = Field::new(&config).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });
    seed.apply(&mut field);

    println!("SmoothLife");
    println!("==========");
    println!("Grid: {}x{}", field.width(), field.height());
    println!(
        "Kernel: inner={}, outer={}, range={}",
        config.inner,
        config.outer(),
        field.range()
    );
    println!(
        "Normalization: disk={:.3}, ring={:.3}",
        field.normalization_disk(),
        field.normalization_ring()
    );
    println!("Frames: {}", frames);
    println!("Output: {}", output.display());
    println!();

    print_stats("Initial state", &FieldStats::from_field(&field));

    let start = Instant::now();
    if let Err(e) = run(&mut field, frames, &output) {
        eprintln!("Error writing frames: {}", e);
        std::process::exit(1);
    }
    let elapsed = start.elapsed();

    print_stats("Final state", &FieldStats::from_field(&field));
    println!(
        "Time: {:.2}s ({:.2} frames/s)",
        elapsed.as_secs_f32(),
        frames as f32 / elapsed.as_secs_f32()
    );
}

/// Write the current frame, then advance, until `frames` frames are written.
fn run(field: &mut Field, frames: u64, output: &Path) -> io::Result<()> {
    let is_text = output.extension().is_some_and(|ext| ext == "txt");
    let start = Instant::now();

    if is_text {
        let mut writer = TextWriter::new(BufWriter::new(File::create(output)?));
        while field.frame() < frames {
            writer.write_frame(field)?;
            field.update();
            report_progress(field, frames, &start);
        }
        writer.finish()?;
    } else {
        let mut writer = FrameWriter::create(output, field, WriterConfig::default())?;
        while field.frame() < frames {
            writer.record_frame(field)?;
            field.update();
            report_progress(field, frames, &start);
        }
        let stats = writer.finalize()?;
        println!("Wrote {}", stats);
    }

    Ok(())
}

fn report_progress(field: &Field, frames: u64, start: &Instant) {
    let done = field.frame();
    if done % (frames / 10).max(1) == 0 {
        let stats = FieldStats::from_field(field);
        let elapsed = start.elapsed().as_secs_f32();
        println!(
            "  Frame {}/{}: total={:.4}, active={}, {:.2} frames/s",
            done,
            frames,
            stats.total,
            stats.active_cells,
            done as f32 / elapsed
        );
    }
}

fn print_stats(label: &str, stats: &FieldStats) {
    println!("{}:", label);
    println!("  Total density: {:.6}", stats.total);
    println!("  Mean density: {:.6}", stats.mean_value);
    println!("  Active cells: {}", stats.active_cells);
    println!(
        "  Value range: [{:.6}, {:.6}]",
        stats.min_value, stats.max_value
    );
    println!();
}

fn print_example_config() {
    let config = FieldConfig {
        width: 200,
        height: 500,
        ..FieldConfig::default()
    };
    let seed = Seed::default();

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
    println!();
    println!("Example seed (config.seed.json):");
    match serde_json::to_string_pretty(&seed) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing seed: {}", e),
    }
}
