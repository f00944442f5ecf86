use anyhow::Result;
use clap::Parser;
use imgfit::config::CompressConfig;
use imgfit::{BudgetPreset, ColorFormat, Outcome};

/// Minimal, human-friendly byte-budget image compression:
/// - pick a budget in bytes (or a named link preset)
/// - the search finds the best (quality, scale) pair that fits
#[derive(Parser, Debug)]
#[command(name = "imgfit")]
#[command(about = "📡 Compress an image to fit a hard byte budget")]
#[command(long_about = "Compress an image to fit a hard byte budget, for bandwidth-constrained links.
Searches JPEG quality and spatial scale together and writes the best artifact that fits.")]
struct Args {
    /// Input image path (any format the `image` crate can decode)
    input: String,

    /// Output path for the encoded artifact
    #[arg(short, long, default_value = "fit.jpg", help = "Where to write the compressed image")]
    output: String,

    /// Byte budget (supports plain bytes, k, m)
    #[arg(short, long,
          help = "Maximum encoded size: 340 (bytes), 4k (kilobytes), 1m (megabytes)")]
    budget: Option<String>,

    /// Named link budget instead of a raw byte count
    #[arg(short, long, value_enum, conflicts_with = "budget",
          help = "Link preset: iridium (340 bytes), fipy (3800 bytes)")]
    preset: Option<BudgetPreset>,

    /// Color format handed to the encoder
    #[arg(short, long, value_enum, default_value = "rgb",
          help = "Color normalization: rgb, gray, binary")]
    color: ColorFormat,

    /// Encode format
    #[arg(long, default_value = "jpeg", help = "Encode format (currently jpeg)")]
    codec: String,

    /// When nothing fits, write the smallest oversized artifact anyway
    #[arg(long, help = "On infeasible budgets, keep the smallest artifact found")]
    keep_oversized: bool,

    /// Print probe-by-probe progress
    #[arg(short, long, help = "Show each (quality, scale) probe and its size")]
    verbose: bool,

    /// Emit a machine-readable JSON summary on stdout
    #[arg(long, help = "Print a JSON summary instead of the human one")]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let budget = match (&args.budget, args.preset) {
        (Some(raw), _) => parse_budget(raw)?,
        (None, Some(preset)) => preset.bytes(),
        (None, None) => anyhow::bail!("Specify a budget with --budget or --preset"),
    };

    let mut config = CompressConfig::new(budget, args.color, args.codec.clone());
    config.keep_oversized = args.keep_oversized;
    config.validate().map_err(anyhow::Error::msg)?;
    let options = config.to_options()?;

    let img = image::open(&args.input)?.to_rgb8();
    if !args.json {
        println!("Input: {} ({}x{})", args.input, img.width(), img.height());
        println!("Budget: {} bytes, color: {:?}, codec: {}", budget, args.color, args.codec);
    }

    let mut probes = 0usize;
    let verbose = args.verbose && !args.json;
    let result = imgfit::compress_with_observer(&img, &options, &mut |q: u8, s: f64, n: usize| {
        probes += 1;
        if verbose {
            println!("  probe {:>2}: quality {:>3}, scale {:.3} -> {} bytes", probes, q, s, n);
        }
    })?;

    if args.json {
        println!(
            "{}",
            serde_json::json!({
                "input": args.input,
                "budget": budget,
                "outcome": outcome_name(result.outcome),
                "size": result.data.len(),
                "probes": probes,
                "quality": result.best.map(|b| b.quality),
                "scale": result.best.map(|b| b.scale),
            })
        );
    }

    match result.outcome {
        Outcome::Exact | Outcome::BestEffort => {
            std::fs::write(&args.output, &result.data)?;
            if !args.json {
                if let Some(best) = result.best {
                    println!(
                        "Wrote {} ({} bytes, quality {}, scale {:.3}, {} probes)",
                        args.output,
                        result.data.len(),
                        best.quality,
                        best.scale,
                        probes
                    );
                }
            }
            Ok(())
        }
        Outcome::Infeasible => {
            if !result.data.is_empty() {
                std::fs::write(&args.output, &result.data)?;
                eprintln!(
                    "No candidate fit {} bytes; wrote smallest artifact ({} bytes) to {}",
                    budget,
                    result.data.len(),
                    args.output
                );
            } else {
                eprintln!("No candidate fit {} bytes; nothing written", budget);
            }
            std::process::exit(2);
        }
    }
}

fn outcome_name(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Exact => "exact",
        Outcome::BestEffort => "best_effort",
        Outcome::Infeasible => "infeasible",
    }
}

/// Parse a budget string like "340", "4k", "1m" into bytes
fn parse_budget(budget: &str) -> Result<usize> {
    if let Ok(bytes) = budget.parse::<usize>() {
        return Ok(bytes);
    }

    let len = budget.len();
    if len < 2 {
        return Err(anyhow::anyhow!("Invalid budget format: {}", budget));
    }

    let (num_str, unit) = budget.split_at(len - 1);
    let num: usize = num_str
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid number in budget: {}", num_str))?;

    match unit {
        "k" | "K" => Ok(num * 1000),
        "m" | "M" => Ok(num * 1_000_000),
        _ => Err(anyhow::anyhow!(
            "Invalid budget unit: {}. Use 'k' for kilobytes, 'm' for megabytes, or plain bytes",
            unit
        )),
    }
}
