use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;

use gibber_core::corpus::Side;
use gibber_core::model::distribution::Model;
use gibber_core::model::generation_input::GenerationInput;
use gibber_core::model::generator::Generator;

/// Build per-side models from a training corpus and write two guess files:
/// one of left-half fragments and one of right-half fragments. All
/// combinations of a left and a right fragment form the candidate strings
/// tried by the downstream brute-force search.
#[derive(Parser)]
#[command(name = "gibber", version, about = "Generate deterministic guess fragments from a training corpus")]
struct Args {
    /// Corpus file, one training string per line
    corpus: PathBuf,

    /// Output file for left-side fragments
    #[arg(long, default_value = "guess_left.txt")]
    left_out: PathBuf,

    /// Output file for right-side fragments
    #[arg(long, default_value = "guess_right.txt")]
    right_out: PathBuf,

    /// Unique left-side fragments to produce
    #[arg(long, default_value_t = 250_000)]
    left_target: usize,

    /// Unique right-side fragments to produce
    #[arg(long, default_value_t = 1_000_000)]
    right_target: usize,

    /// Context order bound of the model
    #[arg(long, default_value_t = 5)]
    order: usize,

    /// Fraction of each corpus line kept on the left side
    #[arg(long, default_value_t = 0.4)]
    division: f64,

    /// Hard cap on generated string length
    #[arg(long, default_value_t = 50)]
    max_len: usize,
}

fn run_side(args: &Args, side: Side, target: usize, out_path: &Path) -> Result<(), Box<dyn Error>> {
    let mut input = GenerationInput::new(side);
    input.max_order = args.order;
    input.target = target;
    input.max_len = args.max_len;
    input.set_division(args.division)?;

    // Loads the cached model if one was built on a previous run
    let model = Model::from_corpus_file(&args.corpus, &input)?;
    let generator = Generator::new(model);

    info!("generating {} unique {} fragments", target, side.tag());
    let fragments = generator.generate_unique(&input)?;

    let mut writer = BufWriter::new(File::create(out_path)?);
    for fragment in &fragments {
        writeln!(writer, "{}", fragment)?;
    }
    writer.flush()?;
    info!("wrote {} fragments to {}", fragments.len(), out_path.display());

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    run_side(&args, Side::Left, args.left_target, &args.left_out)?;
    run_side(&args, Side::Right, args.right_target, &args.right_out)?;

    Ok(())
}
