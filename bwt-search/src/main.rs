use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::Write;

use bwt_search::index::fm::{FmIndex, IndexMeta};
use bwt_search::index::{bwt, invert, psa, sa, IndexOpt, OccMode};
use bwt_search::io::dataset;
use bwt_search::search::batch;
use bwt_search::util::alphabet::{self, Alphabet};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "bwt-search", author, version, about = "Burrows-Wheeler index with exact and approximate substring search", arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OccArg {
    /// Store counts for every BWT position
    Full,
    /// Store counts every --occ-stride positions
    Sampled,
}

#[derive(Args, Debug, Clone, Copy)]
struct BuildArgs {
    /// Sentinel symbol appended to the reference
    #[arg(long, default_value_t = '$')]
    sentinel: char,
    /// Occurrence table layout
    #[arg(long = "occ", value_enum, default_value_t = OccArg::Sampled)]
    occ_mode: OccArg,
    #[arg(long = "occ-stride", default_value_t = 5)]
    occ_stride: usize,
    #[arg(long = "sa-stride", default_value_t = 5)]
    sa_stride: usize,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build an FM index of a reference text file
    Index {
        /// Reference file (whitespace is ignored)
        reference: String,
        /// Output prefix for the index file
        #[arg(short, long, default_value = "ref")]
        output: String,
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Search patterns against a saved index
    Search {
        /// Path to FM index (.fm)
        #[arg(short = 'i', long = "index")]
        index: String,
        /// Patterns file (whitespace separated)
        patterns: String,
        /// Maximum number of mismatches (0 = exact)
        #[arg(short = 'm', long = "mismatches", default_value_t = 0)]
        mismatches: usize,
        /// Output path (stdout if omitted)
        #[arg(short, long)]
        out: Option<String>,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
    },
    /// Build an in-memory index from a dataset file (reference, patterns, optional mismatches) and search it
    Run {
        dataset: String,
        /// Overrides the mismatch count given in the dataset
        #[arg(short = 'm', long = "mismatches")]
        mismatches: Option<usize>,
        #[arg(short, long)]
        out: Option<String>,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Print the Burrows-Wheeler transform of a text
    Bwt {
        text: String,
        #[arg(long, default_value_t = '$')]
        sentinel: char,
    },
    /// Reconstruct the text from its Burrows-Wheeler transform
    Decode {
        bwt: String,
        #[arg(long, default_value_t = '$')]
        sentinel: char,
    },
    /// Print the suffix array of a text, or the partial suffix array with --stride
    Sa {
        text: String,
        #[arg(short = 'k', long = "stride")]
        stride: Option<usize>,
        #[arg(long, default_value_t = '$')]
        sentinel: char,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Index { reference, output, build } => run_index(&reference, &output, build),
        Commands::Search { index, patterns, mismatches, out, threads } => {
            run_search(&index, &patterns, mismatches, out.as_deref(), threads)
        }
        Commands::Run { dataset, mismatches, out, threads, build } => {
            run_dataset(&dataset, mismatches, out.as_deref(), threads, build)
        }
        Commands::Bwt { text, sentinel } => {
            let s = sentinel_byte(sentinel)?;
            let b = bwt::transform(&alphabet::terminated(text.as_bytes(), s), s)?;
            println!("{}", String::from_utf8_lossy(&b));
            Ok(())
        }
        Commands::Decode { bwt, sentinel } => {
            let text = invert::decode(bwt.as_bytes(), sentinel_byte(sentinel)?)?;
            println!("{}", String::from_utf8_lossy(&text));
            Ok(())
        }
        Commands::Sa { text, stride, sentinel } => run_sa(&text, stride, sentinel),
    }
}

fn sentinel_byte(c: char) -> Result<u8> {
    if !c.is_ascii() {
        bail!("sentinel '{}' must be an ASCII character", c);
    }
    Ok(c as u8)
}

fn index_opt(build: BuildArgs) -> Result<IndexOpt> {
    Ok(IndexOpt {
        sentinel: sentinel_byte(build.sentinel)?,
        occ_mode: match build.occ_mode {
            OccArg::Full => OccMode::Full,
            OccArg::Sampled => OccMode::Sampled,
        },
        occ_stride: build.occ_stride,
        sa_stride: build.sa_stride,
    })
}

fn init_threads(threads: usize) -> Result<()> {
    if threads > 1 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("cannot initialise thread pool")?;
    }
    Ok(())
}

fn open_output(out_path: Option<&str>) -> Result<Box<dyn Write>> {
    Ok(if let Some(p) = out_path {
        let f = std::fs::File::create(p).with_context(|| format!("cannot create output '{}'", p))?;
        Box::new(std::io::BufWriter::new(f))
    } else {
        Box::new(std::io::BufWriter::new(std::io::stdout()))
    })
}

fn run_index(reference: &str, output: &str, build: BuildArgs) -> Result<()> {
    let opt = index_opt(build)?;
    let raw = std::fs::read(reference).with_context(|| format!("cannot open reference '{}'", reference))?;
    let seq: Vec<u8> = raw.into_iter().filter(|b| !b.is_ascii_whitespace()).collect();
    if seq.is_empty() {
        bail!("reference file '{}' is empty", reference);
    }

    println!("reference: {}", reference);
    println!("total_len: {}", seq.len());

    let text = alphabet::terminated(&seq, opt.sentinel);
    let mut fm = FmIndex::build(&text, &opt)?;
    fm.set_meta(IndexMeta {
        reference_file: Some(reference.to_string()),
        build_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
        build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
    });
    println!("alphabet: {}", String::from_utf8_lossy(fm.alphabet().symbols()));

    let out_path = format!("{}.fm", output);
    fm.save_to_file(&out_path)
        .with_context(|| format!("cannot write index to '{}'", out_path))?;
    println!("FM index saved: {}", out_path);
    Ok(())
}

fn run_search(
    index_path: &str,
    patterns_path: &str,
    mismatches: usize,
    out_path: Option<&str>,
    threads: usize,
) -> Result<()> {
    init_threads(threads)?;
    let fm = FmIndex::load_from_file(index_path)
        .with_context(|| format!("cannot load index '{}'", index_path))?;
    let fh = std::fs::File::open(patterns_path)
        .with_context(|| format!("cannot open patterns '{}'", patterns_path))?;
    let patterns = dataset::read_patterns(std::io::BufReader::new(fh))?;

    let hits = batch::search_batch(&fm, &patterns, mismatches)?;
    let mut out = open_output(out_path)?;
    dataset::write_hits(&mut out, &hits)?;
    out.flush()?;
    Ok(())
}

fn run_dataset(
    dataset_path: &str,
    mismatches: Option<usize>,
    out_path: Option<&str>,
    threads: usize,
    build: BuildArgs,
) -> Result<()> {
    init_threads(threads)?;
    let opt = index_opt(build)?;
    let fh = std::fs::File::open(dataset_path)
        .with_context(|| format!("cannot open dataset '{}'", dataset_path))?;
    let ds = dataset::read_dataset(std::io::BufReader::new(fh))?;

    let fm = FmIndex::build(&alphabet::terminated(&ds.reference, opt.sentinel), &opt)?;
    let m = mismatches.or(ds.max_mismatches).unwrap_or(0);
    let hits = batch::search_batch(&fm, &ds.patterns, m)?;

    let mut out = open_output(out_path)?;
    dataset::write_hits(&mut out, &hits)?;
    out.flush()?;
    Ok(())
}

fn run_sa(text: &str, stride: Option<usize>, sentinel: char) -> Result<()> {
    let s = sentinel_byte(sentinel)?;
    let text = alphabet::terminated(text.as_bytes(), s);
    let codes = Alphabet::from_text(&text, s).encode(&text)?;
    let sa_arr = sa::build_sa(&codes)?;
    match stride {
        None => {
            let line: Vec<String> = sa_arr.iter().map(u32::to_string).collect();
            println!("{}", line.join(" "));
        }
        Some(k) => {
            for (row, off) in psa::PartialSuffixArray::build(&sa_arr, k)?.iter() {
                println!("{},{}", row, off);
            }
        }
    }
    Ok(())
}
