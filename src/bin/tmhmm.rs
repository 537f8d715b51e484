use clap::Parser;
use log::{error, info};
use tmhmm::{
    hmm::PredictParams,
    io::{read_fasta, write_outputs},
    predict::predict_batch,
    read_model,
};

#[derive(Parser, Debug)]
#[clap(author, about, version)]
struct Opts {
    /// Input protein FASTA filename
    #[clap(short = 'f', long = "file")]
    sequence_file: std::path::PathBuf,
    /// Model filename
    #[clap(short = 'm', long = "model")]
    model_file: std::path::PathBuf,
    /// Directory where `{id}.summary`, `{id}.annotation`, `{id}.plot` are written
    #[clap(short = 'o', long, default_value = ".")]
    output_dir: std::path::PathBuf,
    /// Decode the Viterbi path only (no `.plot` file)
    #[clap(long)]
    no_posterior: bool,
    /// Reject residues outside the model alphabet instead of substituting them
    #[clap(long)]
    no_normalize: bool,
    /// Also write `{id}.json`
    #[clap(long)]
    json: bool,
    /// Number of threads (default: all cores)
    #[clap(short = 't', long)]
    threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let opts: Opts = Opts::parse();
    if let Some(n_threads) = opts.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n_threads)
            .build_global()?;
    }
    println!("# started_at={}", chrono::Local::now());
    println!("# n_threads={}", rayon::current_num_threads());
    println!("# opts={:?}", opts);

    let params = PredictParams::new(!opts.no_posterior, !opts.no_normalize);
    let (_, model) = read_model(&opts.model_file)?;
    let entries = read_fasta(&opts.sequence_file)?;
    std::fs::create_dir_all(&opts.output_dir)?;

    let results = predict_batch(&model, &entries, &params);

    let mut n_failed = 0;
    for (entry, result) in entries.iter().zip(results) {
        let written = result
            .and_then(|prediction| write_outputs(&opts.output_dir, entry, &prediction, opts.json));
        match written {
            Ok(paths) => info!("{}: wrote {} files", entry.id, paths.len()),
            Err(err) => {
                error!("{}: {}", entry.id, err);
                n_failed += 1;
            }
        }
    }

    println!("# n_entries={}", entries.len());
    println!("# n_failed={}", n_failed);
    println!("# finished_at={}", chrono::Local::now());
    Ok(())
}
