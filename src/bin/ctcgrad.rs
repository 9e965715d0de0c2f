use clap::{Parser, Subcommand};
use ctcgrad::{
    check::run_checks,
    emission,
    label::label_to_string,
    prelude::*,
};
use log::{error, info};
use ndarray::Array2;
use serde::Serialize;

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Opts {
    /// plain symbols of the alphabet, in column order
    #[clap(long, default_value = "abcd")]
    symbols: String,
    /// blank symbol (last column)
    #[clap(long, default_value = "^")]
    blank: char,
    /// take the limit y->0 instead of failing on zero emissions
    #[clap(long)]
    limit: bool,
    /// absolute tolerance of the self-checks
    #[clap(long, default_value = "1e-8")]
    tolerance: f64,
    /// relative tolerance of the self-checks
    #[clap(long, default_value = "1e-5")]
    max_relative: f64,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare Forward/Backward probabilities with the manual product on random emissions
    Check {
        #[clap(short = 't', long, default_value = "6")]
        steps: usize,
        #[clap(short = 's', long, default_value = "0")]
        seed: u64,
    },
    /// Compute the gradient of ln P(label|y) on random emissions
    Grad {
        #[clap(short = 'l', long, default_value = "bab")]
        label: String,
        #[clap(short = 't', long, default_value = "6")]
        steps: usize,
        #[clap(short = 's', long, default_value = "0")]
        seed: u64,
        /// normalize each row of the random emissions into a distribution
        #[clap(long)]
        normalize: bool,
        /// output as json
        #[clap(long)]
        json: bool,
    },
}

#[derive(Serialize, Debug)]
struct GradOutput {
    label: String,
    padded_label: String,
    prob: f64,
    loss: f64,
    emissions: Vec<Vec<f64>>,
    gradients: Vec<Vec<f64>>,
}

/// print the matrix transposed, one line per symbol
fn print_by_symbol(alphabet: &Alphabet, matrix: &Array2<f64>) {
    for (k, symbol) in alphabet.iter() {
        let line: Vec<String> = matrix
            .column(k)
            .iter()
            .map(|value| format!("{:.6}", value))
            .collect();
        println!("{}\t{}", char::from(symbol), line.join("\t"));
    }
}

fn to_params(opts: &Opts) -> Result<CTCParams> {
    if let Some(symbol) = opts
        .symbols
        .chars()
        .chain(std::iter::once(opts.blank))
        .find(|c| !c.is_ascii())
    {
        return Err(CTCError::NonAsciiSymbol { symbol });
    }
    let alphabet = Alphabet::new(opts.symbols.as_bytes(), opts.blank as u8)?;
    let policy = if opts.limit {
        ZeroEmissionPolicy::Limit
    } else {
        ZeroEmissionPolicy::Fail
    };
    CTCParams::new(alphabet)
        .with_zero_emission(policy)
        .with_tolerance(opts.tolerance)?
        .with_max_relative(opts.max_relative)
}

fn run(opts: &Opts) -> Result<bool> {
    let params = to_params(opts)?;
    info!("params {}", params);
    match &opts.command {
        Command::Check { steps, seed } => {
            let y = emission::generate(*steps, params.alphabet.len(), *seed);
            let report = run_checks(&params, &y)?;
            println!("> Alpha, Beta Tests");
            println!("\t CTC");
            print_by_symbol(&params.alphabet, &y);
            println!("{}", report);
            Ok(report.is_all_ok())
        }
        Command::Grad {
            label,
            steps,
            seed,
            normalize,
            json,
        } => {
            let mut y = emission::generate(*steps, params.alphabet.len(), *seed);
            if *normalize {
                y = emission::normalize_rows(y);
            }
            let output = build_tables(&params.alphabet, label.as_bytes(), &y)?;
            let grads = output.to_gradients(&y, params.zero_emission)?;
            if *json {
                let g = GradOutput {
                    label: label.clone(),
                    padded_label: output.padded.to_string(),
                    prob: output.to_full_prob_forward(),
                    loss: output.to_loss(),
                    emissions: emission::to_rows(&y),
                    gradients: emission::to_rows(&grads),
                };
                println!("{}", serde_json::to_string_pretty(&g).unwrap());
            } else {
                println!("> Calculating gradients of the CTC matrix");
                println!("\t CTC");
                print_by_symbol(&params.alphabet, &y);
                println!("\n\t GT Label: '{}'", label_to_string(label.as_bytes()));
                println!("\t P={:.6} loss={:.6}", output.to_full_prob_forward(), output.to_loss());
                println!("\n\t CTC Gradients");
                print_by_symbol(&params.alphabet, &grads);
            }
            Ok(true)
        }
    }
}

fn main() {
    env_logger::init();
    let opts: Opts = Opts::parse();
    info!("started_at={}", chrono::Local::now());
    info!("opts={:?}", opts);

    let is_ok = match run(&opts) {
        Ok(is_ok) => is_ok,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            false
        }
    };

    info!("finished_at={}", chrono::Local::now());
    if !is_ok {
        std::process::exit(1);
    }
}
