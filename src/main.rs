use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use riemannbench::benchmark::benchmarkharness::{
    BenchmarkError,
    BenchmarkHarness,
    BenchmarkReport
};
use riemannbench::configuration::BenchmarkConfiguration;
use riemannbench::math::round::round_half_even;

#[derive(Parser, Debug)]
#[command(name = "riemannbench", version, about = "Step-halving benchmark of composite quadrature rules")]
struct Cli {
    #[arg(help = "JSON configuration file; built-in defaults when omitted")]
    config: Option<PathBuf>,
    #[arg(long, help = "Output machine-readable JSON")]
    json: bool
}

fn print_table(report: &BenchmarkReport) {
    println!("reference: result = {}, error bound = {:.3e}, time = {:.6} s",
             report.reference.estimate,
             report.reference.error_bound,
             report.reference.elapsed.as_secs_f64());
    for sweep in report.sweeps.iter() {
        println!();
        println!("{} ({})", sweep.rule(), sweep.id());
        println!("{:>4}  {:>10}  {:>24}  {:>12}  {:>16}", "", "step", "result", "time [s]", "deviation");
        for run in sweep.runs() {
            let deviation = run.deviation_percent()
                .map_or("-".to_owned(), |d| format!("{:.6}", d));
            println!("{:>4}  {:>10}  {:>24.6}  {:>12.6}  {:>16}",
                     run.iteration(),
                     round_half_even(run.step(), 4),
                     run.estimate(),
                     run.elapsed().as_secs_f64(),
                     deviation);
        }
    }
}

fn run(cli: &Cli) -> Result<(), BenchmarkError> {
    let configuration = match &cli.config {
        Some(path) => BenchmarkConfiguration::from_reader(path)?,
        None => BenchmarkConfiguration::default()
    };

    let harness = BenchmarkHarness::new(configuration)?;
    let report = harness.run_all()?;
    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|error| BenchmarkError::Configuration(error.into()))?;
        println!("{}", json);
    } else {
        print_table(&report);
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {}", error);
            ExitCode::FAILURE
        }
    }
}
