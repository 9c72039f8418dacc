use std::{io::Write, process::ExitCode};

use clap::builder::TypedValueParser as _;
use clap::Parser;
use shared_constants::{DEFAULT_JUMP_THRESHOLD, DEFAULT_STATES, USGS_DEFAULT_PERIOD, USGS_IV_URL};
use water_anomaly_detector::{
    detect::find_anomalies, report::write_report, usgs::UsgsClient, Error,
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_values = DEFAULT_STATES.iter().copied(),
        help = "State codes to fetch, comma separated"
    )]
    states: Vec<String>,
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_JUMP_THRESHOLD,
        help = "Minimum change between consecutive readings, exclusive"
    )]
    threshold: f64,
    #[arg(
        short,
        long,
        default_value = USGS_DEFAULT_PERIOD,
        help = "ISO-8601 duration of history to fetch"
    )]
    period: String,
    #[arg(long, default_value_t = false, help = "Print the anomalies as JSON")]
    json: bool,
    #[arg(
        short = 'l',
        long,
        default_value = "info",
        value_parser = clap::builder::PossibleValuesParser::new(["trace", "debug", "info", "warn", "error"])
            .map(|s| s.parse::<log::LevelFilter>().unwrap_or(log::LevelFilter::Info)),
    )]
    log_level: log::LevelFilter,
}

async fn run(args: &Args) -> Result<(), Error> {
    let client = UsgsClient::new(USGS_IV_URL, args.period.as_str());
    let sites = client.fetch_and_combine(&args.states).await?;
    let anomalies = find_anomalies(&sites, args.threshold);
    log::info!(
        "Found {} anomalies across {} sites",
        anomalies.len(),
        sites.len()
    );

    let mut out = std::io::stdout().lock();
    if args.json {
        serde_json::to_writer_pretty(&mut out, &anomalies)?;
        writeln!(out)?;
    } else {
        write_report(&mut out, &anomalies)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level)
        .init();
    log::debug!("{:?}", args);

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
