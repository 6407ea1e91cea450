use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use foundation::LatLon;
use scene::World;
use session::{FixedLocator, FlowConfig, SpotFinder};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod driver;
mod http;
mod render;

use commands::{Command, HELP};
use driver::Driver;
use http::HttpBackend;

#[derive(Parser, Debug)]
#[command(name = "spotfinder", about = "Find fishing spots near a place and route to them")]
struct Args {
    /// Spot backend base URL.
    #[arg(long, env = "SPOTFINDER_BACKEND", default_value = "http://127.0.0.1:5000")]
    backend: String,

    /// JSON file overriding map and directions settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Device latitude reported to `gps`.
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Device longitude reported to `gps`.
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<f64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => FlowConfig::load(path).context("loading config")?,
        None => FlowConfig::default(),
    };
    let locator = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => FixedLocator::At(LatLon::new(lat, lon)),
        _ => FixedLocator::Unsupported,
    };
    let backend = HttpBackend::new(&args.backend)?;
    info!(backend = %backend.base(), "using spot backend");

    let mut finder =
        SpotFinder::new(config, World::new(), Arc::new(backend)).with_locator(Arc::new(locator));
    finder.start();
    let mut driver = Driver::new(finder);
    print_lines(render::render(driver.finder()));
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let cmd = match Command::parse(&line) {
                    Ok(Some(cmd)) => cmd,
                    Ok(None) => continue,
                    Err(err) => {
                        println!("! {err}");
                        continue;
                    }
                };
                match cmd {
                    Command::Quit => break,
                    Command::Help => println!("{HELP}"),
                    cmd => print_lines(driver.handle(cmd)),
                }
            }
            Some(reply) = driver.next_reply() => print_lines(driver.apply(reply)),
        }
    }
    if driver.in_flight() > 0 {
        info!(pending = driver.in_flight(), "exiting with requests in flight");
    }
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
