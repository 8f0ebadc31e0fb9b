use clap::{CommandFactory, Parser};
use common::position::Position;
use location::LocationFetcher;
use location::http::HttpLocationFetcher;
use location::replay::ReplayLocationFetcher;
use map_view::MapView;
use map_view::surface::ConsoleMapEngine;
use module_core::{Event, EventBus, EventKind, Module};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;
use tracking::{DEFAULT_POLL_INTERVAL, Tracking};

mod target;


#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long)]
    track: Option<String>,
    #[arg(short, long)]
    url: Option<String>,
    #[arg(short, long)]
    service_url: Option<String>,
    #[arg(short = 'f', long)]
    route_file: Option<String>,
    #[arg(short, long)]
    layer: Option<String>,
    #[arg(short, long, default_value_t = DEFAULT_POLL_INTERVAL.as_secs())]
    interval_secs: u64,
}

fn read_route_from_file(file_path: &str) -> Result<Vec<Position>, ()> {
    let mut rdr = csv::Reader::from_path(file_path).map_err(|e| {
        error!("Failed to open route file {file_path}. Error: {e}");
    })?;
    let mut positions = Vec::new();

    for result in rdr.records() {
        let record = result.map_err(|e| {
            error!("Failed to read route file {file_path}. Error: {e}");
        })?;
        let longitude = parse_coordinate(&record, 0)?;
        let latitude = parse_coordinate(&record, 1)?;
        positions.push(Position {
            longitude,
            latitude,
        });
    }
    debug!("length of route: {}", positions.len());
    Ok(positions)
}

fn parse_coordinate(record: &csv::StringRecord, index: usize) -> Result<f64, ()> {
    record
        .get(index)
        .and_then(|raw| f64::from_str(raw).ok())
        .ok_or_else(|| {
            error!("Route file entry {record:?} has no coordinate in column {index}");
        })
}

fn create_fetcher(cli: &Cli) -> Result<Arc<dyn LocationFetcher>, ()> {
    if let Some(service_url) = &cli.service_url {
        let fetcher = HttpLocationFetcher::new(service_url).map_err(|e| {
            error!("Failed to create the location client. Error: {e}");
        })?;
        Ok(Arc::new(fetcher))
    } else if let Some(route_file) = &cli.route_file {
        let route = read_route_from_file(route_file)?;
        let fetcher = ReplayLocationFetcher::new(&route).map_err(|e| {
            error!("Failed to create the replay source. Error: {e}");
        })?;
        Ok(Arc::new(fetcher))
    } else {
        error!("No location source specified. Use --service-url or --route-file");
        Cli::command().print_help().unwrap();
        Err(())
    }
}

#[tokio::main]
async fn main() -> Result<(), ()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if cli.interval_secs == 0 {
        error!("Poll interval must be at least one second");
        return Err(());
    }

    let eb = EventBus::default();
    let fetcher = create_fetcher(&cli)?;
    let mut tracking = Tracking::new(
        fetcher,
        Duration::from_secs(cli.interval_secs),
        eb.context(),
    );
    let mut map_view = MapView::new(Box::new(ConsoleMapEngine), "map", eb.context());

    let quit_sender = eb.context().sender;
    ctrlc::set_handler(move || {
        info!("Shutdown requested, stopping modules...");
        let _ = quit_sender.send(Event {
            kind: EventKind::QuitEvent,
        });
    })
    .map_err(|e| {
        error!("Failed to install the shutdown handler. Error: {e}");
    })?;

    let Some(raw_target) = target::resolve_target(cli.track.as_deref(), cli.url.as_deref())
    else {
        error!("No bus number to track. Use --track, --url or answer the prompt");
        Cli::command().print_help().unwrap();
        return Err(());
    };
    eb.publish(&Event {
        kind: EventKind::TrackVehicleEvent(raw_target),
    });
    if let Some(layer) = &cli.layer {
        eb.publish(&Event {
            kind: EventKind::SelectLayerEvent(layer.clone()),
        });
    }

    info!("Starting modules...");
    tokio::join!(tracking.run(), map_view.run()).0
}
