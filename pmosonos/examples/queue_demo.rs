use anyhow::{Result, anyhow};
use pmoconfig::Config;
use pmosonos::{QueueOptions, SonosController, StreamingResource};
use std::env;
use tracing_subscriber::EnvFilter;

fn usage() -> anyhow::Error {
    anyhow!(
        "usage: queue_demo HOST <list [START [TOTAL]] | add URI [POSITION] | spotify ID [POSITION] | remove POS... | clear>"
    )
}

fn parse_position(arg: Option<&String>) -> Result<Option<u32>> {
    arg.map(|p| p.parse::<u32>().map_err(|_| anyhow!("invalid position: {}", p)))
        .transpose()
}

fn main() -> Result<()> {
    let config = Config::load_config("")?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.get_log_min_level().unwrap_or_default().to_lowercase()));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(usage());
    }

    let controller = SonosController::from_config(args[1].clone(), &config);
    let mut queue = controller.queue_with_options(QueueOptions::from_config(&config)?);
    println!("Using {}:{}", controller.host(), controller.port());

    match args[2].as_str() {
        "list" => {
            let start = parse_position(args.get(3))?.unwrap_or(0);
            let total = parse_position(args.get(4))?.unwrap_or(0);
            for (idx, track) in queue.tracks(start, total).enumerate() {
                let track = track?;
                println!(
                    "  [{}] {} | {} | {} | {}",
                    start as usize + idx,
                    track.title,
                    track.artist,
                    track.album,
                    track.uri
                );
            }
        }
        "add" => {
            let uri = args.get(3).ok_or_else(usage)?;
            let position = parse_position(args.get(4))?;
            queue.add_track(uri, position)?;
            println!("Added {}", uri);
        }
        "spotify" => {
            let id = args.get(3).ok_or_else(usage)?;
            let position = parse_position(args.get(4))?;
            let resource = if id.starts_with("album:") {
                StreamingResource::spotify_album(id.trim_start_matches("album:"))
            } else {
                StreamingResource::spotify_track(id.trim_start_matches("track:"))
            };
            let added = queue.add_resources(&[resource], position)?;
            println!("Added {} track(s)", added);
        }
        "remove" => {
            let positions = args[3..]
                .iter()
                .map(|p| p.parse::<u32>().map_err(|_| anyhow!("invalid position: {}", p)))
                .collect::<Result<Vec<_>>>()?;
            queue.remove_tracks(&positions)?;
            println!("Removed {} position(s)", positions.len());
        }
        "clear" => {
            queue.clear()?;
            println!("Queue cleared");
        }
        _ => return Err(usage()),
    }

    println!("Queue now holds {} track(s)", queue.count()?);
    Ok(())
}
