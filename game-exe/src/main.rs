//! `neurottic` loads a ROTT data set the way the engine does and reports what
//! it finds: where each lump resolves from, and what a map set holds.

mod cli;
mod config;
mod inspect;

use cli::*;
use dirs::data_dir;
use lump_manager::LumpManager;
use mapset::MapSetLoader;
use mimalloc::MiMalloc;
use simplelog::TermLogger;
use std::error::Error;

use crate::config::UserConfig;
use log::{error, info, warn};

const BASE_DIR: &str = "neurottic/";
/// Under the user's data dir. Files here override every WAD
const LUMP_DIR: &str = "lumps";

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        log::LevelFilter::Trace,
        simplelog::ConfigBuilder::default()
            .set_time_level(log::LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;
    log::set_max_level(options.verbose.unwrap_or(log::LevelFilter::Info));

    let mut user_config = UserConfig::load();
    user_config.sync_cli(&mut options);
    user_config.write();
    log::set_max_level(options.verbose.unwrap_or(log::LevelFilter::Info));

    let lumps = setup_lumps(&options);
    for name in &options.lump {
        println!("{}", inspect::describe_lump(&lumps, name));
    }

    let mut maps = MapSetLoader::new();
    if let Some(path) = &options.mapset {
        maps.load_mapset(path)?;
        print!("{}", inspect::describe_mapset(&maps));

        for &index in &options.map {
            match maps.load_map(index) {
                Ok(()) => print!("{}", inspect::describe_map(&maps)),
                Err(e) => error!("Could not load map {index}: {e}"),
            }
        }
    } else if !options.map.is_empty() {
        warn!("--map needs a --mapset to load from");
    }

    Ok(())
}

/// Register the user's override directory, then the configured paths and
/// WADs. Sources that fail to load are logged and skipped.
fn setup_lumps(options: &CLIOptions) -> LumpManager {
    let mut lumps = LumpManager::new();

    if let Some(mut dir) = data_dir() {
        dir.push(BASE_DIR);
        dir.push(LUMP_DIR);
        if dir.is_dir() {
            if let Err(e) = lumps.add_search_path(&dir) {
                warn!("{e}");
            }
        } else {
            info!("No user lumps in {dir:?}");
        }
    }

    for path in &options.path {
        if let Err(e) = lumps.add_search_path(path) {
            warn!("{e}");
        }
    }
    for wad in &options.wad {
        if let Err(e) = lumps.add_archive(wad) {
            error!("{e}");
        }
    }

    lumps
}
