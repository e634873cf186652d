//! User configuration options.

use crate::{BASE_DIR, CLIOptions};
use dirs::config_dir;
use log::{error, info, warn};
use nanoserde::{DeRon, SerRon};
use std::fs::{self, create_dir_all};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const LOG_TAG: &str = "UserConfig";
const CONFIG_FILE: &str = "user.ron";

fn get_cfg_file() -> Option<PathBuf> {
    let Some(mut dir) = config_dir() else {
        warn!(target: LOG_TAG, "Couldn't find the user config dir");
        return None;
    };
    dir.push(BASE_DIR);
    if let Err(e) = create_dir_all(&dir) {
        warn!(target: LOG_TAG, "Couldn't create {dir:?}: {e}");
        return None;
    }
    dir.push(CONFIG_FILE);
    Some(dir)
}

#[derive(Debug, Default, Clone, PartialEq, DeRon, SerRon)]
pub struct UserConfig {
    /// WADs in load order
    pub wads: Vec<String>,
    /// Search paths in the order they are added
    pub paths: Vec<String>,
    pub log_level: String,
}

impl UserConfig {
    /// Read the user's config, creating a default one if it is missing or
    /// can't be parsed
    pub fn load() -> Self {
        match get_cfg_file() {
            Some(path) => Self::load_from(&path),
            None => Self::default_config(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(buf) if !buf.trim().is_empty() => match UserConfig::deserialize_ron(&buf) {
                Ok(data) => {
                    info!(target: LOG_TAG, "Loaded user config file");
                    return data;
                }
                Err(e) => warn!("Could not deserialise {path:?} recreating config: {e:?}"),
            },
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Could not read {path:?}: {e}"),
        }
        Self::create_default(path)
    }

    fn default_config() -> Self {
        UserConfig {
            log_level: log::LevelFilter::Info.to_string(),
            ..UserConfig::default()
        }
    }

    fn create_default(path: &Path) -> Self {
        let config = Self::default_config();
        info!("Created default user config file");
        config.write_to(path);
        config
    }

    pub fn write(&self) {
        if let Some(path) = get_cfg_file() {
            self.write_to(&path);
        }
    }

    pub fn write_to(&self, path: &Path) {
        match fs::write(path, self.serialize_ron()) {
            Ok(()) => info!("Saved user config to {path:?}"),
            Err(err) => error!("Could not write config: {err}"),
        }
    }

    pub fn log_level(&self) -> Option<log::LevelFilter> {
        self.log_level.parse().ok()
    }

    /// Sync the CLI options and UserOptions with each other
    pub fn sync_cli(&mut self, cli: &mut CLIOptions) {
        info!("Checking CLI options");

        if !cli.wad.is_empty() && cli.wad != self.wads {
            self.wads.clone_from(&cli.wad);
            info!("WADs changed to: {:?}", &cli.wad);
        } else {
            cli.wad.clone_from(&self.wads);
        }

        if !cli.path.is_empty() && cli.path != self.paths {
            self.paths.clone_from(&cli.path);
            info!("Search paths changed to: {:?}", &cli.path);
        } else {
            cli.path.clone_from(&self.paths);
        }

        if let Some(level) = cli.verbose {
            self.log_level = level.to_string();
        } else {
            cli.verbose = self.log_level();
        }
    }
}
