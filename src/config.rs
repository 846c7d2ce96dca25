use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind::NotFound;
use std::path::Path;

use clap::ArgMatches;
use colored::Colorize;
use serde::{Deserialize, Serialize};

const CONFIG: &str = "config";
const DEFAULT_CONFIG_DIR: &str = "/.person-cli/";
const DEFAULT_HOST: &str = "http://127.0.0.1:8000/api/persons/";

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    pub host: String,
    #[serde(default)]
    pub verify_host: bool,
    #[serde(default)]
    pub request_timeout: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            verify_host: false,
            request_timeout: None,
        }
    }
}

fn get_config_path(file: &str, dir: Option<&str>) -> OsString {
    let mut path = dir.map_or_else(
        || {
            home::home_dir().map_or_else(
                || panic!("{} Impossible to get your home dir!", "\u{2716}".bright_red()),
                std::path::PathBuf::into_os_string,
            )
        },
        OsString::from,
    );

    path.push(DEFAULT_CONFIG_DIR.to_owned() + file);
    path
}

fn get_config_file_or_write<T>(file: &str, dir: Option<&str>, value: T) -> String
where
    T: Sized + serde::Serialize,
{
    let path = get_config_path(file, dir);
    fs::read_to_string(&path).unwrap_or_else(|error| {
        if error.kind() == NotFound {
            if let Some(parent) = Path::new(&path).parent() {
                fs::create_dir_all(parent).expect("Failed to create config dir");
            }
            let data = serde_json::to_string(&value).expect("Saved");
            fs::write(&path, &data).expect("Failed to write data");
            data
        } else {
            panic!("{} Couldn't read config file", "\u{2716}".bright_red())
        }
    })
}

impl From<&ArgMatches> for Config {
    fn from(value: &ArgMatches) -> Self {
        let config_file = value
            .get_one::<String>(CONFIG)
            .map_or_else(|| "", |s| s.as_str())
            .to_owned();

        let data = if config_file.is_empty() {
            get_config_file_or_write("config.json", None, Self::default())
        } else {
            fs::read_to_string(shellexpand::tilde(&config_file).to_string()).expect("Unable to read file")
        };

        serde_json::from_str(&data).expect("JSON does not have correct format.")
    }
}
