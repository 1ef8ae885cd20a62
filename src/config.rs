use dotenv::dotenv;
use std::{env::var, path::PathBuf};

pub struct Config {
    pub host: String,
    pub port: u16,
    pub root: PathBuf,
}

impl Config {
    pub fn get() -> Self {
        dotenv().ok();

        Self {
            host: var("FLASHWORDS_HOST")
                .ok()
                .map(|host| host.trim().to_string())
                .filter(|host| !host.is_empty())
                .unwrap_or_else(|| "localhost".into()),
            port: var("FLASHWORDS_PORT")
                .ok()
                .and_then(|port| port.trim().parse::<u16>().ok())
                .unwrap_or(8080),
            root: var("FLASHWORDS_ROOT")
                .ok()
                .map(|root| PathBuf::from(root.trim()))
                .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))),
        }
    }
}
