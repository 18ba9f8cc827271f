use std::{env, net::SocketAddr, path::PathBuf};

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    /// Directory holding the JSON snapshot. `None` keeps trips in memory only.
    pub data_dir: Option<PathBuf>,
    pub static_dir: PathBuf,
    pub seed_demo_trips: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let listen_addr = match (env::var("APP_LISTEN_ADDR"), env::var("PORT")) {
            (Ok(addr), _) => addr,
            (Err(_), Ok(port)) => format!("0.0.0.0:{port}"),
            _ => "0.0.0.0:8080".to_string(),
        };
        let listen_addr: SocketAddr = listen_addr
            .parse()
            .map_err(|err| AppError::Config(format!("invalid listen address: {err}")))?;

        let data_dir = env::var("TRIPS_DATA_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static"));

        let seed_demo_trips = match env::var("SEED_DEMO_TRIPS") {
            Ok(raw) => parse_flag(&raw)
                .ok_or_else(|| AppError::Config(format!("invalid SEED_DEMO_TRIPS: {raw}")))?,
            Err(_) => true,
        };

        Ok(Self {
            listen_addr,
            data_dir,
            static_dir,
            seed_demo_trips,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
