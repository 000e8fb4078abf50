use std::time::Duration;

use clap::Parser;
use wikiloop_engine::{ClientSettings, DEFAULT_ENDPOINT};

use super::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(author, version, about = "Wikiloop: a Wikipedia exploration game", long_about = None)]
pub struct Cli {
    /// Journey computation endpoint.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Starting article, replacing the default seed.
    #[arg(long)]
    pub start: Option<String>,

    /// Goal article, replacing the default seed.
    #[arg(long)]
    pub stop: Option<String>,

    /// Give up on a journey request after this many seconds. Waits forever
    /// when omitted.
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    pub log: LogDestination,
}

impl Cli {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            request_timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}
