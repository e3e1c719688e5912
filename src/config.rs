//! Command line and environment configuration for the server.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use clap::Parser;

/// The database used when neither `--database-url` nor `DATABASE_URL` is given.
///
/// This is a local file meant for development, deployments should always set
/// `DATABASE_URL` explicitly.
pub const DEFAULT_DATABASE_URL: &str = "finance_tracker.db";

/// The REST API server for the finance tracker.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// The database to connect to: a file path, `:memory:` or an SQLite `file:` URI.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// The address to listen on.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,
}

impl Config {
    /// The database connection descriptor, falling back to
    /// [DEFAULT_DATABASE_URL] with a warning if none was configured.
    pub fn database_url(&self) -> &str {
        match self.database_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                tracing::warn!(
                    "DATABASE_URL is not set, falling back to the development database \"{DEFAULT_DATABASE_URL}\""
                );
                DEFAULT_DATABASE_URL
            }
        }
    }

    /// The socket address the server should bind to.
    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
