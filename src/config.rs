//! Command-line and environment configuration.

use std::net::SocketAddr;

use clap::{Args, Parser};

/// Database connection settings, shared by the server and `create-tables`.
#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    /// Connection string (postgres://... or sqlite:...)
    #[arg(long = "database-url", env = "DATABASE_URL")]
    pub url: String,

    /// Pool size (default: twice the CPU count)
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS")]
    pub max_connections: Option<u32>,
}

impl DatabaseArgs {
    pub fn max_connections(&self) -> u32 {
        self.max_connections
            .unwrap_or_else(|| u32::try_from(num_cpus::get() * 2).unwrap_or(u32::MAX))
            .max(1)
    }
}

/// Server configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "agenda", version, about = "Contact management HTTP service")]
pub struct Config {
    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Address to bind to
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind: SocketAddr,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let config = Config::try_parse_from([
            "agenda",
            "--database-url",
            "sqlite::memory:",
            "--bind",
            "127.0.0.1:3000",
            "--max-connections",
            "4",
            "--log-json",
        ])
        .unwrap();

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.max_connections(), 4);
        assert_eq!(config.bind.port(), 3000);
        assert!(config.log_json);
    }

    #[test]
    fn default_pool_size_follows_cpus() {
        let args = DatabaseArgs {
            url: "sqlite::memory:".into(),
            max_connections: None,
        };
        assert!(args.max_connections() >= 2);
    }

    #[test]
    fn zero_pool_size_is_raised_to_one() {
        let args = DatabaseArgs {
            url: "sqlite::memory:".into(),
            max_connections: Some(0),
        };
        assert_eq!(args.max_connections(), 1);
    }

    #[test]
    fn rejects_bad_bind_address() {
        let result = Config::try_parse_from([
            "agenda",
            "--database-url",
            "sqlite::memory:",
            "--bind",
            "not-an-address",
        ]);
        assert!(result.is_err());
    }
}
