use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub namespace: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    /// Page size of index, profile, feed, comments and messages
    pub page_size: usize,
    /// Page size of group pages
    pub group_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                path: "./data/yatube".to_string(),
                namespace: "yatube".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
            pagination: PaginationConfig::default(),
        }
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            group_page_size: 12,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let config = Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()?,
            },
            database: DatabaseConfig {
                path: env::var("DB_PATH").unwrap_or_else(|_| "./data/yatube".to_string()),
                namespace: env::var("DB_NAMESPACE").unwrap_or_else(|_| "yatube".to_string()),
            },
            logging: LoggingConfig {
                level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            },
            pagination: PaginationConfig {
                page_size: env::var("PAGE_SIZE")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()?,
                group_page_size: env::var("GROUP_PAGE_SIZE")
                    .unwrap_or_else(|_| "12".to_string())
                    .parse()?,
            },
        };

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.pagination.page_size == 0 || self.pagination.group_page_size == 0 {
            anyhow::bail!("Page sizes must be positive");
        }
        Ok(())
    }
}
