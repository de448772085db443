use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: "5000".to_string(),
        }
    }
}

impl Config {
    /// Reads `APP_HOST` and `APP_PORT`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            host: env::var("APP_HOST").unwrap_or(defaults.host),
            port: env::var("APP_PORT").unwrap_or(defaults.port),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
