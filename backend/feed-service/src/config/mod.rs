use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub gateways: GatewayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub port: u16,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub social_graph_url: String,
    pub poem_source_url: String,
    #[serde(default = "default_gateway_timeout_secs")]
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            app: AppConfig {
                env: std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                port: std::env::var("APP_PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()?,
                log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            gateways: GatewayConfig {
                social_graph_url: std::env::var("SOCIAL_GRAPH_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:8081".to_string()),
                poem_source_url: std::env::var("POEM_SOURCE_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:8082".to_string()),
                timeout_secs: std::env::var("GATEWAY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or_else(default_gateway_timeout_secs),
            },
        })
    }
}

fn default_gateway_timeout_secs() -> u64 {
    10
}
