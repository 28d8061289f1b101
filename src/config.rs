use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Google Maps Platform API key (geocoding, places, distance matrix)
    pub google_api_key: String,

    /// Google Maps API base URL
    #[serde(default = "default_google_api_url")]
    pub google_api_url: String,

    /// OpenAI API key used by the relevance classifier
    pub openai_api_key: String,

    /// OpenAI-compatible API base URL
    #[serde(default = "default_openai_api_url")]
    pub openai_api_url: String,

    /// Chat model used for classification
    #[serde(default = "default_openai_model")]
    pub openai_model: String,

    /// Search origin used when the request has no usable location
    #[serde(default = "default_origin")]
    pub default_origin: String,

    /// Per-request timeout for outbound provider calls
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_google_api_url() -> String {
    "https://maps.googleapis.com/maps/api".to_string()
}

fn default_openai_api_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o".to_string()
}

/// São Paulo city centre
pub fn default_origin() -> String {
    "-23.5505,-46.6333".to_string()
}

fn default_http_timeout_secs() -> u64 {
    15
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
