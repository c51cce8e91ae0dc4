use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct FormsConfig {
    /// Backend root URL (e.g., "http://localhost:8080/"). Resource paths are resolved against it.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout for calls to the product backend
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Route the host navigates to after a successful save
    #[serde(default = "default_listing_route")]
    pub listing_route: String,

    /// Seller identifier for the shell binary's session. Web hosts supply their own.
    pub seller_id: Option<String>,
}

fn default_api_base_url() -> String {
    "http://localhost:8080/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_listing_route() -> String {
    "/myproducts".to_string()
}

impl FormsConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            listing_route: default_listing_route(),
            seller_id: None,
        }
    }
}
