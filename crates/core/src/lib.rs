pub mod client;
pub mod domain;
pub mod render;
pub mod session;

pub mod config {
    pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8001";

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub api_base_url: Option<String>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                api_base_url: std::env::var("CALLSIGHT_API_BASE_URL").ok(),
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
            })
        }

        pub fn api_base_url(&self) -> &str {
            self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
        }
    }
}
