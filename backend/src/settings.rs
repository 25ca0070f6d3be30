//! Application settings loaded via OrthoConfig.
//!
//! Values are layered CLI arguments over `FLOOFLOO_*` environment variables
//! over the defaults below.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Process configuration for the HTTP server, external sources and the
/// donation queue consumer.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FLOOFLOO")]
pub struct AppSettings {
    /// Deployment label echoed by `GET /`.
    #[ortho_config(default = String::from("development"))]
    pub environment: String,
    /// Listen address; all interfaces when unset.
    pub host: Option<IpAddr>,
    /// Listen port.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// GlobalGiving API key; fixture donations are served when absent.
    pub global_giving_key: Option<String>,
    /// Base URL override for the GlobalGiving API.
    pub global_giving_url: Option<String>,
    /// NewsAPI key; fixture news is served when absent.
    pub news_api_key: Option<String>,
    /// Base URL override for NewsAPI.
    pub news_api_url: Option<String>,
    /// Per-request timeout for external sources, in seconds.
    #[ortho_config(default = 10)]
    pub source_timeout_secs: u64,
    /// Maximum number of queue messages handled concurrently.
    #[ortho_config(default = 4)]
    pub queue_concurrency: usize,
}

impl AppSettings {
    /// Configured environment label.
    pub fn environment(&self) -> &str {
        self.environment.trim()
    }

    /// Socket address the server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port,
        )
    }

    /// Timeout applied to outbound source requests; at least one second.
    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs.max(1))
    }

    /// Queue consumer permits; never zero.
    pub fn queue_concurrency(&self) -> usize {
        self.queue_concurrency.max(1)
    }

    /// GlobalGiving key, ignoring blank values.
    pub fn global_giving_key(&self) -> Option<&str> {
        non_blank(self.global_giving_key.as_deref())
    }

    /// NewsAPI key, ignoring blank values.
    pub fn news_api_key(&self) -> Option<&str> {
        non_blank(self.news_api_key.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
