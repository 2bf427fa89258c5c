//! Command-line flags with environment overrides (`.env` is loaded by the binary first).

use clap::Parser;
use std::path::PathBuf;

/// 10 MiB
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug, Parser)]
#[command(name = "sqlite-gateway", version, about = "Static files, SQL over HTTP and a CORS-free proxy for local development")]
pub struct Settings {
    /// Port to run the server on
    #[arg(short = 'p', long, env = "GATEWAY_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Address to bind
    #[arg(long, env = "GATEWAY_BIND", default_value = "0.0.0.0")]
    pub bind: String,

    /// SQLite database file (`:memory:` for a throwaway database)
    #[arg(long, env = "GATEWAY_DB", default_value = "data.db")]
    pub db: String,

    /// Directory static files are served from
    #[arg(long, env = "GATEWAY_ROOT", default_value = ".")]
    pub root: PathBuf,

    /// Path to SQLite extension to load
    #[arg(long, env = "GATEWAY_EXTENSION")]
    pub extension: Option<PathBuf>,

    /// Path to API description file
    #[arg(long, env = "GATEWAY_API")]
    pub api: Option<PathBuf>,

    /// Enable logging of SQL query responses
    #[arg(short = 's', long, env = "GATEWAY_SHOW_RESPONSES")]
    pub show_responses: bool,

    /// Do not open a browser at startup
    #[arg(long, env = "GATEWAY_NO_BROWSER")]
    pub no_browser: bool,

    /// Maximum request body size in bytes
    #[arg(long, env = "GATEWAY_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// Scheme used for /proxy upstreams
    #[arg(long, env = "GATEWAY_PROXY_SCHEME", default_value = "https", hide = true)]
    pub proxy_scheme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            port: 8080,
            bind: "0.0.0.0".into(),
            db: "data.db".into(),
            root: PathBuf::from("."),
            extension: None,
            api: None,
            show_responses: false,
            no_browser: false,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            proxy_scheme: "https".into(),
        }
    }
}

impl Settings {
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }

    pub fn browser_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_and_long_flags() {
        let s = Settings::try_parse_from(["sqlite-gateway", "-p", "9000", "-s", "--api", "api.json"]).unwrap();
        assert_eq!(s.port, 9000);
        assert!(s.show_responses);
        assert_eq!(s.api, Some(PathBuf::from("api.json")));
        assert!(s.extension.is_none());

        let s = Settings::try_parse_from([
            "sqlite-gateway",
            "--port",
            "9001",
            "--show-responses",
            "--extension",
            "ext.so",
        ])
        .unwrap();
        assert_eq!(s.port, 9001);
        assert!(s.show_responses);
        assert_eq!(s.extension, Some(PathBuf::from("ext.so")));
    }

    #[test]
    fn rejects_bad_port() {
        assert!(Settings::try_parse_from(["sqlite-gateway", "--port", "eighty"]).is_err());
    }
}
