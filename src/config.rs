use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

pub const DEFAULT_ICON_URL_TEMPLATE: &str = "https://openweathermap.org/img/wn/{icon}@2x.png";

/// Settings resolved once at startup. Request handlers only ever see the
/// parts of this that are handed to them through the application state.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path of the sqlite database, optionally prefixed with `sqlite://`.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Current weather endpoint of the provider.
    #[arg(long = "api", env = "API")]
    pub weather_api_url: String,

    #[arg(long, env = "OPENWEATHER_API", hide_env_values = true)]
    pub api_key: String,

    /// Where provider icons are loaded from; `{icon}` is replaced by the icon code.
    #[arg(long, env = "ICON_URL_TEMPLATE", default_value = DEFAULT_ICON_URL_TEMPLATE)]
    pub icon_url_template: String,

    #[arg(short, long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8000")]
    pub listen_addr: SocketAddr,

    #[arg(short, long, env = "KEY_FILE_PATH")]
    pub key_file_path: Option<String>,

    #[arg(short, long, env = "CERT_FILE_PATH")]
    pub cert_file_path: Option<String>,
}

impl Config {
    /// The database location as a file path.
    ///
    /// Accepts plain paths as well as `sqlite:///relative.db` and
    /// `sqlite:////absolute.db` style urls.
    pub fn database_path(&self) -> PathBuf {
        let url = self.database_url.as_str();
        let path = url
            .strip_prefix("sqlite:///")
            .or_else(|| url.strip_prefix("sqlite://"))
            .unwrap_or(url);
        PathBuf::from(path)
    }
}
