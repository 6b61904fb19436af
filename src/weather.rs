use std::sync::Arc;

use log::{debug, warn};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use thiserror::Error;

/// The part of a current weather lookup that gets recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherInfo {
    pub temperature: f64,
    pub description: String,
    pub icon: Option<String>,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("weather provider responded with status {status}")]
    Upstream {
        status: u16,
        content_type: Option<String>,
        body: Vec<u8>,
    },
    #[error("weather provider returned an unexpected body: {message}")]
    Malformed { message: String },
    #[error("could not reach weather provider: {source}")]
    Transport { source: reqwest::Error },
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        // The request url carries the api key.
        ProviderError::Transport {
            source: err.without_url(),
        }
    }
}

#[derive(Deserialize)]
struct CurrentWeather {
    main: MainReadings,
    weather: Vec<Condition>,
}

#[derive(Deserialize)]
struct MainReadings {
    temp: f64,
}

#[derive(Deserialize)]
struct Condition {
    description: String,
    icon: Option<String>,
}

fn parse_current_weather(body: &[u8]) -> Result<WeatherInfo, ProviderError> {
    let current: CurrentWeather =
        serde_json::from_slice(body).map_err(|err| ProviderError::Malformed {
            message: err.to_string(),
        })?;
    let Some(condition) = current.weather.into_iter().next() else {
        return Err(ProviderError::Malformed {
            message: "no weather conditions in response".to_string(),
        });
    };
    Ok(WeatherInfo {
        temperature: current.main.temp,
        description: condition.description,
        icon: condition.icon,
    })
}

/// Client for an OpenWeather style current weather endpoint.
///
/// Cloning is cheap; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: reqwest::Client,
    url: Arc<str>,
    api_key: Arc<str>,
}

impl WeatherClient {
    pub fn new(url: &str, api_key: &str) -> WeatherClient {
        WeatherClient {
            http: reqwest::Client::new(),
            url: url.into(),
            api_key: api_key.into(),
        }
    }

    /// Fetch the current weather for `city_name` in metric units.
    ///
    /// Only a 200 response counts as success. Any other status is returned
    /// as [`ProviderError::Upstream`] with the body bytes untouched.
    pub async fn current_weather(&self, city_name: &str) -> Result<WeatherInfo, ProviderError> {
        debug!("Fetching current weather for {city_name}");
        let response = self
            .http
            .get(self.url.as_ref())
            .query(&[
                ("q", city_name),
                ("appid", self.api_key.as_ref()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await?.to_vec();

        if status != StatusCode::OK {
            warn!("Weather provider answered {status} for {city_name}");
            return Err(ProviderError::Upstream {
                status: status.as_u16(),
                content_type,
                body,
            });
        }

        parse_current_weather(&body)
    }
}
