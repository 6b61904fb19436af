use std::sync::Arc;

use axum::{Router, routing::get};
use deadpool_sqlite::Pool;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::database::{SqliteDatabaseError, create_sqlite_pool};
use crate::routes::{history, index, weather};
use crate::weather::WeatherClient;

// Anything that goes in here must be a handle or pointer that can be cloned.
// The underlying state itself should be shared.
#[derive(Clone)]
pub struct AppState {
    pub database: Pool,
    pub weather: WeatherClient,
    pub icon_url_template: Arc<str>,
}

impl AppState {
    pub fn new(database: Pool, weather: WeatherClient, icon_url_template: &str) -> AppState {
        AppState {
            database,
            weather,
            icon_url_template: icon_url_template.into(),
        }
    }

    pub fn icon_url(&self, icon: &str) -> String {
        self.icon_url_template.replace("{icon}", icon)
    }
}

pub async fn create_app(config: &Config) -> Result<Router, SqliteDatabaseError> {
    let database = create_sqlite_pool(config.database_path()).await?;
    let weather = WeatherClient::new(&config.weather_api_url, &config.api_key);
    let state = AppState::new(database, weather, &config.icon_url_template);
    Ok(build_router(state))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::redirect_to_weather))
        .nest("/weather", weather::routes(state.clone()))
        .nest("/history", history::routes(state))
        .layer(TraceLayer::new_for_http())
}
