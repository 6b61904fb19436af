use askama::Template;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::{Form, Router, routing::get};
use log::info;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::{InternalError, LookupError};
use crate::models::weather_query::{DEFAULT_ICON, NewWeatherQuery, WeatherQuery};
use crate::routes::index::render_page;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_weather_page).post(fetch_weather))
        .with_state(state)
}

struct Lookup {
    city: String,
    temperature: f64,
    description: String,
    icon: String,
    icon_url: String,
    timestamp: String,
}

#[derive(Template)]
#[template(path = "weather.html")]
struct WeatherTemplate {
    lookup: Option<Lookup>,
}

async fn get_weather_page(headers: HeaderMap) -> Result<Response, InternalError> {
    let content = WeatherTemplate { lookup: None }.render()?;
    Ok(render_page(&headers, content)?.into_response())
}

#[derive(Deserialize, Debug)]
struct WeatherForm {
    city_name: String,
}

async fn fetch_weather(
    headers: HeaderMap,
    State(state): State<AppState>,
    Form(form): Form<WeatherForm>,
) -> Result<Response, LookupError> {
    if form.city_name.is_empty() {
        return Err(LookupError::EmptyCityName);
    }

    let info = state.weather.current_weather(&form.city_name).await?;

    let query = NewWeatherQuery::new(
        form.city_name.clone(),
        Some(info.temperature),
        Some(info.description.clone()),
        info.icon,
    );
    let stored = WeatherQuery::append(&state.database, query).await?;
    info!(
        "Recorded weather for {} as query {}",
        form.city_name, stored.id
    );

    let icon = stored.icon.as_deref().unwrap_or(DEFAULT_ICON).to_string();
    let content = WeatherTemplate {
        lookup: Some(Lookup {
            city: form.city_name,
            temperature: info.temperature,
            description: info.description,
            icon_url: state.icon_url(&icon),
            icon,
            timestamp: stored.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }),
    }
    .render()
    .map_err(InternalError::from)?;
    Ok(render_page(&headers, content)?.into_response())
}
