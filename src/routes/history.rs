use askama::Template;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::{Router, routing::get};

use crate::app::AppState;
use crate::error::InternalError;
use crate::models::weather_query::WeatherQuery;
use crate::routes::index::render_page;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_history))
        .with_state(state)
}

struct HistoryRow {
    id: i64,
    city_name: String,
    timestamp: String,
    temperature: String,
    description: String,
    icon: String,
    icon_url: Option<String>,
}

impl HistoryRow {
    fn new(query: WeatherQuery, state: &AppState) -> HistoryRow {
        HistoryRow {
            id: query.id,
            city_name: query.city_name.unwrap_or_default(),
            timestamp: query.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            temperature: query
                .temperature
                .map(|t| format!("{t} °C"))
                .unwrap_or_else(|| "-".to_string()),
            description: query.description.unwrap_or_else(|| "-".to_string()),
            icon_url: query.icon.as_deref().map(|icon| state.icon_url(icon)),
            icon: query.icon.unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "history.html")]
struct HistoryTemplate {
    rows: Vec<HistoryRow>,
}

async fn get_history(
    headers: HeaderMap,
    State(state): State<AppState>,
) -> Result<Response, InternalError> {
    let rows = WeatherQuery::list_all(&state.database)
        .await?
        .into_iter()
        .map(|query| HistoryRow::new(query, &state))
        .collect();
    let content = HistoryTemplate { rows }.render()?;
    Ok(render_page(&headers, content)?.into_response())
}
