use askama::Template;
use axum::http::HeaderMap;
use axum::response::{Html, Redirect};

use crate::error::InternalError;

#[derive(Template)]
#[template(path = "index.html", escape = "none")]
struct IndexTemplate {
    content: String,
}

pub async fn redirect_to_weather() -> Redirect {
    Redirect::temporary("/weather")
}

pub fn render_main(content: String) -> Result<String, InternalError> {
    Ok(IndexTemplate { content }.render()?)
}

/// Wrap a rendered fragment in the page layout, unless htmx asked for the
/// fragment alone.
pub fn render_page(headers: &HeaderMap, content: String) -> Result<Html<String>, InternalError> {
    let content = if headers.get("hx-request").is_some() {
        content
    } else {
        render_main(content)?
    };
    Ok(Html(content))
}
