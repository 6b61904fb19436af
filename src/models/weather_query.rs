use chrono::{DateTime, Utc};
use deadpool_sqlite::Pool;
use log::debug;
use rusqlite::Row;

use crate::database::SqliteDatabaseError;

/// Icon code stored when the provider does not supply one.
pub const DEFAULT_ICON: &str = "o1d";

/// A weather lookup as persisted in the `WeatherQuery` table.
#[derive(PartialEq, Debug, Clone)]
pub struct WeatherQuery {
    pub id: i64,
    pub city_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub temperature: Option<f64>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// A lookup that has not been written yet.
///
/// The timestamp is taken and the icon default applied when the value is
/// constructed; neither changes afterwards.
#[derive(PartialEq, Debug, Clone)]
pub struct NewWeatherQuery {
    city_name: Option<String>,
    timestamp: DateTime<Utc>,
    temperature: Option<f64>,
    description: Option<String>,
    icon: Option<String>,
}

impl NewWeatherQuery {
    pub fn new(
        city_name: impl Into<String>,
        temperature: Option<f64>,
        description: Option<String>,
        icon: Option<String>,
    ) -> NewWeatherQuery {
        NewWeatherQuery {
            city_name: Some(city_name.into()),
            timestamp: Utc::now(),
            temperature,
            description,
            icon: Some(icon.unwrap_or_else(|| DEFAULT_ICON.to_string())),
        }
    }
}

fn from_row(row: &Row) -> rusqlite::Result<WeatherQuery> {
    Ok(WeatherQuery {
        id: row.get(0)?,
        city_name: row.get(1)?,
        timestamp: row.get(2)?,
        temperature: row.get(3)?,
        description: row.get(4)?,
        icon: row.get(5)?,
    })
}

impl WeatherQuery {
    /// Write `query` and return it with the id the database assigned.
    pub async fn append(
        database: &Pool,
        query: NewWeatherQuery,
    ) -> Result<WeatherQuery, SqliteDatabaseError> {
        let connection = database.get().await?;
        let stored = connection
            .interact(move |conn| -> rusqlite::Result<WeatherQuery> {
                conn.execute(
                    "INSERT INTO WeatherQuery (city_name, timestamp, temperature, description, icon) \
                     VALUES ((?1), (?2), (?3), (?4), (?5))",
                    (
                        &query.city_name,
                        &query.timestamp,
                        &query.temperature,
                        &query.description,
                        &query.icon,
                    ),
                )?;
                Ok(WeatherQuery {
                    id: conn.last_insert_rowid(),
                    city_name: query.city_name,
                    timestamp: query.timestamp,
                    temperature: query.temperature,
                    description: query.description,
                    icon: query.icon,
                })
            })
            .await??;
        debug!("Stored weather query {}", stored.id);
        Ok(stored)
    }

    /// All stored lookups, oldest first.
    pub async fn list_all(database: &Pool) -> Result<Vec<WeatherQuery>, SqliteDatabaseError> {
        let connection = database.get().await?;
        let queries = connection
            .interact(|conn| -> rusqlite::Result<Vec<WeatherQuery>> {
                let mut statement = conn.prepare(
                    "SELECT id, city_name, timestamp, temperature, description, icon \
                     FROM WeatherQuery ORDER BY id ASC",
                )?;
                let queries = statement
                    .query_map([], from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(queries)
            })
            .await??;
        Ok(queries)
    }
}
