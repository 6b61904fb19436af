pub mod weather_query;
