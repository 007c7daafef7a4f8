mod codes;
pub mod handlers;
pub mod models;
pub mod service;

pub use codes::describe_weather_code;
pub use service::{WeatherError, WeatherService};
