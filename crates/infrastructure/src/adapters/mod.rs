//! Port adapters

mod live_weather_adapter;

pub use live_weather_adapter::LiveWeatherAdapter;
