pub mod client;

pub use client::{BacktestParams, MarketDataClient};
