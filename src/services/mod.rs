pub mod entries;
pub mod export;
pub mod metrics;
pub mod month;
pub mod render;
