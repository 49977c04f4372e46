pub mod entries;
pub mod health;
pub mod journal;
pub mod metrics;
pub mod visualization;
