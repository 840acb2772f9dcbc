pub mod client;
pub mod lol;
pub mod metrics;
pub mod traits;
