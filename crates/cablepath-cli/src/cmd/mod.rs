pub mod connectors;
pub mod dot;
pub mod linked;
pub mod path;
pub mod stats;
