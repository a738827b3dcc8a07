pub mod distribution;
pub mod tables;
