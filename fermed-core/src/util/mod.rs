pub mod scalar;
pub mod statistic;
