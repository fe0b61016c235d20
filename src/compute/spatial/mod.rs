pub mod algorithms;
pub use algorithms::{DistanceMetric, distance_between};
