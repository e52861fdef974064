pub mod algorithms;
pub mod engine;
pub mod error;
pub mod models;
pub mod operators;
pub mod settings;
pub mod utilities;

pub use algorithms::{Algorithm, AlgorithmResult};
pub use engine::{optimize, RouteReport};
pub use error::{EngineError, Result};
pub use models::{city::City, city::Coordinate, selection::Selection};
pub use operators::distance_matrix::{DistanceMatrix, DistanceSource, GreatCircle, RoutingTable};
pub use settings::Settings;
