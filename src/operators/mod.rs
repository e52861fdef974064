pub mod distance_matrix;
pub mod solution;

pub mod crossover;
pub mod evaluation;
pub mod initialisation;
pub mod mutation;
pub mod selection;
pub mod neighbour_gen;
