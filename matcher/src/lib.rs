//! Nearest-neighbor descriptor matching.
//!
//! Finds the registered record closest to a query descriptor under
//! Euclidean distance and decides whether it is close enough to count as
//! a verified identity. The scan is deliberately linear: the target scale
//! is a small local roster, not a vector database.

mod euclidean;
mod matcher;

pub use euclidean::euclidean_distance;
pub use matcher::{find_best_match, Matcher, DEFAULT_THRESHOLD};
