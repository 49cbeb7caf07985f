//! # Neighbor Lists
//!
//! Neighbor lists are produced outside the evaluator; this module holds the
//! options a model declares ([`options::NeighborListOptions`]), a brute-force
//! provider that honors them ([`builder::build_neighbor_list`]) and the check for
//! lists that violate the half-list convention ([`convention::find_duplicate_pair`]).

pub mod builder;
pub mod convention;
pub mod options;

pub use builder::{NeighborListError, build_neighbor_list};
pub use convention::find_duplicate_pair;
pub use options::NeighborListOptions;
