//! This module is responsible for reading junction and road documents
//! and building the graph store.

mod builder;
mod de;

pub use builder::load_store;
pub use de::{read_junctions, read_roads};
