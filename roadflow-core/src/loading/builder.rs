use log::info;

use super::de::{read_junctions, read_roads};
use crate::{DataConfig, Error, GraphStore, TrafficBounds};

/// Creates a graph store from the junction and road documents named in the
/// configuration
///
/// # Errors
///
/// Returns an error if a file cannot be read or parsed, or if its contents
/// violate the graph invariants
pub fn load_store(config: &DataConfig, bounds: TrafficBounds) -> Result<GraphStore, Error> {
    validate_config(config)?;

    info!("Reading junctions: {}", config.junctions_path.display());
    let junctions = read_junctions(&config.junctions_path)?;
    info!("Loaded {} junctions", junctions.len());

    info!("Reading roads: {}", config.roads_path.display());
    let roads = read_roads(&config.roads_path)?;
    info!("Loaded {} roads", roads.len());

    let store = GraphStore::load(junctions, roads, bounds)?;
    info!("Road network ready");
    Ok(store)
}

fn validate_config(config: &DataConfig) -> Result<(), Error> {
    for path in [&config.junctions_path, &config.roads_path] {
        if !path.exists() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Data file not found: {}", path.display()),
            )));
        }
    }
    Ok(())
}
