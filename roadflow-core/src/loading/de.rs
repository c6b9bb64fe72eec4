use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::Error;
use crate::model::{Junction, RoadSpec};

#[derive(Debug, Deserialize)]
struct JunctionsDocument {
    junctions: Vec<Junction>,
}

#[derive(Debug, Deserialize)]
struct RoadsDocument {
    roads: Vec<RoadSpec>,
}

fn deserialize_json_file<T>(path: &Path) -> Result<T, Error>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        Error::InvalidData(format!("Failed to parse '{}': {}", path.display(), e))
    })
}

/// Reads a `{"junctions": [{id, name, lat, lng}, ...]}` document.
pub fn read_junctions(path: &Path) -> Result<Vec<Junction>, Error> {
    deserialize_json_file::<JunctionsDocument>(path).map(|doc| doc.junctions)
}

/// Reads a `{"roads": [{from, to, distance, base_time}, ...]}` document.
pub fn read_roads(path: &Path) -> Result<Vec<RoadSpec>, Error> {
    deserialize_json_file::<RoadsDocument>(path).map(|doc| doc.roads)
}
