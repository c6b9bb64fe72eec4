//! Immutable road network topology

use hashbrown::{HashMap, hash_map::Entry};
use log::warn;
use petgraph::graph::{DiGraph, NodeIndex};

use super::components::{Junction, Road, RoadArc, RoadSpec};
use super::directory::Directory;
use crate::{Error, JunctionId, RoadId, TrafficBounds};

/// Directed adjacency over junctions. Node weights are the junctions in load
/// order, edge weights are [`RoadArc`]s.
pub type RoadGraph = DiGraph<Junction, RoadArc>;

/// Topology of the road network. It is fixed after load and shared by every
/// snapshot through an `Arc`.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    pub(crate) graph: RoadGraph,
    roads: Vec<Road>,
    index: HashMap<JunctionId, NodeIndex>,
    /// Roads keyed by unordered junction pair, smaller id first
    pairs: HashMap<(JunctionId, JunctionId), Vec<RoadId>>,
    directory: Directory,
}

impl RoadNetwork {
    /// Validates the load input and builds the topology. Returns the network
    /// together with the initial multiplier of every road.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidTopology`] for duplicate junction ids, self-loops and
    /// roads referencing unknown junctions. [`Error::InvalidWeight`] for
    /// non-positive or non-finite base values and initial multipliers
    /// outside `bounds`.
    pub fn build(
        junctions: Vec<Junction>,
        roads: Vec<RoadSpec>,
        bounds: &TrafficBounds,
    ) -> Result<(Self, Vec<f64>), Error> {
        let mut graph = RoadGraph::with_capacity(junctions.len(), roads.len() * 2);
        let mut index = HashMap::with_capacity(junctions.len());

        for junction in junctions {
            if !junction.lat.is_finite() || !junction.lng.is_finite() {
                return Err(Error::InvalidTopology(format!(
                    "junction {} has non-finite coordinates",
                    junction.id
                )));
            }
            match index.entry(junction.id) {
                Entry::Occupied(_) => {
                    return Err(Error::InvalidTopology(format!(
                        "duplicate junction id {}",
                        junction.id
                    )));
                }
                Entry::Vacant(entry) => {
                    entry.insert(graph.add_node(junction));
                }
            }
        }

        let mut validated = Vec::with_capacity(roads.len());
        let mut multipliers = Vec::with_capacity(roads.len());
        let mut pairs: HashMap<(JunctionId, JunctionId), Vec<RoadId>> = HashMap::new();
        let mut arcs = Vec::with_capacity(roads.len() * 2);

        for (id, spec) in roads.into_iter().enumerate() {
            let from = *index.get(&spec.from).ok_or_else(|| {
                Error::InvalidTopology(format!(
                    "road {id} references unknown junction {}",
                    spec.from
                ))
            })?;
            let to = *index.get(&spec.to).ok_or_else(|| {
                Error::InvalidTopology(format!(
                    "road {id} references unknown junction {}",
                    spec.to
                ))
            })?;
            if from == to {
                return Err(Error::InvalidTopology(format!(
                    "road {id} connects junction {} to itself",
                    spec.from
                )));
            }
            if !(spec.base_time.is_finite() && spec.base_time > 0.0) {
                return Err(Error::InvalidWeight(format!(
                    "road {id} ({} -> {}) has base time {}, expected a positive number",
                    spec.from, spec.to, spec.base_time
                )));
            }
            if !(spec.distance.is_finite() && spec.distance > 0.0) {
                return Err(Error::InvalidWeight(format!(
                    "road {id} ({} -> {}) has distance {}, expected a positive number",
                    spec.from, spec.to, spec.distance
                )));
            }
            let multiplier = spec.multiplier.unwrap_or(1.0);
            if !bounds.contains(multiplier) {
                return Err(Error::InvalidWeight(format!(
                    "road {id} ({} -> {}) has multiplier {multiplier} outside [{}, {}]",
                    spec.from, spec.to, bounds.min_multiplier, bounds.max_multiplier
                )));
            }

            arcs.push((from, to, RoadArc { road: id, forward: true }));
            if spec.bidirectional {
                arcs.push((to, from, RoadArc { road: id, forward: false }));
            }
            pairs.entry(pair_key(spec.from, spec.to)).or_default().push(id);
            multipliers.push(multiplier);
            validated.push(Road {
                id,
                from: spec.from,
                to: spec.to,
                distance: spec.distance,
                base_time: spec.base_time,
                bidirectional: spec.bidirectional,
            });
        }

        // petgraph walks a node's outgoing edges newest first, so adding the
        // arcs in reverse makes `edges(node)` yield them in load order.
        for (from, to, arc) in arcs.into_iter().rev() {
            graph.add_edge(from, to, arc);
        }

        for node in graph.node_indices() {
            if graph.neighbors_undirected(node).next().is_none() {
                warn!("Junction {} is not connected to any road", graph[node].id);
            }
        }

        let directory = Directory::new(graph.node_weights());

        Ok((
            Self {
                graph,
                roads: validated,
                index,
                pairs,
                directory,
            },
            multipliers,
        ))
    }

    pub fn junction_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn road_count(&self) -> usize {
        self.roads.len()
    }

    pub fn arc_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_index(&self, id: JunctionId) -> Option<NodeIndex> {
        self.index.get(&id).copied()
    }

    pub fn contains(&self, id: JunctionId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn junction(&self, id: JunctionId) -> Option<&Junction> {
        self.node_index(id).map(|node| &self.graph[node])
    }

    /// Junctions in load order
    pub fn junctions(&self) -> impl Iterator<Item = &Junction> {
        self.graph.node_weights()
    }

    pub fn road(&self, id: RoadId) -> &Road {
        &self.roads[id]
    }

    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// Every road joining the two junctions, whichever way it was loaded.
    pub fn roads_between(&self, a: JunctionId, b: JunctionId) -> &[RoadId] {
        self.pairs
            .get(&pair_key(a, b))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub(crate) fn junction_at(&self, node: NodeIndex) -> &Junction {
        &self.graph[node]
    }
}

/// Key of an unordered junction pair
pub fn pair_key(a: JunctionId, b: JunctionId) -> (JunctionId, JunctionId) {
    if a <= b { (a, b) } else { (b, a) }
}
