use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use log::{debug, trace};
use ordered_float::OrderedFloat;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use super::state::{Label, State};
use crate::model::Snapshot;
use crate::routing::{CancelToken, Route, RouteLeg};
use crate::{Error, JunctionId};

/// Settled junctions between two cancellation checks
const CANCEL_CHECK_INTERVAL: usize = 1024;

/// Dijkstra's algorithm over the effective travel times of one snapshot.
///
/// Ties on total time go to the path with fewer arcs, then to the path found
/// first when scanning each junction's arcs in load order. The result is
/// therefore identical for repeated calls on the same snapshot.
///
/// # Errors
///
/// [`Error::JunctionNotFound`] for unknown ids, [`Error::SameJunction`] when
/// `source == destination`, [`Error::NoPathFound`] when the destination is
/// unreachable and [`Error::Cancelled`] when `cancel` fires mid-search.
pub fn find_shortest_path(
    snapshot: &Snapshot,
    source: JunctionId,
    destination: JunctionId,
    cancel: &CancelToken,
) -> Result<Route, Error> {
    let network = snapshot.network();
    let start = network
        .node_index(source)
        .ok_or(Error::JunctionNotFound(source))?;
    let target = network
        .node_index(destination)
        .ok_or(Error::JunctionNotFound(destination))?;
    if start == target {
        return Err(Error::SameJunction(source));
    }

    let graph = &network.graph;
    let node_count = graph.node_count();
    let mut labels = vec![Label::UNREACHED; node_count];
    let mut predecessors: Vec<Option<EdgeIndex>> = vec![None; node_count];
    let mut settled = FixedBitSet::with_capacity(node_count);
    let mut heap = BinaryHeap::with_capacity(node_count.min(1024));
    let mut seq = 0u64;

    // Start node has time 0
    labels[start.index()] = Label::ZERO;
    heap.push(State {
        label: Label::ZERO,
        seq,
        node: start,
    });

    let mut settled_count = 0usize;
    let mut found = false;

    while let Some(State { label, node, .. }) = heap.pop() {
        // Skip stale entries for junctions settled through a better label
        if settled.put(node.index()) {
            continue;
        }
        if node == target {
            found = true;
            break;
        }

        settled_count += 1;
        if settled_count % CANCEL_CHECK_INTERVAL == 0 && cancel.is_cancelled() {
            debug!("Route search {source} -> {destination} cancelled after {settled_count} junctions");
            return Err(Error::Cancelled);
        }

        // Examine neighbours in load order
        for edge in graph.edges(node) {
            let next = edge.target();
            if settled.contains(next.index()) {
                continue;
            }
            let candidate = Label {
                cost: OrderedFloat(label.cost.0 + snapshot.effective_time(edge.weight().road)),
                hops: label.hops + 1,
            };
            // Strict comparison keeps the first-found path on full ties
            if candidate < labels[next.index()] {
                labels[next.index()] = candidate;
                predecessors[next.index()] = Some(edge.id());
                seq += 1;
                heap.push(State {
                    label: candidate,
                    seq,
                    node: next,
                });
            }
        }
    }

    trace!(
        "Route search {source} -> {destination}: settled {settled_count} of {node_count} junctions"
    );

    if !found {
        debug!("No path from {source} to {destination}");
        return Err(Error::NoPathFound {
            from: source,
            to: destination,
        });
    }

    let route = build_route(snapshot, start, target, &predecessors);
    debug!(
        "Route {source} -> {destination}: {} junctions, {:.2} min, {:.2} km",
        route.junctions.len(),
        route.total_time,
        route.total_distance
    );
    Ok(route)
}

/// Follows predecessor arcs backward from target to start and sums the legs
/// forward, in the same order the search accumulated them.
fn build_route(
    snapshot: &Snapshot,
    start: NodeIndex,
    target: NodeIndex,
    predecessors: &[Option<EdgeIndex>],
) -> Route {
    let network = snapshot.network();
    let graph = &network.graph;

    let mut arcs = Vec::new();
    let mut current = target;
    while current != start {
        let Some(edge) = predecessors[current.index()] else {
            break;
        };
        arcs.push(edge);
        current = graph.raw_edges()[edge.index()].source();
    }
    arcs.reverse();

    let mut junctions = Vec::with_capacity(arcs.len() + 1);
    junctions.push(network.junction_at(start).id);

    let mut legs = Vec::with_capacity(arcs.len());
    let mut total_time = 0.0;
    let mut total_distance = 0.0;
    for edge in arcs {
        let raw = &graph.raw_edges()[edge.index()];
        let road = raw.weight.road;
        let leg = RouteLeg {
            road,
            from: network.junction_at(raw.source()).id,
            to: network.junction_at(raw.target()).id,
            forward: raw.weight.forward,
            travel_time: snapshot.effective_time(road),
            distance: snapshot.road(road).distance,
        };
        total_time += leg.travel_time;
        total_distance += leg.distance;
        junctions.push(leg.to);
        legs.push(leg);
    }

    Route {
        junctions,
        legs,
        total_time,
        total_distance,
        version: snapshot.version(),
    }
}
