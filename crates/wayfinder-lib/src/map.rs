use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Jaro-Winkler similarity required before a name is offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Maximum number of suggestions attached to an unknown-place error.
const MAX_SUGGESTIONS: usize = 3;

/// Numeric identifier for an interned place.
pub type PlaceId = u32;

/// Edge record as supplied by the data loader.
///
/// `start` and `end` are opaque place names; the four weights are independent
/// of each other. `hops` is carried through from the source data but the
/// fewest-hops search counts edge traversals, not this field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub start: String,
    pub end: String,
    pub hops: u32,
    pub distance: f64,
    pub time: f64,
    pub risk: f64,
}

/// Directed edge within the waymap.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: PlaceId,
    pub hops: u32,
    pub distance: f64,
    pub time: f64,
    pub risk: f64,
}

/// A named place in the network.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
}

/// Incrementally assembles a [`Waymap`].
///
/// Both endpoints of every edge are interned as places on first sight.
/// Parallel edges between the same ordered pair are preserved in insertion
/// order; nothing is deduplicated or merged.
#[derive(Debug, Default)]
pub struct WaymapBuilder {
    places: HashMap<PlaceId, Place>,
    name_to_id: HashMap<String, PlaceId>,
    adjacency: HashMap<PlaceId, Vec<Edge>>,
}

impl WaymapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directed edge and both of its endpoints.
    ///
    /// Negative weights are rejected because the cheapest-route search is
    /// only correct over non-negative costs.
    pub fn add_edge(
        &mut self,
        from: &str,
        to: &str,
        hops: u32,
        distance: f64,
        time: f64,
        risk: f64,
    ) -> Result<()> {
        for (field, value) in [("distance", distance), ("time", time), ("risk", risk)] {
            if value < 0.0 {
                return Err(Error::NegativeWeight {
                    start: from.to_string(),
                    end: to.to_string(),
                    field,
                    value,
                });
            }
        }

        let from_id = self.intern(from);
        let to_id = self.intern(to);
        self.adjacency.entry(from_id).or_default().push(Edge {
            target: to_id,
            hops,
            distance,
            time,
            risk,
        });
        Ok(())
    }

    /// Register every record in input order.
    pub fn add_records<'a>(
        &mut self,
        records: impl IntoIterator<Item = &'a EdgeRecord>,
    ) -> Result<()> {
        for record in records {
            self.add_edge(
                &record.start,
                &record.end,
                record.hops,
                record.distance,
                record.time,
                record.risk,
            )?;
        }
        Ok(())
    }

    /// Hand off the assembled map as an immutable handle.
    pub fn build(self) -> Waymap {
        debug!(
            places = self.places.len(),
            edges = self.adjacency.values().map(Vec::len).sum::<usize>(),
            "built waymap"
        );
        Waymap {
            places: self.places,
            name_to_id: self.name_to_id,
            adjacency: Arc::new(self.adjacency),
        }
    }

    fn intern(&mut self, name: &str) -> PlaceId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = self.places.len() as PlaceId;
        self.places.insert(
            id,
            Place {
                id,
                name: name.to_string(),
            },
        );
        self.name_to_id.insert(name.to_string(), id);
        id
    }
}

/// Immutable place graph used by the pathfinding algorithms.
///
/// Built once via [`WaymapBuilder`]; every later query is read-only, so a
/// `Waymap` can be cloned cheaply and shared across threads.
#[derive(Debug, Clone)]
pub struct Waymap {
    places: HashMap<PlaceId, Place>,
    name_to_id: HashMap<String, PlaceId>,
    adjacency: Arc<HashMap<PlaceId, Vec<Edge>>>,
}

impl Waymap {
    /// Resolve a place name to its identifier.
    pub fn place_id_by_name(&self, name: &str) -> Option<PlaceId> {
        self.name_to_id.get(name).copied()
    }

    /// Resolve a place identifier back to its name.
    pub fn place_name(&self, id: PlaceId) -> Option<&str> {
        self.places.get(&id).map(|place| place.name.as_str())
    }

    /// Iterate over every known place, in no particular order.
    pub fn places(&self) -> impl Iterator<Item = &Place> {
        self.places.values()
    }

    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Outgoing edges for a place, in insertion order. Places with no
    /// outgoing edges (including identifiers never interned) yield an empty
    /// slice.
    pub fn neighbours(&self, place: PlaceId) -> &[Edge] {
        self.adjacency
            .get(&place)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Known place names similar to `name`, best match first. Used to build
    /// "did you mean" diagnostics for unknown-place errors.
    pub fn similar_place_names(&self, name: &str) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .name_to_id
            .keys()
            .map(|known| (strsim::jaro_winkler(name, known), known.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, known)| known.to_string())
            .collect()
    }
}

/// Load a waymap from a JSON file containing an array of [`EdgeRecord`]s.
pub fn load_waymap(path: &Path) -> Result<Waymap> {
    let contents = fs::read_to_string(path)?;
    let records: Vec<EdgeRecord> = serde_json::from_str(&contents)?;
    debug!(path = %path.display(), records = records.len(), "loaded map file");

    let mut builder = WaymapBuilder::new();
    builder.add_records(&records)?;
    Ok(builder.build())
}
