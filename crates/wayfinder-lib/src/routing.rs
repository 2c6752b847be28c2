use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::map::{Edge, PlaceId, Waymap};
use crate::path::{find_route_cheapest, find_route_hops};

/// Supported route optimization criteria.
///
/// The binding between a criterion and the edge field it reads is a core
/// contract: `LeastDistance` reads `distance`, `LeastTime` reads `time`,
/// `LeastRisk` reads `risk`. `FewestHops` counts edge traversals with
/// breadth-first search instead of feeding a constant weight into the
/// cheapest-route search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteCriterion {
    FewestHops,
    LeastDistance,
    LeastTime,
    LeastRisk,
}

impl RouteCriterion {
    pub const ALL: [RouteCriterion; 4] = [
        RouteCriterion::FewestHops,
        RouteCriterion::LeastDistance,
        RouteCriterion::LeastTime,
        RouteCriterion::LeastRisk,
    ];

    /// Weight read from each edge under this criterion. `None` for the
    /// unweighted criterion, which counts edges instead.
    fn extractor(self) -> Option<fn(&Edge) -> f64> {
        match self {
            RouteCriterion::FewestHops => None,
            RouteCriterion::LeastDistance => Some(|edge| edge.distance),
            RouteCriterion::LeastTime => Some(|edge| edge.time),
            RouteCriterion::LeastRisk => Some(|edge| edge.risk),
        }
    }

    /// Unit label for presentation layers.
    pub fn unit(self) -> &'static str {
        match self {
            RouteCriterion::FewestHops => "hops",
            RouteCriterion::LeastDistance => "km",
            RouteCriterion::LeastTime => "hrs",
            RouteCriterion::LeastRisk => "encounters",
        }
    }
}

impl fmt::Display for RouteCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteCriterion::FewestHops => "fewest_hops",
            RouteCriterion::LeastDistance => "least_distance",
            RouteCriterion::LeastTime => "least_time",
            RouteCriterion::LeastRisk => "least_risk",
        };
        f.write_str(value)
    }
}

/// Route with the fewest edge traversals, or `None` when the goal is
/// unreachable.
pub fn fewest_hops(map: &Waymap, start: PlaceId, goal: PlaceId) -> Option<Vec<PlaceId>> {
    find_route_hops(map, start, goal)
}

/// Route with the least cumulative distance, with its total.
pub fn least_distance(map: &Waymap, start: PlaceId, goal: PlaceId) -> Option<(Vec<PlaceId>, f64)> {
    find_route_cheapest(map, start, goal, |edge| edge.distance)
}

/// Route with the least cumulative travel time, with its total.
pub fn least_time(map: &Waymap, start: PlaceId, goal: PlaceId) -> Option<(Vec<PlaceId>, f64)> {
    find_route_cheapest(map, start, goal, |edge| edge.time)
}

/// Route with the least cumulative risk, with its total.
pub fn least_risk(map: &Waymap, start: PlaceId, goal: PlaceId) -> Option<(Vec<PlaceId>, f64)> {
    find_route_cheapest(map, start, goal, |edge| edge.risk)
}

/// High-level route planning request with unresolved place names.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: String,
    pub goal: String,
    pub criterion: RouteCriterion,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, goal: impl Into<String>, criterion: RouteCriterion) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            criterion,
        }
    }
}

/// Planned route returned by the library.
///
/// `cost` is `None` for the fewest-hops criterion (use [`hop_count`]) and the
/// accumulated weight for the three weighted criteria. A plan always holds at
/// least one step; a start-equals-goal query yields a single step.
///
/// [`hop_count`]: RoutePlan::hop_count
#[derive(Debug, Clone, Serialize)]
pub struct RoutePlan {
    pub criterion: RouteCriterion,
    pub start: PlaceId,
    pub goal: PlaceId,
    pub steps: Vec<PlaceId>,
    pub cost: Option<f64>,
}

impl RoutePlan {
    /// Number of edge traversals in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Plan a route under the requested criterion.
///
/// Unknown place names are surfaced as [`Error::UnknownPlace`] with fuzzy
/// suggestions; an unreachable goal becomes [`Error::RouteNotFound`]. The
/// underlying searches stay value-returning, so callers that prefer to branch
/// on absence can use the per-criterion functions directly.
pub fn plan_route(map: &Waymap, request: &RouteRequest) -> Result<RoutePlan> {
    let start_id = resolve_place(map, &request.start)?;
    let goal_id = resolve_place(map, &request.goal)?;

    debug!(
        criterion = %request.criterion,
        start = %request.start,
        goal = %request.goal,
        "planning route"
    );

    let no_route = || Error::RouteNotFound {
        start: request.start.clone(),
        goal: request.goal.clone(),
    };

    let (steps, cost) = match request.criterion.extractor() {
        None => {
            let steps = find_route_hops(map, start_id, goal_id).ok_or_else(no_route)?;
            (steps, None)
        }
        Some(weight) => {
            let (steps, cost) =
                find_route_cheapest(map, start_id, goal_id, weight).ok_or_else(no_route)?;
            (steps, Some(cost))
        }
    };

    Ok(RoutePlan {
        criterion: request.criterion,
        start: start_id,
        goal: goal_id,
        steps,
        cost,
    })
}

fn resolve_place(map: &Waymap, name: &str) -> Result<PlaceId> {
    map.place_id_by_name(name).ok_or_else(|| Error::UnknownPlace {
        name: name.to_string(),
        suggestions: map.similar_place_names(name),
    })
}
