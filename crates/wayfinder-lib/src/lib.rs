//! Wayfinder library entry points.
//!
//! This crate exposes helpers to build a place graph from edge records, load
//! one from a JSON map file, and plan routes under four optimization
//! criteria: fewest hops, least distance, least time, and least risk.
//! Higher-level consumers (CLI, services) should only depend on the
//! functions exported here instead of reimplementing behavior.

#![deny(warnings)]

pub mod error;
pub mod map;
pub mod path;
pub mod routing;

pub use error::{Error, Result};
pub use map::{load_waymap, Edge, EdgeRecord, Place, PlaceId, Waymap, WaymapBuilder};
pub use path::{find_route_cheapest, find_route_hops};
pub use routing::{
    fewest_hops, least_distance, least_risk, least_time, plan_route, RouteCriterion, RoutePlan,
    RouteRequest,
};
