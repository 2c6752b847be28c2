use std::collections::HashSet;

use wayfinder_lib::{
    fewest_hops, find_route_cheapest, least_distance, least_risk, least_time, Edge, PlaceId,
    Waymap, WaymapBuilder,
};

/// Graph from the reference data: two ways from Ontario to Nova Scotia.
fn reference_map() -> Waymap {
    let mut builder = WaymapBuilder::new();
    builder
        .add_edge("Ontario", "Quebec", 10, 500.0, 5.0, 1.0)
        .unwrap();
    builder
        .add_edge("Quebec", "Nova Scotia", 2, 1000.0, 10.0, 2.0)
        .unwrap();
    builder
        .add_edge("Ontario", "Nova Scotia", 2, 1300.0, 13.0, 4.0)
        .unwrap();
    builder.build()
}

fn names(map: &Waymap, steps: &[PlaceId]) -> Vec<String> {
    steps
        .iter()
        .map(|&id| map.place_name(id).unwrap().to_string())
        .collect()
}

#[test]
fn self_query_is_a_single_step_with_zero_cost() {
    let map = reference_map();
    let ontario = map.place_id_by_name("Ontario").unwrap();

    assert_eq!(fewest_hops(&map, ontario, ontario), Some(vec![ontario]));
    for result in [
        least_distance(&map, ontario, ontario),
        least_time(&map, ontario, ontario),
        least_risk(&map, ontario, ontario),
    ] {
        let (steps, cost) = result.expect("self route exists");
        assert_eq!(steps, vec![ontario]);
        assert_eq!(cost, 0.0);
    }
}

#[test]
fn least_distance_picks_the_globally_cheaper_direct_edge() {
    let map = reference_map();
    let start = map.place_id_by_name("Ontario").unwrap();
    let goal = map.place_id_by_name("Nova Scotia").unwrap();

    let (steps, cost) = least_distance(&map, start, goal).expect("route exists");
    assert_eq!(names(&map, &steps), vec!["Ontario", "Nova Scotia"]);
    assert_eq!(cost, 1300.0);
}

#[test]
fn least_time_prefers_the_direct_edge() {
    let map = reference_map();
    let start = map.place_id_by_name("Ontario").unwrap();
    let goal = map.place_id_by_name("Nova Scotia").unwrap();

    // Direct: 13 hrs. Via Quebec: 5 + 10 = 15 hrs.
    let (steps, cost) = least_time(&map, start, goal).expect("route exists");
    assert_eq!(names(&map, &steps), vec!["Ontario", "Nova Scotia"]);
    assert_eq!(cost, 13.0);
}

#[test]
fn least_risk_detours_through_quebec() {
    let map = reference_map();
    let start = map.place_id_by_name("Ontario").unwrap();
    let goal = map.place_id_by_name("Nova Scotia").unwrap();

    // Direct: 4 encounters. Via Quebec: 1 + 2 = 3.
    let (steps, cost) = least_risk(&map, start, goal).expect("route exists");
    assert_eq!(names(&map, &steps), vec!["Ontario", "Quebec", "Nova Scotia"]);
    assert_eq!(cost, 3.0);
}

#[test]
fn fewest_hops_ignores_edge_weights() {
    let map = reference_map();
    let start = map.place_id_by_name("Ontario").unwrap();
    let goal = map.place_id_by_name("Nova Scotia").unwrap();

    let steps = fewest_hops(&map, start, goal).expect("route exists");
    assert_eq!(names(&map, &steps), vec!["Ontario", "Nova Scotia"]);
}

#[test]
fn cheaper_of_two_parallel_edges_wins() {
    let mut builder = WaymapBuilder::new();
    builder.add_edge("A", "B", 1, 5.0, 1.0, 0.0).unwrap();
    builder.add_edge("A", "B", 1, 3.0, 9.0, 0.0).unwrap();
    let map = builder.build();

    let a = map.place_id_by_name("A").unwrap();
    let b = map.place_id_by_name("B").unwrap();

    let (_, distance) = least_distance(&map, a, b).expect("route exists");
    assert_eq!(distance, 3.0);

    let (_, time) = least_time(&map, a, b).expect("route exists");
    assert_eq!(time, 1.0);
}

#[test]
fn multi_hop_route_beats_expensive_direct_edge() {
    let mut builder = WaymapBuilder::new();
    builder.add_edge("A", "B", 1, 10.0, 1.0, 0.0).unwrap();
    builder.add_edge("A", "C", 1, 2.0, 1.0, 0.0).unwrap();
    builder.add_edge("C", "B", 1, 3.0, 1.0, 0.0).unwrap();
    let map = builder.build();

    let a = map.place_id_by_name("A").unwrap();
    let b = map.place_id_by_name("B").unwrap();

    let (steps, cost) = least_distance(&map, a, b).expect("route exists");
    assert_eq!(names(&map, &steps), vec!["A", "C", "B"]);
    assert_eq!(cost, 5.0);
}

#[test]
fn disconnected_goal_yields_no_route_under_every_criterion() {
    let mut builder = WaymapBuilder::new();
    builder.add_edge("A", "B", 1, 1.0, 1.0, 1.0).unwrap();
    // C only has an outgoing edge; nothing reaches it.
    builder.add_edge("C", "A", 1, 1.0, 1.0, 1.0).unwrap();
    let map = builder.build();

    let a = map.place_id_by_name("A").unwrap();
    let c = map.place_id_by_name("C").unwrap();

    assert_eq!(fewest_hops(&map, a, c), None);
    assert_eq!(least_distance(&map, a, c), None);
    assert_eq!(least_time(&map, a, c), None);
    assert_eq!(least_risk(&map, a, c), None);
}

#[test]
fn equal_cost_routes_resolve_deterministically() {
    // Two equal-cost routes S -> A -> T and S -> B -> T. The smaller place
    // identifier pops first on ties, so A (interned before B) wins.
    let mut builder = WaymapBuilder::new();
    builder.add_edge("S", "A", 1, 1.0, 1.0, 1.0).unwrap();
    builder.add_edge("S", "B", 1, 1.0, 1.0, 1.0).unwrap();
    builder.add_edge("A", "T", 1, 1.0, 1.0, 1.0).unwrap();
    builder.add_edge("B", "T", 1, 1.0, 1.0, 1.0).unwrap();
    let map = builder.build();

    let s = map.place_id_by_name("S").unwrap();
    let t = map.place_id_by_name("T").unwrap();

    let first = least_distance(&map, s, t).expect("route exists");
    assert_eq!(names(&map, &first.0), vec!["S", "A", "T"]);
    assert_eq!(first.1, 2.0);

    for _ in 0..10 {
        assert_eq!(least_distance(&map, s, t), Some(first.clone()));
    }
}

#[test]
fn repeated_queries_are_idempotent() {
    let map = reference_map();
    let start = map.place_id_by_name("Ontario").unwrap();
    let goal = map.place_id_by_name("Nova Scotia").unwrap();

    let hops = fewest_hops(&map, start, goal);
    let risk = least_risk(&map, start, goal);
    for _ in 0..5 {
        assert_eq!(fewest_hops(&map, start, goal), hops);
        assert_eq!(least_risk(&map, start, goal), risk);
    }
}

/// Graph with a cycle and parallel edges, awkward enough to make the
/// brute-force cross-checks below meaningful.
fn tangled_map() -> Waymap {
    let mut builder = WaymapBuilder::new();
    for (from, to, distance, time, risk) in [
        ("A", "B", 4.0, 1.0, 2.0),
        ("A", "C", 1.0, 5.0, 1.0),
        ("B", "D", 3.0, 1.0, 8.0),
        ("C", "B", 1.0, 1.0, 1.0),
        ("C", "D", 7.0, 2.0, 0.0),
        ("D", "A", 1.0, 1.0, 1.0),
        ("B", "D", 2.0, 6.0, 0.0),
        ("C", "A", 1.0, 1.0, 1.0),
    ] {
        builder.add_edge(from, to, 1, distance, time, risk).unwrap();
    }
    builder.build()
}

/// Enumerate the cost of every simple path from `current` to `goal`.
fn simple_path_costs(
    map: &Waymap,
    current: PlaceId,
    goal: PlaceId,
    cost_so_far: f64,
    hops_so_far: usize,
    visited: &mut HashSet<PlaceId>,
    cost: &impl Fn(&Edge) -> f64,
    found: &mut Vec<(f64, usize)>,
) {
    if current == goal {
        found.push((cost_so_far, hops_so_far));
        return;
    }
    for edge in map.neighbours(current) {
        if visited.contains(&edge.target) {
            continue;
        }
        visited.insert(edge.target);
        simple_path_costs(
            map,
            edge.target,
            goal,
            cost_so_far + cost(edge),
            hops_so_far + 1,
            visited,
            cost,
            found,
        );
        visited.remove(&edge.target);
    }
}

fn brute_force_minimum(
    map: &Waymap,
    start: PlaceId,
    goal: PlaceId,
    cost: impl Fn(&Edge) -> f64,
) -> Option<(f64, usize)> {
    let mut visited = HashSet::from([start]);
    let mut found = Vec::new();
    simple_path_costs(map, start, goal, 0.0, 0, &mut visited, &cost, &mut found);
    let min_cost = found
        .iter()
        .map(|(cost, _)| *cost)
        .min_by(f64::total_cmp)?;
    let min_hops = found.iter().map(|(_, hops)| *hops).min()?;
    Some((min_cost, min_hops))
}

#[test]
fn dijkstra_matches_brute_force_on_every_extractor() {
    let map = tangled_map();
    let extractors: [(&str, fn(&Edge) -> f64); 3] = [
        ("distance", |edge| edge.distance),
        ("time", |edge| edge.time),
        ("risk", |edge| edge.risk),
    ];

    let ids: Vec<PlaceId> = ["A", "B", "C", "D"]
        .iter()
        .map(|name| map.place_id_by_name(name).unwrap())
        .collect();

    for &start in &ids {
        for &goal in &ids {
            let reachable = brute_force_minimum(&map, start, goal, |edge| edge.distance);
            for (label, extractor) in extractors {
                let expected =
                    brute_force_minimum(&map, start, goal, extractor).map(|(cost, _)| cost);
                let actual =
                    find_route_cheapest(&map, start, goal, extractor).map(|(_, cost)| cost);
                assert_eq!(actual, expected, "{label} {start} -> {goal}");
            }
            // Reachability agrees between the searches.
            assert_eq!(fewest_hops(&map, start, goal).is_some(), reachable.is_some());
        }
    }
}

#[test]
fn bfs_hop_count_matches_brute_force() {
    let map = tangled_map();
    let ids: Vec<PlaceId> = ["A", "B", "C", "D"]
        .iter()
        .map(|name| map.place_id_by_name(name).unwrap())
        .collect();

    for &start in &ids {
        for &goal in &ids {
            let expected = brute_force_minimum(&map, start, goal, |_| 1.0).map(|(_, hops)| hops);
            let actual = fewest_hops(&map, start, goal).map(|steps| steps.len() - 1);
            assert_eq!(actual, expected, "{start} -> {goal}");
        }
    }
}
