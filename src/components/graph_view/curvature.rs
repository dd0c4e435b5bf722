//! Curvature assignment for parallel links, plus the arc geometry that
//! turns a curvature value into drawable coordinates.
//!
//! Links sharing an unordered endpoint pair are fanned out over
//! `[-max, +max]` so each arc stays visually distinguishable; a lone link
//! keeps curvature 0 and renders straight. Self-loops never join a fan-out
//! group (a loop has no meaningful "parallel peer" direction) and instead
//! receive the fixed curvature `max`, which keeps the loop arc visible
//! rather than collapsing it to a zero-length line.
//!
//! Assignment is deterministic: groups form in first-seen order and members
//! keep input order, so the same ordered input always yields bit-identical
//! curvatures.

use std::collections::HashMap;

use super::graph::{GraphBuildError, Link, NodeId};

/// Curvature bound used by the view component. Parallel links fan out
/// between minus and plus this value.
pub const DEFAULT_MAX_CURVATURE: f64 = 0.5;

/// Assign a curvature to every link, grouped by pair key.
///
/// Within a group of `n > 1` parallel links the last one (in input order)
/// gets exactly `+max`, the remaining `n - 1` are spaced evenly from
/// `-max` upwards. A member whose source differs from the last member's
/// source is negated, so all arcs of a group bow relative to the same
/// canonical direction no matter which way each link happens to point.
pub fn assign_curvatures(links: &mut [Link], max_curvature: f64) -> Result<(), GraphBuildError> {
	if !(max_curvature.is_finite() && max_curvature > 0.0) {
		return Err(GraphBuildError::InvalidCurvature(max_curvature));
	}

	let mut group_of: HashMap<(NodeId, NodeId), usize> = HashMap::new();
	let mut groups: Vec<Vec<usize>> = Vec::new();
	for (pos, link) in links.iter().enumerate() {
		if link.is_self_loop() {
			continue;
		}
		let key = (
			link.source.min(link.target),
			link.source.max(link.target),
		);
		let group = *group_of.entry(key).or_insert_with(|| {
			groups.push(Vec::new());
			groups.len() - 1
		});
		groups[group].push(pos);
	}

	for group in &groups {
		if group.len() < 2 {
			continue;
		}
		let last_pos = group[group.len() - 1];
		links[last_pos].curvature = max_curvature;
		let last_source = links[last_pos].source;

		let delta = (2.0 * max_curvature) / (group.len() - 1) as f64;
		for (i, &pos) in group[..group.len() - 1].iter().enumerate() {
			let mut value = -max_curvature + i as f64 * delta;
			if links[pos].source != last_source {
				value = -value;
			}
			links[pos].curvature = value;
		}
	}

	for link in links.iter_mut().filter(|l| l.is_self_loop()) {
		link.curvature = max_curvature;
	}

	Ok(())
}

/// Control point of the quadratic arc a curved link follows: the segment
/// midpoint, displaced perpendicularly by `curvature` times the segment
/// length. Negative curvature bows to the opposite side.
pub fn control_point(x1: f64, y1: f64, x2: f64, y2: f64, curvature: f64) -> (f64, f64) {
	let (dx, dy) = (x2 - x1, y2 - y1);
	(
		(x1 + x2) / 2.0 + dy * curvature,
		(y1 + y2) / 2.0 - dx * curvature,
	)
}

/// Circle traced by a self-loop: `(center_x, center_y, radius)`. Sized from
/// the node radius so the loop scales with its node, and placed just above
/// the node.
pub fn loop_geometry(x: f64, y: f64, node_radius: f64, curvature: f64) -> (f64, f64, f64) {
	let radius = node_radius * (1.0 + 2.0 * curvature.abs());
	(x, y - node_radius - radius * 0.5, radius)
}

/// Minimum distance from a point to a link's arc, by sampling the arc as a
/// polyline. Straight links (curvature 0) reduce to a single segment.
pub fn distance_to_arc(
	px: f64,
	py: f64,
	x1: f64,
	y1: f64,
	x2: f64,
	y2: f64,
	curvature: f64,
	samples: usize,
) -> f64 {
	if curvature.abs() < 1e-9 {
		return segment_distance_sq(px, py, x1, y1, x2, y2).sqrt();
	}

	let (cx, cy) = control_point(x1, y1, x2, y2, curvature);
	let samples = samples.max(2);
	let mut min_sq = f64::MAX;
	let (mut prev_x, mut prev_y) = (x1, y1);
	for i in 1..=samples {
		let t = i as f64 / samples as f64;
		let (qx, qy) = quad_point(x1, y1, cx, cy, x2, y2, t);
		let d = segment_distance_sq(px, py, prev_x, prev_y, qx, qy);
		if d < min_sq {
			min_sq = d;
		}
		(prev_x, prev_y) = (qx, qy);
	}
	min_sq.sqrt()
}

fn quad_point(x1: f64, y1: f64, cx: f64, cy: f64, x2: f64, y2: f64, t: f64) -> (f64, f64) {
	let u = 1.0 - t;
	(
		u * u * x1 + 2.0 * u * t * cx + t * t * x2,
		u * u * y1 + 2.0 * u * t * cy + t * t * y2,
	)
}

fn segment_distance_sq(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
	let (abx, aby) = (bx - ax, by - ay);
	let (apx, apy) = (px - ax, py - ay);
	let len_sq = abx * abx + aby * aby;
	if len_sq < f64::EPSILON {
		return apx * apx + apy * apy;
	}
	let t = ((apx * abx + apy * aby) / len_sq).clamp(0.0, 1.0);
	let (dx, dy) = (px - (ax + t * abx), py - (ay + t * aby));
	dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::graph_view::graph::PreparedGraph;
	use crate::components::graph_view::types::{GraphData, GraphLink, GraphNode};

	fn link(source: NodeId, target: NodeId) -> Link {
		Link {
			source,
			target,
			pair_key: format!("{}_{}", source.min(target), source.max(target)),
			curvature: 0.0,
		}
	}

	fn curvatures(links: &[Link]) -> Vec<f64> {
		links.iter().map(|l| l.curvature).collect()
	}

	#[test]
	fn lone_link_stays_straight() {
		let mut links = vec![link(0, 1)];
		assign_curvatures(&mut links, 0.5).unwrap();
		assert_eq!(links[0].curvature, 0.0);
	}

	#[test]
	fn fan_out_spans_the_full_range() {
		let mut links = vec![link(0, 1), link(0, 1), link(0, 1), link(0, 1)];
		assign_curvatures(&mut links, 0.75).unwrap();

		let values = curvatures(&links);
		assert_eq!(values, vec![-0.75, -0.25, 0.25, 0.75]);
		// All distinct, one exactly at +max.
		for (i, a) in values.iter().enumerate() {
			for b in &values[i + 1..] {
				assert_ne!(a, b);
			}
		}
	}

	#[test]
	fn two_parallel_links_sit_at_the_extremes() {
		let mut links = vec![link(0, 1), link(0, 1)];
		assign_curvatures(&mut links, 0.5).unwrap();
		assert_eq!(curvatures(&links), vec![-0.5, 0.5]);
	}

	#[test]
	fn reversed_member_is_negated_for_consistent_bow() {
		// Same unordered pair, opposite traversal direction. The reversed
		// link's value flips sign so the drawn arc bows relative to the
		// same canonical direction as the rest of the group.
		let mut links = vec![link(1, 0), link(0, 1)];
		assign_curvatures(&mut links, 0.5).unwrap();
		assert_eq!(links[1].curvature, 0.5);
		assert_eq!(links[0].curvature, 0.5);
	}

	#[test]
	fn assignment_is_deterministic_bit_for_bit() {
		let build = || {
			let mut links = vec![
				link(0, 1),
				link(2, 1),
				link(1, 0),
				link(0, 1),
				link(1, 2),
				link(3, 3),
			];
			assign_curvatures(&mut links, 0.37).unwrap();
			curvatures(&links)
		};

		let first = build();
		let second = build();
		let bits = |vs: &[f64]| vs.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
		assert_eq!(bits(&first), bits(&second));
	}

	#[test]
	fn triple_link_scenario_through_the_full_build() {
		// Nodes A, B, C; links A-B three times, B-C once.
		let data = GraphData {
			nodes: ["a", "b", "c"]
				.iter()
				.map(|id| GraphNode {
					id: id.to_string(),
					label: None,
				})
				.collect(),
			links: vec![
				GraphLink::between("a", "b"),
				GraphLink::between("a", "b"),
				GraphLink::between("a", "b"),
				GraphLink::between("b", "c"),
			],
		};
		let graph = PreparedGraph::build(&data, 0.5).unwrap();

		let ab = [
			graph.link(0).curvature,
			graph.link(1).curvature,
			graph.link(2).curvature,
		];
		assert_eq!(ab, [-0.5, 0.0, 0.5]);
		assert_eq!(graph.link(3).curvature, 0.0);
	}

	#[test]
	fn self_loops_keep_the_fixed_arc() {
		let mut links = vec![link(0, 0), link(0, 1), link(0, 1), link(0, 0)];
		assign_curvatures(&mut links, 0.5).unwrap();

		// Loops never join the fan-out group between 0 and 1.
		assert_eq!(curvatures(&links), vec![0.5, -0.5, 0.5, 0.5]);
	}

	#[test]
	fn rejects_unusable_curvature_bounds() {
		for bad in [0.0, -0.5, f64::NAN, f64::INFINITY] {
			let mut links = vec![link(0, 1)];
			let err = assign_curvatures(&mut links, bad).unwrap_err();
			assert!(matches!(err, GraphBuildError::InvalidCurvature(_)));
		}
	}

	#[test]
	fn control_point_of_straight_link_is_the_midpoint() {
		assert_eq!(control_point(0.0, 0.0, 10.0, 0.0, 0.0), (5.0, 0.0));
	}

	#[test]
	fn opposite_curvatures_mirror_the_control_point() {
		let (_, above) = control_point(0.0, 0.0, 10.0, 0.0, 0.5);
		let (_, below) = control_point(0.0, 0.0, 10.0, 0.0, -0.5);
		assert_eq!(above, -below);
		assert!(above != 0.0);
	}

	#[test]
	fn arc_distance_matches_segment_for_straight_links() {
		let d = distance_to_arc(5.0, 3.0, 0.0, 0.0, 10.0, 0.0, 0.0, 16);
		assert!((d - 3.0).abs() < 1e-9);
	}

	#[test]
	fn arc_distance_follows_the_bow() {
		// Curvature displaces the arc off the chord; a point sitting on the
		// chord midpoint is now some way from the curve.
		let on_chord = distance_to_arc(5.0, 0.0, 0.0, 0.0, 10.0, 0.0, 0.5, 32);
		assert!(on_chord > 1.0);

		// A point near the arc's apex (half the control-point offset) is
		// close to the curve.
		let (_, cy) = control_point(0.0, 0.0, 10.0, 0.0, 0.5);
		let near_apex = distance_to_arc(5.0, cy / 2.0, 0.0, 0.0, 10.0, 0.0, 0.5, 32);
		assert!(near_apex < 0.3);
	}

	#[test]
	fn loop_circle_sits_above_the_node() {
		let (cx, cy, radius) = loop_geometry(4.0, 10.0, 5.0, 0.5);
		assert_eq!(cx, 4.0);
		assert!(cy < 10.0);
		assert_eq!(radius, 10.0);
	}
}
