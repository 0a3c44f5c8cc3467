use std::f32::consts::{PI, TAU};

use eframe::egui::{Pos2, Vec2};

use crate::scene::{NodeRole, RenderGraph};

/// Static radial layout: the operator sits at the canvas center, parents on
/// an evenly divided ring, and each parent's children on an outer arc
/// centered on the parent's own bearing. Deterministic for a given graph and
/// canvas; a single pass, no simulation.
pub fn radial_layout(graph: &RenderGraph, canvas: Vec2) -> Vec<Pos2> {
    let center = (canvas * 0.5).to_pos2();
    let mut positions = vec![center; graph.nodes.len()];

    let parents = graph
        .nodes
        .iter()
        .enumerate()
        .filter(|(_, node)| node.role == NodeRole::Parent)
        .map(|(index, _)| index)
        .collect::<Vec<_>>();
    if parents.is_empty() {
        return positions;
    }

    let r1 = parent_ring_radius(canvas);
    let mut bearing = vec![0.0f32; graph.nodes.len()];
    for (k, &index) in parents.iter().enumerate() {
        // First parent at the top, then clockwise around the ring.
        let angle = (k as f32 / parents.len() as f32) * TAU - PI / 2.0;
        bearing[index] = angle;
        positions[index] = center + Vec2::angled(angle) * r1;
    }

    let mut children_of = vec![Vec::new(); graph.nodes.len()];
    for &(src, dst) in &graph.edges {
        if graph.nodes[dst].role == NodeRole::Child {
            children_of[src].push(dst);
        }
    }

    for &parent_index in &parents {
        let children = &children_of[parent_index];
        let count = children.len();
        if count == 0 {
            continue;
        }

        let r2 = child_arc_radius(r1, count);
        let window = child_arc_window(count);
        let base = bearing[parent_index] - window / 2.0;

        for (j, &child_index) in children.iter().enumerate() {
            let t = if count == 1 {
                0.5
            } else {
                j as f32 / (count - 1) as f32
            };
            positions[child_index] = center + Vec2::angled(base + t * window) * r2;
        }
    }

    positions
}

pub fn parent_ring_radius(canvas: Vec2) -> f32 {
    260.0f32.max(0.36 * canvas.x.min(canvas.y))
}

/// Children push their arc outward as the brood grows, capped at +100.
pub fn child_arc_radius(r1: f32, count: usize) -> f32 {
    r1 + 140.0 + (6.0 * count as f32).min(100.0)
}

/// Angular window in radians: 10 degrees per child, clamped to [30, 120].
pub fn child_arc_window(count: usize) -> f32 {
    (count as f32 * 10.0).clamp(30.0, 120.0).to_radians()
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;
    use crate::graph::LinkGraph;
    use crate::scene::build_render_graph;

    fn graph_with_parents(count: usize) -> RenderGraph {
        let mut link = LinkGraph::empty("K0OPR");
        for k in 0..count {
            link.record_parent(&format!("P{k}AAA"), None);
        }
        build_render_graph(&link)
    }

    #[test]
    fn center_node_sits_at_canvas_center() {
        let positions = radial_layout(&graph_with_parents(3), vec2(1200.0, 800.0));
        assert_eq!(positions[0], Pos2::new(600.0, 400.0));
    }

    #[test]
    fn parents_share_one_ring_at_increasing_angles() {
        let canvas = vec2(1200.0, 800.0);
        let graph = graph_with_parents(5);
        let positions = radial_layout(&graph, canvas);
        let center = (canvas * 0.5).to_pos2();
        let r1 = parent_ring_radius(canvas);

        let mut last_angle = f32::NEG_INFINITY;
        for (k, position) in positions.iter().enumerate().skip(1) {
            let offset = *position - center;
            assert!((offset.length() - r1).abs() < 0.01, "parent {k} off the ring");

            let expected = (k as f32 - 1.0) / 5.0 * TAU - PI / 2.0;
            let actual = offset.y.atan2(offset.x);
            let wrapped = if expected > PI { expected - TAU } else { expected };
            assert!((actual - wrapped).abs() < 0.001, "parent {k} at wrong bearing");
            assert!(expected > last_angle);
            last_angle = expected;
        }
    }

    #[test]
    fn ring_radius_floors_at_260() {
        assert_eq!(parent_ring_radius(vec2(500.0, 400.0)), 260.0);
        assert_eq!(parent_ring_radius(vec2(1600.0, 1000.0)), 360.0);
    }

    #[test]
    fn single_child_sits_on_the_parent_bearing() {
        let canvas = vec2(1200.0, 800.0);
        let mut link = LinkGraph::empty("K0OPR");
        link.record_parent("W1ABC", None);
        link.record_child("W1ABC", "N1XYZ", None);

        let graph = build_render_graph(&link);
        let positions = radial_layout(&graph, canvas);
        let center = (canvas * 0.5).to_pos2();

        let parent_dir = (positions[1] - center).normalized();
        let child_offset = positions[2] - center;
        let r2 = child_arc_radius(parent_ring_radius(canvas), 1);
        assert!((child_offset.length() - r2).abs() < 0.01);
        assert!((child_offset.normalized() - parent_dir).length() < 0.001);
    }

    #[test]
    fn child_arc_widens_with_count_and_clamps() {
        assert!((child_arc_window(1) - 30.0f32.to_radians()).abs() < 1e-6);
        assert!((child_arc_window(6) - 60.0f32.to_radians()).abs() < 1e-6);
        assert!((child_arc_window(40) - 120.0f32.to_radians()).abs() < 1e-6);
        assert_eq!(child_arc_radius(300.0, 4), 464.0);
        assert_eq!(child_arc_radius(300.0, 50), 540.0);
    }

    #[test]
    fn children_span_their_window_evenly() {
        let canvas = vec2(1400.0, 1000.0);
        let mut link = LinkGraph::empty("K0OPR");
        link.record_parent("W1ABC", None);
        for k in 0..3 {
            link.record_child("W1ABC", &format!("C{k}AAA"), None);
        }

        let graph = build_render_graph(&link);
        let positions = radial_layout(&graph, canvas);
        let center = (canvas * 0.5).to_pos2();

        // Parent bearing is straight up; three children at -15, 0, +15 degrees
        // around it, all on the same outer radius.
        let window = child_arc_window(3);
        let r2 = child_arc_radius(parent_ring_radius(canvas), 3);
        for (j, index) in (2..5).enumerate() {
            let offset = positions[index] - center;
            assert!((offset.length() - r2).abs() < 0.01);
            let expected = -PI / 2.0 - window / 2.0 + (j as f32 / 2.0) * window;
            assert!((offset.y.atan2(offset.x) - expected).abs() < 0.001);
        }
    }
}
