use eframe::egui::{Pos2, Rect, Vec2};

use crate::graph::LinkGraph;
use crate::labels::place_labels;
use crate::layout::radial_layout;
use crate::route::route_edge;
use crate::util::format_snr;

/// Radius of the triangular node marker on the canvas.
pub const GLYPH_RADIUS: f32 = 9.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
    Center,
    Parent,
    Child,
}

#[derive(Clone, Debug)]
pub struct RenderNode {
    pub call: String,
    pub label: String,
    pub role: NodeRole,
    pub snr: Option<f32>,
}

/// View-only tree derived from a [`LinkGraph`], rebuilt on every layout
/// pass. Node 0 is the center; each parent and each child gets its own node,
/// so a callsign heard both directly and through someone else appears twice.
/// That duplication is the intended tree semantics, not missing dedup.
#[derive(Clone, Debug, Default)]
pub struct RenderGraph {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<(usize, usize)>,
}

pub fn build_render_graph(graph: &LinkGraph) -> RenderGraph {
    let mut nodes = vec![RenderNode {
        call: graph.mycall.clone(),
        label: graph.mycall.clone(),
        role: NodeRole::Center,
        snr: None,
    }];
    let mut edges = Vec::new();

    for (call, entry) in &graph.heard {
        let parent_index = nodes.len();
        nodes.push(RenderNode {
            call: call.clone(),
            label: node_label(call, entry.snr),
            role: NodeRole::Parent,
            snr: entry.snr,
        });
        edges.push((0, parent_index));

        for (child_call, child) in &entry.children {
            let child_index = nodes.len();
            nodes.push(RenderNode {
                call: child_call.clone(),
                label: node_label(child_call, child.snr),
                role: NodeRole::Child,
                snr: child.snr,
            });
            edges.push((parent_index, child_index));
        }
    }

    RenderGraph { nodes, edges }
}

fn node_label(call: &str, snr: Option<f32>) -> String {
    match snr {
        Some(snr) => format!("{call}\n{}", format_snr(snr)),
        None => call.to_owned(),
    }
}

/// Everything the renderer needs for one redraw: coordinates, placed label
/// boxes, and routed edge polylines, all in canvas space.
pub struct Scene {
    pub graph: RenderGraph,
    pub positions: Vec<Pos2>,
    pub label_boxes: Vec<Rect>,
    pub edge_paths: Vec<Vec<Pos2>>,
    pub glyph_radius: f32,
}

pub fn build_scene(link: &LinkGraph, canvas: Vec2, measure: impl FnMut(&str) -> Vec2) -> Scene {
    let graph = build_render_graph(link);
    let positions = radial_layout(&graph, canvas);
    let center = (canvas * 0.5).to_pos2();

    let labels = graph
        .nodes
        .iter()
        .map(|node| node.label.as_str())
        .collect::<Vec<_>>();
    let label_boxes = place_labels(&positions, &labels, center, GLYPH_RADIUS, measure);

    let edge_paths = graph
        .edges
        .iter()
        .map(|&(src, dst)| {
            route_edge(
                positions[src],
                positions[dst],
                GLYPH_RADIUS,
                &label_boxes,
                src,
                dst,
            )
        })
        .collect();

    Scene {
        graph,
        positions,
        label_boxes,
        edge_paths,
        glyph_radius: GLYPH_RADIUS,
    }
}
