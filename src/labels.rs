use eframe::egui::{Pos2, Rect, Vec2, vec2};

const PAD_X: f32 = 6.0;
const PAD_Y: f32 = 3.0;
const LABEL_GAP: f32 = 4.0;
const MAX_PASSES: usize = 36;
const RADIAL_NUDGE: f32 = 2.0;

/// Compute one text box per node, anchored below its glyph, then relax
/// overlaps: each colliding pair is pushed apart vertically and nudged
/// slightly outward from the canvas center. Bounded to a fixed pass count;
/// a dense pathological cluster may keep residual overlap, which is an
/// accepted approximation. Node positions never move, only the boxes.
pub fn place_labels(
    positions: &[Pos2],
    labels: &[&str],
    center: Pos2,
    glyph_radius: f32,
    mut measure: impl FnMut(&str) -> Vec2,
) -> Vec<Rect> {
    let mut boxes = positions
        .iter()
        .zip(labels)
        .map(|(&position, text)| {
            let size = measure(text) + vec2(PAD_X * 2.0, PAD_Y * 2.0);
            let top_center = Pos2::new(position.x, position.y + glyph_radius + LABEL_GAP);
            Rect::from_min_size(top_center - vec2(size.x / 2.0, 0.0), size)
        })
        .collect::<Vec<_>>();

    for _ in 0..MAX_PASSES {
        let mut clean = true;

        for i in 0..boxes.len() {
            for j in (i + 1)..boxes.len() {
                if !boxes[i].intersects(boxes[j]) {
                    continue;
                }
                clean = false;

                let overlap_y = (boxes[i].bottom().min(boxes[j].bottom())
                    - boxes[i].top().max(boxes[j].top()))
                .max(0.0);
                let push = overlap_y / 2.0 + 1.0;
                let (upper, lower) = if boxes[i].center().y <= boxes[j].center().y {
                    (i, j)
                } else {
                    (j, i)
                };
                boxes[upper] = boxes[upper].translate(vec2(0.0, -push));
                boxes[lower] = boxes[lower].translate(vec2(0.0, push));

                for index in [i, j] {
                    let away = boxes[index].center() - center;
                    let length = away.length();
                    if length > 1.0 {
                        boxes[index] = boxes[index].translate(away / length * RADIAL_NUDGE);
                    }
                }
            }
        }

        if clean {
            break;
        }
    }

    boxes
}

#[cfg(test)]
mod tests {
    use eframe::egui::pos2;

    use super::*;
    use crate::graph::LinkGraph;
    use crate::layout::radial_layout;
    use crate::scene::build_render_graph;

    fn fake_measure(text: &str) -> Vec2 {
        let widest = text.lines().map(str::len).max().unwrap_or(0);
        vec2(widest as f32 * 8.0, text.lines().count() as f32 * 14.0)
    }

    fn overlap_count(boxes: &[Rect]) -> usize {
        let mut count = 0;
        for i in 0..boxes.len() {
            for j in (i + 1)..boxes.len() {
                if boxes[i].intersects(boxes[j]) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn boxes_hang_below_their_glyphs() {
        let positions = [pos2(600.0, 400.0)];
        let boxes = place_labels(&positions, &["W1ABC"], pos2(600.0, 400.0), 9.0, fake_measure);

        assert_eq!(boxes.len(), 1);
        assert!((boxes[0].center().x - 600.0).abs() < 0.01);
        assert!(boxes[0].top() >= 400.0 + 9.0);
    }

    #[test]
    fn crowded_pair_separates_within_pass_budget() {
        let positions = [pos2(400.0, 300.0), pos2(406.0, 303.0)];
        let boxes = place_labels(
            &positions,
            &["W1ABC", "K2DEF"],
            pos2(600.0, 400.0),
            9.0,
            fake_measure,
        );
        assert_eq!(overlap_count(&boxes), 0);
    }

    #[test]
    fn twenty_node_layout_has_no_label_overlaps() {
        let canvas = vec2(1200.0, 800.0);
        let mut link = LinkGraph::empty("K0OPR");
        for k in 0..6 {
            let parent = format!("P{k}AAA");
            link.record_parent(&parent, Some(k as f32));
            link.record_child(&parent, &format!("C{k}AAA"), None);
            link.record_child(&parent, &format!("D{k}BBB"), Some(-1.5));
        }

        let graph = build_render_graph(&link);
        assert!(graph.nodes.len() <= 20);

        let positions = radial_layout(&graph, canvas);
        let labels = graph
            .nodes
            .iter()
            .map(|node| node.label.as_str())
            .collect::<Vec<_>>();
        let boxes = place_labels(
            &positions,
            &labels,
            (canvas * 0.5).to_pos2(),
            9.0,
            fake_measure,
        );
        assert_eq!(overlap_count(&boxes), 0);
    }
}
