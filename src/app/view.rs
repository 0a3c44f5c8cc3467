use std::collections::HashSet;

use eframe::egui::{
    Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, pos2, vec2,
};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::scene::{NodeRole, build_scene};
use crate::util::format_snr;

use super::ViewModel;

const LABEL_FONT_SIZE: f32 = 12.0;

fn role_color(role: NodeRole) -> Color32 {
    match role {
        NodeRole::Center => Color32::from_rgb(245, 206, 93),
        NodeRole::Parent => Color32::from_rgb(106, 198, 255),
        NodeRole::Child => Color32::from_rgb(241, 146, 94),
    }
}

fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        color.a(),
    )
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));

        let canvas = rect.size();
        if self.scene.is_none() || self.scene_canvas != canvas {
            let graph = &self.graph;
            let scene = ui.fonts_mut(|fonts| {
                build_scene(graph, canvas, |text| {
                    fonts
                        .layout_no_wrap(
                            text.to_owned(),
                            FontId::proportional(LABEL_FONT_SIZE),
                            Color32::WHITE,
                        )
                        .size()
                })
            });
            self.scene_canvas = canvas;
            self.scene = Some(scene);
        }

        let Some(scene) = self.scene.as_ref() else {
            return;
        };
        let offset = rect.min.to_vec2();

        let search_query = self.search.trim();
        let matches: Option<HashSet<usize>> = if search_query.is_empty() {
            None
        } else {
            let matcher = SkimMatcherV2::default();
            Some(
                scene
                    .graph
                    .nodes
                    .iter()
                    .enumerate()
                    .filter_map(|(index, node)| {
                        fuzzy_match_score(&matcher, &node.call, search_query).map(|_| index)
                    })
                    .collect(),
            )
        };

        let hovered = response.hover_pos().and_then(|pointer| {
            scene
                .positions
                .iter()
                .enumerate()
                .filter(|(_, position)| {
                    (**position + offset - pointer).length() <= scene.glyph_radius + 4.0
                })
                .min_by(|(_, a), (_, b)| {
                    let da = (**a + offset - pointer).length();
                    let db = (**b + offset - pointer).length();
                    da.total_cmp(&db)
                })
                .map(|(index, _)| index)
        });

        for (path, &(src, dst)) in scene.edge_paths.iter().zip(&scene.graph.edges) {
            let highlighted = hovered.is_some_and(|index| index == src || index == dst);
            let stroke = if highlighted {
                Stroke::new(2.2, Color32::from_rgb(246, 206, 104))
            } else {
                Stroke::new(1.2, Color32::from_rgba_unmultiplied(110, 118, 128, 200))
            };
            for pair in path.windows(2) {
                painter.line_segment([pair[0] + offset, pair[1] + offset], stroke);
            }
        }

        for (index, node) in scene.graph.nodes.iter().enumerate() {
            let position = scene.positions[index] + offset;
            let is_hovered = hovered == Some(index);
            let is_match = matches.as_ref().is_some_and(|set| set.contains(&index));

            let mut color = role_color(node.role);
            if matches.is_some() && !is_match {
                color = dim_color(color, 0.35);
            }
            if is_hovered {
                color = Color32::from_rgb(255, 164, 101);
            }

            painter.add(Shape::convex_polygon(
                glyph_triangle(position, scene.glyph_radius),
                color,
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190)),
            ));

            let label_box = scene.label_boxes[index].translate(offset);
            painter.rect_filled(
                label_box,
                3.0,
                Color32::from_rgba_unmultiplied(25, 30, 38, 185),
            );
            let text_color = if matches.is_some() && !is_match {
                Color32::from_gray(130)
            } else {
                Color32::from_gray(238)
            };
            painter.text(
                label_box.center_top() + vec2(0.0, 3.0),
                Align2::CENTER_TOP,
                &node.label,
                FontId::proportional(LABEL_FONT_SIZE),
                text_color,
            );
        }

        if let Some(index) = hovered {
            let node = &scene.graph.nodes[index];
            let role = match node.role {
                NodeRole::Center => "operator",
                NodeRole::Parent => "heard directly",
                NodeRole::Child => "relayed",
            };
            let info = match node.snr {
                Some(snr) => format!("{}  |  {role}  |  {}", node.call, format_snr(snr)),
                None => format!("{}  |  {role}", node.call),
            };
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                info,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }
    }
}

fn glyph_triangle(position: Pos2, radius: f32) -> Vec<Pos2> {
    vec![
        pos2(position.x, position.y - radius),
        pos2(position.x + radius * 0.866, position.y + radius * 0.5),
        pos2(position.x - radius * 0.866, position.y + radius * 0.5),
    ]
}
