use std::path::Path;
use std::time::Instant;

use eframe::egui::{self, Align, Context, Layout, RichText, Ui, Vec2};

use crate::graph::LinkGraph;
use crate::util::format_snr;

use super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(graph: LinkGraph) -> Self {
        Self {
            graph,
            scene: None,
            scene_canvas: Vec2::ZERO,
            search: String::new(),
            auto_reload: false,
            reload_interval_secs: 10.0,
            last_reload: Instant::now(),
        }
    }

    pub(in crate::app) fn replace_graph(&mut self, graph: LinkGraph) {
        self.graph = graph;
        // Layout state is discarded wholesale; the next frame recomputes it.
        self.scene = None;
    }

    pub(in crate::app) fn auto_reload_due(&self) -> bool {
        self.auto_reload && self.last_reload.elapsed().as_secs_f32() >= self.reload_interval_secs
    }

    pub(in crate::app) fn mark_reload_started(&mut self) {
        self.last_reload = Instant::now();
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        graph_path: &Path,
        reload_requested: &mut bool,
        is_reloading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("heardmap");
                    ui.separator();
                    ui.label(format!("mycall: {}", self.graph.mycall));
                    ui.label(format!("file: {}", graph_path.display()));
                    ui.label(format!("heard: {}", self.graph.parent_count()));
                    ui.label(format!("relayed: {}", self.graph.child_count()));
                    let reload_button = ui.add_enabled(!is_reloading, egui::Button::new("Reload"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if is_reloading {
                            ui.spinner();
                        }
                    });
                });
            });

        egui::SidePanel::left("stations")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.draw_station_panel(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));
    }

    fn draw_station_panel(&mut self, ui: &mut Ui) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label("Search:");
            ui.text_edit_singleline(&mut self.search);
        });
        ui.checkbox(&mut self.auto_reload, "Auto-reload");
        if self.auto_reload {
            ui.add(
                egui::Slider::new(&mut self.reload_interval_secs, 2.0..=60.0).text("interval (s)"),
            );
        }
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            if self.graph.heard.is_empty() {
                ui.label("No stations heard yet.");
                return;
            }

            for (call, entry) in &self.graph.heard {
                let heading = match entry.snr {
                    Some(snr) => format!("{call}  {}", format_snr(snr)),
                    None => call.clone(),
                };
                ui.label(RichText::new(heading).strong());

                for (child_call, child) in &entry.children {
                    let line = match child.snr {
                        Some(snr) => format!("    {child_call}  {}", format_snr(snr)),
                        None => format!("    {child_call}"),
                    };
                    ui.label(line);
                }
            }
        });
    }
}
