use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use eframe::egui::{self, Context, Vec2};

use crate::graph::{LinkGraph, load_graph};
use crate::scene::Scene;

mod panels;
mod view;

pub struct HeardMapApp {
    graph_path: PathBuf,
    mycall: String,
    state: AppState,
    reload_rx: Option<Receiver<LinkGraph>>,
}

enum AppState {
    Loading { rx: Receiver<LinkGraph> },
    Ready(Box<ViewModel>),
}

struct ViewModel {
    graph: LinkGraph,
    scene: Option<Scene>,
    scene_canvas: Vec2,
    search: String,
    auto_reload: bool,
    reload_interval_secs: f32,
    last_reload: Instant,
}

impl HeardMapApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, graph_path: PathBuf, mycall: String) -> Self {
        let rx = Self::spawn_load(graph_path.clone(), mycall.clone());
        Self {
            graph_path,
            mycall,
            state: AppState::Loading { rx },
            reload_rx: None,
        }
    }

    // The loader thread only ever delivers a parsed graph over the channel;
    // graph and layout state are owned by the UI thread alone.
    fn spawn_load(path: PathBuf, mycall: String) -> Receiver<LinkGraph> {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(load_graph(&path, &mycall));
        });
        rx
    }
}

impl eframe::App for HeardMapApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(graph) => {
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(graph))));
                    }
                    Err(TryRecvError::Disconnected) => {
                        let empty = LinkGraph::empty(&self.mycall);
                        transition = Some(AppState::Ready(Box::new(ViewModel::new(empty))));
                    }
                    Err(TryRecvError::Empty) => {}
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading heard graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint_after(Duration::from_millis(50));
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.graph_path, &mut reload_requested, is_reloading);

                if model.auto_reload_due() && self.reload_rx.is_none() {
                    reload_requested = true;
                }

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx =
                        Some(Self::spawn_load(self.graph_path.clone(), self.mycall.clone()));
                    model.mark_reload_started();
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(graph) => model.replace_graph(graph),
                        Err(TryRecvError::Empty) => self.reload_rx = Some(rx),
                        Err(TryRecvError::Disconnected) => {}
                    }
                }

                if model.auto_reload || self.reload_rx.is_some() {
                    ctx.request_repaint_after(Duration::from_millis(500));
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
