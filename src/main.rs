mod app;
mod graph;
mod labels;
mod layout;
mod route;
mod scene;
mod util;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use graph::UpdateMode;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Operator callsign placed at the center of the graph.
    #[arg(long)]
    mycall: String,

    /// Beacon log to parse into the heard graph.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Persisted heard-graph JSON document.
    #[arg(long, default_value = "heard_graph.json")]
    output: PathBuf,

    /// How a parsed log combines with an existing output file.
    #[arg(long, value_enum, default_value_t = UpdateMode::Append)]
    mode: UpdateMode,

    /// Open the viewer after updating the graph file.
    #[arg(long)]
    view: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mycall = util::normalize_callsign(&args.mycall);

    let open_viewer = match &args.input {
        Some(input) => {
            let written = graph::update_graph_file(input, &args.output, &mycall, args.mode)?;
            println!(
                "{}: {} stations heard, {} relayed",
                args.output.display(),
                written.parent_count(),
                written.child_count()
            );
            args.view
        }
        None => true,
    };

    if open_viewer {
        let options = eframe::NativeOptions {
            viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
            ..Default::default()
        };
        let output = args.output.clone();
        eframe::run_native(
            "heardmap",
            options,
            Box::new(move |cc| Ok(Box::new(app::HeardMapApp::new(cc, output, mycall)))),
        )
        .map_err(|error| anyhow!("viewer failed: {error}"))?;
    }

    Ok(())
}
