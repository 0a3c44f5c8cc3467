mod merge;
mod model;
mod parse;
mod store;

pub use model::LinkGraph;
pub use parse::parse_beacon_log;
pub use store::{UpdateMode, load_graph, update_graph_file};
