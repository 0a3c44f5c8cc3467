use super::model::{LinkGraph, max_snr};

/// Combine a previously persisted graph with freshly parsed data.
///
/// Parents are unioned, child sets are unioned, and every SNR is the max of
/// the two sides, so merging is idempotent and insensitive to the order in
/// which logs arrive. `mycall` in the result is always the current operator
/// callsign, regardless of what either input carries.
pub fn merge_graphs(existing: &LinkGraph, incoming: &LinkGraph, mycall: &str) -> LinkGraph {
    let mut merged = existing.clone();
    merged.mycall = mycall.to_ascii_uppercase();

    for (call, entry) in &incoming.heard {
        let parent = merged.heard.entry(call.clone()).or_default();
        parent.snr = max_snr(parent.snr, entry.snr);

        for (child_call, child) in &entry.children {
            let slot = parent.children.entry(child_call.clone()).or_default();
            slot.snr = max_snr(slot.snr, child.snr);
        }
    }

    merged
}
