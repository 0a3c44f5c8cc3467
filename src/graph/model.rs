use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A station heard by one of the directly-heard parents, two hops out.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ChildEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snr: Option<f32>,
}

/// A station heard directly by the operator. `snr` stays absent when the
/// parent line carried no numeric reading; `children` is always a mapping,
/// possibly empty, so the on-disk shape never implies it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ParentEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snr: Option<f32>,
    #[serde(default)]
    pub children: BTreeMap<String, ChildEntry>,
}

/// The canonical persisted heard graph: the operator at the center, the
/// stations heard directly, and the stations those stations heard.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkGraph {
    #[serde(default)]
    pub mycall: String,
    #[serde(default)]
    pub heard: BTreeMap<String, ParentEntry>,
}

impl LinkGraph {
    pub fn empty(mycall: &str) -> Self {
        Self {
            mycall: mycall.to_ascii_uppercase(),
            heard: BTreeMap::new(),
        }
    }

    /// Record a direct hear of `call`, keeping the best SNR seen so far.
    pub fn record_parent(&mut self, call: &str, snr: Option<f32>) {
        let entry = self.heard.entry(call.to_owned()).or_default();
        entry.snr = max_snr(entry.snr, snr);
    }

    /// Record that `parent` heard `call`, keeping the best SNR for the pair.
    pub fn record_child(&mut self, parent: &str, call: &str, snr: Option<f32>) {
        let parent = self.heard.entry(parent.to_owned()).or_default();
        let child = parent.children.entry(call.to_owned()).or_default();
        child.snr = max_snr(child.snr, snr);
    }

    pub fn parent_count(&self) -> usize {
        self.heard.len()
    }

    pub fn child_count(&self) -> usize {
        self.heard.values().map(|entry| entry.children.len()).sum()
    }
}

/// SNR values only ever ratchet upward; absent behaves as negative infinity.
pub(crate) fn max_snr(a: Option<f32>, b: Option<f32>) -> Option<f32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.max(b)),
        (Some(a), None) => Some(a),
        (None, b) => b,
    }
}
