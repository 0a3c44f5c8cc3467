use super::model::LinkGraph;
use crate::util::{normalize_callsign, round_snr};

/// Parse a raw beacon log into a heard-graph fragment.
///
/// Two line shapes are recognized: a direct-hear line (`.. <CALL> 5.2 dB`)
/// that also becomes the current parent context, and a relayed-hear line
/// (`/ CALL -3 dB`) attributed to the most recent parent. Everything else is
/// noise and skipped; a relayed line before any parent line is discarded.
pub fn parse_beacon_log(text: &str, mycall: &str) -> LinkGraph {
    let mut graph = LinkGraph::empty(mycall);
    let mut current_parent: Option<String> = None;

    for line in text.lines() {
        if let Some((call, snr)) = parse_parent_line(line) {
            graph.record_parent(&call, snr);
            current_parent = Some(call);
        } else if let Some((call, snr)) = parse_child_line(line)
            && let Some(parent) = &current_parent
        {
            graph.record_child(parent, &call, snr);
        }
    }

    graph
}

fn parse_parent_line(line: &str) -> Option<(String, Option<f32>)> {
    let rest = line.trim().strip_prefix("..")?.trim_start();
    let rest = rest.strip_prefix('<')?;
    let (raw_call, rest) = rest.split_once('>')?;

    let call = normalize_callsign(raw_call);
    if call.is_empty() {
        return None;
    }
    Some((call, parse_snr(rest)))
}

fn parse_child_line(line: &str) -> Option<(String, Option<f32>)> {
    let rest = line.trim().strip_prefix('/')?.trim_start();
    let (raw_call, rest) = rest
        .split_once(char::is_whitespace)
        .unwrap_or((rest, ""));

    let call = normalize_callsign(raw_call);
    if call.is_empty() {
        return None;
    }
    Some((call, parse_snr(rest)))
}

/// A reading is the first token after the callsign, with an optional `dB`
/// suffix. Unparseable readings are swallowed; the hear is still recorded.
fn parse_snr(rest: &str) -> Option<f32> {
    let token = rest.split_whitespace().next()?;
    let token = token.strip_suffix("dB").unwrap_or(token);
    token.parse::<f32>().ok().map(round_snr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_parent_then_child() {
        let graph = parse_beacon_log(".. <W1ABC> 5.2 dB\n/ N1XYZ -3 dB\n", "K0OPR");

        assert_eq!(graph.mycall, "K0OPR");
        let parent = &graph.heard["W1ABC"];
        assert_eq!(parent.snr, Some(5.2));
        assert_eq!(parent.children.len(), 1);
        assert_eq!(parent.children["N1XYZ"].snr, Some(-3.0));
    }

    #[test]
    fn child_attaches_to_most_recent_parent() {
        let log = ".. <W1ABC>\n/ N1AAA 1 dB\n.. <K2DEF> 0.5\n/ N1BBB\n";
        let graph = parse_beacon_log(log, "K0OPR");

        assert!(graph.heard["W1ABC"].children.contains_key("N1AAA"));
        assert!(graph.heard["K2DEF"].children.contains_key("N1BBB"));
        assert!(!graph.heard["W1ABC"].children.contains_key("N1BBB"));
    }

    #[test]
    fn orphan_child_lines_are_discarded() {
        let graph = parse_beacon_log("/ N1XYZ 4 dB\n.. <W1ABC>\n", "K0OPR");
        assert_eq!(graph.child_count(), 0);
        assert!(graph.heard.contains_key("W1ABC"));
    }

    #[test]
    fn noise_lines_are_skipped() {
        let log = "radio online\n*** connected\n.. <W1ABC> 5.2 dB\n# comment\n";
        let graph = parse_beacon_log(log, "K0OPR");
        assert_eq!(graph.parent_count(), 1);
    }

    #[test]
    fn bad_reading_still_records_the_hear() {
        let graph = parse_beacon_log(".. <W1ABC> garbled\n/ N1XYZ ???\n", "K0OPR");

        let parent = &graph.heard["W1ABC"];
        assert_eq!(parent.snr, None);
        assert_eq!(parent.children["N1XYZ"].snr, None);
    }

    #[test]
    fn readings_accept_attached_db_suffix_and_round() {
        let graph = parse_beacon_log(".. <W1ABC> 5.24dB\n", "K0OPR");
        assert_eq!(graph.heard["W1ABC"].snr, Some(5.2));
    }

    #[test]
    fn callsigns_are_normalized() {
        let graph = parse_beacon_log(".. <w1abc-7.>\n/ n1xyz, 2 dB\n", "k0opr");

        assert_eq!(graph.mycall, "K0OPR");
        let parent = &graph.heard["W1ABC-7"];
        assert!(parent.children.contains_key("N1XYZ"));
    }

    #[test]
    fn repeated_hears_keep_the_maximum_reading() {
        let log = ".. <W1ABC> 2.0 dB\n/ N1XYZ 1.0\n.. <W1ABC> 6.5 dB\n/ N1XYZ -2.0\n";
        let graph = parse_beacon_log(log, "K0OPR");

        let parent = &graph.heard["W1ABC"];
        assert_eq!(parent.snr, Some(6.5));
        assert_eq!(parent.children["N1XYZ"].snr, Some(1.0));
    }
}
