use eframe::egui::{Pos2, Rect, vec2};

const TRIM_MARGIN: f32 = 2.0;
const BEND_OFFSETS: [f32; 5] = [30.0, 60.0, 90.0, 120.0, 160.0];

/// Route one edge between two node centers as a polyline that stops at the
/// glyph borders and, where possible, stays out of every label box other
/// than its own endpoints'.
///
/// The straight trimmed segment wins when it is clear. Otherwise a single
/// bend is tried at the midpoint, offset perpendicular to the segment by
/// growing amounts in both directions; the first offset whose two
/// sub-segments are both clear is taken. When none is, the straight segment
/// is drawn anyway — bounded search, accepted visual defect.
pub fn route_edge(
    src: Pos2,
    dst: Pos2,
    glyph_radius: f32,
    label_boxes: &[Rect],
    src_index: usize,
    dst_index: usize,
) -> Vec<Pos2> {
    let delta = dst - src;
    let length = delta.length();
    let trim = glyph_radius + TRIM_MARGIN;
    if length <= trim * 2.0 + 1.0 {
        // Glyphs practically touching; nothing sensible to trim.
        return vec![src, dst];
    }

    let direction = delta / length;
    let start = src + direction * trim;
    let end = dst - direction * trim;

    let blocked = |a: Pos2, b: Pos2| {
        label_boxes.iter().enumerate().any(|(index, rect)| {
            index != src_index && index != dst_index && segment_hits_rect(a, b, *rect)
        })
    };

    if !blocked(start, end) {
        return vec![start, end];
    }

    let mid = start + (end - start) * 0.5;
    let perpendicular = vec2(-direction.y, direction.x);
    for offset in BEND_OFFSETS {
        for sign in [1.0, -1.0] {
            let bend = mid + perpendicular * (offset * sign);
            if !blocked(start, bend) && !blocked(bend, end) {
                return vec![start, bend, end];
            }
        }
    }

    vec![start, end]
}

/// A segment hits a box when either endpoint lies inside it or it properly
/// crosses one of the four box edges.
pub fn segment_hits_rect(a: Pos2, b: Pos2, rect: Rect) -> bool {
    if rect.contains(a) || rect.contains(b) {
        return true;
    }

    let corners = [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ];
    (0..4).any(|i| segments_intersect(a, b, corners[i], corners[(i + 1) % 4]))
}

fn segments_intersect(a1: Pos2, a2: Pos2, b1: Pos2, b2: Pos2) -> bool {
    fn cross(o: Pos2, a: Pos2, b: Pos2) -> f32 {
        let oa = a - o;
        let ob = b - o;
        (oa.x * ob.y) - (oa.y * ob.x)
    }

    if a1.x.max(a2.x) < b1.x.min(b2.x)
        || b1.x.max(b2.x) < a1.x.min(a2.x)
        || a1.y.max(a2.y) < b1.y.min(b2.y)
        || b1.y.max(b2.y) < a1.y.min(a2.y)
    {
        return false;
    }

    let c1 = cross(a1, a2, b1);
    let c2 = cross(a1, a2, b2);
    let c3 = cross(b1, b2, a1);
    let c4 = cross(b1, b2, a2);

    (c1 <= 0.0 && c2 >= 0.0 || c1 >= 0.0 && c2 <= 0.0)
        && (c3 <= 0.0 && c4 >= 0.0 || c3 >= 0.0 && c4 <= 0.0)
}
