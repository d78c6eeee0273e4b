use crate::automator::settings::LayoutConfig;
use crate::driver::driver::Rect;

pub fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Distance between the centers of two rectangles.
pub fn center_distance(a: &Rect, b: &Rect) -> f64 {
    distance(a.center(), b.center())
}

/// True when the two rectangles share some horizontal span (touching edges
/// count as overlap).
pub fn overlaps_horizontally(a: &Rect, b: &Rect) -> bool {
    !(b.x > a.right() || b.right() < a.x)
}

/// Cost of associating `input` with `label`; lower is better.
///
/// Base cost is the distance from the label's bottom-left corner to the
/// input's top-left corner. Inputs starting above the label, or sharing no
/// horizontal span with it, are penalized.
pub fn label_input_cost(label: &Rect, input: &Rect, layout: &LayoutConfig) -> f64 {
    let mut penalty = 0.0;
    if input.y < label.y - layout.above_tolerance {
        penalty += layout.above_penalty;
    }
    if !overlaps_horizontally(label, input) {
        penalty += layout.misaligned_penalty;
    }
    distance(label.bottom_left(), input.top_left()) + penalty
}

/// Index of the rectangle whose center is nearest `target`'s center. The
/// first one wins on ties.
pub fn nearest_index(target: &Rect, candidates: &[Rect]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, rect) in candidates.iter().enumerate() {
        let d = center_distance(target, rect);
        if best.is_none_or(|(_, b)| d < b) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}
