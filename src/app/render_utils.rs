use eframe::egui::{Color32, Pos2, Rect, Stroke, epaint::CubicBezierShape, vec2};

pub(super) const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(19, 23, 29);
pub(super) const CARD_FILL: Color32 = Color32::from_rgb(38, 44, 54);
pub(super) const COMPLETED_FILL: Color32 = Color32::from_rgb(46, 104, 72);
pub(super) const EXPANDED_OUTLINE: Color32 = Color32::from_rgb(103, 196, 255);
pub(super) const SELECTED_OUTLINE: Color32 = Color32::from_rgb(245, 206, 93);
pub(super) const BRANCH_COLOR: Color32 = Color32::from_rgb(120, 132, 148);

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn card_fill(completed: bool, hovered: bool) -> Color32 {
    let base = if completed { COMPLETED_FILL } else { CARD_FILL };
    if hovered {
        blend_color(base, Color32::WHITE, 0.12)
    } else {
        base
    }
}

pub(super) fn card_outline(selected: bool, expanded: bool) -> Stroke {
    if selected {
        Stroke::new(2.2, SELECTED_OUTLINE)
    } else if expanded {
        Stroke::new(1.6, EXPANDED_OUTLINE)
    } else {
        Stroke::new(1.0, Color32::from_rgba_unmultiplied(15, 15, 15, 190))
    }
}

/// Control points of the curve from the bottom of `parent` to the top of
/// `child`.
pub(super) fn link_points(parent: Rect, child: Rect) -> [Pos2; 4] {
    let start = parent.center_bottom();
    let end = child.center_top();
    let bend = ((end.y - start.y) * 0.6).clamp(12.0, 40.0);

    [start, start + vec2(0.0, bend), end - vec2(0.0, bend), end]
}

pub(super) fn link_shape(parent: Rect, child: Rect) -> CubicBezierShape {
    CubicBezierShape::from_points_stroke(
        link_points(parent, child),
        false,
        Color32::TRANSPARENT,
        Stroke::new(2.0, BRANCH_COLOR),
    )
}
