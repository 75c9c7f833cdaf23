use eframe::egui::{Rect, Vec2, pos2, vec2};

use crate::evo::Slot;

#[derive(Clone, Copy, Debug)]
pub struct CardMetrics {
    pub card_size: Vec2,
    pub column_gap: f32,
    pub row_gap: f32,
    pub margin: f32,
}

impl Default for CardMetrics {
    fn default() -> Self {
        Self {
            card_size: vec2(156.0, 82.0),
            column_gap: 18.0,
            row_gap: 64.0,
            margin: 16.0,
        }
    }
}

/// Card rectangles per level, relative to the top-left of the canvas.
#[derive(Clone, Debug, Default)]
pub struct TreeLayout {
    pub rows: Vec<Vec<Rect>>,
    pub size: Vec2,
}

impl TreeLayout {
    pub fn card(&self, slot: Slot) -> Option<Rect> {
        self.rows.get(slot.depth)?.get(slot.index).copied()
    }

    pub fn translated(&self, offset: Vec2) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|rect| rect.translate(offset)).collect())
                .collect(),
            size: self.size,
        }
    }
}

/// One row per level, cards centred within the content width. The content
/// grows past `available_width` when the widest row does not fit, so the
/// caller can scroll horizontally.
pub fn level_layout(levels: &[Vec<String>], available_width: f32, metrics: CardMetrics) -> TreeLayout {
    if levels.is_empty() {
        return TreeLayout {
            rows: Vec::new(),
            size: vec2(available_width.max(0.0), 0.0),
        };
    }

    let card = metrics.card_size;
    let row_width = |count: usize| {
        let count = count as f32;
        (count * card.x) + ((count - 1.0).max(0.0) * metrics.column_gap)
    };

    let widest = levels
        .iter()
        .map(|level| row_width(level.len()))
        .fold(0.0_f32, f32::max);
    let content_width = available_width.max(widest + (metrics.margin * 2.0));

    let rows = levels
        .iter()
        .enumerate()
        .map(|(depth, level)| {
            let y = metrics.margin + (depth as f32 * (card.y + metrics.row_gap));
            let start_x = (content_width - row_width(level.len())) / 2.0;
            (0..level.len())
                .map(|index| {
                    let x = start_x + (index as f32 * (card.x + metrics.column_gap));
                    Rect::from_min_size(pos2(x, y), card)
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    let depth_count = levels.len() as f32;
    let height = (metrics.margin * 2.0)
        + (depth_count * card.y)
        + ((depth_count - 1.0) * metrics.row_gap);

    TreeLayout {
        rows,
        size: vec2(content_width, height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(widths: &[usize]) -> Vec<Vec<String>> {
        widths
            .iter()
            .map(|&width| (0..width).map(|index| format!("n{index}")).collect())
            .collect()
    }

    #[test]
    fn rows_are_centred_when_they_fit() {
        let metrics = CardMetrics::default();
        let layout = level_layout(&levels(&[1, 2]), 800.0, metrics);

        assert_eq!(layout.size.x, 800.0);
        let root = layout.card(Slot { depth: 0, index: 0 }).unwrap();
        assert!((root.center().x - 400.0).abs() < 0.01);

        let left = layout.card(Slot { depth: 1, index: 0 }).unwrap();
        let right = layout.card(Slot { depth: 1, index: 1 }).unwrap();
        assert!(((left.center().x + right.center().x) / 2.0 - 400.0).abs() < 0.01);
        assert!(left.top() > root.bottom());
    }

    #[test]
    fn wide_rows_grow_the_content() {
        let metrics = CardMetrics::default();
        let layout = level_layout(&levels(&[1, 10]), 300.0, metrics);

        let first = layout.card(Slot { depth: 1, index: 0 }).unwrap();
        assert!((first.left() - metrics.margin).abs() < 0.01);
        assert!(layout.size.x > 300.0);
        assert!(layout.card(Slot { depth: 1, index: 10 }).is_none());
    }

    #[test]
    fn height_covers_every_row() {
        let metrics = CardMetrics::default();
        let layout = level_layout(&levels(&[1, 1, 1]), 500.0, metrics);
        let last = layout.card(Slot { depth: 2, index: 0 }).unwrap();

        assert!((layout.size.y - (last.bottom() + metrics.margin)).abs() < 0.01);
        assert_eq!(level_layout(&[], 500.0, metrics).size.y, 0.0);
    }
}
