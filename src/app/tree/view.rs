use eframe::egui::{self, Align, Align2, Color32, FontId, Sense, StrokeKind, Ui, vec2};

use crate::evo::Slot;
use crate::layout::level_layout;
use crate::util::truncate_label;

use super::super::render_utils::{CANVAS_BACKGROUND, card_fill, card_outline, link_shape};
use super::super::{CardGesture, ViewModel};

const CARD_ROUNDING: f32 = 8.0;

impl ViewModel {
    pub(in crate::app) fn draw_tree(&mut self, ui: &mut Ui) {
        self.refresh_levels();

        if self.assignment.depth_count() == 0 {
            ui.vertical_centered(|ui| {
                ui.add_space(120.0);
                ui.label("Nothing to show: every creature in the dataset has a parent.");
            });
            return;
        }

        let mut gesture = None;

        egui::ScrollArea::both()
            .id_salt("tree_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let layout = level_layout(
                    self.assignment.levels(),
                    ui.available_width(),
                    self.metrics,
                );
                let (canvas, _) = ui.allocate_exact_size(layout.size, Sense::hover());
                let layout = layout.translated(canvas.min.to_vec2());
                let painter = ui.painter_at(canvas);

                painter.rect_filled(canvas, 0.0, CANVAS_BACKGROUND);

                for link in &self.links {
                    if let (Some(parent), Some(child)) =
                        (layout.card(link.parent), layout.card(link.child))
                    {
                        painter.add(link_shape(parent, child));
                    }
                }

                let focus_slot = self
                    .pending_focus
                    .as_deref()
                    .and_then(|id| self.assignment.anchor_slot(id));

                for (depth, level) in self.assignment.levels().iter().enumerate() {
                    for (index, id) in level.iter().enumerate() {
                        let slot = Slot { depth, index };
                        let Some(rect) = layout.card(slot) else {
                            continue;
                        };
                        let Some(creature) = self.graph.get(id) else {
                            continue;
                        };

                        let response = ui.interact(
                            rect,
                            ui.make_persistent_id(("card", depth, index)),
                            Sense::click(),
                        );

                        let completed = self.progress.is_complete(id);
                        let expanded = self.expansion.is_expanded(id)
                            && self.assignment.anchor_depth(id) == Some(depth);
                        let selected = self.selected.as_deref() == Some(id.as_str());

                        painter.rect_filled(
                            rect,
                            CARD_ROUNDING,
                            card_fill(completed, response.hovered()),
                        );
                        painter.rect_stroke(
                            rect,
                            CARD_ROUNDING,
                            card_outline(selected, expanded),
                            StrokeKind::Inside,
                        );

                        let inner = rect.shrink2(vec2(8.0, 6.0));
                        painter.text(
                            inner.left_top(),
                            Align2::LEFT_TOP,
                            truncate_label(&creature.name, 18),
                            FontId::proportional(15.0),
                            Color32::from_gray(240),
                        );
                        painter.text(
                            inner.left_top() + vec2(0.0, 22.0),
                            Align2::LEFT_TOP,
                            creature.stage.label(),
                            FontId::proportional(12.0),
                            Color32::from_gray(180),
                        );
                        if let Some(method) = creature.methods.first() {
                            painter.text(
                                inner.left_top() + vec2(0.0, 40.0),
                                Align2::LEFT_TOP,
                                truncate_label(method, 22),
                                FontId::proportional(11.0),
                                Color32::from_gray(150),
                            );
                        }
                        if creature.has_evolutions() {
                            let marker = if expanded { "▾" } else { "▸" };
                            painter.text(
                                inner.right_bottom(),
                                Align2::RIGHT_BOTTOM,
                                marker,
                                FontId::proportional(14.0),
                                Color32::from_gray(210),
                            );
                        }
                        if completed {
                            painter.text(
                                inner.right_top(),
                                Align2::RIGHT_TOP,
                                "✔",
                                FontId::proportional(13.0),
                                Color32::from_rgb(170, 240, 190),
                            );
                        }

                        if focus_slot == Some(slot) {
                            response.scroll_to_me(Some(Align::Center));
                        }

                        if response.secondary_clicked() || response.long_touched() {
                            gesture = Some(CardGesture::ToggleCompletion(id.clone()));
                        } else if response.clicked() {
                            gesture = Some(CardGesture::ToggleExpansion(id.clone()));
                        }

                        response.on_hover_text(
                            "Click to expand or collapse, right-click or long-press to mark obtained",
                        );
                    }
                }
            });

        if self.pending_focus.is_some() {
            self.pending_focus = None;
        }

        if let Some(gesture) = gesture {
            self.apply_gesture(gesture);
        }
    }
}
