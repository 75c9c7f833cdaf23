use eframe::egui::{self, Color32, Key, Ui};

use super::super::{Notice, ViewModel};

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        let search_response = ui
            .add(
                egui::TextEdit::singleline(&mut self.search)
                    .hint_text("Find by name")
                    .desired_width(180.0),
            )
            .on_hover_text("Exact name, any case. Expands the whole line leading to it.");
        let submitted =
            search_response.lost_focus() && ui.input(|input| input.key_pressed(Key::Enter));

        if ui.button("Find").clicked() || submitted {
            self.submit_search();
        }

        ui.separator();

        if ui
            .button("Collapse all")
            .on_hover_text("Show only the first stage of every line.")
            .clicked()
        {
            self.collapse_all();
        }
        if ui.button("Expand all").clicked() {
            self.expand_all();
        }

        let missing = self.assignment.missing().len();
        if missing > 0 {
            ui.colored_label(
                Color32::from_rgb(246, 137, 92),
                format!("{missing} unknown evolution(s) hidden"),
            )
            .on_hover_text(
                self.assignment
                    .missing()
                    .iter()
                    .map(|entry| match &entry.parent {
                        Some(parent) => format!("{parent} -> {}", entry.missing),
                        None => entry.missing.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            );
        }
    }

    pub(in crate::app) fn draw_notice(&mut self, ui: &mut Ui) {
        let mut dismissed = false;
        let mut retry_with = None;

        match &self.notice {
            None => return,
            Some(Notice::NotFound { query, suggestions }) => {
                ui.horizontal_wrapped(|ui| {
                    ui.colored_label(
                        Color32::from_rgb(247, 194, 111),
                        format!("No creature named \"{query}\"."),
                    );
                    if !suggestions.is_empty() {
                        ui.label("Did you mean:");
                        for name in suggestions {
                            if ui.link(name.as_str()).clicked() {
                                retry_with = Some(name.clone());
                            }
                        }
                    }
                    if ui.small_button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            }
            Some(Notice::SaveFailed(error)) => {
                ui.horizontal_wrapped(|ui| {
                    ui.colored_label(
                        Color32::from_rgb(246, 110, 92),
                        format!("Progress was not saved: {error}"),
                    );
                    if ui.small_button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            }
        }

        if let Some(name) = retry_with {
            self.search = name;
            self.submit_search();
        } else if dismissed {
            self.notice = None;
        }
    }
}
