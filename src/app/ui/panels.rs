use eframe::egui::{self, Align, Context, Layout};

use crate::util::format_completion;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("evo-tree");
                    ui.separator();
                    self.draw_controls(ui);
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let completion = self.progress.completion();
                        ui.add(
                            egui::ProgressBar::new(completion.ratio(&self.graph))
                                .desired_width(140.0)
                                .text(format_completion(
                                    completion.completed_count(&self.graph),
                                    self.graph.len(),
                                    completion.percent(&self.graph),
                                )),
                        );
                        ui.label("Obtained:");
                    });
                });
                self.draw_notice(ui);
            });

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_tree(ui));
    }
}
