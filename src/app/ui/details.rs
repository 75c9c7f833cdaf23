use eframe::egui::{RichText, Ui};

use super::super::{CardGesture, ViewModel};

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.selected.clone() else {
            ui.label("Click a card to expand it and show its details here.");
            return;
        };

        let Some(creature) = self.graph.get(&selected_id) else {
            ui.label("Selected creature is not part of the dataset.");
            return;
        };

        let mut gesture = None;
        let mut jump_to = None;

        ui.label(RichText::new(creature.name.as_str()).strong().size(17.0));
        ui.small(creature.id.as_str());
        ui.add_space(6.0);
        ui.label(format!("Stage: {}", creature.stage));
        if let Some(icon) = &creature.icon {
            ui.label(format!("Icon: {icon}"));
        }

        let mut checked = self.progress.is_complete(&creature.id);
        if ui.checkbox(&mut checked, "Obtained").changed() {
            gesture = Some(CardGesture::ToggleCompletion(creature.id.clone()));
        }

        ui.separator();
        ui.label(RichText::new("Evolution method").strong());
        if creature.methods.is_empty() {
            ui.label("Not documented.");
        } else {
            for method in &creature.methods {
                ui.label(format!("- {method}"));
            }
        }

        ui.separator();
        ui.label(RichText::new("Evolves to").strong());
        if creature.evolves_to.is_empty() {
            ui.label("Final form in this dataset.");
        }
        for child in &creature.evolves_to {
            match self.graph.get(child) {
                Some(next) => {
                    if ui.link(next.name.as_str()).clicked() {
                        jump_to = Some(next.id.clone());
                    }
                }
                None => {
                    ui.label(format!("{child} (missing from dataset)"));
                }
            }
        }

        ui.separator();
        ui.label(RichText::new("Evolves from").strong());
        let parents = self.ancestors.parents_of(&creature.id);
        if parents.is_empty() {
            ui.label("Nothing, this starts a line.");
        }
        for parent in parents {
            if let Some(previous) = self.graph.get(parent)
                && ui.link(previous.name.as_str()).clicked()
            {
                jump_to = Some(previous.id.clone());
            }
        }

        if let Some(gesture) = gesture {
            self.apply_gesture(gesture);
        }
        if let Some(id) = jump_to {
            self.focus_on(&id);
        }
    }
}
