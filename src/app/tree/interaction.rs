use crate::evo::{compute_levels, resolve, reveal, suggestions};

use super::super::{CardGesture, Notice, ViewModel};

const SUGGESTION_LIMIT: usize = 3;

impl ViewModel {
    /// Recomputes the level assignment when expansion changed since the
    /// last frame. Resizes never get here; they only redo the geometry.
    pub(in crate::app) fn refresh_levels(&mut self) {
        if !self.levels_dirty {
            return;
        }

        self.assignment = compute_levels(&self.graph, &self.roots, &self.expansion);
        self.links = self.assignment.links(&self.graph, &self.expansion);
        self.levels_dirty = false;
    }

    pub(in crate::app) fn apply_gesture(&mut self, gesture: CardGesture) {
        match gesture {
            CardGesture::ToggleExpansion(id) => {
                let expanded = self.expansion.toggle(&id);
                log::debug!("`{id}` {}", if expanded { "expanded" } else { "collapsed" });
                self.levels_dirty = true;
                self.selected = Some(id);
            }
            CardGesture::ToggleCompletion(id) => {
                match self.progress.toggle(&id) {
                    Ok(_) => {
                        if matches!(self.notice, Some(Notice::SaveFailed(_))) {
                            self.notice = None;
                        }
                    }
                    Err(error) => {
                        log::error!("{error}");
                        self.notice = Some(Notice::SaveFailed(error.to_string()));
                    }
                }
                self.selected = Some(id);
            }
        }
    }

    pub(in crate::app) fn submit_search(&mut self) {
        let query = self.search.trim().to_owned();
        if query.is_empty() {
            self.notice = None;
            return;
        }

        match resolve(&self.graph, &self.ancestors, &query) {
            Some(hit) => {
                self.expansion = hit.expansion;
                self.levels_dirty = true;
                self.selected = Some(hit.focus.clone());
                self.pending_focus = Some(hit.focus);
                self.notice = None;
            }
            None => {
                log::info!("no creature named `{query}`");
                self.notice = Some(Notice::NotFound {
                    suggestions: suggestions(&self.graph, &query, SUGGESTION_LIMIT),
                    query,
                });
            }
        }
    }

    /// Opens the line leading to `id` and scrolls to it, as a search hit
    /// would, without going through display names.
    pub(in crate::app) fn focus_on(&mut self, id: &str) {
        if !self.graph.contains(id) {
            return;
        }

        self.expansion = reveal(&self.ancestors, id);
        self.levels_dirty = true;
        self.selected = Some(id.to_owned());
        self.pending_focus = Some(id.to_owned());
    }

    pub(in crate::app) fn collapse_all(&mut self) {
        self.expansion.clear();
        self.levels_dirty = true;
    }

    pub(in crate::app) fn expand_all(&mut self) {
        self.expansion.expand_all(&self.graph);
        self.levels_dirty = true;
    }
}
