//! Hero prompt composer: prompt text plus up to four model slots.
//!
//! A slot holds a model id from the static catalog. A model may occupy at
//! most one slot at a time.

#[cfg(test)]
#[path = "composer_test.rs"]
mod composer_test;

use catalog::Model;

pub const MAX_SELECTED_MODELS: usize = 4;

/// Flat per-model credit estimate shown under the composer.
pub const COST_PER_MODEL: f64 = 0.53;

const DEFAULT_MODELS: [&str; MAX_SELECTED_MODELS] = ["claude-sonnet-3.5", "claude-opus-4", "llama-3-70b", "gpt-4o"];

#[derive(Clone, Debug, PartialEq)]
pub struct ComposerState {
    pub prompt: String,
    slots: [Option<&'static str>; MAX_SELECTED_MODELS],
}

impl Default for ComposerState {
    fn default() -> Self {
        let mut slots = [None; MAX_SELECTED_MODELS];
        for (slot, id) in slots.iter_mut().zip(DEFAULT_MODELS) {
            *slot = catalog::model_by_id(id).map(|m| m.id);
        }
        Self { prompt: String::new(), slots }
    }
}

impl ComposerState {
    /// Composer with no models selected.
    #[must_use]
    pub fn empty() -> Self {
        Self { prompt: String::new(), slots: [None; MAX_SELECTED_MODELS] }
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<&'static str>; MAX_SELECTED_MODELS] {
        &self.slots
    }

    /// Selected models in slot order.
    #[must_use]
    pub fn selected_models(&self) -> Vec<&'static Model> {
        self.slots
            .iter()
            .flatten()
            .filter_map(|id| catalog::model_by_id(id))
            .collect()
    }

    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    #[must_use]
    pub fn is_selected(&self, model_id: &str) -> bool {
        self.slots.iter().flatten().any(|id| *id == model_id)
    }

    /// Select the model if absent (into the first free slot), otherwise
    /// deselect it. Returns whether the model is selected afterwards.
    /// Unknown ids and a full composer leave the state unchanged.
    pub fn toggle(&mut self, model_id: &str) -> bool {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.is_some_and(|id| id == model_id)) {
            *slot = None;
            return false;
        }
        let Some(model) = catalog::model_by_id(model_id) else {
            return false;
        };
        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(slot) => {
                *slot = Some(model.id);
                true
            }
            None => false,
        }
    }

    /// Put a model into a specific slot. A model already shown in another
    /// slot is moved rather than duplicated.
    pub fn assign(&mut self, index: usize, model_id: &str) {
        let Some(model) = catalog::model_by_id(model_id) else {
            return;
        };
        if index >= MAX_SELECTED_MODELS {
            return;
        }
        for slot in &mut self.slots {
            if *slot == Some(model.id) {
                *slot = None;
            }
        }
        self.slots[index] = Some(model.id);
    }

    pub fn clear_slot(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = None;
        }
    }

    /// Ids held by slots other than `index`, for the per-slot picker.
    #[must_use]
    pub fn taken_elsewhere(&self, index: usize) -> Vec<&'static str> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .filter_map(|(_, id)| *id)
            .collect()
    }

    /// Replace the selection with a use case's models, truncated to the slot count.
    pub fn apply_use_case(&mut self, model_ids: &[&str]) {
        let mut slots = [None; MAX_SELECTED_MODELS];
        let resolved = model_ids
            .iter()
            .filter_map(|id| catalog::model_by_id(id))
            .map(|m| m.id);
        let mut filled = 0;
        for id in resolved {
            if filled == MAX_SELECTED_MODELS {
                break;
            }
            if slots[..filled].contains(&Some(id)) {
                continue;
            }
            slots[filled] = Some(id);
            filled += 1;
        }
        self.slots = slots;
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn estimated_cost(&self) -> f64 {
        self.selected_count() as f64 * COST_PER_MODEL
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.prompt.trim().is_empty() && self.selected_count() > 0
    }
}
