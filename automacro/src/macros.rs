use crate::authoring::{author_macro, Prompter};
use crate::{codec, Action, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// A named, ordered sequence of actions. Order is replay order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Macro {
    /// The name of the macro
    pub name: String,

    /// The steps of the macro
    pub actions: Vec<Action>,
}

impl Macro {
    /// Create an empty macro
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
        }
    }

    /// Append a step
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// One row of [`MacroStore::list`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroSummary {
    /// 1-based position in the store
    pub position: usize,
    pub name: String,
    pub step_count: usize,
}

/// Ordered collection of macros. Macros are identified by position only,
/// duplicate names are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroStore {
    macros: Vec<Macro>,
}

impl MacroStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_macros(macros: Vec<Macro>) -> Self {
        Self { macros }
    }

    /// Load the store from a macro resource. A missing or unreadable file
    /// yields an empty store.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let macros = codec::load_macros(path.as_ref());
        info!(count = macros.len(), path = ?path.as_ref(), "Macro store loaded");
        Self { macros }
    }

    /// Write every macro to the macro resource, replacing its contents
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        codec::save_macros(path.as_ref(), &self.macros)
    }

    /// Append a macro. Empty names are rejected and leave the store untouched.
    pub fn add(&mut self, mac: Macro) -> bool {
        if mac.name.is_empty() {
            debug!("Rejected macro with empty name");
            return false;
        }
        info!(name = %mac.name, steps = mac.len(), "Macro added");
        self.macros.push(mac);
        true
    }

    /// Author a macro through `prompter` and append it. Returns `false`, with
    /// the store untouched, when the entered name is empty.
    pub fn create<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> bool {
        match author_macro(prompter) {
            Some(mac) => self.add(mac),
            None => false,
        }
    }

    /// Remove the macro at a 1-based position. Out-of-range positions are a
    /// no-op and return `None`.
    pub fn remove(&mut self, position: usize) -> Option<Macro> {
        let index = self.index_of(position)?;
        let removed = self.macros.remove(index);
        info!(name = %removed.name, position, "Macro removed");
        Some(removed)
    }

    /// Get the macro at a 1-based position
    pub fn get(&self, position: usize) -> Option<&Macro> {
        self.index_of(position).map(|index| &self.macros[index])
    }

    /// First macro with the given name
    pub fn find(&self, name: &str) -> Option<&Macro> {
        self.macros.iter().find(|mac| mac.name == name)
    }

    /// Name and step count of every macro, in order
    pub fn list(&self) -> Vec<MacroSummary> {
        self.macros
            .iter()
            .enumerate()
            .map(|(index, mac)| MacroSummary {
                position: index + 1,
                name: mac.name.clone(),
                step_count: mac.len(),
            })
            .collect()
    }

    pub fn macros(&self) -> &[Macro] {
        &self.macros
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    /// Serialize the store as a pretty-printed JSON array
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.macros)?)
    }

    /// Build a store from a JSON array of macros
    pub fn from_json(json: &str) -> Result<Self> {
        let macros: Vec<Macro> = serde_json::from_str(json)?;
        Ok(Self { macros })
    }

    /// Export the store to a JSON file
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        info!("Exporting macro store to {:?}", path.as_ref());
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        Ok(())
    }

    fn index_of(&self, position: usize) -> Option<usize> {
        if position == 0 || position > self.macros.len() {
            return None;
        }
        Some(position - 1)
    }
}
