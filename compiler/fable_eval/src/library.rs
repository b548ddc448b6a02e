//! Loaded programs and compositions, keyed by name.

use std::sync::Arc;

use fable_compose::Composition;
use fable_ir::Program;
use rustc_hash::FxHashMap;

/// Every program and composition an engine has loaded.
///
/// Entries are reference-counted so a run can hold a program while the
/// library is reloaded underneath it.
#[derive(Debug, Default)]
pub struct Library {
    programs: FxHashMap<String, Arc<Program>>,
    compositions: FxHashMap<String, Arc<Composition>>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a program, returning the one it replaced.
    pub fn add_program(&mut self, program: Program) -> Option<Arc<Program>> {
        self.programs
            .insert(program.name.clone(), Arc::new(program))
    }

    pub fn program(&self, name: &str) -> Option<Arc<Program>> {
        self.programs.get(name).cloned()
    }

    /// Add a composition, returning the one it replaced.
    pub fn add_composition(&mut self, composition: Composition) -> Option<Arc<Composition>> {
        self.compositions
            .insert(composition.name.clone(), Arc::new(composition))
    }

    pub fn composition(&self, name: &str) -> Option<Arc<Composition>> {
        self.compositions.get(name).cloned()
    }

    /// Program names, sorted.
    pub fn program_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.programs.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Composition names, sorted.
    pub fn composition_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.compositions.keys().cloned().collect();
        names.sort_unstable();
        names
    }

    pub fn clear(&mut self) {
        self.programs.clear();
        self.compositions.clear();
    }
}
