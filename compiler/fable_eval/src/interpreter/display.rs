//! Reference statements: rendering compositions to the console.

use fable_ir::Reference;
use fable_value::{undefined_composition, undefined_paragraph, EvalError};

use super::Interpreter;

impl Interpreter {
    /// Show a composition, or one paragraph of it, with `{name}` placeholders
    /// filled from every variable visible in the current scope.
    ///
    /// A whole composition shows each paragraph's name (when it has one)
    /// before its lines; a single paragraph shows only its lines.
    pub(super) fn exec_reference(&mut self, reference: &Reference) -> Result<(), EvalError> {
        let composition = self
            .library()
            .read()
            .composition(&reference.composition)
            .ok_or_else(|| undefined_composition(&reference.composition))?;
        let values = self.env.snapshot();
        let console = self.console();

        match &reference.selector {
            Some(selector) => {
                let paragraph = composition
                    .render_paragraph(selector, &values)
                    .ok_or_else(|| undefined_paragraph(&composition.name, &selector.to_string()))?;
                for line in &paragraph.lines {
                    console.display_line(line);
                }
            }
            None => {
                for paragraph in composition.render_all(&values) {
                    if let Some(name) = &paragraph.name {
                        console.display_line(name);
                    }
                    for line in &paragraph.lines {
                        console.display_line(line);
                    }
                }
            }
        }
        Ok(())
    }
}
