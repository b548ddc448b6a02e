//! The `compose` command: show a composition file's paragraphs unrendered.

use std::fmt::Write;
use std::path::Path;

use fable_compose::read_composition;

use super::CommandError;

/// Outline of the composition at `path`: each paragraph's position and name,
/// then its lines with placeholders left as written.
pub fn show_composition(path: &Path) -> Result<String, CommandError> {
    let composition = read_composition(path)?;
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = writeln!(out, "${}", composition.name);
    for paragraph in composition.paragraphs() {
        let _ = match &paragraph.name {
            Some(name) => writeln!(out, "#{} [{name}]", paragraph.id),
            None => writeln!(out, "#{}", paragraph.id),
        };
        for line in &paragraph.lines {
            let _ = writeln!(out, "    {line}");
        }
    }
    Ok(out)
}
