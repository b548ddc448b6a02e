//! Text compositions for Fable.
//!
//! A [`Composition`] is a named, ordered list of [`Paragraph`]s, each an
//! ordered list of lines. Lines may contain `{name}` placeholders that are
//! filled from a variable snapshot at display time.
//!
//! Compositions are read from text files:
//!
//! ```text
//! $Tavern
//!
//! [arrival]
//! The door creaks open.
//! {name} steps inside.
//!
//! ``
//! An anonymous paragraph.
//! ```

mod composition;
mod reader;
mod substitute;

pub use composition::{Composition, Paragraph, RenderedParagraph};
pub use reader::{parse_composition, read_composition, ComposeError, COMPOSITION_EXTENSION};
pub use substitute::substitute;
