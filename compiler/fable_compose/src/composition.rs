//! Compositions and paragraphs.

use std::fmt::Display;

use fable_ir::ParagraphSelector;
use rustc_hash::FxHashMap;

use crate::substitute::substitute;

/// One paragraph: an optional name and its lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paragraph {
    /// Position within the owning composition.
    pub id: usize,
    /// `None` for anonymous paragraphs.
    pub name: Option<String>,
    pub lines: Vec<String>,
}

/// A paragraph after placeholder substitution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedParagraph {
    pub name: Option<String>,
    pub lines: Vec<String>,
}

/// Named, ordered collection of paragraphs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Composition {
    pub name: String,
    paragraphs: Vec<Paragraph>,
}

impl Composition {
    /// Build a composition. Paragraph ids are reassigned to their positions.
    pub fn new(name: impl Into<String>, mut paragraphs: Vec<Paragraph>) -> Self {
        for (id, paragraph) in paragraphs.iter_mut().enumerate() {
            paragraph.id = id;
        }
        Composition {
            name: name.into(),
            paragraphs,
        }
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn len(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }

    /// Find a paragraph by name. The first paragraph with that name wins.
    pub fn paragraph_by_name(&self, name: &str) -> Option<&Paragraph> {
        self.paragraphs
            .iter()
            .find(|p| p.name.as_deref() == Some(name))
    }

    pub fn select(&self, selector: &ParagraphSelector) -> Option<&Paragraph> {
        match selector {
            ParagraphSelector::Index(index) => self.paragraphs.get(*index),
            ParagraphSelector::Name(name) => self.paragraph_by_name(name),
        }
    }

    /// Render one paragraph against `values`.
    pub fn render_paragraph<V: Display>(
        &self,
        selector: &ParagraphSelector,
        values: &FxHashMap<String, V>,
    ) -> Option<RenderedParagraph> {
        self.select(selector).map(|p| p.render(values))
    }

    /// Render every paragraph against `values`, in order.
    pub fn render_all<V: Display>(&self, values: &FxHashMap<String, V>) -> Vec<RenderedParagraph> {
        self.paragraphs.iter().map(|p| p.render(values)).collect()
    }
}

impl Paragraph {
    pub fn new(name: Option<String>, lines: Vec<String>) -> Self {
        Paragraph { id: 0, name, lines }
    }

    pub fn render<V: Display>(&self, values: &FxHashMap<String, V>) -> RenderedParagraph {
        RenderedParagraph {
            name: self.name.clone(),
            lines: self
                .lines
                .iter()
                .map(|line| substitute(line, values))
                .collect(),
        }
    }
}
