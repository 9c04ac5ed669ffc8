//! The built-in question bank and its lookup helpers.
//!
//! Each category module registers plain mutation functions next to their
//! templates; nothing here is mutable after construction.

use thiserror::Error;

use crate::model::QuestionTemplate;

mod assets_expenses;
mod cash_savings;
mod closing;
mod merchandise;
mod notes;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("unknown template id: {0}")]
    UnknownTemplate(String),
    #[error("unknown category id: {0}")]
    UnknownCategory(String),
}

/// Immutable set of question templates.
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: Vec<QuestionTemplate>,
}

impl Catalog {
    /// The full bookkeeping question bank.
    #[must_use]
    pub fn standard() -> Self {
        let mut templates = Vec::new();
        templates.extend(cash_savings::templates());
        templates.extend(merchandise::templates());
        templates.extend(notes::templates());
        templates.extend(assets_expenses::templates());
        templates.extend(closing::templates());
        Self { templates }
    }

    #[must_use]
    pub fn templates(&self) -> &[QuestionTemplate] {
        &self.templates
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Looks up a template by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnknownTemplate` if no template has that id.
    pub fn get(&self, id: &str) -> Result<&QuestionTemplate, CatalogError> {
        self.templates
            .iter()
            .find(|t| t.id().as_str() == id)
            .ok_or_else(|| CatalogError::UnknownTemplate(id.to_owned()))
    }

    /// Templates in a major category, in catalog order.
    pub fn in_major<'a>(&'a self, major: &'a str) -> impl Iterator<Item = &'a QuestionTemplate> {
        self.templates
            .iter()
            .filter(move |t| t.major().as_str() == major)
    }

    /// Templates in a sub category, in catalog order.
    pub fn in_sub<'a>(&'a self, sub: &'a str) -> impl Iterator<Item = &'a QuestionTemplate> {
        self.templates
            .iter()
            .filter(move |t| t.sub().as_str() == sub)
    }
}
