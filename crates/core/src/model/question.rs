use crate::model::{CorrectEntries, ExplanationStep, MajorCategoryId, SubCategoryId, TemplateId};
use crate::randomizer::Randomizer;

/// Derives a fresh, balanced question from a template and a randomness source.
///
/// Mutations are plain functions: they read the template and the randomizer and
/// never touch shared state.
pub type Mutation = fn(&QuestionTemplate, &mut Randomizer) -> ConcreteQuestion;

//
// ─── TEMPLATE ──────────────────────────────────────────────────────────────────
//

/// Read-only question definition from the catalog.
#[derive(Debug, Clone, Copy)]
pub struct QuestionTemplate {
    id: TemplateId,
    major: MajorCategoryId,
    sub: SubCategoryId,
    text: &'static str,
    choices: &'static [&'static str],
    explanation: &'static str,
    mutation: Mutation,
}

impl QuestionTemplate {
    #[must_use]
    pub fn new(
        id: &'static str,
        major: MajorCategoryId,
        sub: SubCategoryId,
        text: &'static str,
        choices: &'static [&'static str],
        explanation: &'static str,
        mutation: Mutation,
    ) -> Self {
        Self {
            id: TemplateId::new(id),
            major,
            sub,
            text,
            choices,
            explanation,
            mutation,
        }
    }

    #[must_use]
    pub fn id(&self) -> TemplateId {
        self.id
    }

    #[must_use]
    pub fn major(&self) -> MajorCategoryId {
        self.major
    }

    #[must_use]
    pub fn sub(&self) -> SubCategoryId {
        self.sub
    }

    /// Narrative with the base (un-randomized) amounts.
    #[must_use]
    pub fn text(&self) -> &'static str {
        self.text
    }

    #[must_use]
    pub fn choices(&self) -> &'static [&'static str] {
        self.choices
    }

    #[must_use]
    pub fn explanation(&self) -> &'static str {
        self.explanation
    }

    /// Builds a concrete question from a seeded randomizer.
    #[must_use]
    pub fn instantiate(&self, seed: u64) -> ConcreteQuestion {
        self.instantiate_with(&mut Randomizer::seeded(seed))
    }

    /// Builds a concrete question drawing from `randomizer`.
    #[must_use]
    pub fn instantiate_with(&self, randomizer: &mut Randomizer) -> ConcreteQuestion {
        (self.mutation)(self, randomizer)
    }

    /// Starts a concrete question carrying this template's identity, choices and
    /// base explanation. Used by mutation functions.
    #[must_use]
    pub fn concrete(&self, text: String, entries: CorrectEntries) -> ConcreteQuestion {
        ConcreteQuestion {
            template_id: self.id,
            major: self.major,
            sub: self.sub,
            text,
            correct_entries: entries,
            choices: self.choices.iter().map(|c| (*c).to_owned()).collect(),
            explanation: self.explanation.to_owned(),
            steps: Vec::new(),
        }
    }
}

//
// ─── CONCRETE QUESTION ─────────────────────────────────────────────────────────
//

/// A session-specific instance of a template with randomized amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcreteQuestion {
    pub template_id: TemplateId,
    pub major: MajorCategoryId,
    pub sub: SubCategoryId,
    pub text: String,
    pub correct_entries: CorrectEntries,
    pub choices: Vec<String>,
    pub explanation: String,
    pub steps: Vec<ExplanationStep>,
}

impl ConcreteQuestion {
    #[must_use]
    pub fn with_steps(mut self, steps: Vec<ExplanationStep>) -> Self {
        self.steps = steps;
        self
    }

    /// Replaces the base explanation with one mentioning the drawn amounts.
    #[must_use]
    pub fn with_explanation(mut self, explanation: String) -> Self {
        self.explanation = explanation;
        self
    }

    #[must_use]
    pub fn has_steps(&self) -> bool {
        !self.steps.is_empty()
    }
}
