pub mod category;
mod explanation;
mod ids;
mod journal;
mod question;
mod stats;

pub use category::{MajorCategory, SubCategory, GENRES};
pub use ids::{LineId, MajorCategoryId, SubCategoryId, TemplateId};

pub use explanation::{ExplanationStep, StepAmount, StepEntry};
pub use journal::{CorrectEntries, EntryLine, JournalEntry, Side};
pub use question::{ConcreteQuestion, Mutation, QuestionTemplate};
pub use stats::{HistoryRecord, Score, ScoreBand, UserStats};
