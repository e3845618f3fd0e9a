pub mod loaders;
pub mod question;
pub mod quiz;
pub mod source;

pub use loaders::load_quiz_json;
pub use question::{CorrectAnswer, OptionId, QuestionOption, StructuredQuestion};
pub use quiz::{NativeQuiz, PollKind, PollOption};
pub use source::SourceKind;
