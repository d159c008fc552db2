pub mod document_recognizer;
pub mod evaluation_client;
pub mod prompt_assembler;
pub mod question_paper;
pub mod response_recovery;
pub mod result_store;

pub use document_recognizer::{DocumentRecognizer, RecognitionHandle};
pub use evaluation_client::EvaluationClient;
pub use question_paper::QuestionPaperLoader;
pub use response_recovery::RecoveryOutcome;
pub use result_store::ResultStore;
