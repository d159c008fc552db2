pub mod evaluation_flow;
pub mod script_ctx;

pub use evaluation_flow::{EvalOutcome, EvaluationFlow, SkipReason};
pub use script_ctx::ScriptCtx;
