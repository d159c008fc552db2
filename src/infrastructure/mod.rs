pub mod ocr_engine;
pub mod page_renderer;

pub use ocr_engine::{RecognitionEngine, RecognitionStrategy};
pub use page_renderer::PageRenderer;
