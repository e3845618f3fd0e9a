pub mod docx_renderer;
pub mod question_parser;
pub mod quiz_converter;
pub mod text_extractor;

pub use docx_renderer::{question_rows, DocxRenderer, RowCells, RowKind, RowSpec};
pub use question_parser::{parse_block, parse_document, split_blocks, BlockFailure, ParseReport};
pub use quiz_converter::quiz_to_question;
pub use text_extractor::extract_text;
