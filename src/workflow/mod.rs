pub mod document_flow;
pub mod replies;
pub mod request_ctx;

pub use document_flow::{DocumentFlow, RequestSummary};
pub use request_ctx::RequestCtx;
