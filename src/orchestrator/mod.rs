//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和请求调度。
//!
//! ### `batch_processor` - 批量请求处理器
//! - 持有配置、处理流程和投递通道
//! - 每个文件都是一次独立的请求（独立的请求ID和临时目录）
//! - 控制并发数量（Semaphore）
//! - 输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<文件>)
//!     ↓
//! workflow::DocumentFlow (处理单个请求)
//!     ↓
//! services (能力层：parse / render / extract)
//!     ↓
//! infrastructure (传输接缝：Upload / Delivery)
//! ```

pub mod batch_processor;

// 重新导出主要类型
pub use batch_processor::{App, ProcessingStats};
