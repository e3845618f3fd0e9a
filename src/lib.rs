//! # Question Docx
//!
//! 把选择题内容（纯文本文件、docx 文件或聊天平台的原生测验）转换为固定格式 docx 的 Rust 应用程序
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 传输接缝，只暴露能力
//! - `Upload` - 把收到的文件下载到本地
//! - `Delivery` - 发送文字回复和生成的文档
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心流程
//! - `question_parser` - 文本切块与题目解析
//! - `docx_renderer` - 按容量分批生成 docx
//! - `text_extractor` - 从 txt / docx 中提取文本
//! - `quiz_converter` - 原生测验转结构化题目
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次请求"的完整处理流程
//! - `RequestCtx` - 上下文封装（会话ID + 请求ID）
//! - `DocumentFlow` - 流程编排（下载 → 解析 → 汇报 → 生成 → 发送 → 清理）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量请求处理器，管理并发和统计
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, ParseError, RequestError};
pub use infrastructure::{Delivery, Upload};
pub use models::{CorrectAnswer, NativeQuiz, OptionId, SourceKind, StructuredQuestion};
pub use orchestrator::App;
pub use services::{parse_block, parse_document, DocxRenderer};
pub use workflow::{DocumentFlow, RequestCtx, RequestSummary};
