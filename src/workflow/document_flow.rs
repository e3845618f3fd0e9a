//! 请求处理流程 - 流程层
//!
//! 核心职责：定义"一次请求"的完整处理流程
//!
//! 文件请求：
//! 1. 检查文件类型
//! 2. 下载到本次请求独占的临时目录
//! 3. 提取文本 → 切块 → 逐块解析
//! 4. 汇报解析失败的块
//! 5. 按容量分批生成 docx → 发送 → 删除
//!
//! 测验请求：转换 → 生成单个 docx → 发送 → 删除
//!
//! 临时目录在请求结束时无条件删除，包括所有出错路径

use crate::config::Config;
use crate::error::RequestError;
use crate::infrastructure::{Delivery, Upload};
use crate::models::{NativeQuiz, SourceKind, StructuredQuestion};
use crate::services::{extract_text, parse_document, quiz_to_question, DocxRenderer};
use crate::utils::logging::truncate_text;
use crate::workflow::replies;
use crate::workflow::request_ctx::RequestCtx;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio::fs;
use tracing::{debug, error, info, warn};

/// 单次请求的处理结果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestSummary {
    /// 成功解析的题目数
    pub parsed: usize,
    /// 解析失败的块数
    pub failed_blocks: usize,
    /// 生成并发送的文档数
    pub documents: usize,
}

/// 请求处理流程
///
/// - 不持有任何请求相关的状态，可以被多个请求同时使用
/// - 传输细节由 `Upload` / `Delivery` 提供
#[derive(Debug, Clone)]
pub struct DocumentFlow {
    renderer: DocxRenderer,
    work_dir: PathBuf,
    verbose_logging: bool,
}

impl DocumentFlow {
    /// 创建新的请求处理流程
    pub fn new(config: &Config) -> Self {
        Self {
            renderer: DocxRenderer::new(config.capacity()),
            work_dir: config.work_dir.clone(),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 回复 `/start`
    pub async fn greet<D: Delivery>(&self, delivery: &D) -> Result<(), RequestError> {
        send_text(delivery, &replies::start_message(self.renderer.capacity())).await
    }

    /// 回复普通聊天文字
    pub async fn guide<D: Delivery>(&self, delivery: &D) -> Result<(), RequestError> {
        send_text(delivery, replies::guide_message()).await
    }

    /// 处理上传的题目文件
    pub async fn handle_document<U, D>(
        &self,
        ctx: &RequestCtx,
        upload: &U,
        delivery: &D,
    ) -> Result<RequestSummary, RequestError>
    where
        U: Upload + Sync,
        D: Delivery + Sync,
    {
        info!("{} 📥 收到文件: {}", ctx, upload.file_name());
        let result = self.run_document(ctx, upload, delivery).await;
        report_failure(ctx, delivery, result).await
    }

    /// 处理原生测验
    pub async fn handle_quiz<D>(
        &self,
        ctx: &RequestCtx,
        quiz: &NativeQuiz,
        delivery: &D,
    ) -> Result<RequestSummary, RequestError>
    where
        D: Delivery + Sync,
    {
        info!("{} 📥 收到测验: {}", ctx, truncate_text(&quiz.question, 80));
        let result = self.run_quiz(ctx, quiz, delivery).await;
        report_failure(ctx, delivery, result).await
    }

    async fn run_document<U, D>(
        &self,
        ctx: &RequestCtx,
        upload: &U,
        delivery: &D,
    ) -> Result<RequestSummary, RequestError>
    where
        U: Upload + Sync,
        D: Delivery + Sync,
    {
        // 1. 检查文件类型
        let declared = upload.content_type().unwrap_or_default();
        let kind = SourceKind::from_content_type(declared).ok_or_else(|| {
            RequestError::UnsupportedContentType {
                content_type: if declared.is_empty() {
                    "unknown".to_string()
                } else {
                    declared.to_string()
                },
            }
        })?;

        send_text(delivery, &replies::processing_file(upload.file_name())).await?;

        // 2. 下载并读取
        let workspace = self.create_workspace(ctx).await?;
        let input_path = ctx.input_path(workspace.path(), kind.extension());
        let input_display = input_path.display().to_string();

        upload
            .download_to(&input_path)
            .await
            .map_err(|e| RequestError::ReadFailure {
                path: input_display.clone(),
                source: e.into(),
            })?;

        let bytes = fs::read(&input_path)
            .await
            .map_err(|e| RequestError::read_failed(&input_display, e))?;
        let text = extract_text(kind, &bytes, &input_display)?;
        cleanup_file(ctx, &input_path).await;

        // 3. 解析
        let report = parse_document(&text);
        info!(
            "{} ✓ 解析完成: 成功 {}, 失败 {}",
            ctx,
            report.questions.len(),
            report.failures.len()
        );
        if self.verbose_logging {
            log_questions(ctx, &report.questions);
        }

        let mut summary = RequestSummary {
            parsed: report.questions.len(),
            failed_blocks: report.failures.len(),
            documents: 0,
        };

        // 4. 汇报失败的块
        if let Some(failure_summary) = report.failure_summary() {
            for failure in &report.failures {
                warn!(
                    "{} ⚠️ 第 {} 个题目块解析失败: {}",
                    ctx, failure.position, failure.error
                );
            }
            send_text(delivery, &failure_summary).await?;
        }

        if report.questions.is_empty() {
            if report.failures.is_empty() {
                warn!("{} ⚠️ 文件中没有题目", ctx);
                send_text(delivery, replies::no_valid_questions()).await?;
            }
            return Ok(summary);
        }

        // 5. 分批生成并发送
        let total = report.questions.len();
        let document_count = self.renderer.document_count(total);
        send_text(delivery, &replies::generating(total, document_count)).await?;

        for (i, chunk) in self.renderer.chunks(&report.questions).enumerate() {
            let part = i + 1;
            info!(
                "{} 📦 生成第 {}/{} 个文档 ({} 道题)",
                ctx,
                part,
                document_count,
                chunk.len()
            );

            let path = ctx.part_path(workspace.path(), part);
            self.deliver_rendered(ctx, chunk, &path, delivery).await?;
            summary.documents += 1;
        }

        info!("{} ✅ 文件处理完成", ctx);
        Ok(summary)
    }

    async fn run_quiz<D>(
        &self,
        ctx: &RequestCtx,
        quiz: &NativeQuiz,
        delivery: &D,
    ) -> Result<RequestSummary, RequestError>
    where
        D: Delivery + Sync,
    {
        let question = quiz_to_question(quiz)?;
        send_text(delivery, replies::processing_quiz()).await?;

        if self.verbose_logging {
            log_questions(ctx, std::slice::from_ref(&question));
        }

        let workspace = self.create_workspace(ctx).await?;
        let path = ctx.quiz_path(workspace.path());

        let bytes = self.renderer.render(std::slice::from_ref(&question))?;
        write_artifact(&path, bytes).await?;

        send_text(delivery, replies::quiz_processed()).await?;
        let sent = send_document(delivery, &path).await;
        cleanup_file(ctx, &path).await;
        sent?;

        info!("{} ✅ 测验处理完成", ctx);
        Ok(RequestSummary {
            parsed: 1,
            failed_blocks: 0,
            documents: 1,
        })
    }

    /// 渲染一个文档、发送，然后删除
    async fn deliver_rendered<D>(
        &self,
        ctx: &RequestCtx,
        chunk: &[StructuredQuestion],
        path: &Path,
        delivery: &D,
    ) -> Result<(), RequestError>
    where
        D: Delivery + Sync,
    {
        let bytes = self.renderer.render(chunk)?;
        write_artifact(path, bytes).await?;

        let sent = send_document(delivery, path).await;
        cleanup_file(ctx, path).await;
        sent
    }

    /// 为请求创建独占的临时目录，目录在返回值 drop 时删除
    async fn create_workspace(&self, ctx: &RequestCtx) -> Result<TempDir, RequestError> {
        fs::create_dir_all(&self.work_dir)
            .await
            .map_err(|e| RequestError::artifact_failed(self.work_dir.display().to_string(), e))?;

        let workspace = tempfile::Builder::new()
            .prefix(&ctx.artifact_prefix())
            .tempdir_in(&self.work_dir)
            .map_err(|e| RequestError::artifact_failed(self.work_dir.display().to_string(), e))?;

        debug!("{} 临时目录: {}", ctx, workspace.path().display());
        Ok(workspace)
    }
}

/// 致命错误：记录日志并回复用户，然后原样返回
async fn report_failure<D>(
    ctx: &RequestCtx,
    delivery: &D,
    result: Result<RequestSummary, RequestError>,
) -> Result<RequestSummary, RequestError>
where
    D: Delivery + Sync,
{
    let err = match result {
        Ok(summary) => return Ok(summary),
        Err(err) => err,
    };

    error!("{} ❌ 请求处理失败: {}", ctx, err);
    if !matches!(err, RequestError::Delivery { .. }) {
        if let Err(e) = delivery.send_text(&err.user_message()).await {
            error!("{} 错误信息发送失败: {}", ctx, e);
        }
    }
    Err(err)
}

async fn send_text<D: Delivery>(delivery: &D, text: &str) -> Result<(), RequestError> {
    delivery
        .send_text(text)
        .await
        .map_err(|e| RequestError::Delivery { source: e.into() })
}

async fn send_document<D: Delivery>(delivery: &D, path: &Path) -> Result<(), RequestError> {
    delivery
        .send_document(path)
        .await
        .map_err(|e| RequestError::Delivery { source: e.into() })
}

async fn write_artifact(path: &Path, bytes: Vec<u8>) -> Result<(), RequestError> {
    fs::write(path, bytes)
        .await
        .map_err(|e| RequestError::artifact_failed(path.display().to_string(), e))
}

/// 删除已处理的临时文件
///
/// 删除失败只记录警告，临时目录最终仍会被整体删除
async fn cleanup_file(ctx: &RequestCtx, path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!(
            "{} 🗑️ 文件已删除: {}",
            ctx,
            path.file_name().unwrap_or_default().to_string_lossy()
        ),
        Err(e) => warn!("{} ⚠️ 删除文件失败 {}: {}", ctx, path.display(), e),
    }
}

fn log_questions(ctx: &RequestCtx, questions: &[StructuredQuestion]) {
    for (i, question) in questions.iter().enumerate() {
        info!("{}   {}. {}", ctx, i + 1, question);
    }
}
