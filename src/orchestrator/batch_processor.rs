//! 批量请求处理器 - 编排层
//!
//! 把本地文件当作上传、把输出目录当作请求方，批量驱动请求处理流程。
//! 请求之间没有共享状态，一个请求失败不影响其他请求。

use crate::config::Config;
use crate::infrastructure::{Delivery, DirectoryDelivery, LocalFileUpload, Upload};
use crate::models::{load_quiz_json, SourceKind};
use crate::utils::logging;
use crate::workflow::{DocumentFlow, RequestCtx, RequestSummary};
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App<D> {
    config: Config,
    flow: DocumentFlow,
    delivery: Arc<D>,
}

impl App<DirectoryDelivery> {
    /// 初始化应用，生成的文档保存到配置的输出目录
    pub fn initialize(config: Config) -> Self {
        let delivery = Arc::new(DirectoryDelivery::new(&config.output_dir));
        Self::with_delivery(config, delivery)
    }
}

impl<D> App<D>
where
    D: Delivery + Send + Sync + 'static,
{
    pub fn with_delivery(config: Config, delivery: Arc<D>) -> Self {
        logging::log_startup(config.max_concurrent_requests, config.questions_per_file);
        Self {
            flow: DocumentFlow::new(&config),
            config,
            delivery,
        }
    }

    /// 回复欢迎语
    pub async fn greet(&self) -> Result<()> {
        self.flow.greet(self.delivery.as_ref()).await?;
        Ok(())
    }

    /// 批量处理题目文件
    ///
    /// # 参数
    /// - `paths`: 文件列表
    /// - `content_type`: 声明的 MIME 类型；为空时按扩展名推断
    /// - `conversation_id`: 会话ID；为空时使用配置中的默认值
    pub async fn run_files(
        &self,
        paths: Vec<PathBuf>,
        content_type: Option<String>,
        conversation_id: Option<&str>,
    ) -> Result<ProcessingStats> {
        if paths.is_empty() {
            warn!("⚠️ 没有待处理的文件，程序结束");
            return Ok(ProcessingStats::default());
        }

        let total = paths.len();
        logging::log_requests_loaded(total, self.config.max_concurrent_requests);

        let conversation = conversation_id.unwrap_or(&self.config.default_conversation_id);
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_requests));
        let mut handles = Vec::with_capacity(total);

        // 为每个文件创建独立的请求任务
        for (idx, path) in paths.into_iter().enumerate() {
            let index = idx + 1;
            let declared = content_type
                .clone()
                .or_else(|| SourceKind::guess_content_type(&path).map(str::to_string));
            let upload = LocalFileUpload::new(path, declared);
            let ctx = RequestCtx::new(conversation);
            let permit = semaphore.clone().acquire_owned().await?;

            let flow = self.flow.clone();
            let delivery = Arc::clone(&self.delivery);

            let handle = tokio::spawn(async move {
                let _permit = permit;
                let result = flow
                    .handle_document(&ctx, &upload, delivery.as_ref())
                    .await;
                (upload.file_name().to_string(), result)
            });
            handles.push((index, handle));
        }

        // 等待所有任务完成
        let mut stats = ProcessingStats {
            total,
            ..Default::default()
        };

        let indices: Vec<usize> = handles.iter().map(|(index, _)| *index).collect();
        let results =
            futures::future::join_all(handles.into_iter().map(|(_, handle)| handle)).await;

        for (index, joined) in indices.into_iter().zip(results) {
            match joined {
                Ok((name, Ok(summary))) => {
                    logging::log_request_complete(
                        index,
                        &name,
                        summary.parsed,
                        summary.failed_blocks,
                        summary.documents,
                    );
                    stats.success += 1;
                }
                Ok((name, Err(e))) => {
                    error!("[文件 {}] ❌ {} 处理失败: {}", index, name, e);
                    stats.failed += 1;
                }
                Err(e) => {
                    error!("[文件 {}] 任务执行失败: {}", index, e);
                    stats.failed += 1;
                }
            }
        }

        logging::print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_dir.display().to_string(),
        );

        Ok(stats)
    }

    /// 处理一个保存为 JSON 的原生测验
    pub async fn run_quiz(
        &self,
        json_path: &Path,
        conversation_id: Option<&str>,
    ) -> Result<RequestSummary> {
        let quiz = load_quiz_json(json_path).await?;
        let ctx = RequestCtx::new(
            conversation_id.unwrap_or(&self.config.default_conversation_id),
        );

        let summary = self
            .flow
            .handle_quiz(&ctx, &quiz, self.delivery.as_ref())
            .await?;
        info!("{} ✓ 测验已转换为 {} 个文档", ctx, summary.documents);
        Ok(summary)
    }
}

/// 处理统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
}
