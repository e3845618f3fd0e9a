//! 上传文件 - 基础设施层
//!
//! 只负责"把文件放到指定位置"，不关心文件内容

use anyhow::{Context, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 收到的上传文件
pub trait Upload {
    /// 原始文件名（仅用于回复和日志）
    fn file_name(&self) -> &str;

    /// 发送方声明的 MIME 类型
    fn content_type(&self) -> Option<&str>;

    /// 把文件内容下载到 `dest`
    fn download_to(&self, dest: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// 本地磁盘上的文件
#[derive(Debug, Clone)]
pub struct LocalFileUpload {
    path: PathBuf,
    file_name: String,
    content_type: Option<String>,
}

impl LocalFileUpload {
    pub fn new(path: impl Into<PathBuf>, content_type: Option<String>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self {
            path,
            file_name,
            content_type,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Upload for LocalFileUpload {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    async fn download_to(&self, dest: &Path) -> Result<()> {
        fs::copy(&self.path, dest).await.with_context(|| {
            format!("无法复制文件: {} -> {}", self.path.display(), dest.display())
        })?;
        Ok(())
    }
}

/// 已经在内存中的文件内容
#[derive(Debug, Clone)]
pub struct BytesUpload {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl BytesUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: Option<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes: bytes.into(),
        }
    }
}

impl Upload for BytesUpload {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    async fn download_to(&self, dest: &Path) -> Result<()> {
        fs::write(dest, &self.bytes)
            .await
            .with_context(|| format!("无法写入文件: {}", dest.display()))?;
        Ok(())
    }
}
