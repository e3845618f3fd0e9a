//! 回复投递 - 基础设施层
//!
//! 只负责"把内容交给请求方"，不关心内容如何生成

use anyhow::{Context, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;
use tracing::info;

/// 回复通道
pub trait Delivery {
    /// 发送文字回复
    fn send_text(&self, text: &str) -> impl Future<Output = Result<()>> + Send;

    /// 发送生成的文档；调用返回后文件可能被立即删除
    fn send_document(&self, path: &Path) -> impl Future<Output = Result<()>> + Send;
}

/// 把文档复制到输出目录，文字回复打印到标准输出
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    output_dir: PathBuf,
}

impl DirectoryDelivery {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl Delivery for DirectoryDelivery {
    async fn send_text(&self, text: &str) -> Result<()> {
        println!("{}\n", text);
        Ok(())
    }

    async fn send_document(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("无法创建输出目录: {}", self.output_dir.display()))?;

        let file_name = path.file_name().context("文档路径没有文件名")?;
        let dest = self.output_dir.join(file_name);
        fs::copy(path, &dest)
            .await
            .with_context(|| format!("无法复制文档到: {}", dest.display()))?;

        info!("📄 文档已保存: {}", dest.display());
        Ok(())
    }
}

/// 投递记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Document { file_name: String, bytes: Vec<u8> },
}

/// 把所有回复保存在内存中
///
/// 适合需要自行转发字节内容的传输层，也用于测试
#[derive(Debug, Default)]
pub struct MemoryDelivery {
    replies: Mutex<Vec<Reply>>,
}

impl MemoryDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// 取出目前为止的全部回复
    pub fn take(&self) -> Vec<Reply> {
        match self.replies.lock() {
            Ok(mut replies) => std::mem::take(&mut *replies),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }

    fn push(&self, reply: Reply) {
        match self.replies.lock() {
            Ok(mut replies) => replies.push(reply),
            Err(poisoned) => poisoned.into_inner().push(reply),
        }
    }
}

impl Delivery for MemoryDelivery {
    async fn send_text(&self, text: &str) -> Result<()> {
        self.push(Reply::Text(text.to_string()));
        Ok(())
    }

    async fn send_document(&self, path: &Path) -> Result<()> {
        let bytes = fs::read(path)
            .await
            .with_context(|| format!("无法读取文档: {}", path.display()))?;
        let file_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.push(Reply::Document { file_name, bytes });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_directory_delivery_copies_document() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("part_1.docx");
        std::fs::write(&doc, b"PK").unwrap();

        let output = dir.path().join("out");
        let delivery = DirectoryDelivery::new(&output);
        delivery.send_document(&doc).await.unwrap();

        assert_eq!(std::fs::read(output.join("part_1.docx")).unwrap(), b"PK");
    }

    #[tokio::test]
    async fn test_memory_delivery_records_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let doc = dir.path().join("quiz.docx");
        std::fs::write(&doc, b"data").unwrap();

        let delivery = MemoryDelivery::new();
        delivery.send_text("hello").await.unwrap();
        delivery.send_document(&doc).await.unwrap();

        let replies = delivery.take();
        assert_eq!(
            replies,
            vec![
                Reply::Text("hello".to_string()),
                Reply::Document {
                    file_name: "quiz.docx".to_string(),
                    bytes: b"data".to_vec(),
                },
            ]
        );
        assert!(delivery.take().is_empty());
    }
}
