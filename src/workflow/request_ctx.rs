//! 请求处理上下文
//!
//! 封装"我正在处理哪个会话的哪一次请求"这一信息

use std::fmt::Display;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// 请求处理上下文
///
/// 所有临时文件名都由会话ID和请求ID共同决定，并发请求之间不会冲突
#[derive(Debug, Clone)]
pub struct RequestCtx {
    /// 会话ID（聊天ID或本地会话名）
    pub conversation_id: String,

    /// 本次请求的唯一ID
    pub request_id: Uuid,
}

impl RequestCtx {
    /// 为会话创建一个新请求
    pub fn new(conversation_id: impl Into<String>) -> Self {
        Self::with_request_id(conversation_id, Uuid::new_v4())
    }

    pub fn with_request_id(conversation_id: impl Into<String>, request_id: Uuid) -> Self {
        let conversation_id = sanitize(&conversation_id.into());
        Self {
            conversation_id,
            request_id,
        }
    }

    /// 临时目录前缀
    pub fn artifact_prefix(&self) -> String {
        format!("request_{}_{}_", self.conversation_id, self.request_id.simple())
    }

    /// 下载的输入文件
    pub fn input_path(&self, dir: &Path, extension: &str) -> PathBuf {
        dir.join(format!(
            "input_{}_{}.{}",
            self.conversation_id,
            self.request_id.simple(),
            extension
        ))
    }

    /// 第 `part` 个输出文档（从1开始）
    pub fn part_path(&self, dir: &Path, part: usize) -> PathBuf {
        dir.join(format!(
            "questions_{}_{}_part_{}.docx",
            self.conversation_id,
            self.request_id.simple(),
            part
        ))
    }

    /// 测验输出文档
    pub fn quiz_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!(
            "quiz_{}_{}.docx",
            self.conversation_id,
            self.request_id.simple()
        ))
    }
}

impl Display for RequestCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[请求 {}#{}]",
            self.conversation_id,
            &self.request_id.simple().to_string()[..8]
        )
    }
}

/// 会话ID会出现在文件名里，只保留安全字符
fn sanitize(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "anonymous".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_unique_per_request() {
        let a = RequestCtx::new("12345");
        let b = RequestCtx::new("12345");
        let dir = Path::new("/tmp");

        assert_ne!(a.part_path(dir, 1), b.part_path(dir, 1));
        assert_ne!(a.input_path(dir, "txt"), b.input_path(dir, "txt"));
        assert_ne!(a.quiz_path(dir), b.quiz_path(dir));
    }

    #[test]
    fn test_path_layout() {
        let id = Uuid::nil();
        let ctx = RequestCtx::with_request_id("-100/42", id);
        let dir = Path::new("work");

        assert_eq!(ctx.conversation_id, "-100-42");
        assert_eq!(
            ctx.part_path(dir, 2),
            PathBuf::from("work/questions_-100-42_00000000000000000000000000000000_part_2.docx")
        );
        assert_eq!(
            ctx.input_path(dir, "docx"),
            PathBuf::from("work/input_-100-42_00000000000000000000000000000000.docx")
        );
        assert_eq!(ctx.to_string(), "[请求 -100-42#00000000]");
    }

    #[test]
    fn test_empty_conversation_id() {
        let ctx = RequestCtx::new("");
        assert_eq!(ctx.conversation_id, "anonymous");
    }
}
