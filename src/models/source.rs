use phf::phf_map;
use std::path::Path;

/// 上传文件的来源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// 纯文本 (.txt)
    PlainText,
    /// Word 文档 (.docx)
    RichText,
}

pub const PLAIN_TEXT_MIME: &str = "text/plain";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

static MIME_TYPES: phf::Map<&'static str, SourceKind> = phf_map! {
    "text/plain" => SourceKind::PlainText,
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => SourceKind::RichText,
};

static EXTENSIONS: phf::Map<&'static str, SourceKind> = phf_map! {
    "txt" => SourceKind::PlainText,
    "docx" => SourceKind::RichText,
};

impl SourceKind {
    /// 根据声明的 MIME 类型解析，忽略大小写和 "; charset=..." 之类的参数
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        MIME_TYPES.get(essence.as_str()).copied()
    }

    /// 根据文件扩展名推断 MIME 类型（本地文件没有声明类型时使用）
    pub fn guess_content_type(path: &Path) -> Option<&'static str> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        EXTENSIONS.get(ext.as_str()).map(|kind| kind.content_type())
    }

    pub fn content_type(self) -> &'static str {
        match self {
            SourceKind::PlainText => PLAIN_TEXT_MIME,
            SourceKind::RichText => DOCX_MIME,
        }
    }

    /// 保存上传文件时使用的扩展名
    pub fn extension(self) -> &'static str {
        match self {
            SourceKind::PlainText => "txt",
            SourceKind::RichText => "docx",
        }
    }
}
