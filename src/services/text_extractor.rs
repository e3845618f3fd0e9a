//! 文本提取服务 - 业务能力层
//!
//! 从上传文件的字节内容中取出纯文本，交给题目解析

use crate::error::RequestError;
use crate::models::SourceKind;
use docx_rs::{read_docx, DocumentChild, InsertChild, ParagraphChild, Run, RunChild};
use std::io;

/// 按文件类型提取文本
///
/// # 参数
/// - `kind`: 文件类型
/// - `bytes`: 文件内容
/// - `path`: 文件路径（仅用于错误信息）
pub fn extract_text(kind: SourceKind, bytes: &[u8], path: &str) -> Result<String, RequestError> {
    match kind {
        SourceKind::PlainText => extract_plain_text(bytes, path),
        SourceKind::RichText => extract_docx_text(bytes, path),
    }
}

/// 纯文本按 UTF-8 原样解码
pub fn extract_plain_text(bytes: &[u8], path: &str) -> Result<String, RequestError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| RequestError::read_failed(path, e))
}

/// 按文档顺序拼接每个段落的文本，段落之间用换行分隔
///
/// 只读取正文中的顶层段落，表格内的文字不参与。
/// 段落内的软换行（Shift+Enter）同样视为换行
pub fn extract_docx_text(bytes: &[u8], path: &str) -> Result<String, RequestError> {
    let docx = read_docx(bytes).map_err(|e| {
        RequestError::read_failed(path, io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
    })?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(paragraph_text(&paragraph.children)),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn paragraph_text(children: &[ParagraphChild]) -> String {
    let mut text = String::new();
    push_paragraph_children(children, &mut text);
    text
}

fn push_paragraph_children(children: &[ParagraphChild], text: &mut String) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(run, text),
            ParagraphChild::Hyperlink(link) => push_paragraph_children(&link.children, text),
            // 修订模式下插入的文字
            ParagraphChild::Insert(insert) => {
                for insert_child in &insert.children {
                    if let InsertChild::Run(run) = insert_child {
                        push_run(run, text);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(run: &Run, text: &mut String) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}
