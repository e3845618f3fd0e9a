//! 题目解析服务 - 业务能力层
//!
//! 把一段纯文本切分成题目块，并把每个块解析为 [`StructuredQuestion`]

use crate::error::ParseError;
use crate::models::{CorrectAnswer, StructuredQuestion};
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// 一道题至少需要的非空行数：1 行题干 + 4 行选项
const MIN_LINES: usize = 5;
const CORRECT_OPTION_LITERAL: &str = "Correct Option:";

static BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("block separator regex"));
static CORRECT_OPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Correct Option:\s*(\S+)").expect("correct option regex"));
static QUESTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:\d+\.|Q\.)\s*").expect("question marker regex"));
static OPTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\d]+[.)]\s*").expect("option marker regex"));

/// 解析单个题目块
///
/// # 返回
/// - `Ok(None)`: 空白块，调用方应直接跳过
/// - `Ok(Some(q))`: 解析成功
/// - `Err(e)`: 块内容不完整
pub fn parse_block(block: &str) -> Result<Option<StructuredQuestion>, ParseError> {
    let block = block.trim();
    if block.is_empty() {
        return Ok(None);
    }

    let lines: Vec<&str> = block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.len() < MIN_LINES {
        return Err(ParseError::IncompleteBlock {
            found_lines: lines.len(),
        });
    }

    let correct_token = CORRECT_OPTION
        .captures(block)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .ok_or(ParseError::MissingCorrectOption)?;

    let question_text = QUESTION_MARKER.replace(lines[0], "").into_owned();
    let option_texts: [String; 4] =
        std::array::from_fn(|i| OPTION_MARKER.replace(lines[i + 1], "").into_owned());

    let explanation_text = lines[MIN_LINES..]
        .iter()
        .filter(|line| !line.contains(CORRECT_OPTION_LITERAL))
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string();

    Ok(Some(StructuredQuestion::new(
        question_text,
        option_texts,
        CorrectAnswer::ByLetter(correct_token),
        explanation_text,
    )))
}

/// 按空行切分题目块
///
/// 返回的块中可能包含空白块，由 [`parse_block`] 负责跳过
pub fn split_blocks(content: &str) -> Vec<&str> {
    BLOCK_SEPARATOR.split(content.trim()).collect()
}

/// 解析失败的题目块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockFailure {
    /// 在输入中的位置（从1开始，空白块不计数）
    pub position: usize,
    pub error: ParseError,
}

impl fmt::Display for BlockFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ERROR IN QUESTION #{}\nReason: {}",
            self.position, self.error
        )
    }
}

/// 整段文本的解析结果
#[derive(Debug, Default)]
pub struct ParseReport {
    pub questions: Vec<StructuredQuestion>,
    pub failures: Vec<BlockFailure>,
}

impl ParseReport {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty() && self.failures.is_empty()
    }

    /// 汇总所有失败信息，没有失败时返回 None
    pub fn failure_summary(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let details = self
            .failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n\n");
        Some(format!("Found some issues in your file:\n\n{}", details))
    }
}

/// 解析整段文本
///
/// 单个块的错误不会中断处理，而是记录在报告中
pub fn parse_document(content: &str) -> ParseReport {
    let mut report = ParseReport::default();
    let mut position = 0;

    for block in split_blocks(content) {
        if block.trim().is_empty() {
            continue;
        }
        position += 1;

        match parse_block(block) {
            Ok(Some(question)) => report.questions.push(question),
            Ok(None) => {}
            Err(error) => report.failures.push(BlockFailure { position, error }),
        }
    }

    report
}
