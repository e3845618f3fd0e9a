//! 文档生成服务 - 业务能力层
//!
//! 把结构化题目渲染为固定格式的 docx：每道题一张 3 列表格，
//! 行顺序为 Question / Type / Option×4 / Solution / Marks，表格之后空一段

use crate::error::RequestError;
use crate::models::StructuredQuestion;
use docx_rs::{BreakType, Docx, Paragraph, Run, Table, TableCell, TableRow};
use std::io::Cursor;
use std::num::NonZeroUsize;
use std::slice::Chunks;
use tracing::{debug, warn};

pub const QUESTION_TYPE: &str = "multiple_choice";
pub const CORRECT: &str = "correct";
pub const INCORRECT: &str = "incorrect";
/// 答对得分
pub const FULL_MARKS: &str = "4";
/// 答错扣分
pub const NEGATIVE_MARKS: &str = "1";

/// 列宽（twip）：标签列 + 两个内容列
const GRID: [usize; 3] = [1800, 3600, 3600];

/// 表格行类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Question,
    Type,
    Option,
    Solution,
    Marks,
}

impl RowKind {
    pub fn label(self) -> &'static str {
        match self {
            RowKind::Question => "Question",
            RowKind::Type => "Type",
            RowKind::Option => "Option",
            RowKind::Solution => "Solution",
            RowKind::Marks => "Marks",
        }
    }
}

/// 标签列之后的内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowCells {
    /// 两个内容列合并为一格
    Merged(String),
    /// 两个独立的内容格
    Split(String, String),
}

/// 一行表格
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowSpec {
    pub kind: RowKind,
    pub cells: RowCells,
}

impl RowSpec {
    fn merged(kind: RowKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            cells: RowCells::Merged(text.into()),
        }
    }

    fn split(kind: RowKind, left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            kind,
            cells: RowCells::Split(left.into(), right.into()),
        }
    }
}

/// 生成一道题的全部行
///
/// 答案无法对应任何选项时四个选项都标记为 incorrect，只记录警告
pub fn question_rows(question: &StructuredQuestion) -> Vec<RowSpec> {
    let correct = question.correct_position();
    if correct.is_none() {
        warn!(
            "⚠️ 题目的答案 {:?} 无法对应任何选项，全部标记为 incorrect: {}",
            question.answer(),
            question
        );
    }

    let mut rows = Vec::with_capacity(8);
    rows.push(RowSpec::merged(RowKind::Question, question.question_text()));
    rows.push(RowSpec::merged(RowKind::Type, QUESTION_TYPE));

    for (i, option) in question.options().iter().enumerate() {
        let marker = if correct == Some(i) { CORRECT } else { INCORRECT };
        rows.push(RowSpec::split(RowKind::Option, option.text.as_str(), marker));
    }

    rows.push(RowSpec::merged(RowKind::Solution, question.explanation_text()));
    rows.push(RowSpec::split(RowKind::Marks, FULL_MARKS, NEGATIVE_MARKS));
    rows
}

/// docx 生成器
#[derive(Debug, Clone, Copy)]
pub struct DocxRenderer {
    capacity: NonZeroUsize,
}

impl DocxRenderer {
    /// # 参数
    /// - `capacity`: 每个文档最多包含的题目数
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self { capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// 按容量顺序切分题目，最后一组可能不满
    pub fn chunks<'a>(&self, questions: &'a [StructuredQuestion]) -> Chunks<'a, StructuredQuestion> {
        questions.chunks(self.capacity.get())
    }

    /// 给定题目数需要生成的文档数
    pub fn document_count(&self, question_count: usize) -> usize {
        question_count.div_ceil(self.capacity.get())
    }

    /// 把一组题目渲染为一个 docx 文件的字节内容
    pub fn render(&self, chunk: &[StructuredQuestion]) -> Result<Vec<u8>, RequestError> {
        let mut docx = Docx::new();
        for question in chunk {
            docx = docx
                .add_table(build_table(&question_rows(question)))
                // 每张表格后空一段
                .add_paragraph(Paragraph::new());
        }

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(RequestError::render_failed)?;

        let bytes = buffer.into_inner();
        debug!("生成 docx: {} 道题, {} 字节", chunk.len(), bytes.len());
        Ok(bytes)
    }
}

fn build_table(rows: &[RowSpec]) -> Table {
    let rows = rows
        .iter()
        .map(|row| {
            let mut cells = vec![text_cell(row.kind.label())];
            match &row.cells {
                RowCells::Merged(text) => cells.push(text_cell(text).grid_span(2)),
                RowCells::Split(left, right) => {
                    cells.push(text_cell(left));
                    cells.push(text_cell(right));
                }
            }
            TableRow::new(cells)
        })
        .collect();

    Table::new(rows).set_grid(GRID.to_vec())
}

/// 多行文本用换行符分隔
fn text_cell(text: &str) -> TableCell {
    let mut run = Run::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        run = run.add_text(line);
    }
    TableCell::new().add_paragraph(Paragraph::new().add_run(run))
}
