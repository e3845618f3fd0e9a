use serde::{Deserialize, Serialize};
use std::fmt;

/// 选项编号
///
/// 编号只由选项在题目中的位置决定，与原文里写的 "a)"、"B." 等标记无关
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionId {
    A,
    B,
    C,
    D,
}

impl OptionId {
    /// 固定顺序的全部编号
    pub const ALL: [OptionId; 4] = [OptionId::A, OptionId::B, OptionId::C, OptionId::D];

    pub fn as_str(self) -> &'static str {
        match self {
            OptionId::A => "a",
            OptionId::B => "b",
            OptionId::C => "c",
            OptionId::D => "d",
        }
    }

    /// 在选项列表中的位置（从0开始）
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: OptionId,
    pub text: String,
}

/// 正确答案的标识方式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectAnswer {
    /// 按编号匹配（文本输入，已转为小写）
    ByLetter(String),
    /// 按位置匹配（原生测验，从0开始）
    ByPosition(usize),
    /// 来源没有给出正确答案
    Unspecified,
}

impl CorrectAnswer {
    /// 判断某个选项是否为正确答案
    pub fn matches(&self, position: usize, option: &QuestionOption) -> bool {
        match self {
            CorrectAnswer::ByLetter(token) => option.id.as_str().eq_ignore_ascii_case(token),
            CorrectAnswer::ByPosition(index) => *index == position,
            CorrectAnswer::Unspecified => false,
        }
    }
}

/// 结构化题目
///
/// 构造后不可修改；选项固定为 4 个
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredQuestion {
    question_text: String,
    options: [QuestionOption; 4],
    answer: CorrectAnswer,
    explanation_text: String,
}

impl StructuredQuestion {
    /// 用四个选项文本创建题目，编号按位置分配为 a/b/c/d
    pub fn new(
        question_text: impl Into<String>,
        option_texts: [String; 4],
        answer: CorrectAnswer,
        explanation_text: impl Into<String>,
    ) -> Self {
        let [a, b, c, d] = option_texts;
        let options = [
            QuestionOption { id: OptionId::A, text: a },
            QuestionOption { id: OptionId::B, text: b },
            QuestionOption { id: OptionId::C, text: c },
            QuestionOption { id: OptionId::D, text: d },
        ];
        Self {
            question_text: question_text.into(),
            options,
            answer,
            explanation_text: explanation_text.into(),
        }
    }

    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    pub fn options(&self) -> &[QuestionOption; 4] {
        &self.options
    }

    pub fn answer(&self) -> &CorrectAnswer {
        &self.answer
    }

    pub fn explanation_text(&self) -> &str {
        &self.explanation_text
    }

    /// 正确选项的位置；答案无法对应任何选项时返回 None
    pub fn correct_position(&self) -> Option<usize> {
        self.options
            .iter()
            .enumerate()
            .position(|(i, option)| self.answer.matches(i, option))
    }
}

impl fmt::Display for StructuredQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 截断题干以便显示（最多80个字符）
        let preview = if self.question_text.chars().count() > 80 {
            self.question_text.chars().take(80).collect::<String>() + "..."
        } else {
            self.question_text.clone()
        };

        match self.correct_position() {
            Some(i) => write!(f, "{} [答案: {}]", preview, self.options[i].id),
            None => write!(f, "{} [答案: 未知]", preview),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> [String; 4] {
        ["Red", "Blue", "Green", "Yellow"].map(String::from)
    }

    #[test]
    fn test_ids_are_positional() {
        let q = StructuredQuestion::new("Color?", options(), CorrectAnswer::ByPosition(0), "");
        let ids: Vec<&str> = q.options().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(q.options()[3].text, "Yellow");
    }

    #[test]
    fn test_correct_position_by_letter_ignores_case() {
        let q = StructuredQuestion::new(
            "Color?",
            options(),
            CorrectAnswer::ByLetter("C".to_string()),
            "",
        );
        assert_eq!(q.correct_position(), Some(2));
    }

    #[test]
    fn test_correct_position_by_index() {
        let q = StructuredQuestion::new("Color?", options(), CorrectAnswer::ByPosition(1), "");
        assert_eq!(q.correct_position(), Some(1));
    }

    #[test]
    fn test_unresolvable_answer() {
        let q = StructuredQuestion::new(
            "Color?",
            options(),
            CorrectAnswer::ByLetter("e".to_string()),
            "",
        );
        assert_eq!(q.correct_position(), None);

        let q = StructuredQuestion::new("Color?", options(), CorrectAnswer::ByPosition(7), "");
        assert_eq!(q.correct_position(), None);
        assert!(q.to_string().ends_with("[答案: 未知]"));

        let q = StructuredQuestion::new("Color?", options(), CorrectAnswer::Unspecified, "");
        assert_eq!(q.correct_position(), None);
    }
}
