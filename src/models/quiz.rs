use serde::{Deserialize, Serialize};

/// 投票类型
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollKind {
    /// 测验（只有一个正确答案）
    Quiz,
    /// 普通投票
    Regular,
}

impl PollKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PollKind::Quiz => "quiz",
            PollKind::Regular => "regular",
        }
    }
}

/// 投票选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    pub text: String,
}

/// 聊天平台的原生测验对象
///
/// 字段与平台下发的 poll JSON 一致，多余字段会被忽略
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeQuiz {
    #[serde(rename = "type")]
    pub poll_type: PollKind,
    pub question: String,
    pub options: Vec<PollOption>,
    /// 正确选项（从0开始），普通投票没有该字段
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_option_id: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl NativeQuiz {
    pub fn is_quiz(&self) -> bool {
        self.poll_type == PollKind::Quiz
    }
}
