use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 题目块解析错误
    #[error("解析错误: {0}")]
    Parse(#[from] ParseError),
    /// 单个请求处理错误
    #[error("请求错误: {0}")]
    Request(#[from] RequestError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 题目块解析错误
///
/// 只影响当前题目块，调用方记录后继续处理剩余的块
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// 非空行少于 5 行（1 行题干 + 4 行选项）
    #[error("The question block is incomplete. It must have a question and at least four options.")]
    IncompleteBlock { found_lines: usize },
    /// 缺少 "Correct Option: <id>" 行
    #[error("The 'Correct Option: [id]' line is missing.")]
    MissingCorrectOption,
}

/// 请求级错误
///
/// 对整个请求是致命的：出现时不生成任何文档
#[derive(Debug, Error)]
pub enum RequestError {
    /// 声明的文件类型既不是纯文本也不是 docx
    #[error("不支持的文件类型: {content_type}")]
    UnsupportedContentType { content_type: String },
    /// 读取或解码上传文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailure {
        path: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 普通投票而不是测验
    #[error("不是测验 (类型: {poll_type})")]
    NotAQuiz { poll_type: String },
    /// 测验数据不满足四选一的结构
    #[error("测验数据无效: {reason}")]
    InvalidQuiz { reason: String },
    /// 生成 docx 失败
    #[error("生成文档失败: {source}")]
    Render {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 临时文件的创建或写入失败
    #[error("临时文件操作失败 ({path}): {source}")]
    Artifact {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 回复发送失败
    #[error("发送回复失败: {source}")]
    Delivery {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl RequestError {
    /// 返回给用户看的错误描述
    pub fn user_message(&self) -> String {
        match self {
            RequestError::UnsupportedContentType { content_type } => format!(
                "\u{274C} Unsupported file type ({}). Please send a .txt or .docx file.",
                content_type
            ),
            RequestError::ReadFailure { source, .. } => {
                format!("\u{1F198} Error reading file: {}", source)
            }
            RequestError::NotAQuiz { .. } => {
                "This looks like a regular poll, not a quiz. I can only process quizzes."
                    .to_string()
            }
            RequestError::InvalidQuiz { reason } => {
                format!("\u{1F198} This quiz cannot be converted: {}", reason)
            }
            RequestError::Render { .. } | RequestError::Artifact { .. } => {
                "\u{1F198} Something went wrong while generating your document.".to_string()
            }
            RequestError::Delivery { .. } => "\u{1F198} Failed to send the result.".to_string(),
        }
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置值不合法
    #[error("配置项 {key} 的值 '{value}' 不合法: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
    /// 读取配置文件失败
    #[error("无法读取配置文件 {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl RequestError {
    /// 创建文件读取错误
    pub fn read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RequestError::ReadFailure {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// 创建文档生成错误
    pub fn render_failed(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        RequestError::Render {
            source: Box::new(source),
        }
    }

    /// 创建临时文件错误
    pub fn artifact_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        RequestError::Artifact {
            path: path.into(),
            source,
        }
    }
}

impl ConfigError {
    pub fn invalid_value(
        key: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
