use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// 程序配置文件
///
/// 启动时构造一次，显式传给各层；不存在任何全局可变状态
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 每个 docx 文件最多包含的题目数量
    pub questions_per_file: usize,
    /// 同时处理的请求数量
    pub max_concurrent_requests: usize,
    /// 临时文件所在目录（每个请求在其中创建独立子目录）
    pub work_dir: PathBuf,
    /// 生成文档的投递目录
    pub output_dir: PathBuf,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 未指定会话时使用的会话ID
    pub default_conversation_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            questions_per_file: 30,
            max_concurrent_requests: 4,
            work_dir: std::env::temp_dir(),
            output_dir: PathBuf::from("output_docx"),
            verbose_logging: false,
            default_conversation_id: "local".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            questions_per_file: std::env::var("QUESTIONS_PER_FILE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.questions_per_file),
            max_concurrent_requests: std::env::var("MAX_CONCURRENT_REQUESTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_requests),
            work_dir: std::env::var("WORK_DIR").map(PathBuf::from).unwrap_or(default.work_dir),
            output_dir: std::env::var("OUTPUT_DIR").map(PathBuf::from).unwrap_or(default.output_dir),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            default_conversation_id: std::env::var("CONVERSATION_ID").unwrap_or(default.default_conversation_id),
        }
    }

    /// 从 TOML 文件加载配置，缺省的字段使用默认值
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 加载并校验配置
    ///
    /// 指定了配置文件时读取文件，否则读取环境变量
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.questions_per_file == 0 {
            return Err(ConfigError::invalid_value(
                "questions_per_file",
                self.questions_per_file,
                "每个文件至少包含 1 道题",
            ));
        }
        if self.max_concurrent_requests == 0 {
            return Err(ConfigError::invalid_value(
                "max_concurrent_requests",
                self.max_concurrent_requests,
                "并发数至少为 1",
            ));
        }
        if self.default_conversation_id.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "default_conversation_id",
                &self.default_conversation_id,
                "会话ID不能为空",
            ));
        }
        Ok(())
    }

    /// 每个文件的题目容量
    pub fn capacity(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.questions_per_file).unwrap_or(NonZeroUsize::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.questions_per_file, 30);
        assert_eq!(config.capacity().get(), 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_file_with_partial_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "questions_per_file = 10").unwrap();
        writeln!(file, "output_dir = \"out\"").unwrap();

        let config = Config::from_toml_file(file.path()).unwrap();
        assert_eq!(config.questions_per_file, 10);
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.max_concurrent_requests, 4);
        assert_eq!(config.default_conversation_id, "local");
    }

    #[test]
    fn test_from_toml_file_invalid() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "questions_per_file = \"many\"").unwrap();

        let err = Config::from_toml_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseFailed { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = Config {
            questions_per_file: 0,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("questions_per_file"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Some(Path::new("/definitely/not/here.toml")));
        assert!(result.is_err());
    }
}
