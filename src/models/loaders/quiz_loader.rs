use crate::models::quiz::NativeQuiz;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 JSON 文件加载原生测验对象
///
/// 文件内容为聊天平台下发的 poll 对象；也接受外层包着 `{"poll": {...}}` 的消息对象
pub async fn load_quiz_json(json_file_path: &Path) -> Result<NativeQuiz> {
    let content = fs::read_to_string(json_file_path)
        .await
        .with_context(|| format!("无法读取JSON文件: {}", json_file_path.display()))?;

    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("无法解析JSON文件: {}", json_file_path.display()))?;

    let poll = match value.get("poll") {
        Some(poll) => poll.clone(),
        None => value,
    };

    let quiz: NativeQuiz = serde_json::from_value(poll)
        .with_context(|| format!("JSON不是有效的测验对象: {}", json_file_path.display()))?;

    tracing::info!(
        "成功加载测验: {} ({} 个选项)",
        json_file_path.file_name().unwrap_or_default().to_string_lossy(),
        quiz.options.len()
    );

    Ok(quiz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PollKind;

    #[tokio::test]
    async fn test_load_bare_poll() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quiz.json");
        std::fs::write(
            &path,
            r#"{"type":"quiz","question":"2+2?","options":[{"text":"3"},{"text":"4"},{"text":"5"},{"text":"22"}],"correct_option_id":1}"#,
        )
        .unwrap();

        let quiz = load_quiz_json(&path).await.unwrap();
        assert_eq!(quiz.poll_type, PollKind::Quiz);
        assert_eq!(quiz.correct_option_id, Some(1));
    }

    #[tokio::test]
    async fn test_load_wrapped_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("message.json");
        std::fs::write(
            &path,
            r#"{"message_id": 7, "poll": {"type":"regular","question":"Lunch?","options":[{"text":"Yes"},{"text":"No"}]}}"#,
        )
        .unwrap();

        let quiz = load_quiz_json(&path).await.unwrap();
        assert_eq!(quiz.poll_type, PollKind::Regular);
    }

    #[tokio::test]
    async fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(load_quiz_json(&path).await.is_err());
    }
}
