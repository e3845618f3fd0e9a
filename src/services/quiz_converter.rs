//! 测验转换服务 - 业务能力层
//!
//! 原生测验不经过文本解析，直接构造结构化题目

use crate::error::RequestError;
use crate::models::{CorrectAnswer, NativeQuiz, StructuredQuestion};
use tracing::warn;

/// 把原生测验转换为结构化题目，正确答案按位置标识
///
/// 转发的测验可能不带正确答案，此时照常生成，四个选项都是 incorrect
pub fn quiz_to_question(quiz: &NativeQuiz) -> Result<StructuredQuestion, RequestError> {
    if !quiz.is_quiz() {
        return Err(RequestError::NotAQuiz {
            poll_type: quiz.poll_type.as_str().to_string(),
        });
    }

    let answer = match quiz.correct_option_id {
        Some(index) => CorrectAnswer::ByPosition(index),
        None => {
            warn!("⚠️ 测验没有给出正确答案: {}", quiz.question);
            CorrectAnswer::Unspecified
        }
    };

    let texts: Vec<String> = quiz.options.iter().map(|o| o.text.clone()).collect();
    let option_texts: [String; 4] = texts.try_into().map_err(|texts: Vec<String>| {
        RequestError::InvalidQuiz {
            reason: format!("expected exactly 4 options, found {}", texts.len()),
        }
    })?;

    Ok(StructuredQuestion::new(
        quiz.question.clone(),
        option_texts,
        answer,
        quiz.explanation.clone().unwrap_or_default(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PollKind, PollOption};

    fn quiz(options: &[&str], correct: Option<usize>) -> NativeQuiz {
        NativeQuiz {
            poll_type: PollKind::Quiz,
            question: "Which color is the sky?".to_string(),
            options: options
                .iter()
                .map(|text| PollOption {
                    text: text.to_string(),
                })
                .collect(),
            correct_option_id: correct,
            explanation: None,
        }
    }

    #[test]
    fn test_convert_quiz() {
        let question = quiz_to_question(&quiz(&["Red", "Blue", "Green", "Yellow"], Some(1))).unwrap();

        assert_eq!(question.answer(), &CorrectAnswer::ByPosition(1));
        assert_eq!(question.options()[1].text, "Blue");
        assert_eq!(question.explanation_text(), "");
        assert_eq!(question.correct_position(), Some(1));
    }

    #[test]
    fn test_explanation_is_kept() {
        let mut native = quiz(&["Red", "Blue", "Green", "Yellow"], Some(1));
        native.explanation = Some("Rayleigh scattering".to_string());

        let question = quiz_to_question(&native).unwrap();
        assert_eq!(question.explanation_text(), "Rayleigh scattering");
    }

    #[test]
    fn test_regular_poll_rejected() {
        let mut native = quiz(&["Yes", "No", "Maybe", "Later"], None);
        native.poll_type = PollKind::Regular;

        let err = quiz_to_question(&native).unwrap_err();
        assert!(matches!(err, RequestError::NotAQuiz { ref poll_type } if poll_type == "regular"));
    }

    #[test]
    fn test_wrong_option_count_rejected() {
        let err = quiz_to_question(&quiz(&["Yes", "No"], Some(0))).unwrap_err();
        assert!(err.to_string().contains("found 2"));
    }

    #[test]
    fn test_missing_correct_index_still_converts() {
        let question = quiz_to_question(&quiz(&["a", "b", "c", "d"], None)).unwrap();

        assert_eq!(question.answer(), &CorrectAnswer::Unspecified);
        assert_eq!(question.correct_position(), None);
        assert_eq!(question.options()[3].text, "d");
    }
}
