//! 固定的回复文本

/// `/start` 欢迎语
pub fn start_message(questions_per_file: usize) -> String {
    format!(
        "Hello! \u{1F44B}\n\
         Please send me a .txt or .docx file with your questions, or forward a Telegram Quiz.\n\n\
         I will convert them into a structured .docx file for you. \
         If the file has more than {} questions, I'll create multiple documents.",
        questions_per_file
    )
}

/// 收到普通聊天文字时的提示
pub fn guide_message() -> &'static str {
    "Please send your questions as a .txt or .docx file. I no longer process plain text messages."
}

pub fn processing_file(file_name: &str) -> String {
    format!("Processing your file: {} ... \u{23F3}", file_name)
}

pub fn generating(question_count: usize, document_count: usize) -> String {
    format!(
        "\u{2705} Successfully parsed {} question(s). Generating {} DOCX file(s) for you now...",
        question_count, document_count
    )
}

pub fn no_valid_questions() -> &'static str {
    "\u{274C} No valid questions found in the file."
}

pub fn processing_quiz() -> &'static str {
    "Processing quiz... \u{23F3}"
}

pub fn quiz_processed() -> &'static str {
    "\u{2705} Successfully processed the quiz."
}
