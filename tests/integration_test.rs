use docx_rs::{read_docx, DocumentChild, Docx, Paragraph, Run};
use question_docx::infrastructure::{BytesUpload, LocalFileUpload, MemoryDelivery, Reply};
use question_docx::models::source::{DOCX_MIME, PLAIN_TEXT_MIME};
use question_docx::{logger, Config, DocumentFlow, RequestCtx, RequestError};
use std::io::Cursor;
use std::path::Path;
use tokio_test::assert_ok;

fn config(work_dir: &Path, questions_per_file: usize) -> Config {
    Config {
        questions_per_file,
        work_dir: work_dir.to_path_buf(),
        ..Config::default()
    }
}

fn question_block(n: usize) -> String {
    format!(
        "{}. What is {} + {}?\n\
         a) {}\n\
         b) {}\n\
         c) {}\n\
         d) {}\n\
         Correct Option: B\n\
         Add the two numbers.",
        n,
        n,
        n,
        n,
        n * 2,
        n * 3,
        n * 4
    )
}

fn documents(replies: Vec<Reply>) -> Vec<(String, Vec<u8>)> {
    replies
        .into_iter()
        .filter_map(|reply| match reply {
            Reply::Document { file_name, bytes } => Some((file_name, bytes)),
            Reply::Text(_) => None,
        })
        .collect()
}

fn table_count(bytes: &[u8]) -> usize {
    let docx = read_docx(bytes).expect("生成的 docx 应该能被读取");
    docx.document
        .children
        .iter()
        .filter(|child| matches!(child, DocumentChild::Table(_)))
        .count()
}

fn leftovers(dir: &Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[tokio::test]
async fn test_plain_text_batched_into_documents() {
    logger::init(false);
    let work = tempfile::tempdir().unwrap();
    let flow = DocumentFlow::new(&config(work.path(), 30));

    // 61 道题 → 30 + 30 + 1
    let content = (1..=61).map(question_block).collect::<Vec<_>>().join("\n\n\n");
    let upload = BytesUpload::new("maths.txt", Some(PLAIN_TEXT_MIME.to_string()), content);
    let delivery = MemoryDelivery::new();

    let summary = assert_ok!(
        flow.handle_document(&RequestCtx::new("4242"), &upload, &delivery)
            .await
    );
    assert_eq!(summary.parsed, 61);
    assert_eq!(summary.documents, 3);

    let docs = documents(delivery.take());
    let counts: Vec<usize> = docs.iter().map(|(_, bytes)| table_count(bytes)).collect();
    assert_eq!(counts, vec![30, 30, 1]);
    for (i, (name, _)) in docs.iter().enumerate() {
        assert!(name.starts_with("questions_4242_"));
        assert!(name.ends_with(&format!("_part_{}.docx", i + 1)));
    }

    assert_eq!(leftovers(work.path()), 0);
}

#[tokio::test]
async fn test_docx_upload_is_parsed_like_text() {
    let work = tempfile::tempdir().unwrap();
    let flow = DocumentFlow::new(&config(work.path(), 30));

    let mut docx = Docx::new();
    for line in [
        "Q. What is the capital of France?",
        "a) Berlin",
        "b) Madrid",
        "c) Paris",
        "d) Rome",
        "Correct Option: C",
        "",
        "Q. Only a stem",
        "a) one",
    ] {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)));
    }
    let mut buffer = Cursor::new(Vec::new());
    docx.build().pack(&mut buffer).unwrap();

    let upload = BytesUpload::new("quiz.docx", Some(DOCX_MIME.to_string()), buffer.into_inner());
    let delivery = MemoryDelivery::new();

    let summary = flow
        .handle_document(&RequestCtx::new("docx"), &upload, &delivery)
        .await
        .unwrap();
    assert_eq!(summary.parsed, 1);
    assert_eq!(summary.failed_blocks, 1);

    let replies = delivery.take();
    assert!(replies.contains(&Reply::Text(
        "Found some issues in your file:\n\nERROR IN QUESTION #2\nReason: The question block is incomplete. It must have a question and at least four options.".to_string()
    )));
    let docs = documents(replies);
    assert_eq!(docs.len(), 1);
    assert_eq!(table_count(&docs[0].1), 1);
}

#[tokio::test]
async fn test_concurrent_requests_do_not_collide() {
    let work = tempfile::tempdir().unwrap();
    let flow = DocumentFlow::new(&config(work.path(), 1));
    let content = (1..=3).map(question_block).collect::<Vec<_>>().join("\n\n");

    let first = MemoryDelivery::new();
    let second = MemoryDelivery::new();
    let upload = BytesUpload::new("same.txt", Some(PLAIN_TEXT_MIME.to_string()), content);

    // 同一会话同时发来两次相同的文件
    let ctx_a = RequestCtx::new("same-chat");
    let ctx_b = RequestCtx::new("same-chat");
    let (a, b) = tokio::join!(
        flow.handle_document(&ctx_a, &upload, &first),
        flow.handle_document(&ctx_b, &upload, &second),
    );
    assert_eq!(a.unwrap().documents, 3);
    assert_eq!(b.unwrap().documents, 3);

    let names_a: Vec<String> = documents(first.take()).into_iter().map(|(n, _)| n).collect();
    let names_b: Vec<String> = documents(second.take()).into_iter().map(|(n, _)| n).collect();
    assert_eq!(names_a.len(), 3);
    assert!(names_a.iter().all(|name| !names_b.contains(name)));
    assert_eq!(leftovers(work.path()), 0);
}

#[tokio::test]
async fn test_local_file_without_known_type() {
    let work = tempfile::tempdir().unwrap();
    let input = work.path().join("notes.md");
    std::fs::write(&input, question_block(1)).unwrap();

    let flow = DocumentFlow::new(&config(work.path(), 30));
    let upload = LocalFileUpload::new(&input, None);
    let delivery = MemoryDelivery::new();

    let err = flow
        .handle_document(&RequestCtx::new("local"), &upload, &delivery)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RequestError::UnsupportedContentType { ref content_type } if content_type == "unknown"
    ));
    assert!(documents(delivery.take()).is_empty());
    // 只剩下输入文件本身
    assert_eq!(leftovers(work.path()), 1);
}
