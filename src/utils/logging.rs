/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

/// 记录程序启动信息
///
/// # 参数
/// - `max_concurrent`: 最大并发数
/// - `questions_per_file`: 每个文档的题目容量
pub fn log_startup(max_concurrent: usize, questions_per_file: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 题目文档生成模式");
    info!("📊 最大并发数: {}", max_concurrent);
    info!("📄 每个文档最多 {} 道题", questions_per_file);
    info!("{}", "=".repeat(60));
}

/// 记录请求加载信息
pub fn log_requests_loaded(total: usize, max_concurrent: usize) {
    info!("✓ 共 {} 个待处理的文件", total);
    info!("📋 最多同时处理 {} 个\n", max_concurrent);
}

/// 记录单个请求的结果
///
/// # 参数
/// - `index`: 请求编号（从1开始）
/// - `name`: 文件名
/// - `parsed`: 成功解析的题目数
/// - `failed_blocks`: 解析失败的块数
/// - `documents`: 生成的文档数
pub fn log_request_complete(
    index: usize,
    name: &str,
    parsed: usize,
    failed_blocks: usize,
    documents: usize,
) {
    info!("\n{}", "─".repeat(60));
    info!("[文件 {}] {}", index, name);
    info!(
        "[文件 {}] 题目统计: 成功 {}, 失败 {}, 文档 {}",
        index, parsed, failed_blocks, documents
    );
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `total`: 总数
/// - `output_dir`: 文档输出目录
pub fn print_final_stats(success: usize, failed: usize, total: usize, output_dir: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", success, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n文档已保存至: {}", output_dir);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 80), "short");
        assert_eq!(truncate_text("abcdef", 3), "abc...");
        // 按字符而不是字节截断
        assert_eq!(truncate_text("巴黎是法国的首都", 2), "巴黎...");
    }
}
