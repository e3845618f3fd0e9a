use anyhow::Result;
use clap::{Parser, Subcommand};
use question_docx::{logger, App, Config};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(version, about = "把选择题文件或测验转换为固定格式的 docx", long_about = None)]
struct Cli {
    /// TOML 配置文件；不指定时从环境变量读取
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 转换 .txt / .docx 题目文件
    Convert {
        /// 待转换的文件
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// 声明的 MIME 类型；不指定时按扩展名推断
        #[arg(long)]
        content_type: Option<String>,
        /// 会话ID（用于生成的文件名）
        #[arg(long)]
        conversation: Option<String>,
    },
    /// 转换保存为 JSON 的原生测验
    Quiz {
        /// 测验 JSON 文件
        file: PathBuf,
        /// 会话ID（用于生成的文件名）
        #[arg(long)]
        conversation: Option<String>,
    },
    /// 显示欢迎语
    Start,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::load(cli.config.as_deref())?;

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    let app = App::initialize(config);
    match cli.command {
        Command::Convert {
            files,
            content_type,
            conversation,
        } => {
            let stats = app
                .run_files(files, content_type, conversation.as_deref())
                .await?;
            if stats.failed > 0 {
                std::process::exit(1);
            }
        }
        Command::Quiz { file, conversation } => {
            app.run_quiz(&file, conversation.as_deref()).await?;
        }
        Command::Start => app.greet().await?,
    }

    Ok(())
}
