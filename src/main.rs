use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::time::ChronoLocal;

use mc_lang_diff::{
    BatchRunner, LangDiffError, TracingSink, DEFAULT_OUTPUT_DIR, DEFAULT_TARGET_LANG,
    SUPPORTED_LANGUAGES,
};

#[derive(Parser)]
#[command(name = "mc_lang_diff")]
#[command(about = "扫描 Minecraft 模组 jar，找出目标语言缺失的翻译键")]
#[command(version)]
struct Cli {
    /// 存放模组 jar 的目录
    #[arg(required_unless_present_any = ["gui", "list_languages"])]
    input_dir: Option<PathBuf>,

    /// 目标语言代码（默认: ru_ru）
    #[arg(long)]
    lang: Option<String>,

    /// 输出目录
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// 启动图形界面
    #[arg(long)]
    gui: bool,

    /// 列出内置的语言代码
    #[arg(long)]
    list_languages: bool,

    /// 静默模式(仅输出错误)
    #[arg(long, conflicts_with = "verbose")]
    quiet: bool,

    /// 输出调试信息
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn target_lang(&self) -> String {
        self.lang.clone().unwrap_or_else(|| DEFAULT_TARGET_LANG.to_string())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    if cli.list_languages {
        print_languages();
        return ExitCode::SUCCESS;
    }

    if cli.gui {
        return launch_gui(&cli);
    }

    match cli.input_dir.as_ref() {
        Some(input_dir) => run_headless(&cli, input_dir),
        None => {
            tracing::error!("缺少输入目录参数");
            ExitCode::from(2)
        }
    }
}

/// 初始化日志输出（带时间戳和级别）
fn init_logging(cli: &Cli) {
    let level = if cli.quiet {
        Level::ERROR
    } else if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .init();
}

/// 无界面模式：直接运行批处理
fn run_headless(cli: &Cli, input_dir: &PathBuf) -> ExitCode {
    let runner = BatchRunner::new(&cli.output, cli.target_lang());

    match runner.run(input_dir, &TracingSink, None) {
        Ok(summary) => {
            if summary.archives > 0 {
                for line in summary.to_string().lines() {
                    tracing::info!("{}", line);
                }
                tracing::info!("结果已写入: {}", cli.output.display());
            }
            ExitCode::SUCCESS
        }
        // 错误已由批处理器记录
        Err(LangDiffError::NotADirectory(_)) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("批处理失败: {}", e);
            ExitCode::from(1)
        }
    }
}

fn print_languages() {
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("{:<8}{}", code, name);
    }
}

#[cfg(feature = "gui")]
fn launch_gui(cli: &Cli) -> ExitCode {
    let mut config = mc_lang_diff::AppConfig::load();
    if let Some(input_dir) = &cli.input_dir {
        config.input_dir = Some(input_dir.clone());
    }
    if let Some(lang) = &cli.lang {
        config.language = lang.clone();
    }

    match mc_lang_diff::gui::launch(config, mc_lang_diff::AppConfig::default_path(), cli.output.clone()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "gui"))]
fn launch_gui(_cli: &Cli) -> ExitCode {
    tracing::error!("此版本未启用图形界面，请使用 `--features gui` 重新编译");
    ExitCode::from(2)
}
