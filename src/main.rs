use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use water_treatment_toolbox::app::{self, Cli};

/// 프로그램의 엔트리 포인트. 로그를 설정한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(err) = app::run(cli) {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));
    // 보고서는 stdout으로 나가므로 로그는 stderr로 보낸다.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
