use clap::Parser;
use water_supply_toolbox::{app, config, ui_cli::Cli};

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 선택된 계산을 실행한다.
fn main() {
    env_logger::init();
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cfg = config::load_or_default(&cli.config)?;
    app::run(cli.command, &cfg)?;
    Ok(())
}
