use kasane::logging::Logger;
use kasane::{App, Result};

fn print_usage() {
    println!("usage: kasane <file> [--command]");
    println!();
    println!("  --command    command editor variant (rich markdown, line numbers, Esc discards)");
}

fn main() -> Result<()> {
    // 端末描画と衝突しないよう、ログはファイル指定時のみ有効化する
    if let Ok(log_path) = std::env::var("KASANE_LOG") {
        let _ = Logger::for_development()
            .without_stderr()
            .with_file_output(log_path)
            .install();
    }

    let args: Vec<String> = std::env::args().skip(1).collect();

    let command_mode = args.iter().any(|arg| arg == "--command");
    let path = args.iter().find(|arg| !arg.starts_with("--"));

    let Some(path) = path else {
        print_usage();
        return Ok(());
    };

    let mut app = if command_mode {
        App::new_command_editor(path)?
    } else {
        App::new(path)?
    };
    app.run()?;

    Ok(())
}
