use chrono::Local;
use env_logger::Builder;
use log::{Level, LevelFilter};
use std::io::{IsTerminal, Write};

/// 窗口相关的库日志很多，只保留警告以上
const NOISY_MODULES: &[&str] = &["winit", "eframe", "egui_glow", "egui_winit", "wgpu", "naga"];

const RESET: &str = "\x1b[0m";

fn level_color(level: Level) -> &'static str {
    match level {
        Level::Error => "\x1b[31m\x1b[1m", // 红色
        Level::Warn => "\x1b[33m\x1b[1m",  // 黄色
        Level::Info => "\x1b[32m\x1b[1m",  // 绿色
        Level::Debug => "\x1b[36m\x1b[1m", // 青色
        Level::Trace => "\x1b[90m\x1b[1m", // 灰色
    }
}

/// 日志头：时间、级别、源码位置。输出被重定向时不带颜色
fn format_prefix(time: &str, level: Level, file: &str, line: u32, colored: bool) -> String {
    if colored {
        format!("{}{} {}{} [{}:{}]", time, level_color(level), level, RESET, file, line)
    } else {
        format!("{} {} [{}:{}]", time, level, file, line)
    }
}

pub fn init_logger() {
    let colored = std::io::stderr().is_terminal();
    let mut builder = Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    for module in NOISY_MODULES {
        builder.filter_module(module, LevelFilter::Warn);
    }

    builder
        .format(move |buf, record| {
            let time = Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
            let prefix = format_prefix(
                &time,
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                colored,
            );
            writeln!(buf, "{} {}", prefix, record.args())
        })
        .init();
}
