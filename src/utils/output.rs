//! # 美化输出工具
//!
//! 提供统一的终端状态行样式。诊断信息走 `log`，这里只负责面向用户的输出。
//!
//! ## 依赖关系
//! - 被所有 `commands/` 模块和 `main.rs` 使用
//! - 使用 `colored` crate

use colored::{ColoredString, Colorize};

const RULE_WIDTH: usize = 60;

/// 状态行类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Ok,
    Err,
    Warn,
    Info,
    Done,
}

impl Status {
    fn tag(self) -> ColoredString {
        match self {
            Status::Ok => "[OK]".green().bold(),
            Status::Err => "[ERR]".red().bold(),
            Status::Warn => "[WARN]".yellow().bold(),
            Status::Info => "[*]".blue().bold(),
            Status::Done => "[DONE]".green().bold(),
        }
    }
}

fn print_status(status: Status, msg: &str) {
    match status {
        Status::Err => eprintln!("{} {}", status.tag(), msg),
        _ => println!("{} {}", status.tag(), msg),
    }
}

/// 打印成功消息
pub fn print_success(msg: &str) {
    print_status(Status::Ok, msg);
}

/// 打印错误消息（stderr）
pub fn print_error(msg: &str) {
    print_status(Status::Err, msg);
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    print_status(Status::Warn, msg);
}

/// 打印信息消息
pub fn print_info(msg: &str) {
    print_status(Status::Info, msg);
}

/// 打印完成消息
pub fn print_done(msg: &str) {
    print_status(Status::Done, msg);
}

/// 打印标题栏
pub fn print_header(title: &str) {
    let line = "─".repeat(RULE_WIDTH);
    println!("\n{}", line.dimmed());
    println!("  {}", title.bold());
    println!("{}\n", line.dimmed());
}

/// 打印分隔线
pub fn print_separator() {
    println!("{}", "─".repeat(RULE_WIDTH).dimmed());
}
