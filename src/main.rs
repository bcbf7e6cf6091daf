//! # aimskit - FHI-aims 能带计算辅助工具
//!
//! 将两个 FHI-aims 能带辅助脚本用 Rust 重构，统一成单一可执行文件。
//!
//! ## 子命令
//! - `grid`   - 从 band*.out 提取 k 点与 HOMO/LUMO 本征值，写出 .grd 网格文件
//! - `klines` - 在高对称点附近生成稀疏 + 加密两层 `output band` 指令
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── parsers/   (band 文件与 aims.out 解析器)
//!   │     ├── band/      (HOMO/LUMO 提取与网格写出)
//!   │     ├── kpath/     (k 线生成与预览图)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod band;
mod cli;
mod commands;
mod error;
mod kpath;
mod models;
mod parsers;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
