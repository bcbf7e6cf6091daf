//! # 工具函数模块
//!
//! 提供美化输出、进度条等工具。
//!
//! ## 依赖关系
//! - 被 `commands/` 和 `parsers/` 模块使用
//! - 子模块: output, progress

pub mod output;
pub mod progress;
