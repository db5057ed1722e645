//! 命令层
//!
//! 每个子命令一个入口函数：组装组件、调用核心逻辑、把报告序列化到
//! stdout。不做表格渲染、彩色输出和交互确认。

pub mod destroy;
pub mod dockerfile;
pub mod exec;
pub mod healthcheck;
pub mod init;
pub mod start;
pub mod stop;

use serde::Serialize;

use crate::error::KoloResult;

/// 将报告以 JSON 输出到 stdout
pub(crate) fn print_json<T: Serialize>(value: &T) -> KoloResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
