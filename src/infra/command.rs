//! 命令执行器
//!
//! 提供统一的命令执行接口，支持：
//! - stdout/stderr 捕获
//! - 超时控制

use std::process::Output;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

/// 命令执行器
pub struct CommandRunner;

/// 命令执行错误
#[derive(Debug, Error)]
pub enum CommandError {
    /// 命令启动失败
    #[error("Failed to spawn command: {0}")]
    SpawnFailed(#[source] std::io::Error),
    /// 命令超时
    #[error("Command timed out")]
    Timeout,
}

impl CommandRunner {
    /// 执行命令并捕获输出
    ///
    /// 退出码不在这里判断，由调用方根据 `Output::status` 解释：
    /// 存在性探测把非零退出码当"不存在"，变更操作把它当失败。
    pub async fn run(
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> Result<Output, CommandError> {
        let child = Command::new(program).args(args).output();

        tokio::select! {
            result = child => {
                result.map_err(CommandError::SpawnFailed)
            }
            _ = tokio::time::sleep(timeout) => {
                Err(CommandError::Timeout)
            }
        }
    }
}
