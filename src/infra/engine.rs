//! 容器引擎客户端
//!
//! 把引擎 CLI 收窄为一组能力接口：探测、构建、创建、启停、删除、端口查询。
//! 生产实现通过子进程调用 docker 并解析 stdout/退出码；测试使用内存中的
//! 脚本化实现，编排逻辑因此不依赖真实子进程。

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{constants, DockerConfig};
use crate::domain::ComponentKind;
use crate::infra::command::{CommandError, CommandRunner};

/// 引擎调用错误
#[derive(Debug, Error)]
pub enum EngineError {
    /// 无法调用 docker 进程（未安装或超时）
    #[error("Failed to invoke docker: {0}")]
    Invoke(#[from] CommandError),
    /// docker 返回非零退出码
    #[error("docker {command} failed: {stderr}")]
    Failed { command: String, stderr: String },
}

/// docker run 的参数集合
#[derive(Debug, Clone)]
pub struct ContainerSpec {
    pub image: String,
    pub name: String,
    pub volume: String,
    pub data_path: String,
    pub ssh_port: u16,
    pub web_port: u16,
}

impl ContainerSpec {
    pub fn from_config(config: &DockerConfig) -> Self {
        Self {
            image: config.image_name.clone(),
            name: config.container_name.clone(),
            volume: config.volume_name.clone(),
            data_path: config.data_path.clone(),
            ssh_port: config.ssh_port,
            web_port: config.web_port,
        }
    }
}

/// 容器引擎能力集
///
/// 成功时返回命令的原始 stdout，解释工作留给调用方。
#[async_trait]
pub trait EngineClient: Send + Sync {
    /// `docker --version`
    async fn version(&self) -> Result<String, EngineError>;

    /// `docker info`，验证守护进程可达
    async fn daemon_info(&self) -> Result<String, EngineError>;

    /// `docker <kind> inspect <name>`，非零退出码表示目标不存在
    async fn inspect(&self, kind: ComponentKind, name: &str) -> Result<String, EngineError>;

    /// `docker build -t <image> -f <dockerfile> <context>`
    async fn build_image(
        &self,
        image: &str,
        dockerfile: &Path,
        context: &Path,
    ) -> Result<String, EngineError>;

    /// `docker volume create <name>`，引擎层面幂等
    async fn create_volume(&self, name: &str) -> Result<String, EngineError>;

    /// `docker run`：GPU 直通、固定端口映射、卷挂载、分离交互模式
    async fn run_container(&self, spec: &ContainerSpec) -> Result<String, EngineError>;

    /// `docker start <name>`
    async fn start_container(&self, name: &str) -> Result<String, EngineError>;

    /// `docker stop <name>`
    async fn stop_container(&self, name: &str) -> Result<String, EngineError>;

    /// `docker rm -f <name>`
    async fn remove_container(&self, name: &str) -> Result<String, EngineError>;

    /// `docker volume rm <name>`
    async fn remove_volume(&self, name: &str) -> Result<String, EngineError>;

    /// `docker rmi <name>`
    async fn remove_image(&self, name: &str) -> Result<String, EngineError>;

    /// `docker port <name>`，原始端口映射文本
    async fn port_mappings(&self, name: &str) -> Result<String, EngineError>;
}

/// 生产实现：调用 docker CLI
pub struct DockerCli;

impl DockerCli {
    async fn run(&self, args: &[&str], timeout: Duration) -> Result<String, EngineError> {
        let output = CommandRunner::run("docker", args, timeout).await?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(EngineError::Failed {
                command: args.join(" "),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }

    fn engine_timeout() -> Duration {
        Duration::from_secs(constants::ENGINE_TIMEOUT_SECS)
    }

    /// `docker exec -it <name> <command...>`，继承调用方终端
    ///
    /// 交互式会话不经过 CommandRunner：不捕获输出、不设超时。
    pub async fn exec_interactive(
        &self,
        container: &str,
        command: &[&str],
    ) -> std::io::Result<std::process::ExitStatus> {
        let mut args = vec!["exec", "-it", container];
        args.extend_from_slice(command);

        tokio::process::Command::new("docker").args(&args).status().await
    }
}

#[async_trait]
impl EngineClient for DockerCli {
    async fn version(&self) -> Result<String, EngineError> {
        self.run(&["--version"], Self::engine_timeout())
            .await
            .map(|out| out.trim().to_string())
    }

    async fn daemon_info(&self) -> Result<String, EngineError> {
        self.run(&["info"], Self::engine_timeout()).await
    }

    async fn inspect(&self, kind: ComponentKind, name: &str) -> Result<String, EngineError> {
        self.run(&[kind.as_str(), "inspect", name], Self::engine_timeout()).await
    }

    async fn build_image(
        &self,
        image: &str,
        dockerfile: &Path,
        context: &Path,
    ) -> Result<String, EngineError> {
        let dockerfile = dockerfile.display().to_string();
        let context = context.display().to_string();
        let args = ["build", "-t", image, "-f", &dockerfile, &context];

        self.run(&args, Duration::from_secs(constants::BUILD_TIMEOUT_SECS)).await
    }

    async fn create_volume(&self, name: &str) -> Result<String, EngineError> {
        self.run(&["volume", "create", name], Self::engine_timeout()).await
    }

    async fn run_container(&self, spec: &ContainerSpec) -> Result<String, EngineError> {
        let ssh_mapping = format!("{}:{}", spec.ssh_port, constants::CONTAINER_SSH_PORT);
        let web_mapping = format!("{}:{}", spec.web_port, constants::CONTAINER_WEB_PORT);
        let volume_mapping = format!("{}:{}", spec.volume, spec.data_path);

        let args = [
            "run",
            "--gpus",
            "all",
            "-p",
            &ssh_mapping,
            "-p",
            &web_mapping,
            "-v",
            &volume_mapping,
            "-it",
            "-d",
            "--name",
            &spec.name,
            &spec.image,
        ];

        self.run(&args, Self::engine_timeout()).await
    }

    async fn start_container(&self, name: &str) -> Result<String, EngineError> {
        self.run(&["start", name], Self::engine_timeout()).await
    }

    async fn stop_container(&self, name: &str) -> Result<String, EngineError> {
        self.run(&["stop", name], Self::engine_timeout()).await
    }

    async fn remove_container(&self, name: &str) -> Result<String, EngineError> {
        self.run(&["rm", "-f", name], Self::engine_timeout()).await
    }

    async fn remove_volume(&self, name: &str) -> Result<String, EngineError> {
        self.run(&["volume", "rm", name], Self::engine_timeout()).await
    }

    async fn remove_image(&self, name: &str) -> Result<String, EngineError> {
        self.run(&["rmi", name], Self::engine_timeout()).await
    }

    async fn port_mappings(&self, name: &str) -> Result<String, EngineError> {
        self.run(&["port", name], Self::engine_timeout()).await
    }
}
