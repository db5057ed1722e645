//! ssh / ollama 命令：进入容器的交互式透传
//!
//! 两者都是 `docker exec -it` 的薄封装，终端直接交给子进程。

use std::sync::Arc;

use crate::config::{constants, DockerConfig};
use crate::error::{KoloError, KoloResult};
use crate::infra::engine::{DockerCli, EngineClient};
use crate::services::probe::EngineProbe;

/// 进入容器 shell
pub async fn ssh(config: DockerConfig) -> KoloResult<()> {
    let cli = DockerCli;
    preflight(&config).await?;

    let status = cli.exec_interactive(&config.container_name, &["/bin/bash"]).await?;
    exit_with(status)
}

/// 在容器内执行 ollama，参数原样透传
pub async fn ollama(config: DockerConfig, args: &[String]) -> KoloResult<()> {
    let cli = DockerCli;
    preflight(&config).await?;

    let mut command: Vec<&str> = vec!["ollama"];
    command.extend(args.iter().map(String::as_str));

    let status = cli.exec_interactive(&config.container_name, &command).await?;
    exit_with(status)
}

async fn preflight(config: &DockerConfig) -> KoloResult<()> {
    let probe = EngineProbe::new(
        Arc::new(DockerCli) as Arc<dyn EngineClient>,
        config.clone(),
    );
    let preflight = probe.check_engine_and_container().await;

    if !preflight.engine_running {
        return Err(KoloError::EngineUnavailable { install_url: constants::INSTALL_URL });
    }
    if !preflight.container_exists {
        return Err(KoloError::ContainerMissing);
    }
    Ok(())
}

fn exit_with(status: std::process::ExitStatus) -> KoloResult<()> {
    if status.success() {
        Ok(())
    } else {
        // 透传子进程的退出码
        std::process::exit(status.code().unwrap_or(1));
    }
}
