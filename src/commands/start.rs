//! start 命令：启动容器并做健康检查

use std::sync::Arc;

use tracing::info;

use crate::commands::healthcheck;
use crate::config::{constants, DockerConfig};
use crate::error::{KoloError, KoloResult};
use crate::infra::engine::{DockerCli, EngineClient};
use crate::services::lifecycle::LifecycleController;
use crate::services::probe::EngineProbe;

pub async fn run(config: DockerConfig) -> KoloResult<()> {
    let engine: Arc<dyn EngineClient> = Arc::new(DockerCli);

    let probe = EngineProbe::new(Arc::clone(&engine), config.clone());
    let preflight = probe.check_engine_and_container().await;
    if !preflight.engine_running {
        return Err(KoloError::EngineUnavailable { install_url: constants::INSTALL_URL });
    }
    if !preflight.container_exists {
        return Err(KoloError::ContainerMissing);
    }

    let controller = LifecycleController::new(Arc::clone(&engine), config.clone());
    controller.start().await?;
    info!(container = %config.container_name, "Container started");

    healthcheck::poll_and_report(engine, config).await
}
