//! stop 命令：停止容器

use std::sync::Arc;

use tracing::info;

use crate::config::DockerConfig;
use crate::error::KoloResult;
use crate::infra::engine::{DockerCli, EngineClient};
use crate::services::lifecycle::LifecycleController;

pub async fn run(config: DockerConfig) -> KoloResult<()> {
    let engine: Arc<dyn EngineClient> = Arc::new(DockerCli);

    let controller = LifecycleController::new(engine, config.clone());
    controller.stop().await?;
    info!(container = %config.container_name, "Container stopped");

    Ok(())
}
