//! destroy 命令：选择性删除组件

use std::sync::Arc;

use tracing::info;

use crate::config::DockerConfig;
use crate::domain::DestroyOptions;
use crate::error::KoloResult;
use crate::infra::engine::{DockerCli, EngineClient};
use crate::services::lifecycle::LifecycleController;

pub async fn run(config: DockerConfig, options: DestroyOptions) -> KoloResult<()> {
    info!(
        container = options.container,
        volume = options.volume,
        image = options.image,
        "Removing selected kolo components"
    );

    let engine: Arc<dyn EngineClient> = Arc::new(DockerCli);
    let controller = LifecycleController::new(engine, config);
    controller.destroy(options).await?;

    info!("Selected kolo components removed");
    Ok(())
}
