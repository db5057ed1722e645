//! 生命周期控制
//!
//! 启动、停止与选择性销毁。容器删除前先做存在性检查；卷和镜像的
//! 删除是尽力而为的清理，目标不存在不算失败。

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::DockerConfig;
use crate::domain::{ComponentKind, DestroyOptions};
use crate::error::{KoloError, KoloResult};
use crate::infra::engine::EngineClient;
use crate::services::probe::EngineProbe;

/// 生命周期控制器
pub struct LifecycleController {
    engine: Arc<dyn EngineClient>,
    probe: EngineProbe,
    config: DockerConfig,
}

impl LifecycleController {
    pub fn new(engine: Arc<dyn EngineClient>, config: DockerConfig) -> Self {
        let probe = EngineProbe::new(Arc::clone(&engine), config.clone());
        Self { engine, probe, config }
    }

    /// 启动容器
    pub async fn start(&self) -> KoloResult<String> {
        self.engine
            .start_container(&self.config.container_name)
            .await
            .map(|out| out.trim().to_string())
            .map_err(|e| KoloError::ContainerStart(e.to_string()))
    }

    /// 停止容器
    pub async fn stop(&self) -> KoloResult<String> {
        self.engine
            .stop_container(&self.config.container_name)
            .await
            .map(|out| out.trim().to_string())
            .map_err(|e| KoloError::ContainerStop(e.to_string()))
    }

    /// 按选择删除组件，顺序固定：容器、卷、镜像
    ///
    /// 容器只在被选中且确实存在时删除，删除失败会中止后续步骤；
    /// 卷/镜像的删除失败只记录警告。
    pub async fn destroy(&self, options: DestroyOptions) -> KoloResult<()> {
        if options.container {
            let exists = self
                .probe
                .component_exists(ComponentKind::Container, &self.config.container_name)
                .await;
            if exists {
                self.engine
                    .remove_container(&self.config.container_name)
                    .await
                    .map_err(|e| KoloError::Destroy(e.to_string()))?;
                info!(container = %self.config.container_name, "Container removed");
            } else {
                info!(
                    container = %self.config.container_name,
                    "Container does not exist, nothing to remove"
                );
            }
        }

        if options.volume {
            match self.engine.remove_volume(&self.config.volume_name).await {
                Ok(_) => info!(volume = %self.config.volume_name, "Volume removed"),
                Err(error) => {
                    warn!(volume = %self.config.volume_name, %error, "Volume removal failed, ignoring")
                }
            }
        }

        if options.image {
            match self.engine.remove_image(&self.config.image_name).await {
                Ok(_) => info!(image = %self.config.image_name, "Image removed"),
                Err(error) => {
                    warn!(image = %self.config.image_name, %error, "Image removal failed, ignoring")
                }
            }
        }

        Ok(())
    }
}
