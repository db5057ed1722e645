//! 引擎与组件探测
//!
//! 只读探测：守护进程可用性、镜像/卷/容器存在性。探测从不返回错误，
//! "不存在"是正常结果而不是异常。

use std::sync::Arc;

use tracing::debug;

use crate::config::DockerConfig;
use crate::domain::{ComponentKind, ComponentStatus, EngineStatus};
use crate::infra::engine::EngineClient;

/// 引擎探测器
pub struct EngineProbe {
    engine: Arc<dyn EngineClient>,
    config: DockerConfig,
}

/// 命令入口预检结果：引擎是否运行、容器是否存在
#[derive(Debug, Clone, Copy)]
pub struct EngineAndContainer {
    pub engine_running: bool,
    pub container_exists: bool,
}

impl EngineProbe {
    pub fn new(engine: Arc<dyn EngineClient>, config: DockerConfig) -> Self {
        Self { engine, config }
    }

    /// 检查引擎可用性：版本查询 + 守护进程 info，任一失败即视为不可用
    pub async fn check_availability(&self) -> EngineStatus {
        let version = match self.engine.version().await {
            Ok(version) => version,
            Err(error) => {
                debug!(%error, "Engine version query failed");
                return EngineStatus { available: false, version: None };
            }
        };

        if let Err(error) = self.engine.daemon_info().await {
            debug!(%error, "Engine daemon is not reachable");
            return EngineStatus { available: false, version: None };
        }

        EngineStatus { available: true, version: Some(version) }
    }

    /// 检查单个组件是否存在
    ///
    /// inspect 的非零退出码解释为"不存在"，不上抛。
    pub async fn component_exists(&self, kind: ComponentKind, name: &str) -> bool {
        self.engine.inspect(kind, name).await.is_ok()
    }

    /// 并发检查容器/卷/镜像的存在性
    ///
    /// 三个探测相互独立且无副作用，并发纯粹是性能优化，彼此之间
    /// 没有顺序保证。
    pub async fn check_components(&self) -> ComponentStatus {
        let (container, volume, image) = tokio::join!(
            self.component_exists(ComponentKind::Container, &self.config.container_name),
            self.component_exists(ComponentKind::Volume, &self.config.volume_name),
            self.component_exists(ComponentKind::Image, &self.config.image_name),
        );

        ComponentStatus { container, volume, image }
    }

    /// 命令入口常用的组合预检
    ///
    /// 引擎不可用时不再探测容器，存在性探测的结果只有在守护进程
    /// 可达时才有意义。
    pub async fn check_engine_and_container(&self) -> EngineAndContainer {
        let engine_running = self.check_availability().await.available;
        let container_exists = if engine_running {
            self.component_exists(ComponentKind::Container, &self.config.container_name).await
        } else {
            false
        };

        EngineAndContainer { engine_running, container_exists }
    }
}
