//! healthcheck 命令：轮询服务健康状态

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::commands::print_json;
use crate::config::{constants, DockerConfig};
use crate::error::{KoloError, KoloResult};
use crate::infra::engine::{DockerCli, EngineClient};
use crate::services::health::HealthPoller;
use crate::services::ports::ServiceDiscovery;
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

    poll_and_report(engine, config).await
}

/// 轮询服务并输出健康报告，init/start 之后也会调用
pub(crate) async fn poll_and_report(
    engine: Arc<dyn EngineClient>,
    config: DockerConfig,
) -> KoloResult<()> {
    info!("Checking services health...");

    let poller = HealthPoller::new(ServiceDiscovery::new(engine, config));
    let report = poller
        .check_services_health(
            constants::HEALTH_MAX_RETRIES,
            Duration::from_millis(constants::HEALTH_RETRY_INTERVAL_MS),
        )
        .await?;

    print_json(&report)?;

    for service in report.iter().filter(|s| !s.is_healthy) {
        warn!(
            service = %service.service.name,
            url = %service.service.url,
            "Service is not responding"
        );
    }

    Ok(())
}
