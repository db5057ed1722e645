//! 服务健康检查
//!
//! 有界重试的 TCP 可达性轮询。刚启动的容器可能还要几秒才把监听
//! socket 绑定好，固定间隔的有界重试吸收这段时间，又不会无限等待。

use std::time::{Duration, Instant};

use futures::future::join_all;
use tokio::net::TcpStream;
use tracing::{debug, info};

use crate::domain::{ServiceDescriptor, ServiceHealth};
use crate::error::KoloResult;
use crate::services::ports::ServiceDiscovery;

/// 健康轮询器
pub struct HealthPoller {
    discovery: ServiceDiscovery,
}

impl HealthPoller {
    pub fn new(discovery: ServiceDiscovery) -> Self {
        Self { discovery }
    }

    /// 探测单个端口
    ///
    /// 直连 localhost:<port>，连接被接受即健康，随即关闭，不收发数据。
    /// 返回健康与否和从发起到出结果的耗时（毫秒）。
    pub async fn check_port(port: u16) -> (bool, u64) {
        let started = Instant::now();
        let healthy = TcpStream::connect(("localhost", port)).await.is_ok();

        (healthy, started.elapsed().as_millis() as u64)
    }

    async fn probe_service(service: ServiceDescriptor) -> ServiceHealth {
        let (is_healthy, elapsed_ms) = Self::check_port(service.port).await;

        ServiceHealth { service, is_healthy, response_time_ms: Some(elapsed_ms) }
    }

    /// 轮询全部服务直到全部健康或重试耗尽
    ///
    /// 每一轮都重新发现服务再并发探测所有端口；轮与轮之间严格串行。
    /// 全部健康时立即返回；重试耗尽时返回最后一轮的结果，"不健康"
    /// 不是错误，调用方检查每个服务的 `is_healthy`。只有发现本身
    /// 失败才上抛。
    pub async fn check_services_health(
        &self,
        max_retries: u32,
        retry_interval: Duration,
    ) -> KoloResult<Vec<ServiceHealth>> {
        let mut attempt = 1u32;

        loop {
            let services = self.discovery.container_services().await?;
            let report = join_all(services.into_iter().map(Self::probe_service)).await;

            if report.iter().all(|s| s.is_healthy) {
                info!(attempt, services = report.len(), "All services healthy");
                return Ok(report);
            }

            if attempt >= max_retries {
                info!(attempt, "Health retries exhausted, returning last snapshot");
                return Ok(report);
            }

            debug!(attempt, max_retries, "Services not ready yet, retrying");
            tokio::time::sleep(retry_interval).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::net::TcpListener;

    use super::*;
    use crate::config::{BuildInputs, DockerConfig};
    use crate::error::KoloError;
    use crate::infra::engine::fake::FakeEngine;

    fn test_config() -> DockerConfig {
        DockerConfig {
            image_name: "kolo".to_string(),
            container_name: "kolo_container".to_string(),
            volume_name: "kolo_volume".to_string(),
            ssh_port: 2222,
            web_port: 8080,
            data_path: "/var/kolo_data".to_string(),
            build_inputs: BuildInputs {
                dockerfile: "dockerfile".into(),
                scripts_dir: "scripts".into(),
                torchtune_dir: "torchtune".into(),
                supervisord_conf: "supervisord.conf".into(),
            },
        }
    }

    async fn reachable_port() -> (TcpListener, u16) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        (listener, port)
    }

    async fn unreachable_port() -> u16 {
        // 绑定后立刻释放，留下一个大概率没人监听的端口
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        port
    }

    #[tokio::test]
    async fn test_check_port_against_live_listener() {
        let (_listener, port) = reachable_port().await;

        let (healthy, _elapsed) = HealthPoller::check_port(port).await;
        assert!(healthy);
    }

    #[tokio::test]
    async fn test_check_port_against_closed_port() {
        let port = unreachable_port().await;

        let (healthy, _elapsed) = HealthPoller::check_port(port).await;
        assert!(!healthy);
    }

    #[tokio::test]
    async fn test_all_healthy_returns_on_first_attempt() {
        let (_listener, port) = reachable_port().await;
        let engine = Arc::new(
            FakeEngine::up().with_port_output(&format!("22/tcp -> 0.0.0.0:{}\n", port)),
        );
        let poller = HealthPoller::new(ServiceDiscovery::new(
            Arc::clone(&engine) as Arc<dyn crate::infra::engine::EngineClient>,
            test_config(),
        ));

        let report =
            poller.check_services_health(12, Duration::from_millis(0)).await.unwrap();

        assert_eq!(report.len(), 1);
        assert!(report[0].is_healthy);
        assert!(report[0].response_time_ms.is_some());
        assert_eq!(engine.call_count("port"), 1);
    }

    #[tokio::test]
    async fn test_mixed_health_exhausts_exactly_max_retries() {
        let (_listener, live_port) = reachable_port().await;
        let dead_port = unreachable_port().await;
        let raw = format!(
            "22/tcp -> 0.0.0.0:{}\n8080/tcp -> 0.0.0.0:{}\n",
            live_port, dead_port
        );
        let engine = Arc::new(FakeEngine::up().with_port_output(&raw));
        let poller = HealthPoller::new(ServiceDiscovery::new(
            Arc::clone(&engine) as Arc<dyn crate::infra::engine::EngineClient>,
            test_config(),
        ));

        let report =
            poller.check_services_health(3, Duration::from_millis(0)).await.unwrap();

        // 每轮重新发现一次，恰好 3 轮
        assert_eq!(engine.call_count("port"), 3);
        assert_eq!(report.len(), 2);
        assert!(report[0].is_healthy);
        assert!(!report[1].is_healthy);
    }

    #[tokio::test]
    async fn test_discovery_failure_propagates() {
        let poller = HealthPoller::new(ServiceDiscovery::new(
            Arc::new(FakeEngine::up()),
            test_config(),
        ));

        let result = poller.check_services_health(3, Duration::from_millis(0)).await;
        assert!(matches!(result, Err(KoloError::ServiceDiscovery(_))));
    }

    #[tokio::test]
    async fn test_no_services_is_immediately_healthy_and_empty() {
        let engine = Arc::new(FakeEngine::up().with_port_output(""));
        let poller = HealthPoller::new(ServiceDiscovery::new(
            Arc::clone(&engine) as Arc<dyn crate::infra::engine::EngineClient>,
            test_config(),
        ));

        let report =
            poller.check_services_health(3, Duration::from_millis(0)).await.unwrap();
        assert!(report.is_empty());
        assert_eq!(engine.call_count("port"), 1);
    }
}
