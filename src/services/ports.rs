//! 服务发现
//!
//! 解析 `docker port` 的文本输出，得到结构化的服务端点描述。
//! 每行形如 `22/tcp -> 0.0.0.0:2222`，左侧是容器内端口，右侧是
//! 宿主机绑定地址。

use std::sync::Arc;

use crate::config::{constants, DockerConfig};
use crate::domain::ServiceDescriptor;
use crate::error::{KoloError, KoloResult};
use crate::infra::engine::EngineClient;

/// 服务发现器
pub struct ServiceDiscovery {
    engine: Arc<dyn EngineClient>,
    config: DockerConfig,
}

impl ServiceDiscovery {
    pub fn new(engine: Arc<dyn EngineClient>, config: DockerConfig) -> Self {
        Self { engine, config }
    }

    /// 枚举容器当前暴露的服务
    ///
    /// 查询本身失败（容器未运行、守护进程不可达）返回 `ServiceDiscovery`
    /// 错误；查询成功但没有端口映射返回空列表。两者语义不同：前者是
    /// "问不到"，后者是"没有暴露端口"。
    pub async fn container_services(&self) -> KoloResult<Vec<ServiceDescriptor>> {
        let raw = self
            .engine
            .port_mappings(&self.config.container_name)
            .await
            .map_err(|e| KoloError::ServiceDiscovery(e.to_string()))?;

        Ok(parse_port_mappings(&raw))
    }
}

/// 解析端口映射报告
///
/// 没有 `->` 的行（端口未绑定到宿主机）直接跳过，不算解析错误。
pub(crate) fn parse_port_mappings(raw: &str) -> Vec<ServiceDescriptor> {
    raw.lines().filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<ServiceDescriptor> {
    let (container_side, host_side) = line.split_once("->")?;

    let container_port: u16 = container_side.trim().split('/').next()?.parse().ok()?;
    let (host_ip, host_port) = host_side.trim().rsplit_once(':')?;
    let host_port: u16 = host_port.parse().ok()?;

    // 通配绑定地址对外部客户端没有意义，URL 用 localhost 代替
    let host = if host_ip == "0.0.0.0" { "localhost" } else { host_ip };

    Some(ServiceDescriptor {
        name: service_name(container_port).to_string(),
        port: host_port,
        url: format!("http://{}:{}", host, host_port),
    })
}

/// 容器内端口到服务名的映射
///
/// run 时固定把 SSH 映射到容器内 22、Web 映射到容器内 8080，
/// 其余端口标记为 unknown。
fn service_name(container_port: u16) -> &'static str {
    match container_port {
        constants::CONTAINER_SSH_PORT => "SSH",
        constants::CONTAINER_WEB_PORT => "Web UI",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BuildInputs;
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

    #[test]
    fn test_parses_ssh_and_web_mappings() {
        let raw = "22/tcp -> 0.0.0.0:2222\n8080/tcp -> 0.0.0.0:8080\n";
        let services = parse_port_mappings(raw);

        assert_eq!(services.len(), 2);
        assert_eq!(services[0].name, "SSH");
        assert_eq!(services[0].port, 2222);
        assert_eq!(services[0].url, "http://localhost:2222");
        assert_eq!(services[1].name, "Web UI");
        assert_eq!(services[1].port, 8080);
        assert_eq!(services[1].url, "http://localhost:8080");
    }

    #[test]
    fn test_skips_lines_without_host_binding() {
        let services = parse_port_mappings("80/tcp\n");
        assert!(services.is_empty());
    }

    #[test]
    fn test_unrecognized_container_port_is_labeled_unknown() {
        let services = parse_port_mappings("5432/tcp -> 0.0.0.0:15432\n");
        assert_eq!(services[0].name, "unknown");
        assert_eq!(services[0].port, 15432);
    }

    #[test]
    fn test_concrete_host_ip_is_kept_in_url() {
        let services = parse_port_mappings("8080/tcp -> 127.0.0.1:8080\n");
        assert_eq!(services[0].url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_garbage_lines_are_skipped() {
        let raw = "not a mapping\n22/tcp -> 0.0.0.0:2222\n";
        let services = parse_port_mappings(raw);
        assert_eq!(services.len(), 1);
    }

    #[tokio::test]
    async fn test_discovery_failure_is_an_error_not_empty_list() {
        let discovery = ServiceDiscovery::new(Arc::new(FakeEngine::up()), test_config());

        let result = discovery.container_services().await;
        assert!(matches!(result, Err(KoloError::ServiceDiscovery(_))));
    }

    #[tokio::test]
    async fn test_no_exposed_ports_is_an_empty_list() {
        let engine = FakeEngine::up().with_port_output("");
        let discovery = ServiceDiscovery::new(Arc::new(engine), test_config());

        let services = discovery.container_services().await.unwrap();
        assert!(services.is_empty());
    }
}
