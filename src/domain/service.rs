//! 服务发现与健康检查领域模型

use serde::{Deserialize, Serialize};

/// 容器暴露的一个服务端点
///
/// `port` 是宿主机侧端口（外部客户端连接用的那个），不是容器内端口。
/// 顺序跟随引擎的报告顺序；宿主机端口可能在容器重建后变化。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,
    pub port: u16,
    pub url: String,
}

/// 单次探测后的服务健康状态
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceHealth {
    #[serde(flatten)]
    pub service: ServiceDescriptor,
    pub is_healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_health_serializes_flat_camel_case() {
        let health = ServiceHealth {
            service: ServiceDescriptor {
                name: "SSH".to_string(),
                port: 2222,
                url: "http://localhost:2222".to_string(),
            },
            is_healthy: true,
            response_time_ms: Some(12),
        };

        let json = serde_json::to_string(&health).unwrap();
        assert!(json.contains("\"name\":\"SSH\""));
        assert!(json.contains("\"isHealthy\":true"));
        assert!(json.contains("\"responseTimeMs\":12"));
    }

    #[test]
    fn test_unhealthy_service_without_latency_omits_field() {
        let health = ServiceHealth {
            service: ServiceDescriptor {
                name: "Web UI".to_string(),
                port: 8080,
                url: "http://localhost:8080".to_string(),
            },
            is_healthy: false,
            response_time_ms: None,
        };

        let json = serde_json::to_string(&health).unwrap();
        assert!(!json.contains("responseTimeMs"));
    }
}
