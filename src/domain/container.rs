//! 容器生命周期领域模型
//!
//! `InitReport` 是展示层消费的数据契约之一，序列化字段名固定为 camelCase。

use std::fmt;

use serde::{Deserialize, Serialize};

/// 组件存在性快照
///
/// 每次探测现查，不缓存。快照不代表引擎本身可用，守护进程可用性
/// 需要先单独确认。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentStatus {
    pub container: bool,
    pub volume: bool,
    pub image: bool,
}

/// 引擎可用性
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// 一次 init 运行的完整报告
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitReport {
    pub engine_status: EngineStatus,
    pub build: BuildReport,
    pub volume: VolumeReport,
    pub container: ContainerReport,
}

/// 镜像构建结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildReport {
    pub image_existed: bool,
    pub image_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_output: Option<String>,
}

/// 卷创建结果
#[derive(Debug, Clone, Serialize)]
pub struct VolumeReport {
    pub name: String,
    pub output: String,
}

/// 容器创建结果
#[derive(Debug, Clone, Serialize)]
pub struct ContainerReport {
    pub name: String,
    pub ports: PortPair,
    pub output: String,
}

/// 宿主机侧端口映射对
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PortPair {
    pub ssh: u16,
    pub web: u16,
}

/// 销毁操作的组件选择
///
/// 由调用方显式给出；"未选择任何组件 ⇒ 只删容器"的缺省规则在命令层计算。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DestroyOptions {
    pub container: bool,
    pub volume: bool,
    pub image: bool,
}

/// 引擎管理的组件种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Container,
    Volume,
    Image,
}

impl ComponentKind {
    /// inspect 子命令使用的名字
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Container => "container",
            ComponentKind::Volume => "volume",
            ComponentKind::Image => "image",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_report_serializes_camel_case() {
        let report = InitReport {
            engine_status: EngineStatus {
                available: true,
                version: Some("Docker version 27.0.3".to_string()),
            },
            build: BuildReport {
                image_existed: false,
                image_name: "kolo".to_string(),
                build_output: Some("Successfully built kolo".to_string()),
            },
            volume: VolumeReport {
                name: "kolo_volume".to_string(),
                output: "kolo_volume".to_string(),
            },
            container: ContainerReport {
                name: "kolo_container".to_string(),
                ports: PortPair { ssh: 2222, web: 8080 },
                output: "abc123".to_string(),
            },
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"engineStatus\""));
        assert!(json.contains("\"imageExisted\""));
        assert!(json.contains("\"buildOutput\""));
        assert!(json.contains("\"ssh\":2222"));
    }

    #[test]
    fn test_build_report_omits_output_when_image_existed() {
        let report = BuildReport {
            image_existed: true,
            image_name: "kolo".to_string(),
            build_output: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("buildOutput"));
    }

    #[test]
    fn test_component_kind_inspect_names() {
        assert_eq!(ComponentKind::Container.as_str(), "container");
        assert_eq!(ComponentKind::Volume.as_str(), "volume");
        assert_eq!(ComponentKind::Image.as_str(), "image");
    }
}
