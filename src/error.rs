//! 统一错误处理
//!
//! 整个 crate 的错误分类。探测类操作（存在性检查）从不返回错误，
//! "不存在"编码在返回值里；只有变更类操作（构建、创建、启停、删除）
//! 在引擎报错时上抛，并携带原始错误信息便于诊断。

use thiserror::Error;

/// kolo 统一错误类型
#[derive(Debug, Error)]
pub enum KoloError {
    /// Docker 守护进程不可用
    #[error("Docker is not available. Please ensure Docker is installed and running.\nVisit {install_url} for installation instructions.")]
    EngineUnavailable { install_url: &'static str },

    /// 容器尚未初始化
    #[error("The kolo container does not exist. Run 'kolo init' first.")]
    ContainerMissing,

    /// 无法枚举容器端口映射
    #[error("Failed to discover container services: {0}")]
    ServiceDiscovery(String),

    /// 镜像构建失败
    #[error("Failed to build image: {0}")]
    Build(String),

    /// 卷创建失败
    #[error("Failed to create volume: {0}")]
    VolumeCreate(String),

    /// 容器创建失败
    #[error("Failed to create container: {0}")]
    ContainerCreate(String),

    /// 容器启动失败
    #[error("Failed to start container: {0}")]
    ContainerStart(String),

    /// 容器停止失败
    #[error("Failed to stop container: {0}")]
    ContainerStop(String),

    /// 容器删除失败（卷/镜像的删除是尽力而为，失败不会走到这里）
    #[error("Failed to remove container: {0}")]
    Destroy(String),

    /// 构建上下文暂存等文件系统错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 报告序列化失败
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// 便捷类型别名
pub type KoloResult<T> = Result<T, KoloError>;
