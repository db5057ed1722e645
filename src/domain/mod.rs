//! 领域模型模块
//!
//! 纯数据结构，不依赖 tokio

pub mod container;
pub mod service;

// Re-exports for convenience
pub use container::{
    BuildReport, ComponentKind, ComponentStatus, ContainerReport, DestroyOptions, EngineStatus,
    InitReport, PortPair, VolumeReport,
};
pub use service::{ServiceDescriptor, ServiceHealth};
