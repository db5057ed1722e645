//! 服务层模块
//!
//! 包含核心业务逻辑：组件探测、服务发现、健康轮询、环境初始化、生命周期控制

pub mod health;
pub mod lifecycle;
pub mod ports;
pub mod probe;
pub mod provision;

pub use health::HealthPoller;
pub use lifecycle::LifecycleController;
pub use ports::ServiceDiscovery;
pub use probe::{EngineAndContainer, EngineProbe};
pub use provision::Provisioner;
