//! 基础设施模块
//!
//! 封装外部依赖（子进程执行、容器引擎 CLI）

pub mod command;
pub mod engine;

pub use command::CommandRunner;
pub use engine::{ContainerSpec, DockerCli, EngineClient, EngineError};
