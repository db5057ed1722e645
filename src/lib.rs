//! kolo - 容器化微调环境管理
//!
//! 核心是容器生命周期编排与健康验证：组件存在性探测、幂等的初始化
//! 序列、端口映射解析、有界重试的健康轮询。引擎 CLI 通过
//! [`infra::engine::EngineClient`] 收窄成一组能力接口，编排逻辑不
//! 依赖真实子进程。

pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod services;
