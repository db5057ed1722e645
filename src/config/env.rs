//! 环境变量配置加载
//!
//! 所有配置在进程启动时读取一次，按值传入各组件。组件不直接读取
//! 进程环境，单元测试可以注入任意配置。

use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Docker 环境配置
///
/// 镜像/容器/卷三元组的名字、端口映射与构建输入路径。
#[derive(Clone, Debug)]
pub struct DockerConfig {
    /// 镜像名
    pub image_name: String,
    /// 容器名
    pub container_name: String,
    /// 卷名
    pub volume_name: String,
    /// SSH 服务映射到宿主机的端口
    pub ssh_port: u16,
    /// Web 服务映射到宿主机的端口
    pub web_port: u16,
    /// 卷在容器内的挂载路径
    pub data_path: String,
    /// 镜像构建输入
    pub build_inputs: BuildInputs,
}

/// 镜像构建所需的文件集合
///
/// 这些文件在构建前会被复制到隔离的临时目录，作为实际的构建上下文。
#[derive(Clone, Debug)]
pub struct BuildInputs {
    /// 容器构建文件
    pub dockerfile: PathBuf,
    /// 训练/服务脚本目录
    pub scripts_dir: PathBuf,
    /// 微调框架资源目录
    pub torchtune_dir: PathBuf,
    /// 进程管理器配置
    pub supervisord_conf: PathBuf,
}

impl DockerConfig {
    /// 从环境变量加载配置，缺省值见各字段
    pub fn from_env() -> Self {
        Self {
            image_name: load_string("KOLO_IMAGE_NAME", "kolo"),
            container_name: load_string("KOLO_CONTAINER_NAME", "kolo_container"),
            volume_name: load_string("KOLO_VOLUME_NAME", "kolo_volume"),
            ssh_port: load_port("KOLO_SSH_PORT", 2222),
            web_port: load_port("KOLO_WEB_PORT", 8080),
            data_path: load_string("KOLO_DATA_PATH", "/var/kolo_data"),
            build_inputs: BuildInputs::from_env(),
        }
    }
}

impl BuildInputs {
    /// 从环境变量加载构建输入路径
    pub fn from_env() -> Self {
        Self {
            dockerfile: load_path("KOLO_DOCKERFILE", "dockerfile"),
            scripts_dir: load_path("KOLO_SCRIPTS_DIR", "scripts"),
            torchtune_dir: load_path("KOLO_TORCHTUNE_DIR", "torchtune"),
            supervisord_conf: load_path("KOLO_SUPERVISORD_CONF", "supervisord.conf"),
        }
    }
}

fn load_string(var: &str, default: &str) -> String {
    env::var(var).unwrap_or_else(|_| default.to_string())
}

fn load_path(var: &str, default: &str) -> PathBuf {
    env::var(var).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
}

fn load_port(var: &str, default: u16) -> u16 {
    match env::var(var) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(var, value = %raw, "Invalid port value, using default");
            default
        }),
        Err(_) => default,
    }
}

/// 常量
pub mod constants {
    /// Docker 安装指引
    pub const INSTALL_URL: &str = "https://docs.docker.com/get-docker/";

    /// 容器内 SSH 服务端口（run 时固定映射）
    pub const CONTAINER_SSH_PORT: u16 = 22;

    /// 容器内 Web 服务端口（run 时固定映射）
    pub const CONTAINER_WEB_PORT: u16 = 8080;

    /// 镜像构建超时（秒）
    pub const BUILD_TIMEOUT_SECS: u64 = 3600;

    /// 普通引擎命令超时（秒）
    pub const ENGINE_TIMEOUT_SECS: u64 = 120;

    /// 健康检查默认重试次数
    pub const HEALTH_MAX_RETRIES: u32 = 12;

    /// 健康检查重试间隔（毫秒）
    pub const HEALTH_RETRY_INTERVAL_MS: u64 = 5000;

    /// 版本号
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
