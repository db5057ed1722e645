//! 环境初始化
//!
//! 幂等的准备序列：暂存构建上下文、按需构建镜像、创建卷、按需创建容器。
//! 任一步骤失败直接上抛，已创建的组件保留不回滚；修正外部问题（磁盘
//! 空间、守护进程）之后重跑会跳过已存在的组件。

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::config::{constants, DockerConfig};
use crate::domain::{BuildReport, ContainerReport, InitReport, PortPair, VolumeReport};
use crate::error::{KoloError, KoloResult};
use crate::infra::engine::{ContainerSpec, EngineClient};
use crate::services::probe::EngineProbe;

/// 初始化编排器
pub struct Provisioner {
    engine: Arc<dyn EngineClient>,
    probe: EngineProbe,
    config: DockerConfig,
}

impl Provisioner {
    pub fn new(engine: Arc<dyn EngineClient>, config: DockerConfig) -> Self {
        let probe = EngineProbe::new(Arc::clone(&engine), config.clone());
        Self { engine, probe, config }
    }

    /// 初始化完整环境并返回报告
    ///
    /// 守护进程不可用时在任何副作用之前失败。镜像构建和容器创建都以
    /// 同一份存在性快照为准：已存在则跳过；卷创建无条件执行，引擎层面
    /// 本身幂等。
    pub async fn init(&self) -> KoloResult<InitReport> {
        let engine_status = self.probe.check_availability().await;
        if !engine_status.available {
            return Err(KoloError::EngineUnavailable { install_url: constants::INSTALL_URL });
        }

        let context = self.stage_build_context()?;
        let components = self.probe.check_components().await;

        let build = if components.image {
            info!(image = %self.config.image_name, "Image already exists, skipping build");
            BuildReport {
                image_existed: true,
                image_name: self.config.image_name.clone(),
                build_output: None,
            }
        } else {
            info!(image = %self.config.image_name, "Building image");
            let output = self
                .engine
                .build_image(&self.config.image_name, &context.join("dockerfile"), &context)
                .await
                .map_err(|e| KoloError::Build(e.to_string()))?;
            BuildReport {
                image_existed: false,
                image_name: self.config.image_name.clone(),
                build_output: Some(output),
            }
        };

        let volume_output = self
            .engine
            .create_volume(&self.config.volume_name)
            .await
            .map_err(|e| KoloError::VolumeCreate(e.to_string()))?;
        let volume = VolumeReport {
            name: self.config.volume_name.clone(),
            output: volume_output.trim().to_string(),
        };

        let container_output = if components.container {
            info!(container = %self.config.container_name, "Container already exists, skipping creation");
            format!("Container {} already exists", self.config.container_name)
        } else {
            info!(container = %self.config.container_name, "Creating container");
            self.engine
                .run_container(&ContainerSpec::from_config(&self.config))
                .await
                .map_err(|e| KoloError::ContainerCreate(e.to_string()))?
                .trim()
                .to_string()
        };

        Ok(InitReport {
            engine_status,
            build,
            volume,
            container: ContainerReport {
                name: self.config.container_name.clone(),
                ports: PortPair { ssh: self.config.ssh_port, web: self.config.web_port },
                output: container_output,
            },
        })
    }

    /// 将构建输入暂存到隔离的临时目录
    ///
    /// 每次从空目录重建。工作区里的中间改动不会泄漏进构建上下文，
    /// 输入路径也可以单独用环境变量覆盖。
    fn stage_build_context(&self) -> KoloResult<PathBuf> {
        let inputs = &self.config.build_inputs;
        let context =
            std::env::temp_dir().join(format!("kolo-build-{}", self.config.image_name));

        if context.exists() {
            fs::remove_dir_all(&context)?;
        }
        fs::create_dir_all(&context)?;

        copy_dir(&inputs.scripts_dir, &context.join("scripts"))?;
        copy_dir(&inputs.torchtune_dir, &context.join("torchtune"))?;
        fs::copy(&inputs.dockerfile, context.join("dockerfile"))?;
        fs::copy(&inputs.supervisord_conf, context.join("supervisord.conf"))?;

        info!(context = %context.display(), "Build context staged");
        Ok(context)
    }

    /// 读取将用于构建镜像的 Dockerfile
    pub fn dockerfile_content(&self) -> KoloResult<String> {
        Ok(fs::read_to_string(&self.config.build_inputs.dockerfile)?)
    }
}

/// 递归复制目录
fn copy_dir(src: &Path, dst: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let target = dst.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
