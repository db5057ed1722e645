//! dockerfile 命令：显示将用于构建的 Dockerfile

use std::sync::Arc;

use crate::config::DockerConfig;
use crate::error::KoloResult;
use crate::infra::engine::DockerCli;
use crate::services::provision::Provisioner;

pub async fn run(config: DockerConfig) -> KoloResult<()> {
    let provisioner = Provisioner::new(Arc::new(DockerCli), config);
    print!("{}", provisioner.dockerfile_content()?);
    Ok(())
}
