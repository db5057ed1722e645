//! init 命令：初始化并启动完整环境

use std::sync::Arc;

use tracing::info;

use crate::commands::{healthcheck, print_json};
use crate::config::DockerConfig;
use crate::error::KoloResult;
use crate::infra::engine::{DockerCli, EngineClient};
use crate::services::probe::EngineProbe;
use crate::services::provision::Provisioner;

pub async fn run(config: DockerConfig, verbose: bool) -> KoloResult<()> {
    let engine: Arc<dyn EngineClient> = Arc::new(DockerCli);

    let probe = EngineProbe::new(Arc::clone(&engine), config.clone());
    let components = probe.check_components().await;
    info!(
        container = components.container,
        volume = components.volume,
        image = components.image,
        "Detected kolo components"
    );

    info!(
        started_at = %chrono::Utc::now().to_rfc3339(),
        "Initializing container, this may take a while..."
    );

    let provisioner = Provisioner::new(Arc::clone(&engine), config.clone());
    let report = provisioner.init().await?;

    info!(
        image_existed = report.build.image_existed,
        container = %report.container.name,
        "kolo initialized"
    );
    print_json(&report)?;

    if verbose {
        if let Some(build_output) = &report.build.build_output {
            println!("Build output:\n{}", build_output);
        }
        println!("Volume creation output:\n{}", report.volume.output);
        println!("Container creation output:\n{}", report.container.output);
    }

    healthcheck::poll_and_report(engine, config).await
}
