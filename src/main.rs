//! kolo - 容器化微调环境 CLI
//!
//! Usage:
//! - `kolo init [-v|--verbose]`  初始化并启动环境
//! - `kolo start` / `kolo stop`  启停容器
//! - `kolo destroy [-c] [-v] [-i] [-a]`  选择性删除组件
//! - `kolo healthcheck`  检查服务健康状态
//! - `kolo dockerfile`  显示构建用的 Dockerfile
//! - `kolo ssh` / `kolo ollama [args...]`  进入容器交互

use kolo::commands;
use kolo::config::DockerConfig;
use kolo::domain::DestroyOptions;
use tracing_subscriber::EnvFilter;

/// 解析 destroy 的组件选择
///
/// 未选择任何组件时只删容器；--all 覆盖一切。
fn parse_destroy_options(args: &[String]) -> DestroyOptions {
    let mut container = false;
    let mut volume = false;
    let mut image = false;
    let mut all = false;

    for arg in args {
        match arg.as_str() {
            "-c" | "--container" => container = true,
            "-v" | "--volume" => volume = true,
            "-i" | "--image" => image = true,
            "-a" | "--all" => all = true,
            other => {
                eprintln!("Unknown destroy option: {}", other);
                std::process::exit(2);
            }
        }
    }

    let has_selection = container || volume || image;
    DestroyOptions {
        container: all || container || !has_selection,
        volume: all || volume,
        image: all || image,
    }
}

fn print_help() {
    println!("kolo - containerized fine-tuning environment");
    println!();
    println!("USAGE:");
    println!("    kolo <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    init           Initialize and start the kolo container");
    println!("    start          Start the kolo container");
    println!("    stop           Stop the kolo container");
    println!("    destroy        Remove kolo components (container, volume, and/or image)");
    println!("    healthcheck    Check the health of kolo services");
    println!("    dockerfile     Display the Dockerfile used to build the container");
    println!("    ssh            Connect to the kolo container shell");
    println!("    ollama         Execute Ollama commands inside the kolo container");
    println!();
    println!("OPTIONS:");
    println!("    init:    -v, --verbose    display build/creation output");
    println!("    destroy: -c, --container  remove container");
    println!("             -v, --volume     remove volume");
    println!("             -i, --image      remove image");
    println!("             -a, --all        remove all components");
    println!();
    println!("Configuration is read from KOLO_* environment variables,");
    println!("logging is controlled with KOLO_LOG (default: kolo=info).");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("KOLO_LOG").unwrap_or_else(|_| EnvFilter::new("kolo=info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = match args.get(1) {
        Some(command) => command.as_str(),
        None => {
            print_help();
            std::process::exit(2);
        }
    };

    if matches!(command, "--help" | "-h" | "help") {
        print_help();
        return;
    }

    let config = DockerConfig::from_env();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create runtime");
    let result = rt.block_on(async {
        match command {
            "init" => {
                let verbose = args[2..].iter().any(|a| a == "-v" || a == "--verbose");
                commands::init::run(config, verbose).await
            }
            "start" => commands::start::run(config).await,
            "stop" => commands::stop::run(config).await,
            "destroy" => {
                let options = parse_destroy_options(&args[2..]);
                commands::destroy::run(config, options).await
            }
            "healthcheck" => commands::healthcheck::run(config).await,
            "dockerfile" => commands::dockerfile::run(config).await,
            "ssh" => commands::exec::ssh(config).await,
            "ollama" => commands::exec::ollama(config, &args[2..]).await,
            other => {
                eprintln!("Unknown command: {}", other);
                print_help();
                std::process::exit(2);
            }
        }
    });

    if let Err(error) = result {
        tracing::error!(%error, "Command failed");
        eprintln!("Error: {}", error);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_selection_defaults_to_container_only() {
        let options = parse_destroy_options(&[]);
        assert!(options.container);
        assert!(!options.volume);
        assert!(!options.image);
    }

    #[test]
    fn test_specific_selection_does_not_imply_container() {
        let options = parse_destroy_options(&strings(&["--volume"]));
        assert!(!options.container);
        assert!(options.volume);
        assert!(!options.image);
    }

    #[test]
    fn test_all_selects_everything() {
        let options = parse_destroy_options(&strings(&["-a"]));
        assert!(options.container);
        assert!(options.volume);
        assert!(options.image);
    }
}
