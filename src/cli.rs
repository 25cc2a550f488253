// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "model-viewer")]
#[command(about = "3D model viewer with a draggable overlay mode", long_about = None)]
pub struct Cli {
    /// Model name (looked up under <assets>/models/)
    #[arg(long)]
    pub model: Option<String>,

    /// Environment name (looked up under <assets>/envs/)
    #[arg(long)]
    pub environment: Option<String>,

    /// Model container format: glb or gltf
    #[arg(long)]
    pub format: Option<String>,

    /// Asset directory root
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Run as a small draggable overlay window instead of full-screen
    #[arg(long, default_value = "false")]
    pub overlay: bool,

    /// JSON config file; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,
}
