use std::fs;
use std::path::PathBuf;

use clap::Parser;
use routespec::{generate_openapi_spec, init_tracing, GenerateOptions, Info, Server};

#[derive(Parser)]
#[command(name = "example-api", about = "Write the demo API's OpenAPI document to disk")]
struct Cli {
    /// Presentation config (defaults to ./api.config.json when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory receiving openapi.json and openapi.yaml
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
    /// Server URL advertised in the document
    #[arg(long, default_value = "http://localhost:3000")]
    server: String,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    example_api::register_all();

    let info = Info::new("Example API", env!("CARGO_PKG_VERSION"))
        .with_description("Users, posts, and authentication endpoints");
    let mut options = GenerateOptions::new(info)
        .with_servers(vec![Server::new(&cli.server).with_description("Local development")]);
    if let Some(path) = &cli.config {
        options = options.with_config_path(path);
    }

    let generated = generate_openapi_spec(&options);

    fs::create_dir_all(&cli.out_dir)?;
    let json_path = cli.out_dir.join("openapi.json");
    let yaml_path = cli.out_dir.join("openapi.yaml");
    fs::write(&json_path, generated.json()?)?;
    fs::write(&yaml_path, generated.yaml()?)?;

    tracing::info!(
        paths = generated.spec().paths.len(),
        json = %json_path.display(),
        yaml = %yaml_path.display(),
        "Wrote OpenAPI document"
    );
    Ok(())
}
