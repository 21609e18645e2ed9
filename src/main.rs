use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use example_module::{AnyClass, DiagnosticSink, ExampleModule, SurfaceReport, any_function};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "example_module")]
#[command(about = "Demonstrates the example helper module")]
#[command(version = "0.1.0")]
struct Cli {
    /// Write diagnostic lines to this file instead of stdout
    #[arg(long, global = true)]
    diagnostics: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the module and exercise every exported symbol
    Demo,
    /// Print the result of any_function
    Function,
    /// Print the class-level accessor result
    ClassMethod,
    /// Construct one instance and print the instance accessor result
    ObjectMethod,
    /// Use the process-wide module; its diagnostics always go to stdout
    Process,
    /// Print the public surface as JSON
    Surface {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ログは stderr へ。stdout は診断行と結果だけにする
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("example_module=info,warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut sink: DiagnosticSink<Box<dyn Write>> = match &cli.diagnostics {
        Some(path) => {
            info!("Writing diagnostics to {}", path.display());
            let file = DiagnosticSink::create(path).context("Failed to open diagnostics file")?;
            DiagnosticSink::from_writer(Box::new(file.into_inner()))
        }
        None => DiagnosticSink::from_writer(Box::new(std::io::stdout())),
    };

    match cli.command {
        Commands::Demo => {
            let module = load(&mut sink)?;
            println!("{}", module.any_function());
            let instance = module
                .any_class(&mut sink)
                .context("Failed to construct AnyClass")?;
            println!("{}", module.get_from_class_method());
            println!("{}", instance.get_from_object_method());
        }
        Commands::Function => {
            println!("{}", load(&mut sink)?.any_function());
        }
        Commands::ClassMethod => {
            println!("{}", load(&mut sink)?.get_from_class_method());
        }
        Commands::ObjectMethod => {
            let module = load(&mut sink)?;
            let instance = module
                .any_class(&mut sink)
                .context("Failed to construct AnyClass")?;
            println!("{}", instance.get_from_object_method());
        }
        Commands::Process => run_process_wide(),
        Commands::Surface { pretty } => {
            let report = SurfaceReport::collect(&load(&mut sink)?);
            let json = if pretty {
                serde_json::to_string_pretty(&report)?
            } else {
                serde_json::to_string(&report)?
            };
            println!("{}", json);
        }
    }

    Ok(())
}

fn load(sink: &mut DiagnosticSink<Box<dyn Write>>) -> Result<ExampleModule> {
    ExampleModule::load(sink).context("Failed to load example_module")
}

/// 明示的なロードをせず、最初に触れたシンボルでロードさせる
fn run_process_wide() {
    let class_method = AnyClass::get_from_class_method();
    println!("{}", class_method);
    println!("{}", any_function());

    let first = AnyClass::new();
    let second = AnyClass::new();
    println!("{}", first.get_from_object_method());
    println!("{}", second.get_from_object_method());
}
