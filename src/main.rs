use clap::{Parser, ValueEnum};
use multistep_dialog::config::DialogConfig;
use multistep_dialog::demo::configured::ConfiguredHost;
use multistep_dialog::demo::dynamic::DynamicHost;
use multistep_dialog::demo::standard::StandardHost;
use multistep_dialog::demo::validation::ValidationHost;
use multistep_dialog::error::Error;
use multistep_dialog::logging;
use multistep_dialog::runtime::{DialogHost, Runtime, script};
use multistep_dialog::terminal::{Terminal, TerminalSize};
use multistep_dialog::ui::renderer::Renderer;
use multistep_dialog::ui::span::plain_text;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Demo {
    Standard,
    Validation,
    Dynamic,
}

#[derive(Debug, Parser)]
#[command(name = "multistep-demo", version, about = "Multi-step dialog demo pages")]
struct Cli {
    /// Demo page to host.
    #[arg(long, value_enum, default_value_t = Demo::Standard, conflicts_with = "config")]
    demo: Demo,

    /// Run a flow described by a YAML file instead of a demo page.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write tracing output to this file. Filter with MULTISTEP_LOG.
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Apply comma-separated commands without a terminal and print the
    /// resulting dialog, e.g. `open,type:Acme,next`.
    #[arg(long, value_name = "COMMANDS")]
    script: Option<String>,

    /// With --script, print a JSON snapshot instead of the rendered frame.
    #[arg(long, requires = "script")]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Error> {
    let _log_guard = cli.log_file.as_deref().map(logging::init).transpose()?;

    if let Some(path) = &cli.config {
        let config = DialogConfig::load(path)?;
        tracing::info!(config = %path.display(), steps = config.steps.len(), "hosting configured flow");
        let renderer = Renderer::new(config.layout.sidebar_width);
        return drive(ConfiguredHost::new(config), renderer, &cli);
    }
    tracing::info!(demo = ?cli.demo, "hosting demo page");
    match cli.demo {
        Demo::Standard => drive(StandardHost::new(), Renderer::default(), &cli),
        Demo::Validation => drive(ValidationHost::new(), Renderer::default(), &cli),
        Demo::Dynamic => drive(DynamicHost::new(), Renderer::default(), &cli),
    }
}

fn drive<H: DialogHost>(host: H, renderer: Renderer, cli: &Cli) -> Result<(), Error> {
    let mut runtime = Runtime::new(host).with_renderer(renderer);

    let Some(raw) = &cli.script else {
        tracing::info!("starting interactive session");
        let mut terminal = Terminal::new()?;
        return runtime.run(&mut terminal);
    };

    for command in script::parse(raw)? {
        runtime.apply(command)?;
        if runtime.should_exit() {
            break;
        }
    }

    if cli.json {
        let snapshot = runtime.snapshot()?;
        let json = serde_json::to_string_pretty(&snapshot).map_err(std::io::Error::other)?;
        println!("{json}");
    } else {
        let frame = runtime.frame(TerminalSize::default())?;
        for line in &frame.lines {
            println!("{}", plain_text(line).trim_end());
        }
    }
    Ok(())
}
