// Licensed under the Apache-2.0 license

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use rtlgen_generator::{
    ActBuilder, ActEmitter, GeneratorConfig, SynthesisRegistry, SystemVerilogTemplates,
};
use rtlgen_model::{DiagnosticSink, LogSink, ModelLoader, Severity, WarningSet};
use simple_logger::SimpleLogger;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "rtlgen",
    author,
    version,
    about = "Generate SystemVerilog register blocks from register model documents"
)]
struct Cli {
    /// Directory searched for sources not found as given (repeatable)
    #[arg(short = 'I', long = "include-dir", value_name = "DIR")]
    include_dirs: Vec<PathBuf>,

    /// Top-level address map (default: the last one defined)
    #[arg(short = 't', long = "top", value_name = "NAME")]
    top: Option<String>,

    /// Leave out fields whose `ispresent` property is false
    #[arg(long = "skip-not-present")]
    skip_not_present: bool,

    /// Enable an elaboration warning, or disable it with a `no-` prefix.
    /// Names: all, missing-reset, implicit, implicit-addr, implicit-field-pos
    #[arg(short = 'W', long = "warn", value_name = "NAME")]
    warnings: Vec<String>,

    /// Log progress
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Log every synthesized and emitted node
    #[arg(long = "debug")]
    debug: bool,

    /// Output file
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: PathBuf,

    /// Text placed before the generated modules (default: a generated-file banner)
    #[arg(long = "header", value_name = "TEXT")]
    header: Option<String>,

    /// Text placed after the generated modules
    #[arg(long = "footer", value_name = "TEXT")]
    footer: Option<String>,

    /// Register model documents (.json or .toml)
    #[arg(value_name = "SRC", required = true)]
    srcs: Vec<PathBuf>,
}

impl Cli {
    fn log_level(&self) -> LevelFilter {
        if self.debug {
            LevelFilter::Debug
        } else if self.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        }
    }
}

fn banner(srcs: &[PathBuf]) -> String {
    let names: Vec<String> = srcs
        .iter()
        .map(|src| {
            src.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| src.display().to_string())
        })
        .collect();
    format!(
        "// Generated by rtlgen from {}.\n// Do not edit by hand.",
        names.join(", ")
    )
}

fn write_output(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

fn run(cli: &Cli, sink: &mut dyn DiagnosticSink) -> Result<()> {
    let warnings = WarningSet::from_flags(&cli.warnings, sink)?;
    let loader = cli
        .include_dirs
        .iter()
        .fold(ModelLoader::new().warnings(warnings), |loader, dir| {
            loader.include_dir(dir.clone())
        });
    let model = loader
        .load(&cli.srcs, sink)
        .context("failed to compile the register model")?;
    let top = model.require_top(cli.top.as_deref())?;

    let header = cli.header.clone().unwrap_or_else(|| banner(&cli.srcs));
    let mut config = GeneratorConfig::new()
        .design_name(&top.name)
        .skip_not_present(cli.skip_not_present)
        .header(&header);
    if let Some(footer) = &cli.footer {
        config = config.footer(footer);
    }

    let builder = ActBuilder::new(config.clone(), SynthesisRegistry::with_defaults())?;
    let tree = builder
        .build(top, sink)
        .with_context(|| format!("failed to build design '{}'", top.name))?;

    let templates = SystemVerilogTemplates;
    let text = ActEmitter::new(&config, &templates)?
        .emit(&tree, sink)
        .context("failed to generate SystemVerilog")?;

    write_output(&cli.output, &text)?;
    log::info!("Wrote {}", cli.output.display());
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = SimpleLogger::new().with_level(cli.log_level()).init() {
        eprintln!("failed to initialize logging: {err}");
    }

    let mut sink = LogSink;
    if let Err(err) = run(&cli, &mut sink) {
        sink.report(Severity::Fatal, &format!("{err:#}"), None);
        std::process::exit(1);
    }
}
