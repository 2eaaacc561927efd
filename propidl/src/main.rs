//! CLI entrypoint for `propidl`.

mod cli;

use camino::Utf8Path;
use clap::Parser;
use tracing::info;

use propidl::config::GeneratorConfig;
use propidl::emit::{InterfaceLayout, write_interface};
use propidl::error::PropidlError;
use propidl::output::{self, OutputMode, WriteOutcome};
use propidl::pipeline::{self, InterfacePlan};
use propidl::table::load_table;

use crate::cli::Args;

fn main() -> Result<(), PropidlError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    run()
}

fn run() -> Result<(), PropidlError> {
    let args = Args::parse();
    let config = GeneratorConfig::load(args.config.as_deref(), &args.overrides())?;
    let mode = args.output.mode(config.out_dir.as_ref())?;

    let table = load_table(&args.table, &config.binding)?;
    let plans = pipeline::plan_interfaces(&table, &config, &args.targets)?;
    let layout = config.layout();

    match mode {
        OutputMode::Stdout => stream_interfaces(&plans, &layout),
        OutputMode::Directory(dir) => write_interfaces(&dir, &plans, &layout),
        OutputMode::Check(dir) => check_interfaces(&dir, &plans, &layout),
    }
}

fn stream_interfaces(
    plans: &[InterfacePlan],
    layout: &InterfaceLayout<'_>,
) -> Result<(), PropidlError> {
    let mut stdout = std::io::stdout().lock();
    for plan in plans {
        write_interface(&mut stdout, layout, &plan.target, &plan.attributes)?;
    }
    Ok(())
}

fn write_interfaces(
    dir: &Utf8Path,
    plans: &[InterfacePlan],
    layout: &InterfaceLayout<'_>,
) -> Result<(), PropidlError> {
    for plan in plans {
        let content = plan.render(layout);
        let (path, outcome) =
            output::write_interface_file(dir, &plan.target.file_name(), &content)?;
        info!(
            path = %path,
            attributes = plan.attributes.len(),
            digest = %pipeline::digest(&content),
            written = matches!(outcome, WriteOutcome::Written),
            "interface generated"
        );
    }
    Ok(())
}

fn check_interfaces(
    dir: &Utf8Path,
    plans: &[InterfacePlan],
    layout: &InterfaceLayout<'_>,
) -> Result<(), PropidlError> {
    let mut stale = Vec::new();
    for plan in plans {
        let file_name = plan.target.file_name();
        let content = plan.render(layout);
        if output::is_current(dir, &file_name, &content)? {
            info!(file = %file_name, digest = %pipeline::digest(&content), "interface current");
        } else {
            stale.push(dir.join(&file_name).into_string());
        }
    }
    if stale.is_empty() {
        Ok(())
    } else {
        Err(PropidlError::Stale(stale.join(", ")))
    }
}
