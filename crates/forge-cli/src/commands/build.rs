//! Implementation of the `forge build` command.
//!
//! Responsibility: resolve the build variables and settings from flags,
//! configuration and workspace defaults, run the core build service, and
//! display the outcome. No pipeline logic lives here.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use forge_adapters::{LocalFilesystem, SystemProcessRunner, resources};
use forge_core::{
    application::{BuildService, BuildSettings, Filesystem},
    domain::{BuildReport, LogEntry, LogLevel, Var},
};

use crate::{
    cli::{BuildArgs, GlobalArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Where the built-in resource bundle is extracted, under the intermediate dir.
const EXTRACTED_RESOURCES: &str = ".forge-res";

/// Build variables after applying flags, config and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ResolvedPaths {
    workspace: PathBuf,
    project: PathBuf,
    engine_dir: PathBuf,
    int_dir: PathBuf,
    build_dir: PathBuf,
}

#[derive(Serialize)]
struct BuildOutcome<'a> {
    success: bool,
    report: Option<&'a BuildReport>,
    log: &'a [LogEntry],
}

/// Execute the `forge build` command.
#[instrument(skip_all, fields(project = %args.project.display()))]
pub fn execute(
    args: BuildArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let paths = resolve_paths(&args, &config)?;
    debug!(?paths, "Build variables resolved");

    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let resources_dir = resolve_resources(&args, &config, filesystem.as_ref(), &paths.int_dir)?;

    let settings = build_settings(&args, &config, resources_dir);
    let mut service = BuildService::new(filesystem, Arc::new(SystemProcessRunner::new()), settings);
    service.set_var(Var::WorkspacePath, &paths.workspace);
    service.set_var(Var::ProjectPath, &paths.project);
    service.set_var(Var::EngineDir, &paths.engine_dir);
    service.set_var(Var::IntDir, &paths.int_dir);
    service.set_var(Var::BuildDir, &paths.build_dir);

    let spinner = output.spinner(format!("Building {}", paths.project.display()));
    let success = service.build();
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if output.is_json() {
        output.json(&BuildOutcome {
            success,
            report: service.report(),
            log: service.log().entries(),
        })?;
    } else if let Some(report) = service.report() {
        print_report(report, service.log().entries(), &output)?;
    }

    if success {
        info!("Build completed");
        return Ok(());
    }

    let log = service.log();
    let message = log
        .errors()
        .next()
        .map(|entry| entry.message.clone())
        .unwrap_or_else(|| "build reported failure without an error entry".into());
    Err(CliError::BuildFailed {
        stage: log.failed_stage(),
        cause: service.failure_category(),
        message,
        log_file: global.log_file,
    })
}

fn resolve_paths(args: &BuildArgs, config: &AppConfig) -> CliResult<ResolvedPaths> {
    let engine_dir = args
        .engine_dir
        .clone()
        .or_else(|| config.paths.engine_dir.clone())
        .ok_or(CliError::MissingVariable {
            var: Var::EngineDir,
            flag: "--engine-dir",
        })?;

    let workspace = args
        .workspace
        .clone()
        .unwrap_or_else(|| default_workspace(&args.project));

    let int_dir = args
        .int_dir
        .clone()
        .or_else(|| config.paths.intermediate_dir.clone())
        .unwrap_or_else(|| workspace.join("int"));

    let build_dir = args
        .build_dir
        .clone()
        .or_else(|| config.paths.build_dir.clone())
        .unwrap_or_else(|| workspace.join("bin"));

    Ok(ResolvedPaths {
        workspace,
        project: args.project.clone(),
        engine_dir,
        int_dir,
        build_dir,
    })
}

/// The project directory: the path itself, or a descriptor's parent.
fn default_workspace(project: &Path) -> PathBuf {
    if project.is_file() {
        match project.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    } else {
        project.to_path_buf()
    }
}

fn resolve_resources(
    args: &BuildArgs,
    config: &AppConfig,
    filesystem: &dyn Filesystem,
    int_dir: &Path,
) -> CliResult<PathBuf> {
    let explicit = args
        .resources
        .as_deref()
        .or(config.paths.resources_dir.as_deref());
    if explicit.is_some() {
        return Ok(resources::discover(filesystem, explicit)?);
    }

    match resources::discover(filesystem, None) {
        Ok(found) => Ok(found),
        Err(e) => {
            debug!(error = %e, "Falling back to the built-in resource bundle");
            Ok(resources::extract_builtin(
                filesystem,
                &int_dir.join(EXTRACTED_RESOURCES),
            )?)
        }
    }
}

fn build_settings(args: &BuildArgs, config: &AppConfig, resources_dir: PathBuf) -> BuildSettings {
    let pick = |flag: &[String], configured: &[String]| {
        if flag.is_empty() {
            configured.to_vec()
        } else {
            flag.to_vec()
        }
    };

    BuildSettings {
        build_program: args
            .cmake
            .clone()
            .unwrap_or_else(|| config.build_tool.program.clone()),
        configure_args: pick(&args.configure_args, &config.build_tool.configure_args),
        build_args: pick(&args.build_args, &config.build_tool.build_args),
        resources_dir,
    }
}

fn print_report(report: &BuildReport, log: &[LogEntry], output: &OutputManager) -> CliResult<()> {
    output.success(&format!(
        "Built '{}' -> {}",
        report.project_name,
        report.executable.display()
    ))?;

    if report.component_types.is_empty() {
        output.info("No component types registered")?;
    } else {
        output.info(&format!(
            "Component types: {}",
            report.component_types.join(", ")
        ))?;
    }

    let warnings = log.iter().filter(|e| e.level == LogLevel::Warn).count();
    if warnings > 0 {
        output.warning(&format!("{warnings} warning(s) during build"))?;
    }
    Ok(())
}
