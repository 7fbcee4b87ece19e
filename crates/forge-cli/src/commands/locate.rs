//! `forge locate` - resolve and optionally show a project descriptor.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use forge_adapters::LocalFilesystem;
use forge_core::{
    application::{Filesystem, ProjectLocator},
    domain::ProjectDescriptor,
    error::ForgeError,
};

use crate::{
    cli::LocateArgs,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[derive(Serialize)]
struct Located {
    descriptor: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    project: Option<ProjectDescriptor>,
}

#[instrument(skip_all, fields(path = %args.path.display()))]
pub fn execute(args: LocateArgs, output: OutputManager) -> CliResult<()> {
    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let descriptor = ProjectLocator::new(Arc::clone(&filesystem)).locate(&args.path)?;

    let project = if args.show {
        let raw = filesystem
            .read_to_string(&descriptor)
            .with_cli_context(|| "reading descriptor")?;
        Some(ProjectDescriptor::parse(&raw).map_err(ForgeError::from)?)
    } else {
        None
    };

    if output.is_json() {
        output.json(&Located {
            descriptor,
            project,
        })?;
        return Ok(());
    }

    // The path goes through print() so `forge locate` composes in scripts.
    output.print(&descriptor.display().to_string())?;
    if let Some(project) = project {
        output.print(&format!("  projectName: {}", project.project_name()))?;
        output.print(&format!("  include:     {}", project.include()))?;
        output.print(&format!("  components:  {}", project.component_list()))?;
        output.print(&format!("  executable:  {}", project.executable_name()))?;
        for field in project.missing_optional() {
            output.warning(&format!("{} has no \"{field}\"", descriptor.display()))?;
        }
    }
    Ok(())
}
