//! Build Service - the pipeline orchestrator.
//!
//! Runs the eight stages in order, stopping at the first failure:
//! 1. Locate the `.wproj` descriptor
//! 2. Read and parse it
//! 3. Prepare the intermediate workspace (skeletons, directories)
//! 4. Render the five generated files
//! 5. Configure the CMake build tree
//! 6. Compile
//! 7. Run the reflection tool
//! 8. Collect the runtime binary into the distribution directory
//!
//! `build()` never returns an error. Every outcome is recorded in the
//! [`BuildLog`] and summarized as a bool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, instrument};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, ProcessRunner},
        services::{ProjectLocator, RenderService},
    },
    domain::{
        BuildLog, BuildReport, ProcessInvocation, ProcessStep, ProjectDescriptor, Stage, Var,
        VariableStore, WorkspaceLayout,
    },
    error::{ErrorCategory, ForgeError, ForgeResult},
};

/// Knobs that are not build variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    /// The CMake executable.
    pub build_program: PathBuf,
    /// Extra arguments appended to the configure invocation.
    pub configure_args: Vec<String>,
    /// Extra arguments appended to the build invocation.
    pub build_args: Vec<String>,
    /// Directory holding the skeletons and `Templates/`.
    pub resources_dir: PathBuf,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            build_program: PathBuf::from("cmake"),
            configure_args: Vec::new(),
            build_args: Vec::new(),
            resources_dir: PathBuf::from("res"),
        }
    }
}

/// Main build service.
///
/// Owns the variable store and the diagnostic log for its builds.
pub struct BuildService {
    filesystem: Arc<dyn Filesystem>,
    runner: Arc<dyn ProcessRunner>,
    locator: ProjectLocator,
    renderer: RenderService,
    settings: BuildSettings,
    vars: VariableStore,
    log: BuildLog,
    report: Option<BuildReport>,
    failure: Option<ErrorCategory>,
}

/// Variables every build needs. WorkspacePath is only a source of defaults.
const REQUIRED_VARS: [Var; 4] = [Var::ProjectPath, Var::EngineDir, Var::IntDir, Var::BuildDir];

struct Inputs {
    project: PathBuf,
    engine_dir: PathBuf,
    int_dir: PathBuf,
    build_dir: PathBuf,
}

impl BuildService {
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        runner: Arc<dyn ProcessRunner>,
        settings: BuildSettings,
    ) -> Self {
        Self {
            locator: ProjectLocator::new(Arc::clone(&filesystem)),
            renderer: RenderService::new(Arc::clone(&filesystem)),
            filesystem,
            runner,
            settings,
            vars: VariableStore::new(),
            log: BuildLog::new(),
            report: None,
            failure: None,
        }
    }

    // -------------------------------------------------------------------------
    // Variables
    // -------------------------------------------------------------------------

    pub fn set_var(&mut self, var: Var, path: impl Into<PathBuf>) {
        self.vars.set(var, path);
    }

    pub fn get_var(&self, var: Var) -> Option<&Path> {
        self.vars.get(var)
    }

    pub fn is_var_set(&self, var: Var) -> bool {
        self.vars.is_set(var)
    }

    pub fn clear_var(&mut self, var: Var) {
        self.vars.clear(var);
    }

    /// Diagnostics of the most recent build.
    pub fn log(&self) -> &BuildLog {
        &self.log
    }

    /// Summary of the most recent build, if it succeeded.
    pub fn report(&self) -> Option<&BuildReport> {
        self.report.as_ref()
    }

    /// Category of the error that stopped the most recent build.
    pub fn failure_category(&self) -> Option<ErrorCategory> {
        self.failure
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    /// Run the full pipeline. Returns `true` only if every stage succeeded.
    ///
    /// The previous run's log and report are discarded first.
    #[instrument(skip_all, fields(build_id = %Uuid::new_v4()))]
    pub fn build(&mut self) -> bool {
        self.log.clear();
        self.report = None;
        self.failure = None;
        self.log.info(None, "Build called.");

        match self.run_pipeline() {
            Ok(report) => {
                self.log.info(
                    None,
                    format!("Build of {} succeeded.", report.project_name),
                );
                self.report = Some(report);
                true
            }
            Err(failure) => {
                self.failure = Some(failure.category);
                self.log.error(failure.stage, failure.message);
                false
            }
        }
    }

    fn run_pipeline(&mut self) -> Result<BuildReport, StageFailure> {
        let inputs = self.inputs()?;
        let fs = Arc::clone(&self.filesystem);

        self.log.info(None, format!("projectPath: {}", inputs.project.display()));
        self.log.info(None, format!("engineDir: {}", inputs.engine_dir.display()));
        self.log.info(None, format!("intDir: {}", inputs.int_dir.display()));
        self.log.info(None, format!("buildDir: {}", inputs.build_dir.display()));

        // 1. Locate
        let descriptor_path = self.locator.locate(&inputs.project).map_err(|e| {
            let message = format!("Could not get project file path: {e}");
            StageFailure::with_message(Stage::Locate, ForgeError::from(e).category(), message)
        })?;
        self.log.info(
            Some(Stage::Locate),
            format!("Project file: {}", descriptor_path.display()),
        );

        // 2. Parse
        let raw = fs.read_to_string(&descriptor_path).map_err(|e| {
            StageFailure::with_message(
                Stage::Parse,
                e.category(),
                format!("Could not read project file: {e}"),
            )
        })?;
        let descriptor = ProjectDescriptor::parse(&raw).map_err(|e| {
            let message = format!("Could not parse {}: {e}", descriptor_path.display());
            StageFailure::with_message(Stage::Parse, ForgeError::from(e).category(), message)
        })?;
        for field in descriptor.missing_optional() {
            self.log.warn(
                Some(Stage::Parse),
                format!(
                    "{} has no \"{field}\", using an empty value",
                    descriptor_path.display()
                ),
            );
        }

        let layout = WorkspaceLayout::new(
            &inputs.int_dir,
            &inputs.build_dir,
            &inputs.engine_dir,
            &self.settings.resources_dir,
        );

        // 3. Prepare workspace
        let stage = Stage::PrepareWorkspace;
        fs.create_dir_all(layout.int_dir()).at(stage)?;
        fs.create_dir_all(&layout.build_tree()).at(stage)?;
        fs.create_dir_all(layout.dist_dir()).at(stage)?;
        fs.copy_dir_all(&layout.reflect_skeleton(), &layout.reflect_project())
            .at(stage)?;
        fs.create_dir_all(&layout.reflect_generated()).at(stage)?;
        fs.copy_dir_all(&layout.runtime_skeleton(), &layout.runtime_project())
            .at(stage)?;
        fs.create_dir_all(&layout.runtime_generated()).at(stage)?;

        // 4. Render
        let engine_core_dir = fs.absolute(&layout.engine_core_dir()).at(Stage::Render)?;
        let project_dir = fs
            .absolute(descriptor_path.parent().unwrap_or(Path::new("")))
            .at(Stage::Render)?;
        let jobs = layout.render_jobs(&descriptor, &engine_core_dir, &project_dir);
        for job in &jobs {
            self.renderer.render_job(job).at(Stage::Render)?;
        }
        self.log
            .info(Some(Stage::Render), format!("Rendered {} files.", jobs.len()));

        // 5. Configure
        let source_dir = fs.absolute(layout.int_dir()).at(Stage::Configure)?;
        let build_tree = fs.absolute(&layout.build_tree()).at(Stage::Configure)?;
        self.log
            .info(Some(Stage::Configure), "Configuring CMake project");
        self.run_step(
            ProcessInvocation::new(ProcessStep::Configure, &self.settings.build_program)
                .arg("-S")
                .arg(&source_dir)
                .arg("-B")
                .arg(&build_tree)
                .args(&self.settings.configure_args),
        )?;

        // 6. Compile
        self.log.info(Some(Stage::Compile), "Building project");
        self.run_step(
            ProcessInvocation::new(ProcessStep::Build, &self.settings.build_program)
                .arg("--build")
                .arg(&build_tree)
                .args(&self.settings.build_args),
        )?;

        // 7. Reflect
        let reflect = fs.absolute(&layout.reflect_executable()).at(Stage::Reflect)?;
        let reflect_output = fs
            .absolute(&layout.component_types_file())
            .at(Stage::Reflect)?;
        self.log.info(Some(Stage::Reflect), "Running TungstenReflect");
        self.run_step(
            ProcessInvocation::new(ProcessStep::Reflect, reflect)
                .arg("-o")
                .arg(&reflect_output),
        )?;

        // 8. Collect
        let executable = layout.dist_executable(&descriptor);
        fs.create_dir_all(layout.dist_dir()).at(Stage::Collect)?;
        fs.copy_file(&layout.runtime_executable(&descriptor), &executable)
            .at(Stage::Collect)?;
        self.log.info(
            Some(Stage::Collect),
            "Copied final binary to distribution folder.",
        );

        let component_types = match fs.read_to_string(&reflect_output) {
            Ok(text) => BuildReport::parse_component_types(&text),
            Err(e) => {
                self.log.warn(
                    Some(Stage::Collect),
                    format!("Could not read reflection output: {e}"),
                );
                Vec::new()
            }
        };

        Ok(BuildReport {
            project_name: descriptor.project_name().to_owned(),
            descriptor: descriptor_path,
            executable,
            component_types,
        })
    }

    fn inputs(&self) -> Result<Inputs, StageFailure> {
        for var in REQUIRED_VARS {
            self.vars.require(var).map_err(|e| StageFailure {
                stage: None,
                category: ErrorCategory::Configuration,
                message: format!("Build variables incomplete: {e}"),
            })?;
        }

        let owned = |var: Var| {
            self.vars
                .get(var)
                .map(Path::to_path_buf)
                .unwrap_or_default()
        };

        Ok(Inputs {
            project: owned(Var::ProjectPath),
            engine_dir: owned(Var::EngineDir),
            int_dir: owned(Var::IntDir),
            build_dir: owned(Var::BuildDir),
        })
    }

    fn run_step(&self, invocation: ProcessInvocation) -> Result<(), StageFailure> {
        let step = invocation.step();
        let stage = step.stage();
        debug!(command = %invocation, "Running external tool");

        let output = self.runner.run(&invocation).at(stage)?;
        if output.success() {
            return Ok(());
        }

        debug!(
            code = ?output.code,
            stdout = %output.stdout,
            stderr = %output.stderr,
            "External tool failed"
        );
        let err: ForgeError = ApplicationError::ProcessFailed {
            step,
            program: invocation.program().to_path_buf(),
            code: output.code,
        }
        .into();
        Err(StageFailure::new(stage, &err))
    }
}

// -----------------------------------------------------------------------------
// Failure reporting
// -----------------------------------------------------------------------------

/// The single error line a failed build records.
struct StageFailure {
    stage: Option<Stage>,
    category: ErrorCategory,
    message: String,
}

impl StageFailure {
    fn new(stage: Stage, err: &ForgeError) -> Self {
        let message = match err {
            ForgeError::Application(ApplicationError::ProcessFailed { step, .. }) => {
                step.failure_message().to_owned()
            }
            e if e.is_filesystem() => format!("Building Project Filesystem Error: {e}"),
            e => format!("Building Project General Error: {e}"),
        };
        Self {
            stage: Some(stage),
            category: err.category(),
            message,
        }
    }

    fn with_message(stage: Stage, category: ErrorCategory, message: String) -> Self {
        Self {
            stage: Some(stage),
            category,
            message,
        }
    }
}

trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, StageFailure>;
}

impl<T> AtStage<T> for ForgeResult<T> {
    fn at(self, stage: Stage) -> Result<T, StageFailure> {
        self.map_err(|e| StageFailure::new(stage, &e))
    }
}
