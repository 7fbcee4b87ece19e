//! Where everything lives during a build.
//!
//! ```text
//! <resources>/
//! ├── TungstenReflect/             ← reflection tool skeleton
//! ├── TungstenRuntime/             ← runtime executable skeleton
//! └── Templates/*.txt, *.in.hpp
//!
//! <int_dir>/
//! ├── CMakeLists.txt               ← rendered
//! ├── ComponentTypes.txt           ← written by TungstenReflect
//! ├── TungstenReflect/src/generated/projectDefines.hpp
//! ├── TungstenRuntime/src/generated/projectDefines.hpp
//! └── build/                       ← CMake build tree
//!
//! <build_dir>/<executable>          ← distributed artifact
//! ```

use std::env::consts::EXE_SUFFIX;
use std::path::{Path, PathBuf};

use crate::domain::{ProjectDescriptor, ReplacementSet};

pub const REFLECT_PROJECT: &str = "TungstenReflect";
pub const RUNTIME_PROJECT: &str = "TungstenRuntime";
pub const ENGINE_CORE_DIR: &str = "TungstenCore";
pub const COMPONENT_TYPES_FILE: &str = "ComponentTypes.txt";

const TEMPLATES_DIR: &str = "Templates";
const BUILD_TREE_DIR: &str = "build";
const GENERATED_DIR: &str = "src/generated";
const PROJECT_DEFINES_FILE: &str = "projectDefines.hpp";

/// Paths derived from the build variables and the resource bundle location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceLayout {
    int_dir: PathBuf,
    dist_dir: PathBuf,
    engine_dir: PathBuf,
    resources_dir: PathBuf,
}

impl WorkspaceLayout {
    pub fn new(
        int_dir: impl Into<PathBuf>,
        dist_dir: impl Into<PathBuf>,
        engine_dir: impl Into<PathBuf>,
        resources_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            int_dir: int_dir.into(),
            dist_dir: dist_dir.into(),
            engine_dir: engine_dir.into(),
            resources_dir: resources_dir.into(),
        }
    }

    // ── Intermediate tree ────────────────────────────────────────────────

    pub fn int_dir(&self) -> &Path {
        &self.int_dir
    }

    pub fn build_tree(&self) -> PathBuf {
        self.int_dir.join(BUILD_TREE_DIR)
    }

    pub fn reflect_project(&self) -> PathBuf {
        self.int_dir.join(REFLECT_PROJECT)
    }

    pub fn runtime_project(&self) -> PathBuf {
        self.int_dir.join(RUNTIME_PROJECT)
    }

    pub fn reflect_generated(&self) -> PathBuf {
        self.reflect_project().join(GENERATED_DIR)
    }

    pub fn runtime_generated(&self) -> PathBuf {
        self.runtime_project().join(GENERATED_DIR)
    }

    pub fn component_types_file(&self) -> PathBuf {
        self.int_dir.join(COMPONENT_TYPES_FILE)
    }

    /// Reflection tool produced by the compile stage.
    pub fn reflect_executable(&self) -> PathBuf {
        self.build_tree()
            .join(REFLECT_PROJECT)
            .join(executable_file_name(REFLECT_PROJECT))
    }

    /// Runtime executable produced by the compile stage.
    pub fn runtime_executable(&self, descriptor: &ProjectDescriptor) -> PathBuf {
        self.build_tree()
            .join(RUNTIME_PROJECT)
            .join(executable_file_name(descriptor.executable_name()))
    }

    // ── Distribution ─────────────────────────────────────────────────────

    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    pub fn dist_executable(&self, descriptor: &ProjectDescriptor) -> PathBuf {
        self.dist_dir
            .join(executable_file_name(descriptor.executable_name()))
    }

    // ── Inputs ───────────────────────────────────────────────────────────

    pub fn engine_core_dir(&self) -> PathBuf {
        self.engine_dir.join(ENGINE_CORE_DIR)
    }

    pub fn reflect_skeleton(&self) -> PathBuf {
        self.resources_dir.join(REFLECT_PROJECT)
    }

    pub fn runtime_skeleton(&self) -> PathBuf {
        self.resources_dir.join(RUNTIME_PROJECT)
    }

    pub fn template(&self, name: &str) -> PathBuf {
        self.resources_dir.join(TEMPLATES_DIR).join(name)
    }

    /// The five files rendered before the external build runs.
    ///
    /// `engine_core_dir` and `project_dir` are the resolved, absolute forms
    /// that get written into `CMakeLists.txt`.
    pub fn render_jobs(
        &self,
        descriptor: &ProjectDescriptor,
        engine_core_dir: &Path,
        project_dir: &Path,
    ) -> Vec<RenderJob> {
        let name = descriptor.project_name();

        let project_cmake = ReplacementSet::new()
            .with(
                "@TUNGSTEN_CORE_SOURCE_DIR@",
                cmake_path(engine_core_dir),
            )
            .with("@TUNGSTEN_PROJECT_SOURCE_DIR@", cmake_path(project_dir))
            .with(
                "@TUNGSTEN_PROJECT_BINARY_DIR@",
                format!("${{CMAKE_BINARY_DIR}}/{name}"),
            );

        let reflect_cmake = ReplacementSet::new().with("@PROJECT_NAME@", name);

        let defines = ReplacementSet::new()
            .with("@TUNGSTEN_PROJECT_INCLUDE_PATH@", descriptor.include())
            .with(
                "@TUNGSTEN_PROJECT_COMPONENT_LIST@",
                descriptor.component_list(),
            );

        let runtime_cmake = ReplacementSet::new()
            .with("@PROJECT_NAME@", name)
            .with(
                "@EXECUTABLE_TARGET_NAME@",
                descriptor.executable_target_name(),
            )
            .with("@EXECUTABLE_NAME@", descriptor.executable_name());

        vec![
            RenderJob {
                template: self.template("TungstenProjectCMakeListsTemplate.txt"),
                output: self.int_dir.join("CMakeLists.txt"),
                replacements: project_cmake,
            },
            RenderJob {
                template: self.template("TungstenReflectCMakeListsTemplate.txt"),
                output: self.reflect_project().join("CMakeLists.txt"),
                replacements: reflect_cmake,
            },
            RenderJob {
                template: self.template("TungstenReflectProjectDefines.in.hpp"),
                output: self.reflect_generated().join(PROJECT_DEFINES_FILE),
                replacements: defines.clone(),
            },
            RenderJob {
                template: self.template("TungstenRuntimeCMakeListsTemplate.txt"),
                output: self.runtime_project().join("CMakeLists.txt"),
                replacements: runtime_cmake,
            },
            RenderJob {
                template: self.template("TungstenRuntimeProjectDefines.in.hpp"),
                output: self.runtime_generated().join(PROJECT_DEFINES_FILE),
                replacements: defines,
            },
        ]
    }
}

/// One template to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    pub template: PathBuf,
    pub output: PathBuf,
    pub replacements: ReplacementSet,
}

fn executable_file_name(stem: &str) -> String {
    format!("{stem}{EXE_SUFFIX}")
}

/// CMake treats backslashes as escapes, so paths are written with `/`.
fn cmake_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> WorkspaceLayout {
        WorkspaceLayout::new("/w/int", "/w/dist", "/engine", "/res")
    }

    fn demo() -> ProjectDescriptor {
        ProjectDescriptor::parse("projectName: Demo\ninclude: \"demo.h\"\ncomponentList: \"A,B,C\"")
            .unwrap()
    }

    #[test]
    fn intermediate_paths() {
        let l = layout();
        assert_eq!(l.build_tree(), Path::new("/w/int/build"));
        assert_eq!(
            l.reflect_generated(),
            Path::new("/w/int/TungstenReflect/src/generated")
        );
        assert_eq!(
            l.runtime_generated(),
            Path::new("/w/int/TungstenRuntime/src/generated")
        );
        assert_eq!(
            l.component_types_file(),
            Path::new("/w/int/ComponentTypes.txt")
        );
    }

    #[test]
    fn executables_live_in_the_build_tree() {
        let l = layout();
        let d = demo();
        assert_eq!(
            l.runtime_executable(&d),
            PathBuf::from(format!("/w/int/build/TungstenRuntime/Demo{EXE_SUFFIX}"))
        );
        assert_eq!(
            l.reflect_executable(),
            PathBuf::from(format!(
                "/w/int/build/TungstenReflect/TungstenReflect{EXE_SUFFIX}"
            ))
        );
        assert_eq!(
            l.dist_executable(&d),
            PathBuf::from(format!("/w/dist/Demo{EXE_SUFFIX}"))
        );
    }

    #[test]
    fn engine_core_is_under_engine_dir() {
        assert_eq!(layout().engine_core_dir(), Path::new("/engine/TungstenCore"));
    }

    #[test]
    fn render_jobs_cover_every_generated_file() {
        let jobs = layout().render_jobs(&demo(), Path::new("/engine/TungstenCore"), Path::new("/p"));
        let outputs: Vec<&Path> = jobs.iter().map(|j| j.output.as_path()).collect();
        assert_eq!(
            outputs,
            vec![
                Path::new("/w/int/CMakeLists.txt"),
                Path::new("/w/int/TungstenReflect/CMakeLists.txt"),
                Path::new("/w/int/TungstenReflect/src/generated/projectDefines.hpp"),
                Path::new("/w/int/TungstenRuntime/CMakeLists.txt"),
                Path::new("/w/int/TungstenRuntime/src/generated/projectDefines.hpp"),
            ]
        );
        assert!(jobs.iter().all(|j| j.template.starts_with("/res/Templates")));
    }

    #[test]
    fn project_cmake_points_at_sources_and_binary_dir() {
        let jobs = layout().render_jobs(&demo(), Path::new("/engine/TungstenCore"), Path::new("/p"));
        let rendered = jobs[0].replacements.apply(
            "@TUNGSTEN_CORE_SOURCE_DIR@|@TUNGSTEN_PROJECT_SOURCE_DIR@|@TUNGSTEN_PROJECT_BINARY_DIR@",
        );
        assert_eq!(rendered, "/engine/TungstenCore|/p|${CMAKE_BINARY_DIR}/Demo");
    }

    #[test]
    fn runtime_cmake_uses_target_and_executable_names() {
        let jobs = layout().render_jobs(&demo(), Path::new("/e"), Path::new("/p"));
        let rendered = jobs[3]
            .replacements
            .apply("@PROJECT_NAME@ @EXECUTABLE_TARGET_NAME@ @EXECUTABLE_NAME@");
        assert_eq!(rendered, "Demo DemoRuntime Demo");
    }

    #[test]
    fn both_defines_share_include_and_component_list() {
        let jobs = layout().render_jobs(&demo(), Path::new("/e"), Path::new("/p"));
        let template = "#include @TUNGSTEN_PROJECT_INCLUDE_PATH@ / @TUNGSTEN_PROJECT_COMPONENT_LIST@";
        assert_eq!(jobs[2].replacements.apply(template), "#include demo.h / A,B,C");
        assert_eq!(jobs[2].replacements, jobs[4].replacements);
    }

    #[test]
    fn cmake_paths_use_forward_slashes() {
        assert_eq!(cmake_path(Path::new(r"C:\engine\TungstenCore")), "C:/engine/TungstenCore");
    }
}
