//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "forge",
    bin_name = "forge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Build orchestrator for Tungsten projects",
    long_about = "Forge turns a Tungsten project descriptor (.wproj) into a runnable \
                  executable: it generates CMake projects from templates, drives CMake, \
                  runs the reflection tool and collects the final binary.",
    after_help = "EXAMPLES:\n\
        \x20 forge build ./game --engine-dir ~/src/tungsten\n\
        \x20 forge locate ./game\n\
        \x20 forge init\n\
        \x20 forge completions bash > /usr/share/bash-completion/completions/forge",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Build a Tungsten project.
    #[command(
        visible_alias = "b",
        about = "Build a project into an executable",
        after_help = "EXAMPLES:\n\
            \x20 forge build --engine-dir ../tungsten\n\
            \x20 forge build game/demo.wproj --engine-dir ../tungsten --build-dir dist\n\
            \x20 forge build game --engine-dir ../tungsten --configure-arg=-DCMAKE_BUILD_TYPE=Release"
    )]
    Build(BuildArgs),

    /// Resolve the project descriptor for a path.
    #[command(
        about = "Find the project descriptor (.wproj)",
        after_help = "EXAMPLES:\n\
            \x20 forge locate\n\
            \x20 forge locate ./game --show"
    )]
    Locate(LocateArgs),

    /// Initialise a Forge configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 forge init           # default location\n\
            \x20 forge init --local   # .forge.toml in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 forge completions bash > ~/.local/share/bash-completion/completions/forge\n\
            \x20 forge completions zsh  > ~/.zfunc/_forge\n\
            \x20 forge completions fish > ~/.config/fish/completions/forge.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the Forge configuration.
    #[command(
        about = "Configuration inspection",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 forge config get paths.engine_dir\n\
            \x20 forge config list\n\
            \x20 forge config path"
    )]
    Config(ConfigCommands),
}

// ── build ─────────────────────────────────────────────────────────────────────

/// Arguments for `forge build`.
#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Descriptor file, or a directory holding exactly one descriptor.
    #[arg(value_name = "PROJECT", default_value = ".")]
    pub project: PathBuf,

    /// Tungsten engine checkout (must contain `TungstenCore/`).
    #[arg(short = 'e', long = "engine-dir", value_name = "DIR")]
    pub engine_dir: Option<PathBuf>,

    /// Scratch directory for generated files and the CMake build tree.
    #[arg(long = "int-dir", value_name = "DIR")]
    pub int_dir: Option<PathBuf>,

    /// Directory the final executable is copied into.
    #[arg(short = 'o', long = "build-dir", value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// Base directory for the default intermediate and build directories.
    #[arg(short = 'w', long = "workspace", value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Resource bundle holding the skeletons and templates.
    #[arg(long = "resources", value_name = "DIR")]
    pub resources: Option<PathBuf>,

    /// CMake executable to invoke.
    #[arg(long = "cmake", value_name = "PROGRAM")]
    pub cmake: Option<PathBuf>,

    /// Extra argument for the configure step (repeatable).
    #[arg(long = "configure-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub configure_args: Vec<String>,

    /// Extra argument for the compile step (repeatable).
    #[arg(long = "build-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub build_args: Vec<String>,
}

// ── locate ────────────────────────────────────────────────────────────────────

/// Arguments for `forge locate`.
#[derive(Debug, Args)]
pub struct LocateArgs {
    /// Descriptor file or project directory.
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Also parse the descriptor and print its fields.
    #[arg(short = 's', long = "show")]
    pub show: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `forge init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to `.forge.toml` in the current directory.
    #[arg(
        long = "local",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `forge completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `forge config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `paths.engine_dir`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn build_defaults_to_current_directory() {
        let cli = Cli::parse_from(["forge", "build"]);
        let Commands::Build(args) = cli.command else {
            panic!("expected Build command");
        };
        assert_eq!(args.project, PathBuf::from("."));
        assert!(args.engine_dir.is_none());
        assert!(args.configure_args.is_empty());
    }

    #[test]
    fn build_accepts_paths_and_tool_args() {
        let cli = Cli::parse_from([
            "forge",
            "build",
            "game/demo.wproj",
            "--engine-dir",
            "../tungsten",
            "--int-dir",
            "tmp/int",
            "-o",
            "dist",
            "--cmake",
            "/opt/cmake/bin/cmake",
            "--configure-arg",
            "-DCMAKE_BUILD_TYPE=Release",
            "--build-arg",
            "--parallel",
        ]);
        let Commands::Build(args) = cli.command else {
            panic!("expected Build command");
        };
        assert_eq!(args.project, PathBuf::from("game/demo.wproj"));
        assert_eq!(args.engine_dir, Some(PathBuf::from("../tungsten")));
        assert_eq!(args.int_dir, Some(PathBuf::from("tmp/int")));
        assert_eq!(args.build_dir, Some(PathBuf::from("dist")));
        assert_eq!(args.cmake, Some(PathBuf::from("/opt/cmake/bin/cmake")));
        assert_eq!(args.configure_args, ["-DCMAKE_BUILD_TYPE=Release"]);
        assert_eq!(args.build_args, ["--parallel"]);
    }

    #[test]
    fn build_alias() {
        let cli = Cli::parse_from(["forge", "b", "game"]);
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn locate_with_show() {
        let cli = Cli::parse_from(["forge", "locate", "game", "--show"]);
        let Commands::Locate(args) = cli.command else {
            panic!("expected Locate command");
        };
        assert_eq!(args.path, PathBuf::from("game"));
        assert!(args.show);
    }

    #[test]
    fn config_get_takes_a_key() {
        let cli = Cli::parse_from(["forge", "config", "get", "build_tool.program"]);
        assert!(matches!(
            cli.command,
            Commands::Config(ConfigCommands::Get { ref key }) if key == "build_tool.program"
        ));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["forge", "--quiet", "--verbose", "locate"]);
        assert!(result.is_err());
    }
}
