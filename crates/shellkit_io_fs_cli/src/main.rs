use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use shellkit_io_fs::{
    EnumPathPlatform, EnumPatternMode, SpecCopyOptions, SpecFindOptions, SpecMkdirOptions,
    SpecRemoveOptions, basename, canonical_path_for, cat, cp_with, dirname, find, mkdir, mv,
    realpath, rm, rmdir, touch, which,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shellkit", version, about = "Shell-style file operations")]
struct Cli {
    /// Log filter (e.g. `warn`, `debug`); takes precedence over RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: EnumCommand,
}

#[derive(Debug, Subcommand)]
enum EnumCommand {
    /// Copy files and directories.
    Cp(ArgsCp),
    /// Move or rename files and directories.
    Mv { source: String, target: String },
    /// Remove files and directories.
    Rm(ArgsRm),
    /// List files under a directory.
    Find(ArgsFind),
    /// Create a file or update its timestamps.
    Touch { path: String },
    /// Create a directory.
    Mkdir {
        #[arg(short = 'p', long = "parents")]
        if_parents: bool,
        path: String,
    },
    /// Remove an empty directory.
    Rmdir { path: String },
    /// Print a text file.
    Cat { path: String },
    /// Locate a program on the search path.
    Which { program: String },
    /// Print the last path segment.
    Basename { path: String },
    /// Print the absolute parent directory.
    Dirname { path: String },
    /// Print the absolute, lexically canonical path.
    Realpath { path: String },
    /// Collapse `.` and `..` segments lexically.
    Canonical {
        #[arg(long = "windows")]
        if_windows: bool,
        path: String,
    },
}

#[derive(Debug, Args)]
struct ArgsCp {
    #[arg(short = 'r', short_alias = 'R', visible_short_alias = 'a', long = "recursive")]
    if_recursive: bool,
    #[arg(short = 'v', long = "verbose")]
    if_verbose: bool,
    source: String,
    target: String,
}

#[derive(Debug, Args)]
struct ArgsRm {
    #[arg(short = 'r', short_alias = 'R', long = "recursive")]
    if_recursive: bool,
    #[arg(short = 'f', long = "force")]
    if_force: bool,
    #[arg(short = 'v', long = "verbose")]
    if_verbose: bool,
    path: String,
}

#[derive(Debug, Args)]
struct ArgsFind {
    #[arg(default_value = ".")]
    root: String,
    /// Keep files whose name matches; repeatable.
    #[arg(long = "name")]
    patterns_name: Vec<String>,
    #[arg(long = "regex", conflicts_with = "if_literal")]
    if_regex: bool,
    #[arg(long = "literal")]
    if_literal: bool,
}

impl ArgsFind {
    fn to_options(&self) -> SpecFindOptions {
        let rule_pattern = if self.if_regex {
            EnumPatternMode::Regex
        } else if self.if_literal {
            EnumPatternMode::Literal
        } else {
            EnumPatternMode::Glob
        };
        SpecFindOptions {
            patterns_name: (!self.patterns_name.is_empty()).then(|| self.patterns_name.clone()),
            rule_pattern,
        }
    }
}

fn init_tracing(log_level: Option<&str>) {
    let env_filter = match log_level {
        Some(c_level) => EnvFilter::new(c_level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn check(b_ok: bool, operation: &str) -> Result<()> {
    if !b_ok {
        bail!("{operation} failed");
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        EnumCommand::Cp(args) => {
            let spec_cp_options = SpecCopyOptions {
                if_recursive: args.if_recursive,
                if_verbose: args.if_verbose,
            };
            let mut fn_verbose = |c_line: &str| println!("{c_line}");
            check(
                cp_with(
                    &args.source,
                    &args.target,
                    &spec_cp_options,
                    Some(&mut fn_verbose),
                    None,
                ),
                "cp",
            )
        }
        EnumCommand::Mv { source, target } => check(mv(&source, &target), "mv"),
        EnumCommand::Rm(args) => {
            let spec_rm_options = SpecRemoveOptions {
                if_recursive: args.if_recursive,
                if_force: args.if_force,
                if_verbose: args.if_verbose,
            };
            check(rm(&args.path, &spec_rm_options), "rm")
        }
        EnumCommand::Find(args) => {
            let l_found = find(&args.root, &args.to_options())
                .with_context(|| format!("find {}", args.root))?;
            for c_found in l_found {
                println!("{c_found}");
            }
            Ok(())
        }
        EnumCommand::Touch { path } => check(touch(&path), "touch"),
        EnumCommand::Mkdir { if_parents, path } => {
            check(mkdir(&path, &SpecMkdirOptions { if_parents }), "mkdir")
        }
        EnumCommand::Rmdir { path } => check(rmdir(&path), "rmdir"),
        EnumCommand::Cat { path } => {
            let txt = cat(&path).with_context(|| format!("cat {path}"))?;
            print!("{txt}");
            Ok(())
        }
        EnumCommand::Which { program } => match which(&program) {
            Some(c_found) => {
                println!("{c_found}");
                Ok(())
            }
            None => bail!("which: no {program} on the search path"),
        },
        EnumCommand::Basename { path } => {
            println!("{}", basename(&path));
            Ok(())
        }
        EnumCommand::Dirname { path } => {
            println!("{}", dirname(&path));
            Ok(())
        }
        EnumCommand::Realpath { path } => {
            println!("{}", realpath(&path));
            Ok(())
        }
        EnumCommand::Canonical { if_windows, path } => {
            let platform = if if_windows {
                EnumPathPlatform::Windows
            } else {
                EnumPathPlatform::Posix
            };
            println!("{}", canonical_path_for(&path, platform));
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
