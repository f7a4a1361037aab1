//! Runner for vellum Lua scripts.
//!
//! `vellum-lua <script.lua> [args...]` — runs the script in a fully bound
//! state. `arg[0]` is the script path, `arg[1..]` the remaining arguments,
//! following the usual Lua convention. Exit code 0 on success, 1 on a
//! missing script or execution failure.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vellum_lua::create_bound_state;

#[derive(Parser, Debug)]
#[command(name = "vellum-lua", about = "Run a Lua script against the vellum toolkit")]
struct Args {
    /// Path to the script to run
    script: PathBuf,

    /// Arguments exposed to the script via the `arg` table
    #[arg(trailing_var_arg = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // missing script path and friends: usage to stderr, exit 1
            eprintln!("{err}");
            return ExitCode::from(1);
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("vellum-lua: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> Result<()> {
    let state = create_bound_state().context("failed to assemble the Lua runtime")?;

    let arg_table = state.lua().create_table()?;
    arg_table.set(0, args.script.display().to_string())?;
    for (i, value) in args.args.iter().enumerate() {
        arg_table.set(i as i64 + 1, value.as_str())?;
    }
    state.lua().globals().set("arg", arg_table)?;

    state.exec_file(&args.script)?;
    Ok(())
}
