//! Shell completion generation.

use std::io;

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::cli::{Cli, CompletionsArgs, Shell};

pub fn execute(args: CompletionsArgs) -> crate::error::CliResult<()> {
    match args.shell {
        Shell::Bash => write_to_stdout(shells::Bash),
        Shell::Zsh => write_to_stdout(shells::Zsh),
        Shell::Fish => write_to_stdout(shells::Fish),
        Shell::PowerShell => write_to_stdout(shells::PowerShell),
        Shell::Elvish => write_to_stdout(shells::Elvish),
    }
    Ok(())
}

fn write_to_stdout(shell: impl Generator) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
