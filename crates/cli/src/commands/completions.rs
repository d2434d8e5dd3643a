//! Shell completion generation
//!
//! Generate shell completion scripts for bash, zsh, fish, powershell and elvish.

use clap::CommandFactory;
use clap_complete::{Generator, Shell};

use super::Cli;
use crate::exit_code::ExitCode;

/// Arguments for the completions command
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Generate shell completions and print to stdout
pub fn execute(args: CompletionsArgs) -> ExitCode {
    let mut cmd = Cli::command();
    print_completions(args.shell, &mut cmd);
    ExitCode::Success
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    clap_complete::generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut std::io::stdout(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(shell: Shell) -> String {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(shell, &mut cmd, "s3cli", &mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_completions_bash() {
        let output = render(Shell::Bash);
        assert!(output.contains("s3cli"));
        assert!(output.contains("complete"));
        assert!(output.contains("--s3path"));
    }

    #[test]
    fn test_completions_zsh() {
        let output = render(Shell::Zsh);
        assert!(output.contains("s3cli"));
        assert!(output.contains("compdef"));
    }

    #[test]
    fn test_completions_fish() {
        let output = render(Shell::Fish);
        assert!(output.contains("s3cli"));
        assert!(output.contains("complete"));
    }

    #[test]
    fn test_completions_powershell() {
        let output = render(Shell::PowerShell);
        assert!(output.contains("s3cli"));
        assert!(output.contains("Register-ArgumentCompleter"));
    }
}
