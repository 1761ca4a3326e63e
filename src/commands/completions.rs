use anyhow::{bail, Result};
use clap::Command;
use clap_complete::{generate, Shell};
use std::io;

/// Print completions for `shell` to stdout.
pub fn execute(shell: &str, cli: &mut Command) -> Result<()> {
    let shell = match shell.to_lowercase().as_str() {
        "bash" => Shell::Bash,
        "zsh" => Shell::Zsh,
        "fish" => Shell::Fish,
        "powershell" => Shell::PowerShell,
        "elvish" => Shell::Elvish,
        _ => bail!(
            "Unsupported shell: {} (supported: bash, zsh, fish, powershell, elvish)",
            shell
        ),
    };

    generate(shell, cli, "wellz", &mut io::stdout());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_shell_is_an_error() {
        let mut cli = Command::new("wellz");
        assert!(execute("tcsh", &mut cli).is_err());
    }
}
