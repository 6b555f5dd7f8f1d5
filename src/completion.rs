//! Shell completion scripts for gg.
//!
//! The script is generated from the clap definition in [`crate::cli`], so
//! new subcommands show up without touching this module.

use crate::cli::Cli;
use crate::error::{GgError, Result};
use clap::CommandFactory;
use clap_complete::{generate, Shell};

/// Supported shell types for completion scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
}

pub const SUPPORTED_SHELLS: [&str; 3] = ["bash", "zsh", "fish"];

impl ShellType {
    /// Convert to the `clap_complete::Shell` type.
    pub fn to_clap_shell(self) -> Shell {
        match self {
            ShellType::Bash => Shell::Bash,
            ShellType::Zsh => Shell::Zsh,
            ShellType::Fish => Shell::Fish,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ShellType::Bash => "bash",
            ShellType::Zsh => "zsh",
            ShellType::Fish => "fish",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "bash" => Ok(ShellType::Bash),
            "zsh" => Ok(ShellType::Zsh),
            "fish" => Ok(ShellType::Fish),
            _ => Err(GgError::ShellCompletion(format!(
                "Unsupported shell: '{}'. Supported shells are: {}.",
                name,
                SUPPORTED_SHELLS.join(", ")
            ))),
        }
    }

    /// Where to put the script, printed as a hint after it.
    pub fn install_hint(&self) -> &'static str {
        match self {
            ShellType::Bash => "gg shell-completion bash > ~/.local/share/bash-completion/completions/gg",
            ShellType::Zsh => "gg shell-completion zsh > ~/.zfunc/_gg",
            ShellType::Fish => "gg shell-completion fish > ~/.config/fish/completions/gg.fish",
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Detect the user's shell from the `$SHELL` environment variable.
pub fn detect_shell() -> Result<ShellType> {
    let shell_path = std::env::var("SHELL").map_err(|_| {
        GgError::ShellCompletion(
            "$SHELL environment variable is not set. \
             Please specify your shell, e.g. `gg shell-completion zsh`."
                .to_string(),
        )
    })?;

    parse_shell_from_path(&shell_path)
}

/// Parse a shell type from a shell path such as `/usr/local/bin/fish`.
pub fn parse_shell_from_path(shell_path: &str) -> Result<ShellType> {
    let shell_name = std::path::Path::new(shell_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(shell_path);

    ShellType::from_name(shell_name)
}

/// Generate the completion script for `shell`.
pub fn generate_completion_script(shell: ShellType) -> String {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    generate(shell.to_clap_shell(), &mut cmd, "gg", &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_shell_from_paths() {
        assert_eq!(parse_shell_from_path("/bin/bash").unwrap(), ShellType::Bash);
        assert_eq!(parse_shell_from_path("/usr/bin/zsh").unwrap(), ShellType::Zsh);
        assert_eq!(
            parse_shell_from_path("/opt/homebrew/bin/fish").unwrap(),
            ShellType::Fish
        );
        assert_eq!(parse_shell_from_path("zsh").unwrap(), ShellType::Zsh);
    }

    #[test]
    fn test_parse_shell_unsupported() {
        let err = parse_shell_from_path("/bin/tcsh").unwrap_err().to_string();
        assert!(err.contains("Unsupported shell"));
        assert!(err.contains("tcsh"));
    }

    #[test]
    fn test_from_name_is_case_insensitive() {
        assert_eq!(ShellType::from_name("ZSH").unwrap(), ShellType::Zsh);
    }

    #[test]
    fn test_generated_scripts_mention_subcommands() {
        for shell in [ShellType::Bash, ShellType::Zsh, ShellType::Fish] {
            let script = generate_completion_script(shell);
            assert!(!script.is_empty(), "{} script is empty", shell);
            assert!(script.contains("getback"), "{} script lacks getback", shell);
            assert!(script.contains("configure"), "{} script lacks configure", shell);
        }
    }
}
