//! Print spooler adapters
//!
//! The [`Spooler`] trait is the seam between the printing pipeline and the
//! operating system's print service. [`LpSpooler`] drives CUPS through its
//! command line tools:
//! - `lpstat -e` to enumerate destinations (one name per line)
//! - `lp -d <printer> -o raw <file>` to submit bytes untranslated

use crate::error::{PrintError, PrintResult};
use std::path::Path;
use std::process::Output;
use tokio::process::Command;
use tracing::{info, instrument, warn};

/// Trait for print spooler adapters
#[allow(async_fn_in_trait)]
pub trait Spooler {
    /// Enumerate every destination the spooler knows about, in spooler order
    async fn list_printers(&self) -> PrintResult<Vec<String>>;

    /// Submit the file at `path` to `target` in raw mode
    async fn print_raw(&self, target: &str, path: &Path) -> PrintResult<()>;
}

/// CUPS command line spooler
#[derive(Debug, Clone)]
pub struct LpSpooler {
    list_command: Vec<String>,
    print_program: String,
}

impl LpSpooler {
    /// Create a spooler from a list command (program + args) and a print program.
    ///
    /// The print program is invoked as `<program> -d <target> -o raw <file>`.
    pub fn new(list_command: Vec<String>, print_program: impl Into<String>) -> PrintResult<Self> {
        let print_program = print_program.into();

        if list_command.first().is_none_or(|p| p.trim().is_empty()) {
            return Err(PrintError::InvalidConfig(
                "Spooler list command is empty".to_string(),
            ));
        }
        if print_program.trim().is_empty() {
            return Err(PrintError::InvalidConfig(
                "Spooler print command is empty".to_string(),
            ));
        }

        Ok(Self {
            list_command,
            print_program,
        })
    }

    /// Create from whitespace separated command lines (e.g. `"lpstat -e"`, `"lp"`)
    pub fn from_command_lines(list: &str, print: &str) -> PrintResult<Self> {
        let list_command = list.split_whitespace().map(str::to_string).collect();
        Self::new(list_command, print.trim())
    }

    /// The list command as configured
    pub fn list_command(&self) -> &[String] {
        &self.list_command
    }

    /// The print program as configured
    pub fn print_program(&self) -> &str {
        &self.print_program
    }
}

impl Default for LpSpooler {
    fn default() -> Self {
        Self {
            list_command: vec!["lpstat".to_string(), "-e".to_string()],
            print_program: "lp".to_string(),
        }
    }
}

impl Spooler for LpSpooler {
    #[instrument(skip(self), fields(cmd = %self.list_command.join(" ")))]
    async fn list_printers(&self) -> PrintResult<Vec<String>> {
        let (program, args) = self
            .list_command
            .split_first()
            .ok_or_else(|| PrintError::InvalidConfig("Spooler list command is empty".into()))?;

        let output = Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| PrintError::Discovery(format!("{}: {}", program, e)))?;

        if !output.status.success() {
            let reason = failure_text(&output);
            warn!(reason = %reason, "Spooler query failed");
            return Err(PrintError::Discovery(reason));
        }

        let printers = parse_printer_list(&String::from_utf8_lossy(&output.stdout));
        info!(count = printers.len(), "Spooler destinations listed");
        Ok(printers)
    }

    #[instrument(skip(self, path), fields(program = %self.print_program, path = %path.display()))]
    async fn print_raw(&self, target: &str, path: &Path) -> PrintResult<()> {
        let output = Command::new(&self.print_program)
            .arg("-d")
            .arg(target)
            .arg("-o")
            .arg("raw")
            .arg(path)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| PrintError::Dispatch(format!("{}: {}", self.print_program, e)))?;

        if !output.status.success() {
            let reason = failure_text(&output);
            warn!(reason = %reason, "Raw print command failed");
            return Err(PrintError::Dispatch(reason));
        }

        info!(
            stdout = %String::from_utf8_lossy(&output.stdout).trim(),
            "Print job submitted"
        );
        Ok(())
    }
}

/// One destination per non-blank line, surrounding whitespace removed
pub(crate) fn parse_printer_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Best description of a failed command: stderr if any, otherwise the exit status
fn failure_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        output.status.to_string()
    } else {
        stderr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_printer_list() {
        let printers = parse_printer_list("PrinterA\n  POS-58 \n\nPrinterB\n");
        assert_eq!(printers, vec!["PrinterA", "POS-58", "PrinterB"]);
    }

    #[test]
    fn test_default_commands() {
        let spooler = LpSpooler::default();
        assert_eq!(spooler.list_command(), &["lpstat", "-e"]);
        assert_eq!(spooler.print_program(), "lp");
    }

    #[test]
    fn test_from_command_lines() {
        let spooler = LpSpooler::from_command_lines("lpstat  -e", " lp ").unwrap();
        assert_eq!(spooler.list_command(), &["lpstat", "-e"]);
        assert_eq!(spooler.print_program(), "lp");
    }

    #[test]
    fn test_empty_commands_rejected() {
        assert!(matches!(
            LpSpooler::from_command_lines("", "lp"),
            Err(PrintError::InvalidConfig(_))
        ));
        assert!(matches!(
            LpSpooler::from_command_lines("lpstat -e", "  "),
            Err(PrintError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_list_printers_runs_command() {
        let spooler = LpSpooler::new(
            vec!["printf".into(), "PrinterA\\nPOS-58\\n".into()],
            "lp",
        )
        .unwrap();
        let printers = spooler.list_printers().await.unwrap();
        assert_eq!(printers, vec!["PrinterA", "POS-58"]);
    }

    #[tokio::test]
    async fn test_list_printers_nonzero_exit_is_discovery_error() {
        let spooler = LpSpooler::new(vec!["false".into()], "lp").unwrap();
        assert!(matches!(
            spooler.list_printers().await,
            Err(PrintError::Discovery(_))
        ));
    }

    #[tokio::test]
    async fn test_list_printers_missing_binary_is_discovery_error() {
        let spooler =
            LpSpooler::new(vec!["asg-no-such-spooler-binary".into()], "lp").unwrap();
        assert!(matches!(
            spooler.list_printers().await,
            Err(PrintError::Discovery(_))
        ));
    }

    #[tokio::test]
    async fn test_print_raw_nonzero_exit_is_dispatch_error() {
        let spooler = LpSpooler::new(vec!["true".into()], "false").unwrap();
        let result = spooler
            .print_raw("POS-58", Path::new("/nonexistent/receipt.bin"))
            .await;
        match result {
            Err(PrintError::Dispatch(reason)) => assert!(reason.contains("exit status")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
