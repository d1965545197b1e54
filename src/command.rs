use crate::env::Environment;
use crate::registry::Registry;
use anyhow::Result;
use std::io::Write;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
pub type ExitCode = i32;

/// Object-safe trait for any command the shell can dispatch to.
///
/// Implemented for every builtin through a blanket impl.
pub trait ExecutableCommand {
    /// Executes the command, writing its output to `stdout`.
    ///
    /// The registry is passed along so commands can inspect what is
    /// registered (e.g. `commands` and `trie`).
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        env: &mut Environment,
        registry: &Registry,
    ) -> Result<ExitCode>;
}

/// Factory that creates a command from its arguments.
///
/// The factory's position in the command table is the command id stored in
/// the trie under [`name`](CommandFactory::name).
pub trait CommandFactory {
    /// Command word typed by the user.
    fn name(&self) -> &'static str;

    /// Create a command instance for the provided arguments.
    ///
    /// Argument errors and `--help` are not failures here: they produce a
    /// command that prints the message when executed.
    fn create(&self, args: &[&str]) -> Box<dyn ExecutableCommand>;
}
