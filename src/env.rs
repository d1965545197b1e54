use crate::command::ExitCode;

/// Mutable per-session state shared by the interpreter and the commands it runs.
///
/// - `should_exit`: set by `exit`; the REPL loop stops before the next prompt.
/// - `exit_code`: the code the process should terminate with.
/// - `last_status`: exit code of the most recently executed line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// When set to true, indicates that an interactive loop should exit.
    pub should_exit: bool,
    /// Code reported to the operating system once the loop ends.
    pub exit_code: ExitCode,
    /// Status of the last command line, 0 before anything ran.
    pub last_status: ExitCode,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the loop to stop and terminate with `code`.
    pub fn request_exit(&mut self, code: ExitCode) {
        self.should_exit = true;
        self.exit_code = code;
    }
}
