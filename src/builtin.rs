use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::env::Environment;
use crate::interpreter::Factory;
use crate::registry::Registry;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::io::Write;

/// Built-in commands known to the shell at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly in-process.
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "help" or "exit".
    fn name() -> &'static str;

    /// Executes the command using the provided output and environment.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(
        self,
        stdout: &mut dyn Write,
        env: &mut Environment,
        registry: &Registry,
    ) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        env: &mut Environment,
        registry: &Registry,
    ) -> Result<ExitCode> {
        match T::execute(*self, stdout, env, registry) {
            Ok(x) => Ok(x),
            Err(e) => {
                writeln!(stdout, "{}: {}", T::name(), e)?;
                Ok(1)
            }
        }
    }
}

struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        _env: &mut Environment,
        _registry: &Registry,
    ) -> Result<ExitCode> {
        writeln!(stdout, "{}", self.output.trim_end())?;
        Ok(if self.is_error { 1 } else { 0 })
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn name(&self) -> &'static str {
        T::name()
    }

    fn create(&self, args: &[&str]) -> Box<dyn ExecutableCommand> {
        match T::from_args(&[T::name()], args) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                output,
                is_error: status.is_err(),
            }),
        }
    }
}

/// The fixed command table. A command's id is its position here.
pub(crate) fn builtin_factories() -> Vec<Box<dyn CommandFactory>> {
    vec![
        Box::new(Factory::<Help>::default()),
        Box::new(Factory::<Commands>::default()),
        Box::new(Factory::<Hello>::default()),
        Box::new(Factory::<Hella>::default()),
        Box::new(Factory::<TrieDump>::default()),
        Box::new(Factory::<Exit>::default()),
    ]
}

const USAGE: &str = "\
Type a command and press Enter to run it.
  Tab    complete the command word, listing the choices when ambiguous
  Up     recall the previous line
  Esc    clear the line
Type `commands` to list every command, `<command> --help` for its options.";

#[derive(FromArgs)]
/// Explain how to use the shell.
pub struct Help {}

impl BuiltinCommand for Help {
    fn name() -> &'static str {
        "help"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _env: &mut Environment,
        _registry: &Registry,
    ) -> Result<ExitCode> {
        writeln!(stdout, "{}", USAGE)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// List every registered command.
pub struct Commands {}

impl BuiltinCommand for Commands {
    fn name() -> &'static str {
        "commands"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _env: &mut Environment,
        registry: &Registry,
    ) -> Result<ExitCode> {
        for name in registry.names() {
            writeln!(stdout, "{}", name)?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print a greeting.
pub struct Hello {
    #[argh(positional)]
    /// who to greet; defaults to the world.
    pub name: Option<String>,
}

impl BuiltinCommand for Hello {
    fn name() -> &'static str {
        "hello"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _env: &mut Environment,
        _registry: &Registry,
    ) -> Result<ExitCode> {
        let name = self.name.as_deref().unwrap_or("world");
        writeln!(stdout, "Hello, {}!", name)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// React to a rather informal greeting.
pub struct Hella {}

impl BuiltinCommand for Hella {
    fn name() -> &'static str {
        "hella"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _env: &mut Environment,
        _registry: &Registry,
    ) -> Result<ExitCode> {
        writeln!(stdout, "Hella to you too. Did you mean `hello`?")?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the command trie node by node.
pub struct TrieDump {
    #[argh(switch, short = 's')]
    /// only print the node count and the allocated capacity.
    pub summary: bool,
}

impl BuiltinCommand for TrieDump {
    fn name() -> &'static str {
        "trie"
    }

    fn execute(
        self,
        stdout: &mut dyn Write,
        _env: &mut Environment,
        registry: &Registry,
    ) -> Result<ExitCode> {
        let trie = registry.trie();
        if self.summary {
            writeln!(stdout, "{} nodes, capacity {}", trie.len(), trie.capacity())?;
        } else {
            trie.dump(stdout)?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Leave the shell.
pub struct Exit {
    #[argh(positional)]
    /// exit status, 0 when omitted.
    pub code: Option<u8>,
}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(
        self,
        _stdout: &mut dyn Write,
        env: &mut Environment,
        _registry: &Registry,
    ) -> Result<ExitCode> {
        let code = ExitCode::from(self.code.unwrap_or(0));
        env.request_exit(code);
        Ok(code)
    }
}
