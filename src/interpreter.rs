use crate::buffer::LineBuffer;
use crate::builtin::builtin_factories;
use crate::command::{CommandFactory, ExitCode};
use crate::completion::CommandHelper;
use crate::config::ShellConfig;
use crate::env::Environment;
use crate::registry::Registry;
use rustyline::config::{CompletionType, Config};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Cmd, Editor, KeyCode, KeyEvent, Modifiers, Movement};
use std::io::{self, Write};
use std::rc::Rc;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate, i.e. builtins.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Interactive shell resolving typed command words through a prefix trie.
///
/// The interpreter owns an [`Environment`] and a [`Registry`] built once from
/// a table of [`CommandFactory`] objects. See [`Interpreter::builtin`] for the
/// commands included out of the box.
///
/// Example
/// ```
/// use trie_shell::Interpreter;
/// use trie_shell::config::ShellConfig;
/// let mut sh = Interpreter::builtin(ShellConfig::default()).unwrap();
/// let mut out = Vec::new();
/// let code = sh.execute_line("hello there", &mut out).unwrap();
/// assert_eq!(code, 0);
/// assert_eq!(out, b"Hello, there!\n");
/// ```
pub struct Interpreter {
    env: Environment,
    registry: Rc<Registry>,
    config: ShellConfig,
}

impl Interpreter {
    /// Create an interpreter with a custom command table.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>, config: ShellConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let registry = Registry::new(commands, &config)?;
        Ok(Self {
            env: Environment::new(),
            registry: Rc::new(registry),
            config,
        })
    }

    /// Create an interpreter with the built-in commands:
    /// `help`, `commands`, `hello`, `hella`, `trie` and `exit`.
    pub fn builtin(config: ShellConfig) -> anyhow::Result<Self> {
        Self::new(builtin_factories(), config)
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run a single command invocation by name with arguments.
    ///
    /// Returns the command's exit code, or an error if the name does not
    /// resolve to a command.
    pub fn run(&mut self, name: &str, args: &[&str], stdout: &mut dyn Write) -> anyhow::Result<ExitCode> {
        let Some(line) = LineBuffer::from_text(name, self.config.buffer_len) else {
            return Err(anyhow::anyhow!("command not found: {}", name));
        };
        let factory = self
            .registry
            .resolve(&line)?
            .ok_or_else(|| anyhow::anyhow!("command not found: {}", name))?;
        factory
            .create(args)
            .execute(stdout, &mut self.env, &self.registry)
    }

    /// Split `line` into a command word and its arguments and run it.
    ///
    /// Blank lines do nothing and succeed.
    pub fn execute_line(&mut self, line: &str, stdout: &mut dyn Write) -> anyhow::Result<ExitCode> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(0);
        };
        let args: Vec<&str> = words.collect();
        let result = self.run(name, &args, stdout);
        self.env.last_status = *result.as_ref().unwrap_or(&1);
        result
    }

    /// Read-Eval-Print Loop until `exit`, Ctrl-C or end of input.
    ///
    /// Tab completes the command word, Up recalls history and Esc clears
    /// the line.
    pub fn repl(&mut self) -> anyhow::Result<()> {
        let mut rl: Editor<CommandHelper, DefaultHistory> =
            Editor::with_config(editor_config(&self.config)?)?;
        rl.set_helper(Some(CommandHelper::new(
            Rc::clone(&self.registry),
            self.config.buffer_len,
        )));
        rl.bind_sequence(
            KeyEvent(KeyCode::Esc, Modifiers::NONE),
            Cmd::Kill(Movement::WholeLine),
        );

        let mut stdout = io::stdout();
        while !self.env.should_exit {
            match rl.readline(&self.config.prompt) {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    rl.add_history_entry(line.as_str())?;
                    if let Err(err) = self.execute_line(&line, &mut stdout) {
                        println!("{}", err);
                    }
                    stdout.flush()?;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Tear the command trie down and return the code to exit with.
    ///
    /// Fails if the registry is still shared, e.g. with a live editor.
    pub fn shutdown(self) -> anyhow::Result<ExitCode> {
        let Ok(mut registry) = Rc::try_unwrap(self.registry) else {
            return Err(anyhow::anyhow!(
                "can't tear down the command trie: the registry is still in use"
            ));
        };
        registry.destroy()?;
        Ok(self.env.exit_code)
    }
}

/// Line editor settings: list ambiguous completions on the first Tab and
/// keep `history_size` lines for recall.
pub(crate) fn editor_config(config: &ShellConfig) -> rustyline::Result<Config> {
    Ok(Config::builder()
        .max_history_size(config.history_size)?
        .completion_type(CompletionType::List)
        .completion_show_all_if_ambiguous(true)
        .auto_add_history(false)
        .build())
}
