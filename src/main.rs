use trie_shell::config::CliArgs;
use trie_shell::Interpreter;

fn main() -> anyhow::Result<()> {
    let args: CliArgs = argh::from_env();
    let config = args.into_config();
    let greeting = config.greeting;

    let mut sh = Interpreter::builtin(config)?;
    if greeting {
        sh.execute_line("help", &mut std::io::stdout())?;
    }
    sh.repl()?;

    let code = sh.shutdown()?;
    std::process::exit(code)
}
