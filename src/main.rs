use supply_commands::Interpreter;
use supply_commands::config::Options;
use supply_commands::logging;

fn main() -> anyhow::Result<()> {
    let options: Options = argh::from_env();
    logging::init(options.log.as_deref());

    let mut interpreter = Interpreter::new(options.environment());
    if options.is_interactive() {
        interpreter.repl(&options.prompt, options.history.as_deref())?;
    } else {
        let mut stdout = std::io::stdout().lock();
        interpreter.run_script(&options.command, &mut stdout)?;
    }
    Ok(())
}
