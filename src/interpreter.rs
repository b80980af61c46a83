use crate::command::{self, Command, CommandKind};
use crate::env::Environment;
use crate::lexer;
use crate::parser::RuleSet;
use crate::report;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;
use std::path::Path;

/// Whether the interpreter accepts further lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminated,
}

/// Line-at-a-time interpreter for supply commands.
///
/// Each line is tokenized, matched against the command grammar and dispatched
/// to its report. Failures of a single command are printed to the session
/// output and never end the session; only `exit` does.
///
/// Example
/// ```
/// use supply_commands::{Environment, Interpreter, SessionState};
/// let mut sh = Interpreter::new(Environment::new());
/// let mut out = Vec::new();
/// let state = sh.execute_line("help", &mut out).unwrap();
/// assert_eq!(state, SessionState::Running);
/// assert!(String::from_utf8(out).unwrap().starts_with("Usage:"));
/// ```
pub struct Interpreter {
    env: Environment,
    grammar: Vec<RuleSet>,
    state: SessionState,
}

impl Interpreter {
    /// Create an interpreter using the canonical command grammar.
    pub fn new(env: Environment) -> Self {
        Self::with_grammar(env, command::grammar())
    }

    /// Create an interpreter with a custom set of rule sets, in precedence order.
    pub fn with_grammar(env: Environment, grammar: Vec<RuleSet>) -> Self {
        Self {
            env,
            grammar,
            state: SessionState::Running,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Parse a line without executing it.
    pub fn parse(&self, line: &str) -> Command {
        let tokens = lexer::split_into_tokens(line);
        command::parse_command(&self.grammar, &tokens)
    }

    /// Run a single command line, writing its report (or error) to `stdout`.
    ///
    /// Every processed command except `exit` is followed by a blank line.
    /// Errors are returned only when writing to `stdout` itself fails.
    pub fn execute_line(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
    ) -> anyhow::Result<SessionState> {
        if self.state == SessionState::Terminated {
            return Ok(self.state);
        }

        let command = self.parse(line);
        tracing::debug!(kind = ?command.kind, "parsed command line");

        match self.dispatch(&command, stdout) {
            Ok(SessionState::Terminated) => {
                self.state = SessionState::Terminated;
                return Ok(self.state);
            }
            Ok(SessionState::Running) => {}
            Err(err) => {
                tracing::warn!(kind = ?command.kind, error = %err, "command failed");
                writeln!(stdout, "{:#}", err)?;
            }
        }
        writeln!(stdout)?;
        Ok(self.state)
    }

    fn dispatch(&self, command: &Command, stdout: &mut dyn Write) -> anyhow::Result<SessionState> {
        match report::for_command(command)? {
            Some(report) => {
                tracing::trace!(report = report.name(), "running report");
                report.execute(stdout, &self.env)?;
                Ok(SessionState::Running)
            }
            None => {
                debug_assert_eq!(command.kind, CommandKind::Exit);
                Ok(SessionState::Terminated)
            }
        }
    }

    /// Run lines in order until they are exhausted or one of them is `exit`.
    pub fn run_script<I, S>(
        &mut self,
        lines: I,
        stdout: &mut dyn Write,
    ) -> anyhow::Result<SessionState>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            if self.execute_line(line.as_ref(), stdout)? == SessionState::Terminated {
                break;
            }
        }
        Ok(self.state)
    }

    /// Interactive Read-Eval-Print Loop on the terminal.
    ///
    /// Interrupt (Ctrl-C) and end of input (Ctrl-D) end the session like `exit`.
    /// When `history` is given it is loaded first and saved on the way out.
    pub fn repl(&mut self, prompt: &str, history: Option<&Path>) -> anyhow::Result<()> {
        let mut rl = DefaultEditor::new()?;
        if let Some(path) = history {
            if let Err(err) = rl.load_history(path) {
                tracing::debug!(path = %path.display(), error = %err, "no history loaded");
            }
        }

        let mut stdout = std::io::stdout();
        while self.state == SessionState::Running {
            match rl.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    self.execute_line(&line, &mut stdout)?;
                    stdout.flush()?;
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    self.state = SessionState::Terminated;
                }
                Err(err) => return Err(err.into()),
            }
        }

        if let Some(path) = history {
            if let Err(err) = rl.save_history(path) {
                tracing::warn!(path = %path.display(), error = %err, "failed to save history");
            }
        }
        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Environment::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{INVALID_NOTICE, USAGE};
    use std::env as stdenv;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn make_unique_temp_dir() -> PathBuf {
        let mut p = stdenv::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("interpreter_test_{}_{}", std::process::id(), nanos));
        fs::create_dir_all(&p).expect("failed to create temp dir");
        p
    }

    fn interpreter_with(files: &[(&str, &str)]) -> (Interpreter, PathBuf) {
        let dir = make_unique_temp_dir();
        for (name, content) in files {
            fs::write(dir.join(name), content).expect("write");
        }
        (Interpreter::new(Environment::with_data_dir(&dir)), dir)
    }

    fn run_line(interp: &mut Interpreter, line: &str) -> (SessionState, String) {
        let mut out = Vec::new();
        let state = interp.execute_line(line, &mut out).unwrap();
        (state, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_exit_terminates_without_output() {
        let (mut interp, dir) = interpreter_with(&[]);
        let (state, out) = run_line(&mut interp, "exit");
        assert_eq!(state, SessionState::Terminated);
        assert_eq!(interp.state(), SessionState::Terminated);
        assert_eq!(out, "");
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_unknown_line_prints_usage_and_keeps_running() {
        let (mut interp, dir) = interpreter_with(&[]);
        let (state, out) = run_line(&mut interp, "bogus");
        assert_eq!(state, SessionState::Running);
        assert_eq!(out, format!("{}\n{}\n\n", INVALID_NOTICE, USAGE));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_report_is_followed_by_blank_line() {
        let (mut interp, dir) = interpreter_with(&[("ward.csv", "Gauze,10,5\nSyringe,1,1\n")]);
        let (state, out) = run_line(&mut interp, "ward.csv runs_out");
        assert_eq!(state, SessionState::Running);
        assert_eq!(out, "For ward:\nSyringe will run out in 1 day/s\n\n");
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_bad_database_does_not_end_session() {
        let (mut interp, dir) = interpreter_with(&[
            ("bad.csv", "Widget,5,0\n"),
            ("ward.csv", "Mask,2,5\n"),
        ]);

        let (state, out) = run_line(&mut interp, "bad.csv needed_now");
        assert_eq!(state, SessionState::Running);
        assert!(out.starts_with("needed_now: bad.csv: Invalid hospital supply database format."));
        assert!(!out.contains("Needed Items"));

        let (state, out) = run_line(&mut interp, "missing.csv 2 run_outs");
        assert_eq!(state, SessionState::Running);
        assert!(out.starts_with("run_outs: missing.csv: cannot read supply database"));

        let (_, out) = run_line(&mut interp, "ward.csv needed_now");
        assert_eq!(out, "Needed Items now for ward:\n3 x Mask\n\n");
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_run_script_stops_at_exit() {
        let (mut interp, dir) = interpreter_with(&[("ward.csv", "Mask,2,5\n")]);
        let mut out = Vec::new();
        let state = interp
            .run_script(["help", "exit", "ward.csv needed_now"], &mut out)
            .unwrap();
        assert_eq!(state, SessionState::Terminated);

        let s = String::from_utf8(out).unwrap();
        assert_eq!(s, format!("{}\n\n", USAGE));
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_terminated_interpreter_ignores_further_lines() {
        let (mut interp, dir) = interpreter_with(&[]);
        run_line(&mut interp, "exit");
        let (state, out) = run_line(&mut interp, "help");
        assert_eq!(state, SessionState::Terminated);
        assert_eq!(out, "");
        let _ = fs::remove_dir_all(dir);
    }
}
