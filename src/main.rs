// ABOUTME: CLI entry point: REPL, script-file execution, and the line-oriented driver modes

use clap::Parser;
use lisp_eval_sandbox::Session;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const WELCOME_MESSAGE: &str = "lisp-eval-sandbox -- a small Scheme-subset evaluator";
const WELCOME_SUBTITLE: &str = "type an expression, or (quit) to exit";

/// A lexically-scoped Scheme-subset evaluator
#[derive(Parser, Debug)]
#[command(name = "lisp-eval-sandbox")]
#[command(version)]
#[command(about = "A small Scheme-subset evaluator: tokenizer, reader, tree-walking interpreter")]
struct CliArgs {
    /// Script file to execute (optional -- if not provided, starts REPL)
    #[arg(value_name = "FILE")]
    script: Option<PathBuf>,

    /// Read driver commands from stdin instead of starting the REPL.
    /// The first line selects a mode: monocode, splitcode, or file.
    #[arg(long = "driver")]
    driver: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    if args.driver {
        return run_driver();
    }

    if let Some(script_path) = args.script {
        return run_script(&script_path);
    }

    run_repl()
}

/// Executes a script file one top-level expression at a time, printing
/// each result on its own line.
fn run_script(path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read script file {}: {}", path.display(), e))?;
    let session = Session::new();
    for expr in split_top_level_forms(&contents) {
        match session.build(&expr) {
            Ok(result) => println!("{result}"),
            Err(e) => eprintln!("{e}"),
        }
    }
    Ok(())
}

/// Splits source text on balanced-parenthesis boundaries so each chunk is
/// exactly one top-level form. A quote character does not affect balance.
fn split_top_level_forms(source: &str) -> Vec<String> {
    let mut forms = Vec::new();
    let mut current = String::new();
    let mut balance: i32 = 0;

    for line in source.lines() {
        for c in line.chars() {
            if c == '(' {
                balance += 1;
            } else if c == ')' {
                balance -= 1;
            }
            current.push(c);
        }
        current.push('\n');
        if balance == 0 && !current.trim().is_empty() {
            forms.push(std::mem::take(&mut current));
        }
    }
    forms
}

/// Reads driver commands from stdin: the first line selects `monocode`,
/// `splitcode`, or `file`, matching the three I/O modes of the original
/// interactive evaluator. Each complete form is built and its printed
/// result written to stdout on its own line.
fn run_driver() -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mode = match lines.next() {
        Some(line) => line?,
        None => return Ok(()),
    };

    let session = Session::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match mode.trim() {
        "monocode" => {
            for line in lines {
                let line = line?;
                emit(&session, &line, &mut out)?;
            }
        }
        "splitcode" => {
            run_split_driver(lines, &session, &mut out)?;
        }
        "file" => {
            let contents = std::fs::read_to_string("input.txt")?;
            let file_lines = contents.lines().map(|l| Ok(l.to_string()));
            run_split_driver(file_lines, &session, &mut out)?;
        }
        _ => {}
    }
    Ok(())
}

/// Accumulates lines until parentheses balance to zero, mirroring the
/// original driver's quote-only-line guard: a line made up entirely of
/// `'` characters never counts as a complete form on its own.
fn run_split_driver<I, W>(lines: I, session: &Session, out: &mut W) -> Result<(), Box<dyn std::error::Error>>
where
    I: IntoIterator<Item = io::Result<String>>,
    W: Write,
{
    let mut balance: i32 = 0;
    let mut accumulated = String::new();

    for line in lines {
        let line = line?;
        let mut all_quotes = true;
        for c in line.chars() {
            if c != '\'' {
                all_quotes = false;
            }
            if c == '(' {
                balance += 1;
            } else if c == ')' {
                balance -= 1;
            }
            accumulated.push(c);
        }
        if balance == 0 && !all_quotes {
            emit(session, &accumulated, out)?;
            accumulated.clear();
        }
    }
    Ok(())
}

fn emit<W: Write>(session: &Session, source: &str, out: &mut W) -> io::Result<()> {
    match session.build(source) {
        Ok(result) => writeln!(out, "{result}"),
        Err(e) => writeln!(out, "{e}"),
    }
}

fn run_repl() -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::new();

    let config = Config::builder().auto_add_history(true).build();
    let mut rl = DefaultEditor::with_config(config)
        .map_err(|e| format!("failed to initialize REPL: {e}"))?;

    let history_file = ".lisp_eval_history";
    let _ = rl.load_history(history_file);

    println!("{WELCOME_MESSAGE}");
    println!("{WELCOME_SUBTITLE}");

    loop {
        let readline = rl.readline("lisp> ");
        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                if line.trim() == "(quit)" || line.trim() == "(exit)" {
                    println!("goodbye");
                    break;
                }
                match session.build(&line) {
                    Ok(result) => println!("=> {result}"),
                    Err(e) => eprintln!("{e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\ngoodbye");
                break;
            }
            Err(err) => {
                eprintln!("{err}");
                break;
            }
        }
    }

    let _ = rl.save_history(history_file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_balanced_top_level_forms() {
        let forms = split_top_level_forms("(define x 1)\n(+ x 1)\n");
        assert_eq!(forms.len(), 2);
    }

    #[test]
    fn keeps_multi_line_form_together() {
        let forms = split_top_level_forms("(define (f x)\n  (+ x 1))\n(f 2)\n");
        assert_eq!(forms.len(), 2);
    }
}
