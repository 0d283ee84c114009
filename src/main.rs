// ABOUTME: CLI entry point: REPL, script file, or single inline expression

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::{Config, Editor};

use wisplisp::builtins::register_builtins;
use wisplisp::config::{self, EXIT_EVAL_ERROR, EXIT_OK, EXIT_USAGE_ERROR};
use wisplisp::env::Environment;
use wisplisp::eval::eval_from_string;
use wisplisp::highlighter::LispHelper;

#[derive(Parser, Debug)]
#[command(name = "wisplisp", version = config::VERSION, about = "A small Lisp-family interpreter")]
struct CliArgs {
    /// Path to a script to run; omitted starts the REPL
    script: Option<PathBuf>,

    /// Evaluate a single expression and exit instead of reading a script or starting the REPL
    #[arg(short = 'e', long = "eval")]
    expr: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let env = Environment::new();
    register_builtins(&env);

    if let Some(expr) = args.expr {
        return run_and_report(&env, &expr);
    }

    if let Some(path) = args.script {
        let src = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("wisplisp: could not read {}: {e}", path.display());
                return exit_code(EXIT_USAGE_ERROR);
            }
        };
        return run_and_report(&env, &src);
    }

    run_repl(&env)
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(code as u8)
}

fn run_and_report(env: &Rc<Environment>, src: &str) -> ExitCode {
    let (value, error) = eval_from_string(env, src);
    match error {
        None => {
            println!("{value}");
            exit_code(EXIT_OK)
        }
        Some(e) => {
            eprintln!("{}", e.render());
            exit_code(EXIT_EVAL_ERROR)
        }
    }
}

fn run_repl(env: &Rc<Environment>) -> ExitCode {
    println!("{}", config::WELCOME_MESSAGE);
    println!("{}", config::WELCOME_SUBTITLE);
    println!("{}", config::WELCOME_FOOTER);

    let rl_config = Config::builder().auto_add_history(true).build();
    let mut rl: Editor<LispHelper, rustyline::history::DefaultHistory> = match Editor::with_config(rl_config) {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("wisplisp: could not start the line editor: {e}");
            return exit_code(EXIT_USAGE_ERROR);
        }
    };
    rl.set_helper(Some(LispHelper::new()));
    let _ = rl.load_history(config::HISTORY_FILE);

    loop {
        match rl.readline("wisp> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if trimmed == "(quit)" || trimmed == "(exit)" {
                    break;
                }
                if trimmed == "(clear)" {
                    print!("\x1b[2J\x1b[H");
                    continue;
                }
                let (value, error) = eval_from_string(env, trimmed);
                match error {
                    None => println!("{value}"),
                    Some(e) => eprintln!("{}", e.render()),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("wisplisp: readline error: {e}");
                break;
            }
        }
    }

    let _ = rl.save_history(config::HISTORY_FILE);
    exit_code(EXIT_OK)
}
