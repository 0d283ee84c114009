// ABOUTME: Version banner and shared numeric/REPL constants

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const WELCOME_MESSAGE: &str = "wisplisp";
pub const WELCOME_SUBTITLE: &str = "a small Lisp, evaluated one expression at a time";
pub const WELCOME_FOOTER: &str = "type (quit) or Ctrl-D to exit";

/// History file written alongside the REPL's working directory.
pub const HISTORY_FILE: &str = ".wisplisp_history";

/// Float-equality tolerance used by `==`/`!=` and `loop` truthiness; see
/// `value::EPSILON`, which this re-exports for call sites that only need
/// the constant and don't otherwise depend on `value`.
pub const EPSILON: f64 = crate::value::EPSILON;

/// Process exit codes (spec §6): 0 on a clean run, 1 when evaluation
/// produced an `Error` value, 2 on a usage/parse failure that prevented
/// evaluation from starting at all.
pub const EXIT_OK: i32 = 0;
pub const EXIT_EVAL_ERROR: i32 = 1;
pub const EXIT_USAGE_ERROR: i32 = 2;
