// ABOUTME: REPL syntax highlighter providing ANSI color for parens, numbers, strings, and symbols

use std::borrow::Cow;
use std::collections::HashSet;

use rustyline::completion::Completer;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Helper;

const COLOR_RESET: &str = "\x1b[0m";
const COLOR_BRACKET: &str = "\x1b[1;34m";
const COLOR_SPECIAL_FORM: &str = "\x1b[1;35m";
const COLOR_BUILTIN: &str = "\x1b[36m";
const COLOR_NUMBER: &str = "\x1b[33m";
const COLOR_STRING: &str = "\x1b[32m";

const SPECIAL_FORMS: &[&str] = &["def", "=", "fun", "lambda", "\\", "if", "loop"];
const BUILTINS: &[&str] = &[
    "+", "-", "*", "/", "%", "^", "!", "min", "max", "==", "!=", ">", "<", ">=", "<=", "&&", "||",
    "not", "head", "tail", "init", "cons", "join", "list", "len", "eval", "map", "fold", "print",
    "println", "read", "error",
];

pub struct LispHelper {
    special_forms: HashSet<&'static str>,
    builtins: HashSet<&'static str>,
}

impl LispHelper {
    pub fn new() -> Self {
        LispHelper {
            special_forms: SPECIAL_FORMS.iter().copied().collect(),
            builtins: BUILTINS.iter().copied().collect(),
        }
    }
}

impl Default for LispHelper {
    fn default() -> Self {
        Self::new()
    }
}

impl Helper for LispHelper {}

impl Completer for LispHelper {
    type Candidate = String;
}

impl Hinter for LispHelper {
    type Hint = String;
}

impl Validator for LispHelper {}

impl Highlighter for LispHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let highlighted = highlight_line(line, &self.special_forms, &self.builtins);
        if highlighted == line {
            Cow::Borrowed(line)
        } else {
            Cow::Owned(highlighted)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

fn highlight_line(line: &str, special_forms: &HashSet<&'static str>, builtins: &HashSet<&'static str>) -> String {
    let chars: Vec<char> = line.chars().collect();
    let mut result = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '(' | ')' | '{' | '}' | '$' => {
                result.push_str(COLOR_BRACKET);
                result.push(chars[i]);
                result.push_str(COLOR_RESET);
                i += 1;
            }
            '"' => {
                let start = i;
                i += 1;
                while i < chars.len() {
                    if chars[i] == '\\' && i + 1 < chars.len() {
                        i += 2;
                    } else if chars[i] == '"' {
                        i += 1;
                        break;
                    } else {
                        i += 1;
                    }
                }
                result.push_str(COLOR_STRING);
                result.extend(&chars[start..i]);
                result.push_str(COLOR_RESET);
            }
            c if c.is_ascii_digit() || (c == '-' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())) => {
                let start = i;
                if c == '-' {
                    i += 1;
                }
                let mut dots = 0;
                while i < chars.len() && (chars[i].is_ascii_digit() || (chars[i] == '.' && dots < 1)) {
                    if chars[i] == '.' {
                        dots += 1;
                    }
                    i += 1;
                }
                result.push_str(COLOR_NUMBER);
                result.extend(&chars[start..i]);
                result.push_str(COLOR_RESET);
            }
            c if c.is_ascii_alphabetic() || crate::lexer::is_sign(c) => {
                let start = i;
                while i < chars.len() && crate::lexer::is_symbol_char(chars[i]) {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                if special_forms.contains(word.as_str()) {
                    result.push_str(COLOR_SPECIAL_FORM);
                } else if builtins.contains(word.as_str()) {
                    result.push_str(COLOR_BUILTIN);
                }
                result.push_str(&word);
                if special_forms.contains(word.as_str()) || builtins.contains(word.as_str()) {
                    result.push_str(COLOR_RESET);
                }
            }
            other => {
                result.push(other);
                i += 1;
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parens_get_wrapped_in_color_codes() {
        let helper = LispHelper::new();
        let out = highlight_line("(+ 1 1)", &helper.special_forms, &helper.builtins);
        assert!(out.contains(COLOR_BRACKET));
        assert!(out.contains(COLOR_BUILTIN));
    }

    #[test]
    fn plain_text_without_recognised_tokens_is_unmodified() {
        let helper = LispHelper::new();
        let out = highlight_line("abc", &helper.special_forms, &helper.builtins);
        assert_eq!(out, "abc");
    }
}
