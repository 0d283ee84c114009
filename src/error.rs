// ABOUTME: Closed error-code enumeration with message, position, and cause chain

use thiserror::Error;

use crate::ast::Pos;

/// Closed enumeration of error codes (spec §7). Errors compare equal by code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LErrorKind {
    DivZero,
    BadOp,
    BadNum,
    BadOperand,
    BadSymbol,
    TooManyArgs,
    TooFewArgs,
    Eval,
    AlreadyDefined,
    NilFuncCall,
    ParserMissingOPar,
    ParserMissingCPar,
    ParserMissingCBrc,
    ParserBadOperand,
    ParserBadExpr,
}

impl LErrorKind {
    pub fn default_message(&self) -> &'static str {
        match self {
            LErrorKind::DivZero => "division by zero",
            LErrorKind::BadOp => "invalid operator",
            LErrorKind::BadNum => "invalid number",
            LErrorKind::BadOperand => "invalid operand",
            LErrorKind::BadSymbol => "unbound symbol",
            LErrorKind::TooManyArgs => "too many arguments",
            LErrorKind::TooFewArgs => "too few arguments",
            LErrorKind::Eval => "value is not callable",
            LErrorKind::AlreadyDefined => "symbol already defined",
            LErrorKind::NilFuncCall => "nil can't be executed",
            LErrorKind::ParserMissingOPar => "expected `(`",
            LErrorKind::ParserMissingCPar => "expected `)`",
            LErrorKind::ParserMissingCBrc => "expected `}`",
            LErrorKind::ParserBadOperand => "bad operand",
            LErrorKind::ParserBadExpr => "bad expression",
        }
    }
}

/// A structured runtime error: code, message, optional source position, and
/// an optional wrapped predecessor forming a cause chain.
#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct LError {
    pub kind: LErrorKind,
    pub message: String,
    pub pos: Option<Pos>,
    #[source]
    pub cause: Option<Box<LError>>,
}

impl LError {
    pub fn new(kind: LErrorKind) -> Self {
        LError {
            message: kind.default_message().to_string(),
            kind,
            pos: None,
            cause: None,
        }
    }

    pub fn with_message(kind: LErrorKind, message: impl Into<String>) -> Self {
        LError {
            kind,
            message: message.into(),
            pos: None,
            cause: None,
        }
    }

    pub fn at(mut self, pos: Pos) -> Self {
        self.pos = Some(pos);
        self
    }

    /// Wraps `self` with additional context, preserving the original code and
    /// position and keeping `self` reachable as the cause (mirrors
    /// `lerr_propagate`'s "argument N of `name`" / "`name`" wrapping).
    pub fn propagate(self, context: impl Into<String>) -> LError {
        let kind = self.kind;
        let pos = self.pos;
        let message = format!("{}: {}", context.into(), self.message);
        LError {
            kind,
            message,
            pos,
            cause: Some(Box::new(self)),
        }
    }

    /// Canonical `Error: <message>` / `Error: <message> at line:col` rendering.
    pub fn render(&self) -> String {
        match self.pos {
            Some(p) => format!("Error: {} at {}:{}", self.message, p.line, p.col),
            None => format!("Error: {}", self.message),
        }
    }
}

impl PartialEq for LError {
    /// Errors compare equal by code only (messages are ignored), per spec §3.
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}
