// ABOUTME: Recursive-descent parser turning a token arena into an AST with error nodes

use tracing::debug;

use crate::ast::{Ast, ParseErrorKind, Pos};
use crate::token::{Token, TokenKind};

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn pos_here(&self) -> Pos {
        let t = self.current();
        Pos::new(t.line, t.col)
    }

    fn parse_program(&mut self) -> Ast {
        let mut children = Vec::new();
        while self.current().kind != TokenKind::Eof {
            let expr = self.parse_expr();
            let had_error = expr.is_error();
            children.push(expr);
            if had_error {
                break;
            }
        }
        Ast::Program(children)
    }

    /// Parses one top-level/nested expression: an applied `( ... )` form, or
    /// any other operand-starting token (`$ ...`, a bare symbol, a literal,
    /// or a standalone `{ ... }`) taken as the head of a `head Operand*`
    /// application. `(` is special-cased so that adjacent parenthesized
    /// forms (`(+ 1 1)(+ 2 2)`) stay two separate top-level expressions
    /// rather than one swallowing the other as a trailing operand.
    fn parse_expr(&mut self) -> Ast {
        match self.current().kind {
            TokenKind::OPar => self.parse_paren_sexpr(),
            kind if Self::starts_operand(&kind) => {
                let pos = self.pos_here();
                let children = self.parse_applied_body();
                Ast::SExpr(children, pos)
            }
            _ => {
                let pos = self.pos_here();
                Ast::Error(
                    ParseErrorKind::BadExpr,
                    "an expression must start with a symbol, a literal, `(`, `{`, or `$`".to_string(),
                    pos,
                )
            }
        }
    }

    fn parse_paren_sexpr(&mut self) -> Ast {
        let pos = self.pos_here();
        self.advance(); // consume '('
        let children = self.parse_applied_body();
        if self.current().kind != TokenKind::CPar {
            return Ast::Error(
                ParseErrorKind::MissingCPar,
                "an s-expression must end with a `)`".to_string(),
                self.pos_here(),
            );
        }
        self.advance(); // consume ')'
        Ast::SExpr(children, pos)
    }

    /// The body of an applied list: `[head, Operand*]`. `head` can be any
    /// operand shape — a bare symbol, a literal, a nested `(...)`/`$ ...`
    /// sub-expression when the call's operator is itself a computed value,
    /// or a `{...}` literal — followed by zero or more trailing operands.
    fn parse_applied_body(&mut self) -> Vec<Ast> {
        if !Self::starts_operand(&self.current().kind) {
            return Vec::new();
        }
        let head = self.parse_operand();
        let mut children = vec![head];
        if !children[0].is_error() {
            while Self::starts_operand(&self.current().kind) {
                let operand = self.parse_operand();
                let is_err = operand.is_error();
                children.push(operand);
                if is_err {
                    break;
                }
            }
        }
        children
    }

    fn starts_operand(kind: &TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Number
                | TokenKind::Double
                | TokenKind::String
                | TokenKind::Symbol
                | TokenKind::OPar
                | TokenKind::OBrc
                | TokenKind::Doll
        )
    }

    fn parse_operand(&mut self) -> Ast {
        let pos = self.pos_here();
        match self.current().kind {
            TokenKind::Number => {
                let text = self.current().content.clone();
                self.advance();
                Ast::Num(text, pos)
            }
            TokenKind::Double => {
                let text = self.current().content.clone();
                self.advance();
                Ast::Double(text, pos)
            }
            TokenKind::String => {
                let text = unescape_string(&self.current().content);
                self.advance();
                Ast::Str(text, pos)
            }
            TokenKind::Symbol => {
                let text = self.current().content.clone();
                self.advance();
                Ast::Sym(text, pos)
            }
            TokenKind::OPar => self.parse_paren_sexpr(),
            TokenKind::OBrc => self.parse_qexpr(),
            TokenKind::Doll => {
                self.advance();
                let children = self.parse_applied_body();
                Ast::SExpr(children, pos)
            }
            _ => Ast::Error(
                ParseErrorKind::BadOperand,
                "expected a number, string, symbol, or list".to_string(),
                pos,
            ),
        }
    }

    fn parse_qexpr(&mut self) -> Ast {
        let pos = self.pos_here();
        self.advance(); // consume '{'
        let mut children = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::CBrc => {
                    self.advance();
                    break;
                }
                TokenKind::Eof => {
                    return Ast::Error(
                        ParseErrorKind::MissingCBrc,
                        "a q-expression must end with a `}`".to_string(),
                        self.pos_here(),
                    );
                }
                _ => {
                    let operand = self.parse_operand();
                    let is_err = operand.is_error();
                    if is_err {
                        return operand;
                    }
                    children.push(operand);
                }
            }
        }
        Ast::QExpr(children, pos)
    }
}

/// Strips surrounding quotes and replaces `\"` with `"` (the lexer retains
/// the escape unmodified; unescaping happens exactly once, here).
fn unescape_string(raw: &str) -> String {
    let inner = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw);
    inner.replace("\\\"", "\"")
}

/// Parses a full token stream into a `Program` AST.
pub fn parse(tokens: &[Token]) -> Ast {
    debug!(token_count = tokens.len(), "parsing token stream");
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    fn parse_str(src: &str) -> Ast {
        parse(&lex(src))
    }

    #[test]
    fn parses_simple_addition() {
        let ast = parse_str("+ 1 1");
        match ast {
            Ast::Program(children) => {
                assert_eq!(children.len(), 1);
                match &children[0] {
                    Ast::SExpr(kids, _) => assert_eq!(kids.len(), 3),
                    other => panic!("expected sexpr, got {other:?}"),
                }
            }
            other => panic!("expected program, got {other:?}"),
        }
    }

    #[test]
    fn parses_multiple_top_level_forms() {
        let ast = parse_str("(+ 1 1)(+ 2 2)");
        match ast {
            Ast::Program(children) => assert_eq!(children.len(), 2),
            other => panic!("expected program, got {other:?}"),
        }
    }

    #[test]
    fn qexpr_operand_parses() {
        let ast = parse_str("head {1 2 3}");
        match ast {
            Ast::Program(children) => match &children[0] {
                Ast::SExpr(kids, _) => {
                    assert_eq!(kids.len(), 2);
                    assert!(matches!(kids[1], Ast::QExpr(..)));
                }
                other => panic!("expected sexpr, got {other:?}"),
            },
            other => panic!("expected program, got {other:?}"),
        }
    }

    #[test]
    fn missing_close_paren_is_error_node() {
        let ast = parse_str("- (");
        match ast {
            Ast::Program(children) => {
                assert_eq!(children.len(), 1);
                assert!(matches!(&children[0], Ast::SExpr(..)));
            }
            other => panic!("expected program, got {other:?}"),
        }
    }

    /// The dangling `(` is a genuine syntax error, but it surfaces as a
    /// nested operand of the `-` application rather than replacing the
    /// whole parse — evaluating it reports the generic `Eval` code rather
    /// than a typed parser error, since by the time this value reaches the
    /// evaluator it's just "an operand that can't be evaluated".
    #[test]
    fn missing_close_paren_as_an_operand_is_an_eval_error_once_evaluated() {
        use crate::builtins::register_builtins;
        use crate::env::Environment;
        use crate::eval::eval_from_string;

        let env = Environment::new();
        register_builtins(&env);
        let (_, err) = eval_from_string(&env, "- (");
        assert_eq!(err.unwrap().kind, crate::error::LErrorKind::Eval);
    }

    #[test]
    fn string_literal_unescapes_embedded_quote() {
        let ast = parse_str(r#"print "a\"b""#);
        match ast {
            Ast::Program(children) => match &children[0] {
                Ast::SExpr(kids, _) => assert!(matches!(&kids[1], Ast::Str(s, _) if s == "a\"b")),
                other => panic!("expected sexpr, got {other:?}"),
            },
            other => panic!("expected program, got {other:?}"),
        }
    }

    #[test]
    fn dollar_pipes_without_parens() {
        let ast = parse_str("eval $ head {+ -}");
        match ast {
            Ast::Program(children) => match &children[0] {
                Ast::SExpr(kids, _) => {
                    assert_eq!(kids.len(), 2);
                    assert!(matches!(&kids[1], Ast::SExpr(..)));
                }
                other => panic!("expected sexpr, got {other:?}"),
            },
            other => panic!("expected program, got {other:?}"),
        }
    }
}
