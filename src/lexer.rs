// ABOUTME: Lexer turning source text into a flat token arena with position info

use tracing::trace;

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// Characters that, alongside letters, may start or continue a symbol.
const SIGN_CHARS: &str = "+-*/%^?!:;,._#~<>=$§£¤µ";

pub fn is_sign(c: char) -> bool {
    SIGN_CHARS.contains(c)
}

pub fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c.is_ascii_digit() || is_sign(c)
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Lexes `source` into a token arena terminated by exactly one `Eof` token.
pub fn lex(source: &str) -> Vec<Token> {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();

    loop {
        while is_whitespace(cursor.current_char()) {
            cursor.advance();
        }

        let start = cursor.position();
        let line = cursor.line();
        let col = cursor.column();

        if cursor.is_at_end() {
            tokens.push(Token::new(TokenKind::Eof, "", line, col));
            break;
        }

        let c = cursor.current_char();
        let kind = match c {
            '(' => {
                cursor.advance();
                TokenKind::OPar
            }
            ')' => {
                cursor.advance();
                TokenKind::CPar
            }
            '{' => {
                cursor.advance();
                TokenKind::OBrc
            }
            '}' => {
                cursor.advance();
                TokenKind::CBrc
            }
            '$' => {
                cursor.advance();
                TokenKind::Doll
            }
            '"' => {
                scan_string(&mut cursor);
                TokenKind::String
            }
            c if c.is_ascii_digit() || (c == '-' && cursor.peek_char(1).is_ascii_digit()) => {
                scan_number(&mut cursor)
            }
            c if c.is_ascii_alphabetic() || is_sign(c) => {
                scan_symbol(&mut cursor);
                TokenKind::Symbol
            }
            _ => {
                cursor.advance();
                TokenKind::Error
            }
        };

        let content = cursor.slice_from(start).to_string();
        trace!(?kind, %content, line, col, "lexed token");
        tokens.push(Token::new(kind, content, line, col));
    }

    tokens
}

fn scan_string(cursor: &mut Cursor) {
    cursor.advance(); // opening quote
    loop {
        if cursor.is_at_end() {
            break;
        }
        let c = cursor.current_char();
        if c == '"' {
            cursor.advance();
            break;
        }
        if c == '\\' {
            cursor.advance();
            if !cursor.is_at_end() {
                cursor.advance();
            }
            continue;
        }
        cursor.advance();
    }
}

fn scan_number(cursor: &mut Cursor) -> TokenKind {
    if cursor.current_char() == '-' {
        cursor.advance();
    }
    let mut dots = 0;
    while cursor.current_char().is_ascii_digit() || (cursor.current_char() == '.' && dots < 1) {
        if cursor.current_char() == '.' {
            dots += 1;
        }
        cursor.advance();
    }
    if dots > 0 {
        TokenKind::Double
    } else {
        TokenKind::Number
    }
}

fn scan_symbol(cursor: &mut Cursor) {
    while is_symbol_char(cursor.current_char()) {
        cursor.advance();
    }
}
