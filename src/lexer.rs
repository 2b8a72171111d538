// Copyright (C) Brian G. Milnes 2025

//! Lossless tokenizer for the C-like subject language
//!
//! Every byte of the input ends up in exactly one token, trivia included,
//! so the parsed tree reproduces the source verbatim.

pub mod lexer {
    use crate::syntax::syntax::SyntaxKind;
    use SyntaxKind::*;

    /// A lexed token: kind plus byte length. Offsets are implicit in the
    /// token sequence, which concatenates back to the original source.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Token {
        pub kind: SyntaxKind,
        pub len: usize,
    }

    /// Tokenize the whole input, trivia included.
    pub fn tokenize(source: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut rest = source;
        while !rest.is_empty() {
            let token = next_token(rest);
            tokens.push(token);
            rest = &rest[token.len..];
        }
        tokens
    }

    fn next_token(input: &str) -> Token {
        let bytes = input.as_bytes();
        let first = bytes[0];

        match first {
            b'\n' => return Token { kind: EOL, len: 1 },
            b'\r' => {
                let len = if bytes.get(1) == Some(&b'\n') { 2 } else { 1 };
                return Token { kind: EOL, len };
            }
            b' ' | b'\t' => {
                let len = bytes
                    .iter()
                    .take_while(|&&b| b == b' ' || b == b'\t')
                    .count();
                return Token { kind: WHITESPACE, len };
            }
            // Directives run to end of line, newline excluded
            b'#' => {
                let len = input.find('\n').unwrap_or(input.len());
                let len = if input[..len].ends_with('\r') { len - 1 } else { len };
                return Token { kind: DIRECTIVE, len };
            }
            b'/' => {
                if bytes.get(1) == Some(&b'/') {
                    let len = input.find('\n').unwrap_or(input.len());
                    let len = if input[..len].ends_with('\r') { len - 1 } else { len };
                    return Token { kind: LINE_COMMENT, len };
                }
                if bytes.get(1) == Some(&b'*') {
                    // Unterminated block comments swallow the rest of the file
                    let len = input[2..]
                        .find("*/")
                        .map(|i| i + 4)
                        .unwrap_or(input.len());
                    return Token { kind: BLOCK_COMMENT, len };
                }
                return Token { kind: SLASH, len: 1 };
            }
            b'"' => {
                let mut len = 1;
                let mut escaped = false;
                for &b in &bytes[1..] {
                    len += 1;
                    if escaped {
                        escaped = false;
                    } else if b == b'\\' {
                        escaped = true;
                    } else if b == b'"' || b == b'\n' {
                        break;
                    }
                }
                return Token { kind: STRING, len };
            }
            b'0'..=b'9' => {
                let len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
                return Token { kind: INT_NUMBER, len };
            }
            _ => {}
        }

        if first.is_ascii_alphabetic() || first == b'_' {
            let len = bytes
                .iter()
                .take_while(|&&b| b.is_ascii_alphanumeric() || b == b'_')
                .count();
            let text = &input[..len];
            let kind = SyntaxKind::from_keyword(text).unwrap_or(IDENT);
            return Token { kind, len };
        }

        let two = input.get(..2).unwrap_or("");
        let (kind, len) = match two {
            "==" => (EQEQ, 2),
            "!=" => (NEQ, 2),
            "<=" => (LTEQ, 2),
            ">=" => (GTEQ, 2),
            "&&" => (AMPAMP, 2),
            "||" => (PIPEPIPE, 2),
            _ => {
                let kind = match first {
                    b'(' => L_PAREN,
                    b')' => R_PAREN,
                    b'{' => L_BRACE,
                    b'}' => R_BRACE,
                    b'[' => L_BRACKET,
                    b']' => R_BRACKET,
                    b',' => COMMA,
                    b';' => SEMICOLON,
                    b':' => COLON,
                    b'.' => DOT,
                    b'=' => EQ,
                    b'<' => LT,
                    b'>' => GT,
                    b'!' => BANG,
                    b'+' => PLUS,
                    b'-' => MINUS,
                    b'*' => STAR,
                    b'%' => PERCENT,
                    _ => ERROR_TOKEN,
                };
                // Multi-byte UTF-8 sequences become a single error token
                let len = input.chars().next().map(char::len_utf8).unwrap_or(1);
                (kind, len)
            }
        };
        Token { kind, len }
    }
}
