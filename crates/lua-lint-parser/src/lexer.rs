//! Lexer for Lua source.
//!
//! Produces a flat token stream with line numbers; comments and whitespace
//! are consumed here so the parser only sees meaningful tokens.

use crate::error::{ParseError, ParseResult};

/// One lexed token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Token payload.
    pub kind: TokenKind,
    /// 1-based line the token starts on.
    pub line: usize,
}

/// Token kinds for the Lua subset the linter consumes.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Identifier.
    Name(String),
    /// Numeric literal.
    Number(f64),
    /// String literal (content, without quotes).
    Str(String),

    /// `and`
    And,
    /// `break`
    Break,
    /// `do`
    Do,
    /// `else`
    Else,
    /// `elseif`
    Elseif,
    /// `end`
    End,
    /// `false`
    False,
    /// `for`
    For,
    /// `function`
    Function,
    /// `goto`
    Goto,
    /// `if`
    If,
    /// `in`
    In,
    /// `local`
    Local,
    /// `nil`
    Nil,
    /// `not`
    Not,
    /// `or`
    Or,
    /// `repeat`
    Repeat,
    /// `return`
    Return,
    /// `then`
    Then,
    /// `true`
    True,
    /// `until`
    Until,
    /// `while`
    While,

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `^`
    Caret,
    /// `#`
    Hash,
    /// `==`
    Eq,
    /// `~=`
    Ne,
    /// `<=`
    Le,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `=`
    Assign,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `;`
    Semi,
    /// `:`
    Colon,
    /// `::`
    DoubleColon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `..`
    Concat,
    /// `...`
    Ellipsis,

    /// End of input.
    Eof,
}

impl TokenKind {
    /// Human-readable name used in error messages.
    #[must_use]
    pub fn display_name(&self) -> String {
        match self {
            Self::Name(n) => format!("name `{n}`"),
            Self::Number(_) => "number".to_string(),
            Self::Str(_) => "string".to_string(),
            Self::Eof => "end of input".to_string(),
            Self::And => "`and`".to_string(),
            Self::Break => "`break`".to_string(),
            Self::Do => "`do`".to_string(),
            Self::Else => "`else`".to_string(),
            Self::Elseif => "`elseif`".to_string(),
            Self::End => "`end`".to_string(),
            Self::False => "`false`".to_string(),
            Self::For => "`for`".to_string(),
            Self::Function => "`function`".to_string(),
            Self::Goto => "`goto`".to_string(),
            Self::If => "`if`".to_string(),
            Self::In => "`in`".to_string(),
            Self::Local => "`local`".to_string(),
            Self::Nil => "`nil`".to_string(),
            Self::Not => "`not`".to_string(),
            Self::Or => "`or`".to_string(),
            Self::Repeat => "`repeat`".to_string(),
            Self::Return => "`return`".to_string(),
            Self::Then => "`then`".to_string(),
            Self::True => "`true`".to_string(),
            Self::Until => "`until`".to_string(),
            Self::While => "`while`".to_string(),
            Self::Plus => "`+`".to_string(),
            Self::Minus => "`-`".to_string(),
            Self::Star => "`*`".to_string(),
            Self::Slash => "`/`".to_string(),
            Self::Percent => "`%`".to_string(),
            Self::Caret => "`^`".to_string(),
            Self::Hash => "`#`".to_string(),
            Self::Eq => "`==`".to_string(),
            Self::Ne => "`~=`".to_string(),
            Self::Le => "`<=`".to_string(),
            Self::Ge => "`>=`".to_string(),
            Self::Lt => "`<`".to_string(),
            Self::Gt => "`>`".to_string(),
            Self::Assign => "`=`".to_string(),
            Self::LParen => "`(`".to_string(),
            Self::RParen => "`)`".to_string(),
            Self::LBrace => "`{`".to_string(),
            Self::RBrace => "`}`".to_string(),
            Self::LBracket => "`[`".to_string(),
            Self::RBracket => "`]`".to_string(),
            Self::Semi => "`;`".to_string(),
            Self::Colon => "`:`".to_string(),
            Self::DoubleColon => "`::`".to_string(),
            Self::Comma => "`,`".to_string(),
            Self::Dot => "`.`".to_string(),
            Self::Concat => "`..`".to_string(),
            Self::Ellipsis => "`...`".to_string(),
        }
    }
}

fn keyword(word: &str) -> Option<TokenKind> {
    let kind = match word {
        "and" => TokenKind::And,
        "break" => TokenKind::Break,
        "do" => TokenKind::Do,
        "else" => TokenKind::Else,
        "elseif" => TokenKind::Elseif,
        "end" => TokenKind::End,
        "false" => TokenKind::False,
        "for" => TokenKind::For,
        "function" => TokenKind::Function,
        "goto" => TokenKind::Goto,
        "if" => TokenKind::If,
        "in" => TokenKind::In,
        "local" => TokenKind::Local,
        "nil" => TokenKind::Nil,
        "not" => TokenKind::Not,
        "or" => TokenKind::Or,
        "repeat" => TokenKind::Repeat,
        "return" => TokenKind::Return,
        "then" => TokenKind::Then,
        "true" => TokenKind::True,
        "until" => TokenKind::Until,
        "while" => TokenKind::While,
        _ => return None,
    };
    Some(kind)
}

/// Lexer over Lua source text.
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
}

impl Lexer {
    /// Creates a lexer over the given source.
    #[must_use]
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
        }
    }

    /// Tokenizes the whole input, ending with an `Eof` token.
    ///
    /// # Errors
    ///
    /// Returns the first lexical error encountered.
    pub fn tokenize(mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            let line = self.line;
            let Some(ch) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    line,
                });
                return Ok(tokens);
            };

            let kind = match ch {
                'a'..='z' | 'A'..='Z' | '_' => self.lex_name(),
                '0'..='9' => self.lex_number()?,
                '"' | '\'' => self.lex_string(ch)?,
                '[' if matches!(self.peek_at(1), Some('[' | '=')) => {
                    match self.try_lex_long_string()? {
                        Some(kind) => kind,
                        None => {
                            self.advance();
                            TokenKind::LBracket
                        }
                    }
                }
                _ => self.lex_symbol(ch)?,
            };

            tokens.push(Token { kind, line });
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
        }
        Some(ch)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) -> ParseResult<()> {
        loop {
            match self.peek() {
                Some(ch) if ch.is_whitespace() => {
                    self.advance();
                }
                Some('-') if self.peek_at(1) == Some('-') => {
                    self.advance();
                    self.advance();
                    // Long comment if a long bracket follows, else to EOL.
                    if self.peek() == Some('[') && matches!(self.peek_at(1), Some('[' | '=')) {
                        if self.try_lex_long_string()?.is_some() {
                            continue;
                        }
                    }
                    while let Some(ch) = self.peek() {
                        if ch == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn lex_name(&mut self) -> TokenKind {
        let mut word = String::new();
        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                word.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        keyword(&word).unwrap_or(TokenKind::Name(word))
    }

    fn lex_number(&mut self) -> ParseResult<TokenKind> {
        let line = self.line;
        let mut text = String::new();

        if self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X')) {
            self.advance();
            self.advance();
            while let Some(ch) = self.peek() {
                if ch.is_ascii_hexdigit() {
                    text.push(ch);
                    self.advance();
                } else {
                    break;
                }
            }
            return u64::from_str_radix(&text, 16)
                .map(|v| TokenKind::Number(v as f64))
                .map_err(|_| ParseError::MalformedNumber {
                    text: format!("0x{text}"),
                    line,
                });
        }

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() || ch == '.' {
                text.push(ch);
                self.advance();
            } else if matches!(ch, 'e' | 'E') {
                text.push(ch);
                self.advance();
                if matches!(self.peek(), Some('+' | '-')) {
                    // Exponent sign belongs to the literal.
                    text.push(self.advance().unwrap_or('+'));
                }
            } else {
                break;
            }
        }

        text.parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| ParseError::MalformedNumber { text, line })
    }

    fn lex_string(&mut self, quote: char) -> ParseResult<TokenKind> {
        let start_line = self.line;
        self.advance();
        let mut content = String::new();

        loop {
            match self.advance() {
                None | Some('\n') => {
                    return Err(ParseError::UnterminatedString { line: start_line });
                }
                Some('\\') => {
                    let Some(esc) = self.advance() else {
                        return Err(ParseError::UnterminatedString { line: start_line });
                    };
                    content.push(match esc {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        'a' => '\u{7}',
                        'b' => '\u{8}',
                        'f' => '\u{c}',
                        'v' => '\u{b}',
                        '0' => '\0',
                        other => other,
                    });
                }
                Some(ch) if ch == quote => return Ok(TokenKind::Str(content)),
                Some(ch) => content.push(ch),
            }
        }
    }

    /// Lexes a `[[`/`[=[` long string if the input starts one.
    ///
    /// Returns `None` (consuming nothing) when the bracket is not actually
    /// a long-string opener, e.g. `[=` without a second `[`.
    fn try_lex_long_string(&mut self) -> ParseResult<Option<TokenKind>> {
        let start_pos = self.pos;
        let start_line = self.line;

        if !self.eat('[') {
            return Ok(None);
        }
        let mut level = 0;
        while self.eat('=') {
            level += 1;
        }
        if !self.eat('[') {
            self.pos = start_pos;
            self.line = start_line;
            return Ok(None);
        }

        // Skip a newline immediately after the opening bracket.
        if self.peek() == Some('\n') {
            self.advance();
        }

        let closer: String = format!("]{}]", "=".repeat(level));
        let mut content = String::new();
        loop {
            if self.remaining_starts_with(&closer) {
                for _ in 0..closer.len() {
                    self.advance();
                }
                return Ok(Some(TokenKind::Str(content)));
            }
            match self.advance() {
                Some(ch) => content.push(ch),
                None => return Err(ParseError::UnterminatedLongBracket { line: start_line }),
            }
        }
    }

    fn remaining_starts_with(&self, text: &str) -> bool {
        text.chars()
            .enumerate()
            .all(|(i, ch)| self.peek_at(i) == Some(ch))
    }

    fn lex_symbol(&mut self, ch: char) -> ParseResult<TokenKind> {
        let line = self.line;
        self.advance();
        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Caret,
            '#' => TokenKind::Hash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ';' => TokenKind::Semi,
            ',' => TokenKind::Comma,
            '=' => {
                if self.eat('=') {
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                }
            }
            '~' => {
                if self.eat('=') {
                    TokenKind::Ne
                } else {
                    return Err(ParseError::UnexpectedChar { ch, line });
                }
            }
            '<' => {
                if self.eat('=') {
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.eat('=') {
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            ':' => {
                if self.eat(':') {
                    TokenKind::DoubleColon
                } else {
                    TokenKind::Colon
                }
            }
            '.' => {
                if self.eat('.') {
                    if self.eat('.') {
                        TokenKind::Ellipsis
                    } else {
                        TokenKind::Concat
                    }
                } else {
                    TokenKind::Dot
                }
            }
            other => return Err(ParseError::UnexpectedChar { ch: other, line }),
        };
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_local_assignment() {
        assert_eq!(
            kinds("local x = 1"),
            vec![
                TokenKind::Local,
                TokenKind::Name("x".to_string()),
                TokenKind::Assign,
                TokenKind::Number(1.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn tracks_lines_across_newlines_and_comments() {
        let tokens = Lexer::new("x = 1\n-- comment\ny = 2\n").tokenize().unwrap();
        let lines: Vec<(String, usize)> = tokens
            .iter()
            .filter_map(|t| match &t.kind {
                TokenKind::Name(n) => Some((n.clone(), t.line)),
                _ => None,
            })
            .collect();
        assert_eq!(lines, vec![("x".to_string(), 1), ("y".to_string(), 3)]);
    }

    #[test]
    fn lexes_strings_with_escapes() {
        assert_eq!(
            kinds(r#"s = "a\nb""#),
            vec![
                TokenKind::Name("s".to_string()),
                TokenKind::Assign,
                TokenKind::Str("a\nb".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_long_strings_and_comments() {
        let tokens = kinds("--[[ block\ncomment ]] s = [[multi\nline]]");
        assert_eq!(
            tokens,
            vec![
                TokenKind::Name("s".to_string()),
                TokenKind::Assign,
                TokenKind::Str("multi\nline".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn long_comment_advances_line_count() {
        let tokens = Lexer::new("--[[a\nb]]\nx = 1").tokenize().unwrap();
        assert_eq!(tokens[0].line, 3);
    }

    #[test]
    fn lexes_multi_char_operators() {
        assert_eq!(
            kinds("a ~= b .. c == d"),
            vec![
                TokenKind::Name("a".to_string()),
                TokenKind::Ne,
                TokenKind::Name("b".to_string()),
                TokenKind::Concat,
                TokenKind::Name("c".to_string()),
                TokenKind::Eq,
                TokenKind::Name("d".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lexes_hex_numbers() {
        assert_eq!(
            kinds("x = 0xFF"),
            vec![
                TokenKind::Name("x".to_string()),
                TokenKind::Assign,
                TokenKind::Number(255.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn index_bracket_is_not_a_long_string() {
        assert_eq!(
            kinds("t[1]"),
            vec![
                TokenKind::Name("t".to_string()),
                TokenKind::LBracket,
                TokenKind::Number(1.0),
                TokenKind::RBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = Lexer::new("s = \"abc").tokenize().unwrap_err();
        assert!(matches!(err, ParseError::UnterminatedString { line: 1 }));
    }

    #[test]
    fn stray_tilde_is_rejected() {
        let err = Lexer::new("a ~ b").tokenize().unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedChar { ch: '~', .. }));
    }
}
