//! # lua-lint-parser
//!
//! Hand-written Lua parser producing the `lua-lint-core` statement tree.
//!
//! The parser covers the statement grammar the linter consumes: local and
//! global assignment, function definitions, the block-bearing control
//! constructs, `if`/`return`/`break` and call statements, with full
//! expression parsing (operator precedence, call/index chains, table
//! constructors, function expressions). Goto labels are accepted and
//! skipped; they carry no names the rules inspect.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
pub mod lexer;

pub use error::{ParseError, ParseResult};

use lexer::{Lexer, Token, TokenKind};
use lua_lint_core::{Block, Expr, Stmt, TableField};
use std::path::Path;

/// Parses Lua source text into a statement sequence.
///
/// # Errors
///
/// Returns the first lexical or grammatical error encountered.
pub fn parse_source(source: &str) -> ParseResult<Block> {
    let tokens = Lexer::new(source).tokenize()?;
    let mut parser = Parser::new(tokens);
    let block = parser.parse_block()?;
    parser.expect_eof()?;
    Ok(block)
}

/// Parses a Lua source file from disk.
///
/// # Errors
///
/// Returns an IO error if the file cannot be read, or a parse error.
pub fn parse_file(path: &Path) -> ParseResult<Block> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(&content)
}

/// Binding powers for binary operators; `(left, right)` with
/// `right < left` for right-associative operators.
fn binary_binding(kind: &TokenKind) -> Option<(u8, u8, &'static str)> {
    let entry = match kind {
        TokenKind::Or => (1, 2, "or"),
        TokenKind::And => (3, 4, "and"),
        TokenKind::Lt => (5, 6, "<"),
        TokenKind::Gt => (5, 6, ">"),
        TokenKind::Le => (5, 6, "<="),
        TokenKind::Ge => (5, 6, ">="),
        TokenKind::Ne => (5, 6, "~="),
        TokenKind::Eq => (5, 6, "=="),
        TokenKind::Concat => (9, 8, ".."),
        TokenKind::Plus => (11, 12, "+"),
        TokenKind::Minus => (11, 12, "-"),
        TokenKind::Star => (13, 14, "*"),
        TokenKind::Slash => (13, 14, "/"),
        TokenKind::Percent => (13, 14, "%"),
        TokenKind::Caret => (18, 17, "^"),
        _ => return None,
    };
    Some(entry)
}

/// Binding power of unary operators (`not`, `-`, `#`).
const UNARY_BINDING: u8 = 15;

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    fn line(&self) -> usize {
        self.current().line
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos.min(self.tokens.len() - 1)].clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.current_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<()> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(&kind.display_name()))
        }
    }

    fn expect_name(&mut self) -> ParseResult<String> {
        match self.current_kind() {
            TokenKind::Name(_) => {
                let token = self.advance();
                match token.kind {
                    TokenKind::Name(name) => Ok(name),
                    _ => Err(self.unexpected("name")),
                }
            }
            _ => Err(self.unexpected("name")),
        }
    }

    fn expect_eof(&mut self) -> ParseResult<()> {
        if matches!(self.current_kind(), TokenKind::Eof) {
            Ok(())
        } else {
            Err(self.unexpected("end of input"))
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.current();
        if matches!(token.kind, TokenKind::Eof) {
            ParseError::UnexpectedEof {
                expected: expected.to_string(),
            }
        } else {
            ParseError::UnexpectedToken {
                expected: expected.to_string(),
                found: token.kind.display_name(),
                line: token.line,
            }
        }
    }

    fn at_block_end(&self) -> bool {
        matches!(
            self.current_kind(),
            TokenKind::End
                | TokenKind::Else
                | TokenKind::Elseif
                | TokenKind::Until
                | TokenKind::Eof
        )
    }

    // ---- statements ----

    fn parse_block(&mut self) -> ParseResult<Block> {
        let mut block = Vec::new();
        while !self.at_block_end() {
            if let Some(stmt) = self.parse_statement()? {
                block.push(stmt);
            }
        }
        Ok(block)
    }

    /// Parses one statement; returns `None` for statements that produce no
    /// tree node (`;`, labels, `goto`).
    fn parse_statement(&mut self) -> ParseResult<Option<Stmt>> {
        let line = self.line();
        let stmt = match self.current_kind() {
            TokenKind::Semi => {
                self.advance();
                return Ok(None);
            }
            TokenKind::DoubleColon => {
                self.advance();
                self.expect_name()?;
                self.expect(&TokenKind::DoubleColon)?;
                return Ok(None);
            }
            TokenKind::Goto => {
                self.advance();
                self.expect_name()?;
                return Ok(None);
            }
            TokenKind::Local => self.parse_local(line)?,
            TokenKind::If => self.parse_if(line)?,
            TokenKind::While => {
                self.advance();
                let cond = self.parse_expr(0)?;
                self.expect(&TokenKind::Do)?;
                let body = self.parse_block()?;
                self.expect(&TokenKind::End)?;
                Stmt::While { cond, body, line }
            }
            TokenKind::Do => {
                self.advance();
                let body = self.parse_block()?;
                self.expect(&TokenKind::End)?;
                Stmt::Do { body, line }
            }
            TokenKind::For => self.parse_for(line)?,
            TokenKind::Repeat => {
                self.advance();
                let body = self.parse_block()?;
                self.expect(&TokenKind::Until)?;
                let cond = self.parse_expr(0)?;
                Stmt::Repeat { body, cond, line }
            }
            TokenKind::Function => {
                self.advance();
                let name = self.parse_func_name()?;
                let (_, body) = self.parse_func_body()?;
                Stmt::FunctionDef { name, body, line }
            }
            TokenKind::Return => {
                self.advance();
                let exprs = if self.at_block_end() || matches!(self.current_kind(), TokenKind::Semi)
                {
                    Vec::new()
                } else {
                    self.parse_expr_list()?
                };
                self.eat(&TokenKind::Semi);
                Stmt::Return { exprs, line }
            }
            TokenKind::Break => {
                self.advance();
                Stmt::Break { line }
            }
            _ => self.parse_expr_statement(line)?,
        };
        Ok(Some(stmt))
    }

    fn parse_local(&mut self, line: usize) -> ParseResult<Stmt> {
        self.advance();

        // `local function f() end` binds a function value to a local name.
        if self.eat(&TokenKind::Function) {
            let name = self.expect_name()?;
            let (params, body) = self.parse_func_body()?;
            return Ok(Stmt::LocalAssign {
                names: vec![name],
                exprs: vec![Expr::Function { params, body }],
                line,
            });
        }

        let mut names = vec![self.expect_name()?];
        while self.eat(&TokenKind::Comma) {
            names.push(self.expect_name()?);
        }

        let exprs = if self.eat(&TokenKind::Assign) {
            self.parse_expr_list()?
        } else {
            Vec::new()
        };

        Ok(Stmt::LocalAssign { names, exprs, line })
    }

    /// Parses an `if` or `elseif` clause starting at the keyword; an
    /// `elseif` chain nests as a single `if` in the else branch, with the
    /// innermost clause consuming the shared `end`.
    fn parse_if(&mut self, line: usize) -> ParseResult<Stmt> {
        self.advance();
        let cond = self.parse_expr(0)?;
        self.expect(&TokenKind::Then)?;
        let then_body = self.parse_block()?;

        let else_body = match self.current_kind() {
            TokenKind::Elseif => {
                let elseif_line = self.line();
                return Ok(Stmt::If {
                    cond,
                    then_body,
                    else_body: vec![self.parse_if(elseif_line)?],
                    line,
                });
            }
            TokenKind::Else => {
                self.advance();
                self.parse_block()?
            }
            _ => Vec::new(),
        };

        self.expect(&TokenKind::End)?;
        Ok(Stmt::If {
            cond,
            then_body,
            else_body,
            line,
        })
    }

    fn parse_for(&mut self, line: usize) -> ParseResult<Stmt> {
        self.advance();
        let first = self.expect_name()?;

        if self.eat(&TokenKind::Assign) {
            let start = self.parse_expr(0)?;
            self.expect(&TokenKind::Comma)?;
            let stop = self.parse_expr(0)?;
            let step = if self.eat(&TokenKind::Comma) {
                Some(self.parse_expr(0)?)
            } else {
                None
            };
            self.expect(&TokenKind::Do)?;
            let body = self.parse_block()?;
            self.expect(&TokenKind::End)?;
            return Ok(Stmt::NumericFor {
                var: first,
                start,
                stop,
                step,
                body,
                line,
            });
        }

        let mut names = vec![first];
        while self.eat(&TokenKind::Comma) {
            names.push(self.expect_name()?);
        }
        self.expect(&TokenKind::In)?;
        let exprs = self.parse_expr_list()?;
        self.expect(&TokenKind::Do)?;
        let body = self.parse_block()?;
        self.expect(&TokenKind::End)?;
        Ok(Stmt::GenericFor {
            names,
            exprs,
            body,
            line,
        })
    }

    /// Parses `Name {'.' Name} [':' Name]` after the `function` keyword.
    fn parse_func_name(&mut self) -> ParseResult<Expr> {
        let mut name = Expr::Ident(self.expect_name()?);
        while self.eat(&TokenKind::Dot) {
            let key = self.expect_name()?;
            name = Expr::Index {
                object: Box::new(name),
                key: Box::new(Expr::Str(key)),
            };
        }
        if self.eat(&TokenKind::Colon) {
            let key = self.expect_name()?;
            name = Expr::Index {
                object: Box::new(name),
                key: Box::new(Expr::Str(key)),
            };
        }
        Ok(name)
    }

    /// Parses `( params ) block end`.
    fn parse_func_body(&mut self) -> ParseResult<(Vec<String>, Block)> {
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !matches!(self.current_kind(), TokenKind::RParen) {
            loop {
                match self.current_kind() {
                    TokenKind::Name(_) => params.push(self.expect_name()?),
                    TokenKind::Ellipsis => {
                        self.advance();
                        params.push("...".to_string());
                        break;
                    }
                    _ => return Err(self.unexpected("parameter name or `...`")),
                }
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_block()?;
        self.expect(&TokenKind::End)?;
        Ok((params, body))
    }

    /// Parses an assignment or a call statement.
    fn parse_expr_statement(&mut self, line: usize) -> ParseResult<Stmt> {
        let first = self.parse_suffixed_expr()?;

        if matches!(self.current_kind(), TokenKind::Assign | TokenKind::Comma) {
            let mut targets = vec![first];
            while self.eat(&TokenKind::Comma) {
                targets.push(self.parse_suffixed_expr()?);
            }
            self.expect(&TokenKind::Assign)?;
            let exprs = self.parse_expr_list()?;
            return Ok(Stmt::Assign {
                targets,
                exprs,
                line,
            });
        }

        match first {
            expr @ (Expr::Call { .. } | Expr::MethodCall { .. }) => Ok(Stmt::Call { expr, line }),
            _ => Err(self.unexpected("`=` or call arguments")),
        }
    }

    // ---- expressions ----

    fn parse_expr_list(&mut self) -> ParseResult<Vec<Expr>> {
        let mut exprs = vec![self.parse_expr(0)?];
        while self.eat(&TokenKind::Comma) {
            exprs.push(self.parse_expr(0)?);
        }
        Ok(exprs)
    }

    /// Precedence-climbing expression parser.
    fn parse_expr(&mut self, min_binding: u8) -> ParseResult<Expr> {
        let mut lhs = self.parse_unary_expr()?;

        while let Some((left, right, op)) = binary_binding(self.current_kind()) {
            if left < min_binding {
                break;
            }
            self.advance();
            let rhs = self.parse_expr(right)?;
            lhs = Expr::Binary {
                op: op.to_string(),
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }

        Ok(lhs)
    }

    fn parse_unary_expr(&mut self) -> ParseResult<Expr> {
        let op = match self.current_kind() {
            TokenKind::Not => "not",
            TokenKind::Minus => "-",
            TokenKind::Hash => "#",
            _ => return self.parse_simple_expr(),
        };
        self.advance();
        let expr = self.parse_expr(UNARY_BINDING)?;
        Ok(Expr::Unary {
            op: op.to_string(),
            expr: Box::new(expr),
        })
    }

    fn parse_simple_expr(&mut self) -> ParseResult<Expr> {
        let expr = match self.current_kind() {
            TokenKind::Nil => {
                self.advance();
                Expr::Nil
            }
            TokenKind::True => {
                self.advance();
                Expr::True
            }
            TokenKind::False => {
                self.advance();
                Expr::False
            }
            TokenKind::Ellipsis => {
                self.advance();
                Expr::Vararg
            }
            TokenKind::Number(n) => {
                let n = *n;
                self.advance();
                Expr::Number(n)
            }
            TokenKind::Str(s) => {
                let s = s.clone();
                self.advance();
                Expr::Str(s)
            }
            TokenKind::Function => {
                self.advance();
                let (params, body) = self.parse_func_body()?;
                Expr::Function { params, body }
            }
            TokenKind::LBrace => self.parse_table()?,
            _ => self.parse_suffixed_expr()?,
        };
        Ok(expr)
    }

    /// Parses a primary expression followed by any chain of index, call and
    /// method-call suffixes.
    fn parse_suffixed_expr(&mut self) -> ParseResult<Expr> {
        let mut expr = match self.current_kind() {
            TokenKind::Name(_) => Expr::Ident(self.expect_name()?),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr(0)?;
                self.expect(&TokenKind::RParen)?;
                Expr::Paren(Box::new(inner))
            }
            _ => return Err(self.unexpected("expression")),
        };

        loop {
            expr = match self.current_kind() {
                TokenKind::Dot => {
                    self.advance();
                    let key = self.expect_name()?;
                    Expr::Index {
                        object: Box::new(expr),
                        key: Box::new(Expr::Str(key)),
                    }
                }
                TokenKind::LBracket => {
                    self.advance();
                    let key = self.parse_expr(0)?;
                    self.expect(&TokenKind::RBracket)?;
                    Expr::Index {
                        object: Box::new(expr),
                        key: Box::new(key),
                    }
                }
                TokenKind::Colon => {
                    self.advance();
                    let method = self.expect_name()?;
                    let args = self.parse_call_args()?;
                    Expr::MethodCall {
                        object: Box::new(expr),
                        method,
                        args,
                    }
                }
                TokenKind::LParen | TokenKind::Str(_) | TokenKind::LBrace => {
                    let args = self.parse_call_args()?;
                    Expr::Call {
                        func: Box::new(expr),
                        args,
                    }
                }
                _ => return Ok(expr),
            };
        }
    }

    /// Parses call arguments: a parenthesized list, a single string, or a
    /// single table constructor.
    fn parse_call_args(&mut self) -> ParseResult<Vec<Expr>> {
        match self.current_kind() {
            TokenKind::LParen => {
                self.advance();
                let args = if matches!(self.current_kind(), TokenKind::RParen) {
                    Vec::new()
                } else {
                    self.parse_expr_list()?
                };
                self.expect(&TokenKind::RParen)?;
                Ok(args)
            }
            TokenKind::Str(s) => {
                let s = s.clone();
                self.advance();
                Ok(vec![Expr::Str(s)])
            }
            TokenKind::LBrace => Ok(vec![self.parse_table()?]),
            _ => Err(self.unexpected("call arguments")),
        }
    }

    fn parse_table(&mut self) -> ParseResult<Expr> {
        self.expect(&TokenKind::LBrace)?;
        let mut fields = Vec::new();

        while !matches!(self.current_kind(), TokenKind::RBrace) {
            let field = match self.current_kind() {
                TokenKind::LBracket => {
                    self.advance();
                    let key = self.parse_expr(0)?;
                    self.expect(&TokenKind::RBracket)?;
                    self.expect(&TokenKind::Assign)?;
                    let value = self.parse_expr(0)?;
                    TableField::Pair { key, value }
                }
                TokenKind::Name(_)
                    if matches!(
                        self.tokens.get(self.pos + 1).map(|t| &t.kind),
                        Some(TokenKind::Assign)
                    ) =>
                {
                    let key = self.expect_name()?;
                    self.expect(&TokenKind::Assign)?;
                    let value = self.parse_expr(0)?;
                    TableField::Pair {
                        key: Expr::Str(key),
                        value,
                    }
                }
                _ => TableField::Item(self.parse_expr(0)?),
            };
            fields.push(field);

            if !self.eat(&TokenKind::Comma) && !self.eat(&TokenKind::Semi) {
                break;
            }
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(Expr::Table(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_local_assignment() {
        let block = parse_source("local myVar = 1").unwrap();
        assert_eq!(
            block,
            vec![Stmt::LocalAssign {
                names: vec!["myVar".to_string()],
                exprs: vec![Expr::Number(1.0)],
                line: 1,
            }]
        );
    }

    #[test]
    fn parses_local_function_as_function_binding() {
        let block = parse_source("local helper = function() end").unwrap();
        let Stmt::LocalAssign { names, exprs, .. } = &block[0] else {
            panic!("expected local assignment");
        };
        assert_eq!(names, &vec!["helper".to_string()]);
        assert!(exprs[0].is_function());

        let block = parse_source("local helper\nlocal function other() end").unwrap();
        let Stmt::LocalAssign { names, exprs, line } = &block[1] else {
            panic!("expected local assignment");
        };
        assert_eq!(names, &vec!["other".to_string()]);
        assert!(exprs[0].is_function());
        assert_eq!(*line, 2);
    }

    #[test]
    fn parses_global_assignment() {
        let block = parse_source("Total = 1").unwrap();
        assert_eq!(
            block,
            vec![Stmt::Assign {
                targets: vec![Expr::Ident("Total".to_string())],
                exprs: vec![Expr::Number(1.0)],
                line: 1,
            }]
        );
    }

    #[test]
    fn parses_multi_target_assignment() {
        let block = parse_source("a, t.b = 1, 2").unwrap();
        let Stmt::Assign { targets, exprs, .. } = &block[0] else {
            panic!("expected assignment");
        };
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].as_ident(), Some("a"));
        assert!(targets[1].as_ident().is_none());
        assert_eq!(exprs.len(), 2);
    }

    #[test]
    fn parses_function_definition_with_body() {
        let block = parse_source("function DoThing()\n  local x = 1\nend").unwrap();
        let Stmt::FunctionDef { name, body, line } = &block[0] else {
            panic!("expected function definition");
        };
        assert_eq!(name.as_ident(), Some("DoThing"));
        assert_eq!(body.len(), 1);
        assert_eq!(*line, 1);
        assert_eq!(body[0].line(), 2);
    }

    #[test]
    fn dotted_function_name_is_not_an_ident() {
        let block = parse_source("function M.helper() end").unwrap();
        let Stmt::FunctionDef { name, .. } = &block[0] else {
            panic!("expected function definition");
        };
        assert!(name.as_ident().is_none());

        let block = parse_source("function obj:method() end").unwrap();
        let Stmt::FunctionDef { name, .. } = &block[0] else {
            panic!("expected function definition");
        };
        assert!(name.as_ident().is_none());
    }

    #[test]
    fn parses_block_bearing_statements() {
        let source = "\
do
  local a = 1
end
while true do
  local b = 2
end
repeat
  local c = 3
until false
for i = 1, 10 do
  local d = 4
end
for k, v in pairs(t) do
  local e = 5
end
";
        let block = parse_source(source).unwrap();
        assert_eq!(block.len(), 5);
        for stmt in &block {
            assert_eq!(stmt.nested_body().map(<[Stmt]>::len), Some(1));
        }
    }

    #[test]
    fn numeric_for_with_step() {
        let block = parse_source("for i = 10, 1, -1 do end").unwrap();
        let Stmt::NumericFor { var, step, .. } = &block[0] else {
            panic!("expected numeric for");
        };
        assert_eq!(var, "i");
        assert!(step.is_some());
    }

    #[test]
    fn parses_if_elseif_else_chain() {
        let source = "\
if a then
  local x = 1
elseif b then
  local y = 2
else
  local z = 3
end
";
        let block = parse_source(source).unwrap();
        let Stmt::If {
            then_body,
            else_body,
            ..
        } = &block[0]
        else {
            panic!("expected if");
        };
        assert_eq!(then_body.len(), 1);
        assert_eq!(else_body.len(), 1);
        let Stmt::If {
            then_body,
            else_body,
            ..
        } = &else_body[0]
        else {
            panic!("expected nested if for elseif");
        };
        assert_eq!(then_body.len(), 1);
        assert_eq!(else_body.len(), 1);
    }

    #[test]
    fn parses_call_statements() {
        let block = parse_source("print(\"hi\")\nobj:method(1, 2)\nrequire \"mod\"").unwrap();
        assert_eq!(block.len(), 3);
        assert!(matches!(block[0], Stmt::Call { .. }));
        assert!(matches!(block[1], Stmt::Call { .. }));
        assert!(matches!(block[2], Stmt::Call { .. }));
    }

    #[test]
    fn parses_operator_precedence() {
        let block = parse_source("x = 1 + 2 * 3").unwrap();
        let Stmt::Assign { exprs, .. } = &block[0] else {
            panic!("expected assignment");
        };
        let Expr::Binary { op, rhs, .. } = &exprs[0] else {
            panic!("expected binary expression");
        };
        assert_eq!(op, "+");
        assert!(matches!(rhs.as_ref(), Expr::Binary { op, .. } if op == "*"));
    }

    #[test]
    fn parses_table_constructor() {
        let block = parse_source("t = { 1, name = 2, [\"k\"] = 3 }").unwrap();
        let Stmt::Assign { exprs, .. } = &block[0] else {
            panic!("expected assignment");
        };
        let Expr::Table(fields) = &exprs[0] else {
            panic!("expected table");
        };
        assert_eq!(fields.len(), 3);
        assert!(matches!(fields[0], TableField::Item(_)));
        assert!(matches!(fields[1], TableField::Pair { .. }));
    }

    #[test]
    fn labels_and_goto_produce_no_statements() {
        let block = parse_source("::top::\nlocal x = 1\ngoto top").unwrap();
        assert_eq!(block.len(), 1);
    }

    #[test]
    fn return_and_break() {
        let block = parse_source("while true do break end\nreturn 1, 2").unwrap();
        assert!(matches!(block[1], Stmt::Return { ref exprs, .. } if exprs.len() == 2));
    }

    #[test]
    fn reports_unexpected_token_with_line() {
        let err = parse_source("local = 1").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { line: 1, .. }
        ));
    }

    #[test]
    fn reports_unterminated_block() {
        let err = parse_source("while true do").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }

    #[test]
    fn bare_expression_is_rejected() {
        let err = parse_source("x + 1").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }
}
