//! Statement tree consumed by the lint engine.
//!
//! The tree is produced by a parser front-end (see the `lua-lint-parser`
//! crate) and is read-only as far as linting is concerned. Every statement
//! carries the 1-based source line it starts on, which is the line reported
//! in findings.

/// A sequence of statements, as found at the top level of a chunk or inside
/// a block-bearing statement.
pub type Block = Vec<Stmt>;

/// A single Lua statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `local a, b = e1, e2` — also represents `local function f() end`,
    /// which desugars to a local binding of a function expression.
    LocalAssign {
        /// Names bound by the declaration, in source order.
        names: Vec<String>,
        /// Initializer expressions; may be shorter than `names`.
        exprs: Vec<Expr>,
        /// Source line of the statement.
        line: usize,
    },
    /// `a, b.c = e1, e2` — assignment to previously unseen targets is a
    /// global write in Lua, which is what the global rules inspect.
    Assign {
        /// Left-hand targets; simple identifiers or index chains.
        targets: Vec<Expr>,
        /// Right-hand expressions.
        exprs: Vec<Expr>,
        /// Source line of the statement.
        line: usize,
    },
    /// `function name() ... end` where `name` may be dotted (`a.b.c`) or a
    /// method (`a:b`), represented as an expression.
    FunctionDef {
        /// The name expression; `Expr::Ident` for a plain `function f()`.
        name: Expr,
        /// Function body statements.
        body: Block,
        /// Source line of the statement.
        line: usize,
    },
    /// `do ... end`
    Do {
        /// Statements inside the block.
        body: Block,
        /// Source line of the statement.
        line: usize,
    },
    /// `while cond do ... end`
    While {
        /// Loop condition.
        cond: Expr,
        /// Loop body.
        body: Block,
        /// Source line of the statement.
        line: usize,
    },
    /// `repeat ... until cond`
    Repeat {
        /// Loop body.
        body: Block,
        /// Terminating condition.
        cond: Expr,
        /// Source line of the statement.
        line: usize,
    },
    /// `for i = start, stop [, step] do ... end`
    NumericFor {
        /// Loop variable name.
        var: String,
        /// Initial value expression.
        start: Expr,
        /// Limit expression.
        stop: Expr,
        /// Optional step expression.
        step: Option<Expr>,
        /// Loop body.
        body: Block,
        /// Source line of the statement.
        line: usize,
    },
    /// `for k, v in exprs do ... end`
    GenericFor {
        /// Loop variable names.
        names: Vec<String>,
        /// Iterator expressions.
        exprs: Vec<Expr>,
        /// Loop body.
        body: Block,
        /// Source line of the statement.
        line: usize,
    },
    /// `if cond then ... [else ...] end`; `elseif` chains nest as a single
    /// `If` inside `else_body`.
    If {
        /// Branch condition.
        cond: Expr,
        /// Statements of the `then` branch.
        then_body: Block,
        /// Statements of the `else` branch, empty when absent.
        else_body: Block,
        /// Source line of the statement.
        line: usize,
    },
    /// `return e1, e2`
    Return {
        /// Returned expressions.
        exprs: Vec<Expr>,
        /// Source line of the statement.
        line: usize,
    },
    /// `break`
    Break {
        /// Source line of the statement.
        line: usize,
    },
    /// A function or method call used as a statement.
    Call {
        /// The call expression.
        expr: Expr,
        /// Source line of the statement.
        line: usize,
    },
}

impl Stmt {
    /// Returns the 1-based source line this statement starts on.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::LocalAssign { line, .. }
            | Self::Assign { line, .. }
            | Self::FunctionDef { line, .. }
            | Self::Do { line, .. }
            | Self::While { line, .. }
            | Self::Repeat { line, .. }
            | Self::NumericFor { line, .. }
            | Self::GenericFor { line, .. }
            | Self::If { line, .. }
            | Self::Return { line, .. }
            | Self::Break { line }
            | Self::Call { line, .. } => *line,
        }
    }

    /// Returns the nested statement body the engine descends into, if this
    /// variant carries one.
    ///
    /// This is the single place that decides which variants are
    /// block-bearing: `do`, both `for` forms, `repeat`, `while`, and the
    /// body of a function definition. Other variants return `None`.
    #[must_use]
    pub fn nested_body(&self) -> Option<&[Stmt]> {
        match self {
            Self::Do { body, .. }
            | Self::While { body, .. }
            | Self::Repeat { body, .. }
            | Self::NumericFor { body, .. }
            | Self::GenericFor { body, .. }
            | Self::FunctionDef { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// A Lua expression.
///
/// Expressions are carried for completeness of the tree; the built-in rules
/// only distinguish identifiers and function values on the positions they
/// inspect.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// `nil`
    Nil,
    /// `true`
    True,
    /// `false`
    False,
    /// `...`
    Vararg,
    /// Numeric literal.
    Number(f64),
    /// String literal (content, without quotes).
    Str(String),
    /// A bare identifier.
    Ident(String),
    /// An anonymous `function(...) ... end` expression.
    Function {
        /// Parameter names.
        params: Vec<String>,
        /// Function body statements.
        body: Block,
    },
    /// `object.key` or `object[key]`.
    Index {
        /// Indexed expression.
        object: Box<Expr>,
        /// Key expression; a `Str` for dotted access.
        key: Box<Expr>,
    },
    /// `func(args)`.
    Call {
        /// Called expression.
        func: Box<Expr>,
        /// Argument expressions.
        args: Vec<Expr>,
    },
    /// `object:method(args)`.
    MethodCall {
        /// Receiver expression.
        object: Box<Expr>,
        /// Method name.
        method: String,
        /// Argument expressions.
        args: Vec<Expr>,
    },
    /// `{ ... }` table constructor.
    Table(Vec<TableField>),
    /// Binary operation.
    Binary {
        /// Operator token, e.g. `"+"`, `".."`, `"=="`.
        op: String,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Unary operation (`-`, `not`, `#`).
    Unary {
        /// Operator token.
        op: String,
        /// Operand.
        expr: Box<Expr>,
    },
    /// A parenthesized expression.
    Paren(Box<Expr>),
}

impl Expr {
    /// Returns the identifier name if this expression is a bare identifier.
    #[must_use]
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Self::Ident(name) => Some(name),
            _ => None,
        }
    }

    /// Returns `true` if this expression is a function value.
    #[must_use]
    pub fn is_function(&self) -> bool {
        matches!(self, Self::Function { .. })
    }
}

/// One entry of a table constructor.
#[derive(Debug, Clone, PartialEq)]
pub enum TableField {
    /// A positional entry: `{ expr }`.
    Item(Expr),
    /// A named entry: `{ name = expr }` or `{ [key] = expr }`.
    Pair {
        /// Key expression; a `Str` for `name = expr` entries.
        key: Expr,
        /// Value expression.
        value: Expr,
    },
}
