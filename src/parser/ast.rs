// AST (Abstract Syntax Tree) definitions for the C subset

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg, // -x
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub type_name: String,
}

/// Expression nodes. Every expression produces a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLiteral(i32, SourceLocation),
    CharLiteral(char, SourceLocation),
    StringLiteral(String, SourceLocation),
    Variable(String, SourceLocation),
    BinaryOp {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        location: SourceLocation,
    },
    UnaryOp {
        op: UnOp,
        operand: Box<Expr>,
        location: SourceLocation,
    },
    Assignment {
        name: String,
        value: Box<Expr>,
        location: SourceLocation,
    },
    ArrayAssignment {
        name: String,
        index: Box<Expr>,
        value: Box<Expr>,
        location: SourceLocation,
    },
    FunctionCall {
        name: String,
        args: Vec<Expr>,
        location: SourceLocation,
    },
    ArrayLiteral {
        elements: Vec<Expr>,
        location: SourceLocation,
    },
    ArrayAccess {
        name: String,
        index: Box<Expr>,
        location: SourceLocation,
    },
}

impl Expr {
    /// Get the source location of this node
    pub fn location(&self) -> SourceLocation {
        match self {
            Expr::IntLiteral(_, loc)
            | Expr::CharLiteral(_, loc)
            | Expr::StringLiteral(_, loc)
            | Expr::Variable(_, loc) => *loc,
            Expr::BinaryOp { location, .. }
            | Expr::UnaryOp { location, .. }
            | Expr::Assignment { location, .. }
            | Expr::ArrayAssignment { location, .. }
            | Expr::FunctionCall { location, .. }
            | Expr::ArrayLiteral { location, .. }
            | Expr::ArrayAccess { location, .. } => *location,
        }
    }
}

/// Statement nodes. Statements produce control flow, not values.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    VarDecl {
        name: String,
        type_name: String,
        /// `Some` for `name[n]`; `None` for scalars and `name[]`
        array_size: Option<Expr>,
        location: SourceLocation,
    },
    FunctionDecl {
        name: String,
        return_type: String,
        params: Vec<Param>,
        location: SourceLocation,
    },
    FunctionDef {
        name: String,
        return_type: String,
        params: Vec<Param>,
        body: Vec<Stmt>,
        location: SourceLocation,
    },
    /// `{ ... }`, executed in its own scope
    Block {
        statements: Vec<Stmt>,
        location: SourceLocation,
    },
    /// A group of statements produced by one source construct (declaration
    /// chains, declaration + definition pairs). Does not open a scope.
    Statements(Vec<Stmt>),
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Box<Stmt>,
        location: SourceLocation,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
        location: SourceLocation,
    },
    For {
        init: Box<Stmt>,
        condition: Expr,
        increment: Expr,
        body: Box<Stmt>,
        location: SourceLocation,
    },
    Break {
        location: SourceLocation,
    },
    Continue {
        location: SourceLocation,
    },
    Return {
        expr: Option<Expr>,
        location: SourceLocation,
    },
    Intrinsic {
        name: String,
        args: Vec<Expr>,
        location: SourceLocation,
    },
    Expression(Expr),
}

impl Stmt {
    /// Get the source location of this node, if it has one of its own
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            Stmt::VarDecl { location, .. }
            | Stmt::FunctionDecl { location, .. }
            | Stmt::FunctionDef { location, .. }
            | Stmt::Block { location, .. }
            | Stmt::If { location, .. }
            | Stmt::While { location, .. }
            | Stmt::For { location, .. }
            | Stmt::Break { location }
            | Stmt::Continue { location }
            | Stmt::Return { location, .. }
            | Stmt::Intrinsic { location, .. } => Some(*location),
            Stmt::Expression(expr) => Some(expr.location()),
            Stmt::Statements(statements) => statements.first().and_then(Stmt::location),
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub nodes: Vec<Stmt>, // Global declarations and function declarations/definitions
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }
}
