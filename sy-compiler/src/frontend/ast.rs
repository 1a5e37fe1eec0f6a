use crate::{frontend::lexer, grammar, CompileError};

#[derive(Debug, Clone)]
pub struct CompUnit {
    pub func_def: FuncDef,
}

#[derive(Debug, Clone)]
pub struct FuncDef {
    pub ret_ty: FuncType,
    pub ident: String,
    pub block: Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuncType {
    Int,
}

#[derive(Debug, Clone)]
pub struct Block {
    pub items: Vec<BlockItem>,
}

#[derive(Debug, Clone)]
pub enum BlockItem {
    Decl(ConstDecl),
    Stmt(Stmt),
}

/// `const int a = ..., b = ...;`
#[derive(Debug, Clone)]
pub struct ConstDecl {
    pub defs: Vec<ConstDef>,
}

#[derive(Debug, Clone)]
pub struct ConstDef {
    pub ident: String,
    pub init: Expr,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Return(Expr),
}

#[derive(Debug, Clone)]
pub enum Expr {
    Number(i32),
    LVal(String),
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn unary(op: UnOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Gt,
    Le,
    Ge,
    Eq,
    Neq,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnOp {
    Plus,
    Neg,
    Not,
}

pub fn parse_to_ast(source: &str) -> Result<CompUnit, CompileError> {
    let lexer = lexer::lex_adapter(source);
    grammar::CompUnitParser::new()
        .parse(lexer)
        .map_err(|e| {
            use lalrpop_util::ParseError;

            match e {
                ParseError::InvalidToken { location } => {
                    CompileError::Parse {
                        location,
                        message: "Invalid token".to_string(),
                    }
                }
                ParseError::UnrecognizedEof { location, expected } => {
                    CompileError::Parse {
                        location,
                        message: format!(
                            "Unexpected end of file. Expected one of: {}",
                            expected.join(", ")
                        ),
                    }
                }
                ParseError::UnrecognizedToken { token: (start, tok, end), expected } => {
                    CompileError::Parse {
                        location: start,
                        message: format!(
                            "Unexpected token '{:?}' at position {}..{}. Expected one of: {}",
                            tok,
                            start,
                            end,
                            expected.join(", ")
                        ),
                    }
                }
                ParseError::ExtraToken { token: (start, tok, end) } => {
                    CompileError::Parse {
                        location: start,
                        message: format!("Extra token '{:?}' at position {}..{}", tok, start, end),
                    }
                }
                ParseError::User { error } => {
                    CompileError::ParseGeneric(format!("Lexical error: {}", error))
                }
            }
        })
}
