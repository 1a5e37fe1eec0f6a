//! Compile-time evaluation of constant expressions.
//!
//! Every `const` initializer must fold to an `i32` here before the emitter
//! runs; identifiers in runtime expressions resolve through the same table.

use crate::frontend::ast::{BinOp, Expr, UnOp};
use crate::CompileError;
use std::collections::HashMap;

/// Name-to-value bindings for one compilation unit. There is no block
/// scoping; a later declaration of the same name overwrites the earlier one.
#[derive(Debug, Default)]
pub struct SymbolTable {
    values: HashMap<String, i32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: &str, value: i32) {
        self.values.insert(name.to_string(), value);
    }

    pub fn lookup(&self, name: &str) -> Option<i32> {
        self.values.get(name).copied()
    }
}

/// Fold `expr` to its compile-time value.
///
/// Arithmetic wraps like two's-complement hardware would; division and
/// modulo fail fast on a zero divisor (and on `i32::MIN / -1`) instead of
/// producing an undefined folded value. `&&` and `||` evaluate both sides.
pub fn fold(expr: &Expr, symbols: &SymbolTable) -> Result<i32, CompileError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::LVal(name) => {
            symbols
                .lookup(name)
                .ok_or_else(|| CompileError::UndefinedSymbol { name: name.clone() })
        }
        Expr::Unary { op, operand } => {
            let v = fold(operand, symbols)?;
            Ok(match op {
                UnOp::Plus => v,
                UnOp::Neg => v.wrapping_neg(),
                UnOp::Not => (v == 0) as i32,
            })
        }
        Expr::Binary { op, left, right } => {
            let l = fold(left, symbols)?;
            let r = fold(right, symbols)?;
            match op {
                BinOp::Add => Ok(l.wrapping_add(r)),
                BinOp::Sub => Ok(l.wrapping_sub(r)),
                BinOp::Mul => Ok(l.wrapping_mul(r)),
                BinOp::Div => l.checked_div(r).ok_or(CompileError::ArithmeticFault),
                BinOp::Mod => l.checked_rem(r).ok_or(CompileError::ArithmeticFault),
                BinOp::Lt => Ok((l < r) as i32),
                BinOp::Gt => Ok((l > r) as i32),
                BinOp::Le => Ok((l <= r) as i32),
                BinOp::Ge => Ok((l >= r) as i32),
                BinOp::Eq => Ok((l == r) as i32),
                BinOp::Neq => Ok((l != r) as i32),
                BinOp::And => Ok((l != 0 && r != 0) as i32),
                BinOp::Or => Ok((l != 0 || r != 0) as i32),
            }
        }
    }
}
