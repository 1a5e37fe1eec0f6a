use crate::frontend::ast::{BinOp, Block, BlockItem, CompUnit, Expr, FuncDef, FuncType, Stmt, UnOp};
use crate::ir::consteval::{self, SymbolTable};
use crate::ir::*;
use crate::CompileError;

pub fn lower(unit: &CompUnit) -> Result<ProgramIr, CompileError> {
    let mut g = Gen::new();
    let func = g.lower_func(&unit.func_def)?;
    Ok(ProgramIr { funcs: vec![func] })
}

struct Gen {
    insts: Vec<Inst>,
    temp_count: u32,
    symbols: SymbolTable,
}

impl Gen {
    fn new() -> Self {
        Self {
            insts: Vec::new(),
            temp_count: 0,
            symbols: SymbolTable::new(),
        }
    }

    fn new_temp(&mut self) -> u32 {
        let t = self.temp_count;
        self.temp_count += 1;
        t
    }

    /// Append one value-producing instruction. The id is allocated here,
    /// after both operands are settled, so references always point backwards.
    fn emit_binary(&mut self, op: IrBinaryOp, left: Operand, right: Operand) -> Operand {
        let dst = self.new_temp();
        self.insts.push(Inst::Binary { dst, op, left, right });
        Operand::Temp(dst)
    }

    // ========== Top-Level Lowering ==========

    fn lower_func(&mut self, func: &FuncDef) -> Result<FunctionIr, CompileError> {
        self.lower_block(&func.block)?;

        // Every Koopa block needs a terminator; a body that falls off the
        // end returns 0.
        if !matches!(self.insts.last(), Some(Inst::Ret(_))) {
            self.insts.push(Inst::Ret(Operand::Imm(0)));
        }

        Ok(FunctionIr {
            name: func.ident.clone(),
            ret_ty: match func.ret_ty {
                FuncType::Int => IrType::I32,
            },
            insts: std::mem::take(&mut self.insts),
        })
    }

    fn lower_block(&mut self, block: &Block) -> Result<(), CompileError> {
        for item in &block.items {
            match item {
                BlockItem::Decl(decl) => {
                    for def in &decl.defs {
                        let value = consteval::fold(&def.init, &self.symbols)?;
                        self.symbols.define(&def.ident, value);
                    }
                }
                BlockItem::Stmt(Stmt::Return(expr)) => {
                    let value = self.lower_expr(expr)?;
                    self.insts.push(Inst::Ret(value));
                    // Anything after a return is unreachable.
                    return Ok(());
                }
            }
        }
        Ok(())
    }

    // ========== Expression Lowering ==========

    /// Post-order walk: children are emitted (and their temporaries frozen)
    /// before the parent allocates its own.
    fn lower_expr(&mut self, expr: &Expr) -> Result<Operand, CompileError> {
        match expr {
            Expr::Number(n) => Ok(Operand::Imm(*n)),

            // Constants were folded at their declaration; a reference is
            // just the folded literal.
            Expr::LVal(name) => {
                self.symbols
                    .lookup(name)
                    .map(Operand::Imm)
                    .ok_or_else(|| CompileError::UndefinedSymbol { name: name.clone() })
            }

            Expr::Unary { op, operand } => self.lower_unary(*op, operand),

            Expr::Binary { op: BinOp::Or, left, right } => {
                let l = self.lower_expr(left)?;
                let r = self.lower_expr(right)?;
                let bits = self.emit_binary(IrBinaryOp::Or, l, r);
                Ok(self.emit_binary(IrBinaryOp::Neq, bits, Operand::Imm(0)))
            }

            Expr::Binary { op: BinOp::And, left, right } => {
                let l = self.lower_expr(left)?;
                let r = self.lower_expr(right)?;
                let ln = self.emit_binary(IrBinaryOp::Neq, l, Operand::Imm(0));
                let rn = self.emit_binary(IrBinaryOp::Neq, r, Operand::Imm(0));
                Ok(self.emit_binary(IrBinaryOp::And, ln, rn))
            }

            Expr::Binary { op, left, right } => {
                let l = self.lower_expr(left)?;
                let r = self.lower_expr(right)?;
                Ok(self.emit_binary(map_binop(*op), l, r))
            }
        }
    }

    fn lower_unary(&mut self, op: UnOp, operand: &Expr) -> Result<Operand, CompileError> {
        let v = self.lower_expr(operand)?;
        match op {
            UnOp::Plus => Ok(v),
            UnOp::Neg => Ok(self.emit_binary(IrBinaryOp::Sub, Operand::Imm(0), v)),
            UnOp::Not => Ok(self.emit_binary(IrBinaryOp::Eq, v, Operand::Imm(0))),
        }
    }
}

// ========== Helper Functions ==========

fn map_binop(op: BinOp) -> IrBinaryOp {
    match op {
        BinOp::Add => IrBinaryOp::Add,
        BinOp::Sub => IrBinaryOp::Sub,
        BinOp::Mul => IrBinaryOp::Mul,
        BinOp::Div => IrBinaryOp::Div,
        BinOp::Mod => IrBinaryOp::Mod,
        BinOp::Lt => IrBinaryOp::Lt,
        BinOp::Gt => IrBinaryOp::Gt,
        BinOp::Le => IrBinaryOp::Le,
        BinOp::Ge => IrBinaryOp::Ge,
        BinOp::Eq => IrBinaryOp::Eq,
        BinOp::Neq => IrBinaryOp::Neq,
        BinOp::And | BinOp::Or => unreachable!("logical operators lower through their own arms"),
    }
}
