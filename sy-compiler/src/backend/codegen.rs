//! Walk the Koopa instruction graph in layout order and emit RV32 assembly.

use crate::backend::insts::{AsmInst, AsmOp, AsmProgram, Reg};
use crate::backend::regalloc::RegAlloc;
use crate::CompileError;
use koopa::ir::{BinaryOp, FunctionData, Program, Value, ValueKind};

pub fn generate(program: &Program, asm: &mut AsmProgram) -> Result<(), CompileError> {
    asm.push_text();
    for &func in program.func_layout() {
        generate_func(program.func(func), asm)?;
    }
    Ok(())
}

fn generate_func(func: &FunctionData, asm: &mut AsmProgram) -> Result<(), CompileError> {
    // Koopa function names carry the leading `@`.
    let name = func.name().strip_prefix('@').unwrap_or(func.name());
    asm.push_globl(name);
    asm.push_label(name);

    let mut ctx = FuncContext {
        func,
        regs: RegAlloc::new(),
    };
    for (_bb, node) in func.layout().bbs() {
        for &inst in node.insts().keys() {
            ctx.generate_inst(inst, asm)?;
        }
    }
    Ok(())
}

/// Per-function state: register pool and the value-to-slot assignment map,
/// both fresh for every function.
struct FuncContext<'a> {
    func: &'a FunctionData,
    regs: RegAlloc,
}

impl FuncContext<'_> {
    fn generate_inst(&mut self, inst: Value, asm: &mut AsmProgram) -> Result<(), CompileError> {
        let func = self.func;
        match func.dfg().value(inst).kind() {
            ValueKind::Binary(bin) => {
                let (op, lhs, rhs) = (bin.op(), bin.lhs(), bin.rhs());
                self.generate_binary(inst, op, lhs, rhs, asm)
            }
            ValueKind::Return(ret) => self.generate_return(ret.value(), asm),
            other => unreachable!("instruction kind {other:?} is never emitted"),
        }
    }

    fn generate_binary(
        &mut self,
        inst: Value,
        op: BinaryOp,
        lhs: Value,
        rhs: Value,
        asm: &mut AsmProgram,
    ) -> Result<(), CompileError> {
        let (lhs_reg, lhs_src) = self.operand_reg(lhs, asm)?;
        let (rhs_reg, rhs_src) = self.operand_reg(rhs, asm)?;

        // The left operand's slot doubles as the destination.
        let dst = lhs_reg;
        emit_op(op, dst, lhs_reg, rhs_reg, asm);

        // Both operands are at their one consumption site: the right slot
        // goes back to the pool and the left slot now holds `inst`.
        if let Some(v) = lhs_src {
            self.regs.unassign(v);
        }
        if let Some(v) = rhs_src {
            self.regs.unassign(v);
        }
        if rhs_reg != dst {
            self.regs.release(rhs_reg);
        }
        self.regs.assign(inst, dst);
        Ok(())
    }

    fn generate_return(
        &mut self,
        value: Option<Value>,
        asm: &mut AsmProgram,
    ) -> Result<(), CompileError> {
        let func = self.func;
        if let Some(v) = value {
            match func.dfg().value(v).kind() {
                ValueKind::Integer(n) => {
                    asm.push_inst(AsmInst::Li {
                        rd: Reg::A0,
                        imm: n.value(),
                    });
                }
                _ => {
                    let reg = self.resolved_reg(v);
                    asm.push_inst(AsmInst::Mv {
                        rd: Reg::A0,
                        rs: reg,
                    });
                    self.regs.unassign(v);
                    self.regs.release(reg);
                }
            }
        }
        asm.push_inst(AsmInst::Ret);
        Ok(())
    }

    /// Bring an operand into a register: a constant gets a fresh slot and a
    /// `li`, a reference resolves to the slot its producer still occupies.
    /// The second half of the pair names the producer when the operand must
    /// be retired after use.
    fn operand_reg(
        &mut self,
        operand: Value,
        asm: &mut AsmProgram,
    ) -> Result<(Reg, Option<Value>), CompileError> {
        let func = self.func;
        match func.dfg().value(operand).kind() {
            ValueKind::Integer(n) => {
                let reg = self.regs.alloc()?;
                asm.push_inst(AsmInst::Li {
                    rd: reg,
                    imm: n.value(),
                });
                Ok((reg, None))
            }
            _ => Ok((self.resolved_reg(operand), Some(operand))),
        }
    }

    fn resolved_reg(&self, value: Value) -> Reg {
        match self.regs.reg_of(value) {
            Some(reg) => reg,
            // The layout walk is definition order, so every reference points
            // at an already-emitted instruction.
            None => unreachable!("operand read before its defining instruction"),
        }
    }
}

fn emit_op(op: BinaryOp, rd: Reg, rs1: Reg, rs2: Reg, asm: &mut AsmProgram) {
    let direct = |op| AsmInst::Binary { op, rd, rs1, rs2 };
    match op {
        BinaryOp::Add => asm.push_inst(direct(AsmOp::Add)),
        BinaryOp::Sub => asm.push_inst(direct(AsmOp::Sub)),
        BinaryOp::Mul => asm.push_inst(direct(AsmOp::Mul)),
        BinaryOp::Div => asm.push_inst(direct(AsmOp::Div)),
        BinaryOp::Mod => asm.push_inst(direct(AsmOp::Rem)),
        BinaryOp::Lt => asm.push_inst(direct(AsmOp::Slt)),
        BinaryOp::Gt => asm.push_inst(direct(AsmOp::Sgt)),
        BinaryOp::And => asm.push_inst(direct(AsmOp::And)),
        BinaryOp::Or => asm.push_inst(direct(AsmOp::Or)),
        BinaryOp::Xor => asm.push_inst(direct(AsmOp::Xor)),
        BinaryOp::Shl => asm.push_inst(direct(AsmOp::Sll)),
        BinaryOp::Shr => asm.push_inst(direct(AsmOp::Srl)),
        BinaryOp::Sar => asm.push_inst(direct(AsmOp::Sra)),
        BinaryOp::Eq => {
            asm.push_inst(direct(AsmOp::Xor));
            asm.push_inst(AsmInst::Seqz { rd, rs: rd });
        }
        BinaryOp::NotEq => {
            asm.push_inst(direct(AsmOp::Xor));
            asm.push_inst(AsmInst::Snez { rd, rs: rd });
        }
        BinaryOp::Le => {
            asm.push_inst(direct(AsmOp::Sgt));
            asm.push_inst(AsmInst::Seqz { rd, rs: rd });
        }
        BinaryOp::Ge => {
            asm.push_inst(direct(AsmOp::Slt));
            asm.push_inst(AsmInst::Seqz { rd, rs: rd });
        }
    }
}
