// A tiny, linear IR in the Koopa textual form: one entry block per function,
// value-numbered binary instructions, and a single `ret`.

pub mod consteval;
pub mod ir_generator;

#[derive(Debug, Clone)]
pub struct ProgramIr {
    pub funcs: Vec<FunctionIr>,
}

impl ProgramIr {
    pub fn to_lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for func in &self.funcs {
            out.push(format!("fun @{}(): {} {{", func.name, func.ret_ty));
            out.push("%entry:".to_string());
            for ins in &func.insts {
                out.push(format!("  {ins}"));
            }
            out.push("}".to_string());
        }
        out
    }

    pub fn to_text(&self) -> String {
        let mut text = self.to_lines().join("\n");
        text.push('\n');
        text
    }
}

#[derive(Debug, Clone)]
pub struct FunctionIr {
    pub name: String,
    pub ret_ty: IrType,
    pub insts: Vec<Inst>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrType {
    I32,
}

impl std::fmt::Display for IrType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IrType::I32 => write!(f, "i32"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst {
    /// `%dst = op left, right`
    Binary {
        dst: u32,
        op: IrBinaryOp,
        left: Operand,
        right: Operand,
    },

    /// `ret <operand>`
    Ret(Operand),
}

impl std::fmt::Display for Inst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Inst::Binary { dst, op, left, right } => {
                write!(f, "%{dst} = {op} {left}, {right}")
            }
            Inst::Ret(v) => write!(f, "ret {v}"),
        }
    }
}

/// Either a usable operand text by itself, or a reference to the temporary
/// assigned to a prior instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    Imm(i32),
    Temp(u32),
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Imm(n) => write!(f, "{n}"),
            Operand::Temp(id) => write!(f, "%{id}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrBinaryOp {
    Neq,
    Eq,
    Gt,
    Lt,
    Ge,
    Le,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    And,
    Or,
}

impl std::fmt::Display for IrBinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            IrBinaryOp::Neq => "ne",
            IrBinaryOp::Eq => "eq",
            IrBinaryOp::Gt => "gt",
            IrBinaryOp::Lt => "lt",
            IrBinaryOp::Ge => "ge",
            IrBinaryOp::Le => "le",
            IrBinaryOp::Add => "add",
            IrBinaryOp::Sub => "sub",
            IrBinaryOp::Mul => "mul",
            IrBinaryOp::Div => "div",
            IrBinaryOp::Mod => "mod",
            IrBinaryOp::And => "and",
            IrBinaryOp::Or => "or",
        };
        write!(f, "{s}")
    }
}
