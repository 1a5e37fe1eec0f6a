//! RV32 instruction records and the assembly buffer.
//!
//! Code generation appends structured items; the textual layout is produced
//! in one place by `AsmProgram::dump`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reg {
    T0,
    T1,
    T2,
    T3,
    T4,
    T5,
    T6,
    A0,
}

impl Reg {
    /// The scratch pool available for holding live temporaries. `a0` is
    /// reserved for the return value and never allocated.
    pub const TEMPS: [Reg; 7] = [
        Reg::T0,
        Reg::T1,
        Reg::T2,
        Reg::T3,
        Reg::T4,
        Reg::T5,
        Reg::T6,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Reg::T0 => "t0",
            Reg::T1 => "t1",
            Reg::T2 => "t2",
            Reg::T3 => "t3",
            Reg::T4 => "t4",
            Reg::T5 => "t5",
            Reg::T6 => "t6",
            Reg::A0 => "a0",
        }
    }
}

impl std::fmt::Display for Reg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsmOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Slt,
    Sgt,
    Xor,
    Or,
    And,
    Sll,
    Srl,
    Sra,
}

impl AsmOp {
    fn mnemonic(self) -> &'static str {
        match self {
            AsmOp::Add => "add",
            AsmOp::Sub => "sub",
            AsmOp::Mul => "mul",
            AsmOp::Div => "div",
            AsmOp::Rem => "rem",
            AsmOp::Slt => "slt",
            AsmOp::Sgt => "sgt",
            AsmOp::Xor => "xor",
            AsmOp::Or => "or",
            AsmOp::And => "and",
            AsmOp::Sll => "sll",
            AsmOp::Srl => "srl",
            AsmOp::Sra => "sra",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsmInst {
    Li { rd: Reg, imm: i32 },
    Mv { rd: Reg, rs: Reg },
    Binary { op: AsmOp, rd: Reg, rs1: Reg, rs2: Reg },
    Seqz { rd: Reg, rs: Reg },
    Snez { rd: Reg, rs: Reg },
    Ret,
}

impl std::fmt::Display for AsmInst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AsmInst::Li { rd, imm } => write!(f, "li {rd}, {imm}"),
            AsmInst::Mv { rd, rs } => write!(f, "mv {rd}, {rs}"),
            AsmInst::Binary { op, rd, rs1, rs2 } => {
                write!(f, "{} {rd}, {rs1}, {rs2}", op.mnemonic())
            }
            AsmInst::Seqz { rd, rs } => write!(f, "seqz {rd}, {rs}"),
            AsmInst::Snez { rd, rs } => write!(f, "snez {rd}, {rs}"),
            AsmInst::Ret => write!(f, "ret"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsmItem {
    Text,
    Globl(String),
    Label(String),
    Inst(AsmInst),
}

/// Append-only assembly buffer.
#[derive(Debug, Default)]
pub struct AsmProgram {
    items: Vec<AsmItem>,
}

impl AsmProgram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self) {
        self.items.push(AsmItem::Text);
    }

    pub fn push_globl(&mut self, name: &str) {
        self.items.push(AsmItem::Globl(name.to_string()));
    }

    pub fn push_label(&mut self, name: &str) {
        self.items.push(AsmItem::Label(name.to_string()));
    }

    pub fn push_inst(&mut self, inst: AsmInst) {
        self.items.push(AsmItem::Inst(inst));
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        for item in &self.items {
            match item {
                AsmItem::Text => out.push_str("  .text\n"),
                AsmItem::Globl(name) => {
                    out.push_str("  .globl ");
                    out.push_str(name);
                    out.push('\n');
                }
                AsmItem::Label(name) => {
                    out.push_str(name);
                    out.push_str(":\n");
                }
                AsmItem::Inst(inst) => {
                    out.push_str("  ");
                    out.push_str(&inst.to_string());
                    out.push('\n');
                }
            }
        }
        out
    }
}
