pub mod backend;
pub mod frontend;
pub mod ir;

use thiserror::Error;

#[macro_use]
extern crate lalrpop_util;

lalrpop_mod!(pub grammar);

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Lexical error: {0}")]
    Lexical(#[from] frontend::lexer::LexicalError),

    #[error("Parse error at position {location}: {message}")]
    Parse {
        location: usize,
        message: String,
    },

    #[error("Parse error: {0}")]
    ParseGeneric(String),

    #[error("Undefined symbol '{name}'")]
    UndefinedSymbol {
        name: String,
    },

    #[error("Constant expression divides by zero")]
    ArithmeticFault,

    #[error("IR parse error: {0}")]
    IrParse(String),

    #[error("Expression needs more than {limit} live temporaries")]
    RegisterPoolExhausted {
        limit: usize,
    },
}

pub fn compile_to_ir(source: &str) -> Result<ir::ProgramIr, CompileError> {
    let ast = frontend::ast::parse_to_ast(source)?;
    ir::ir_generator::lower(&ast)
}

/// Compile source text directly to RV32 assembly.
///
/// The IR is round-tripped through its textual form: the backend only ever
/// sees the instruction graph the `koopa` parser hands back.
pub fn compile_to_riscv(source: &str) -> Result<String, CompileError> {
    let ir = compile_to_ir(source)?;
    backend::compile_ir_to_riscv(&ir.to_text())
}
