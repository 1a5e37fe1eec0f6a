pub mod codegen;
pub mod insts;
pub mod regalloc;

use crate::CompileError;
use insts::AsmProgram;
use koopa::front::Driver;

/// Parse IR text with the external Koopa parser and lower the resulting
/// instruction graph to RV32 assembly.
///
/// Parse failures are fatal and reported verbatim; this is a single-pass
/// batch compiler with no recovery.
pub fn compile_ir_to_riscv(ir_text: &str) -> Result<String, CompileError> {
    let program = Driver::from(ir_text.to_string())
        .generate_program()
        .map_err(|e| CompileError::IrParse(format!("{e:?}")))?;

    let mut asm = AsmProgram::new();
    codegen::generate(&program, &mut asm)?;
    Ok(asm.dump())
}
