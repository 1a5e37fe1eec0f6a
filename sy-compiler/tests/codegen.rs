use sy_compiler::backend::compile_ir_to_riscv;
use sy_compiler::{compile_to_riscv, CompileError};

// ── End-to-end lowering ──────────────────────────────────────────────────

#[test]
fn literal_return() {
    let asm = compile_to_riscv("int main() { return 0; }").unwrap();
    assert_eq!(asm, "  .text\n  .globl main\nmain:\n  li a0, 0\n  ret\n");
}

#[test]
fn add_then_multiply() {
    let asm = compile_to_riscv("int main() { return (1 + 2) * 3; }").unwrap();
    assert_eq!(
        asm,
        "\
  .text
  .globl main
main:
  li t0, 1
  li t1, 2
  add t0, t0, t1
  li t1, 3
  mul t0, t0, t1
  mv a0, t0
  ret
"
    );
}

#[test]
fn eager_or_never_branches() {
    let asm = compile_to_riscv("int main() { return 0 || 5; }").unwrap();
    assert_eq!(
        asm,
        "\
  .text
  .globl main
main:
  li t0, 0
  li t1, 5
  or t0, t0, t1
  li t1, 0
  xor t0, t0, t1
  snez t0, t0
  mv a0, t0
  ret
"
    );
}

// ── Comparison lowering ──────────────────────────────────────────────────

#[test]
fn equality_uses_xor_seqz() {
    let asm = compile_to_riscv("int main() { return 1 == 2; }").unwrap();
    assert!(asm.contains("xor t0, t0, t1"));
    assert!(asm.contains("seqz t0, t0"));
}

#[test]
fn less_equal_uses_sgt_seqz() {
    let asm = compile_to_riscv("int main() { return 1 <= 2; }").unwrap();
    assert!(asm.contains("sgt t0, t0, t1"));
    assert!(asm.contains("seqz t0, t0"));
}

#[test]
fn greater_equal_uses_slt_seqz() {
    let asm = compile_to_riscv("int main() { return 1 >= 2; }").unwrap();
    assert!(asm.contains("slt t0, t0, t1"));
    assert!(asm.contains("seqz t0, t0"));
}

#[test]
fn division_passes_through() {
    let asm = compile_to_riscv("int main() { return 7 / 2; }").unwrap();
    assert!(asm.contains("div t0, t0, t1"));
}

// ── Register reuse ───────────────────────────────────────────────────────

#[test]
fn freed_slots_are_revisited() {
    // Two four-leaf subtrees: the second one re-claims the slots the first
    // one released, so the whole expression fits in t0..t3.
    let asm =
        compile_to_riscv("int main() { return ((1 + 2) * (3 + 4)) - ((5 + 6) * (7 + 8)); }")
            .unwrap();
    assert!(asm.contains("t3"));
    assert!(!asm.contains("t4"));
}

#[test]
fn seven_slots_suffice_for_depth_six() {
    let mut next = 0;
    let source = format!("int main() {{ return {}; }}", balanced(6, &mut next));
    let asm = compile_to_riscv(&source).unwrap();
    assert!(asm.contains("t6"));
}

#[test]
fn depth_seven_exhausts_the_pool() {
    let mut next = 0;
    let source = format!("int main() {{ return {}; }}", balanced(7, &mut next));
    let result = compile_to_riscv(&source);
    assert!(matches!(
        result,
        Err(CompileError::RegisterPoolExhausted { limit: 7 })
    ));
}

// ── Backend on externally supplied IR ────────────────────────────────────

#[test]
fn eight_live_results_exhaust_the_pool() {
    let ir = "\
fun @wide(): i32 {
%entry:
  %0 = add 1, 2
  %1 = add 3, 4
  %2 = add 5, 6
  %3 = add 7, 8
  %4 = add 9, 10
  %5 = add 11, 12
  %6 = add 13, 14
  %7 = add 15, 16
  %8 = add %0, %1
  %9 = add %2, %3
  %10 = add %4, %5
  %11 = add %6, %7
  %12 = add %8, %9
  %13 = add %10, %11
  %14 = add %12, %13
  ret %14
}
";
    let result = compile_ir_to_riscv(ir);
    assert!(matches!(
        result,
        Err(CompileError::RegisterPoolExhausted { limit: 7 })
    ));
}

#[test]
fn each_function_gets_a_fresh_pool() {
    let ir = "\
fun @first(): i32 {
%entry:
  %0 = add 1, 2
  ret %0
}
fun @second(): i32 {
%entry:
  %0 = add 3, 4
  ret %0
}
";
    let asm = compile_ir_to_riscv(ir).unwrap();
    assert!(asm.contains("first:"));
    assert!(asm.contains("second:"));
    assert_eq!(asm.matches("li t0, ").count(), 2);
}

#[test]
fn malformed_ir_is_rejected() {
    let result = compile_ir_to_riscv("fun @broken(): i32 {");
    assert!(matches!(result, Err(CompileError::IrParse(_))));
}

// ── Helper ───────────────────────────────────────────────────────────────

/// A fully parenthesized balanced addition tree of the given depth, with
/// distinct leaf literals.
fn balanced(depth: u32, next: &mut i32) -> String {
    if depth == 0 {
        *next += 1;
        return next.to_string();
    }
    format!("({} + {})", balanced(depth - 1, next), balanced(depth - 1, next))
}
