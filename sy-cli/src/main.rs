use clap::Parser;
use std::fs;
use std::path::PathBuf;
use sy_compiler::{backend, compile_to_ir};

#[derive(Parser)]
#[command(name = "sy")]
#[command(about = "Compiles a small constant-expression language to RV32 assembly")]
struct Args {
    /// Path to the source file to compile
    file: Option<PathBuf>,

    /// Emit Koopa IR. If none of --ir/--asm/--both is given, defaults to --asm.
    #[arg(long)]
    ir: bool,

    /// Emit RV32 assembly
    #[arg(long)]
    asm: bool,

    /// Emit both IR and assembly
    #[arg(long)]
    both: bool,
}

const DEFAULT_SAMPLE: &str = r#"
int main() {
    const int base = 16, bias = 3;
    return (base + bias * 2) % 10 || !base;
}
"#;

fn main() {
    let args = Args::parse();

    let src = if let Some(file_path) = args.file {
        fs::read_to_string(&file_path).unwrap_or_else(|e| {
            eprintln!("Error reading file '{}': {}", file_path.display(), e);
            std::process::exit(1);
        })
    } else {
        DEFAULT_SAMPLE.trim().to_string()
    };

    let mut want_ir = args.ir;
    let mut want_asm = args.asm;
    if args.both {
        want_ir = true;
        want_asm = true;
    }
    if !want_ir && !want_asm {
        want_asm = true;
    }

    // Compile to IR once
    let ir = compile_to_ir(&src).unwrap_or_else(|e| {
        eprintln!("Compilation error: {}", e);
        std::process::exit(1);
    });

    if want_ir {
        for line in ir.to_lines() {
            println!("{line}");
        }
    }

    if want_asm {
        if want_ir {
            println!();
        }
        let asm = backend::compile_ir_to_riscv(&ir.to_text()).unwrap_or_else(|e| {
            eprintln!("Compilation error: {}", e);
            std::process::exit(1);
        });
        print!("{asm}");
    }
}
