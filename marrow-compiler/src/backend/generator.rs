//! Lowering of SSA instructions to macro-ops.

use marrow_asm::{op, BinaryArithFunc, Immediate, MacroOp, UnaryArithFunc};
use marrow_types::bytes;
use marrow_types::diagnostic::Diagnostic;
use marrow_types::{ImmediateType, MemoryAddress};

use super::registers::RegisterAllocator;
use crate::frontend::token::{Token, TokenKind};
use crate::ir::{IrInstruction, RValue};

/// ALU function selector for a binary operator token.
fn binary_func(operator: TokenKind) -> BinaryArithFunc {
    match operator {
        TokenKind::Plus => BinaryArithFunc::Add,
        TokenKind::Minus => BinaryArithFunc::Sub,
        TokenKind::Star => BinaryArithFunc::Mul,
        TokenKind::Slash => BinaryArithFunc::Div,
        TokenKind::Percent => BinaryArithFunc::Mod,
        other => panic!("token {other} is not a binary operator"),
    }
}

/// ALU function selector for a unary operator token.
fn unary_func(operator: TokenKind) -> UnaryArithFunc {
    match operator {
        TokenKind::Plus => UnaryArithFunc::Pos,
        TokenKind::Minus => UnaryArithFunc::Neg,
        other => panic!("token {other} is not a unary operator"),
    }
}

/// Fold a decimal lexeme, saturating well past 64 bits so truncation can
/// still be detected.
fn fold_decimal(lexeme: &str) -> u128 {
    lexeme.bytes().fold(0u128, |value, digit| {
        value
            .saturating_mul(10)
            .saturating_add(u128::from(digit - b'0'))
    })
}

/// Lowers SSA instructions to macro-ops over the register pool.
///
/// Abstract addresses map directly to heap slots, so `StoreImmediate` and
/// `Store` target the SSA destination unchanged.
#[derive(Debug, Default)]
pub struct MacroOpGenerator {
    ops: Vec<MacroOp>,
    registers: RegisterAllocator,
    diagnostics: Vec<Diagnostic>,
}

impl MacroOpGenerator {
    /// Create a generator with an all-free register pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower all instructions, returning the macro-ops in program order.
    ///
    /// Afterwards every register must be back in the pool; any register
    /// still held is reported in a warning diagnostic.
    pub fn generate(&mut self, ir: &[IrInstruction<'_>]) -> Vec<MacroOp> {
        for instruction in ir {
            self.lower(instruction);
        }

        let unfreed = self.registers.unfreed();
        if !unfreed.is_empty() {
            self.diagnostics
                .push(Diagnostic::warning(unfreed_registers_message(&unfreed)));
        }

        std::mem::take(&mut self.ops)
    }

    /// Diagnostics recorded while lowering.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take ownership of the recorded diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn lower(&mut self, instruction: &IrInstruction<'_>) {
        match instruction.rvalue {
            RValue::Atomic(token) => self.lower_atom(instruction.destination, token),
            RValue::Binary {
                operator,
                left,
                right,
            } => self.lower_binary(operator, instruction.destination, left, right),
            RValue::Unary { operator, right } => {
                self.lower_unary(operator, instruction.destination, right)
            }
        }
    }

    fn lower_atom(&mut self, destination: MemoryAddress, token: Token<'_>) {
        let (ty, immediate) = match token.kind {
            TokenKind::Integer => {
                let value = fold_decimal(token.lexeme);
                if bytes::does_integer_overflow(value) {
                    self.diagnostics.push(
                        Diagnostic::warning(format!(
                            "integer literal '{}' does not fit in 64 bits; keeping the low bits",
                            token.lexeme
                        ))
                        .with_source(token.source.name()),
                    );
                }

                (
                    ImmediateType::Integer,
                    Immediate::new(bytes::encode_integer(value)),
                )
            }
            TokenKind::Float => {
                let value: f64 = token
                    .lexeme
                    .parse()
                    .expect("float lexeme is digits around a period");

                (
                    ImmediateType::Float,
                    Immediate::new(bytes::encode_float(value)),
                )
            }
            other => panic!("token {other} is not a literal"),
        };

        self.ops.push(op::store_immediate(destination, ty, immediate));
    }

    fn lower_binary(
        &mut self,
        operator: TokenKind,
        destination: MemoryAddress,
        left: MemoryAddress,
        right: MemoryAddress,
    ) {
        let rdestination = self.registers.allocate();
        let rleft = self.registers.allocate();
        let rright = self.registers.allocate();

        let func = binary_func(operator);

        self.ops.extend([
            op::load(rleft, left),
            op::load(rright, right),
            // the SSA IR is untyped for now, so the operand type is fixed
            op::binary_arith(func, ImmediateType::Integer, rdestination, rleft, rright),
            op::store(destination, rdestination),
        ]);

        self.registers.free(rdestination);
        self.registers.free(rleft);
        self.registers.free(rright);
    }

    fn lower_unary(
        &mut self,
        operator: TokenKind,
        destination: MemoryAddress,
        right: MemoryAddress,
    ) {
        let rdestination = self.registers.allocate();
        let rright = self.registers.allocate();

        let func = unary_func(operator);

        self.ops.extend([
            op::load(rright, right),
            op::unary_arith(func, ImmediateType::Integer, rdestination, rright),
            op::store(destination, rdestination),
        ]);

        self.registers.free(rdestination);
        self.registers.free(rright);
    }
}

fn unfreed_registers_message(unfreed: &[usize]) -> String {
    let mut message = format!(
        "macro op generation has finished, but {} register(s) are still allocated",
        unfreed.len()
    );
    for register in unfreed {
        message.push_str(&format!("\nregister {register:#x} was never freed"));
    }

    message
}
