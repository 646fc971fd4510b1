//! ALU behavior exercised through full programs.

use marrow_vm::prelude::*;
use quickcheck_macros::quickcheck;

/// Load two words into registers, apply the function and store the result
/// in heap slot 2, mirroring what the macro-op generator emits.
fn alu(left: Word, right: Word, func: BinaryArithFunc) -> (Machine, RawValue) {
    let ops = vec![
        op::store_immediate(
            0,
            ImmediateType::Integer,
            Immediate::new(bytes::encode_integer(u128::from(left))),
        ),
        op::store_immediate(
            1,
            ImmediateType::Integer,
            Immediate::new(bytes::encode_integer(u128::from(right))),
        ),
        op::load(2, 0),
        op::load(3, 1),
        op::binary_arith(func, ImmediateType::Integer, 1, 2, 3),
        op::store(2, 1),
    ];

    let mut machine = Machine::new();
    machine.execute(&Bytecode::new("<test>", ops), false);
    let result = machine.heap_slot(2);

    (machine, result)
}

fn alu_unary(operand: Word, func: UnaryArithFunc) -> (Machine, RawValue) {
    let ops = vec![
        op::store_immediate(
            0,
            ImmediateType::Integer,
            Immediate::new(bytes::encode_integer(u128::from(operand))),
        ),
        op::load(2, 0),
        op::unary_arith(func, ImmediateType::Integer, 1, 2),
        op::store(1, 1),
    ];

    let mut machine = Machine::new();
    machine.execute(&Bytecode::new("<test>", ops), false);
    let result = machine.heap_slot(1);

    (machine, result)
}

#[test]
fn add() {
    let (machine, result) = alu(40, 2, BinaryArithFunc::Add);
    assert_eq!(bytes::decode_integer(&result), 42);
    assert!(machine.alu().flags().is_empty());
}

#[test]
fn sub() {
    let (machine, result) = alu(40, 2, BinaryArithFunc::Sub);
    assert_eq!(bytes::decode_integer(&result), 38);
    assert!(machine.alu().flags().is_empty());
}

#[test]
fn mul() {
    let (_, result) = alu(6, 7, BinaryArithFunc::Mul);
    assert_eq!(bytes::decode_integer(&result), 42);
}

#[test]
fn div_is_floor_division() {
    let (_, result) = alu(7, 2, BinaryArithFunc::Div);
    assert_eq!(bytes::decode_integer(&result), 3);
}

#[test]
fn modulo() {
    let (_, result) = alu(9, 4, BinaryArithFunc::Mod);
    assert_eq!(bytes::decode_integer(&result), 1);
}

#[test]
fn add_overflow_wraps_and_flags() {
    let (machine, result) = alu(Word::MAX, 2, BinaryArithFunc::Add);
    assert_eq!(bytes::decode_integer(&result), 1);
    assert!(machine.alu().flags().contains(UnitFlags::OVERFLOW));
}

#[test]
fn mul_overflow_wraps_and_flags() {
    let (machine, result) = alu(1 << 63, 2, BinaryArithFunc::Mul);
    assert_eq!(bytes::decode_integer(&result), 0);
    assert!(machine.alu().flags().contains(UnitFlags::OVERFLOW));
}

#[test]
fn sub_underflow_wraps_and_flags() {
    let (machine, result) = alu(0, 1, BinaryArithFunc::Sub);
    assert_eq!(bytes::decode_integer(&result), Word::MAX);
    assert!(machine.alu().flags().contains(UnitFlags::OVERFLOW));
}

#[test]
fn div_by_zero_flags_without_trapping() {
    let (machine, result) = alu(10, 0, BinaryArithFunc::Div);
    assert_eq!(bytes::decode_integer(&result), 0);
    assert!(machine.alu().flags().contains(UnitFlags::DIV_BY_ZERO));
}

#[test]
fn mod_by_zero_flags_without_trapping() {
    let (machine, result) = alu(10, 0, BinaryArithFunc::Mod);
    assert_eq!(bytes::decode_integer(&result), 0);
    assert!(machine.alu().flags().contains(UnitFlags::DIV_BY_ZERO));
}

#[test]
fn pos_is_identity() {
    let (machine, result) = alu_unary(7, UnaryArithFunc::Pos);
    assert_eq!(bytes::decode_integer(&result), 7);
    assert!(machine.alu().flags().is_empty());
}

#[test]
fn neg_wraps_on_unsigned_patterns() {
    let (machine, result) = alu_unary(1, UnaryArithFunc::Neg);
    assert_eq!(bytes::decode_integer(&result), Word::MAX);
    assert!(machine.alu().flags().contains(UnitFlags::OVERFLOW));
}

#[test]
fn neg_of_zero_is_zero() {
    let (machine, result) = alu_unary(0, UnaryArithFunc::Neg);
    assert_eq!(bytes::decode_integer(&result), 0);
    assert!(machine.alu().flags().is_empty());
}

#[quickcheck]
fn add_matches_wrapping_semantics(left: Word, right: Word) -> bool {
    let (_, result) = alu(left, right, BinaryArithFunc::Add);
    bytes::decode_integer(&result) == left.wrapping_add(right)
}

#[quickcheck]
fn div_matches_checked_semantics(left: Word, right: Word) -> bool {
    let (_, result) = alu(left, right, BinaryArithFunc::Div);
    bytes::decode_integer(&result) == left.checked_div(right).unwrap_or(0)
}
