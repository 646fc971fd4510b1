//! Middle end: single-static-assignment intermediate representation.
//!
//! Every subexpression of the parse tree is assigned a fresh abstract
//! memory address; instructions form a linear list in which every operand
//! address was defined by an earlier instruction. There is no control
//! flow, so no phi functions either.

mod generator;
mod instruction;
mod rvalue;

pub use generator::IrGenerator;
pub use instruction::IrInstruction;
pub use rvalue::RValue;
