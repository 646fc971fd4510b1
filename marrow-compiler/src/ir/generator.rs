//! Lowering of the parse tree to SSA instructions.

use marrow_types::MemoryAddress;

use super::instruction::IrInstruction;
use super::rvalue::RValue;
use crate::frontend::ast::Expr;

/// Generates SSA instructions by a post-order walk of the parse tree.
///
/// Destinations are allocated from a monotonically increasing counter, so
/// every operand address is defined before it is referenced.
#[derive(Debug, Default)]
pub struct IrGenerator<'src> {
    instructions: Vec<IrInstruction<'src>>,
    next_address: MemoryAddress,
}

impl<'src> IrGenerator<'src> {
    /// Create a generator with the address counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower a sane parse tree into SSA instructions.
    ///
    /// # Panics
    ///
    /// When the tree still contains an `Invalid` node. Sanity checking
    /// precedes IR generation; reaching one here is a compiler bug, not a
    /// user error.
    pub fn generate(mut self, tree: &Expr<'src>) -> Vec<IrInstruction<'src>> {
        self.visit(tree);

        self.instructions
    }

    fn allocate_address(&mut self) -> MemoryAddress {
        let address = self.next_address;
        self.next_address += 1;

        address
    }

    /// Returns the address holding the expression's value.
    ///
    /// Blocks and modules produce no value and return `None`; groupings
    /// are transparent and forward the inner expression's address.
    fn visit(&mut self, expr: &Expr<'src>) -> Option<MemoryAddress> {
        match expr {
            Expr::LiteralScalar { token, .. } => {
                let destination = self.allocate_address();
                self.instructions.push(IrInstruction {
                    destination,
                    rvalue: RValue::Atomic(*token),
                });

                Some(destination)
            }
            Expr::Grouping(inner) => self.visit(inner),
            Expr::Block(expr_list) => {
                for subexpr in expr_list {
                    self.visit(subexpr);
                }

                None
            }
            Expr::Module(inner) => {
                self.visit(inner);

                None
            }
            Expr::Unary { operator, operand } => {
                let right = self.operand_address(operand);
                let destination = self.allocate_address();
                self.instructions.push(IrInstruction {
                    destination,
                    rvalue: RValue::Unary {
                        operator: *operator,
                        right,
                    },
                });

                Some(destination)
            }
            Expr::Binary {
                operator,
                left,
                right,
            } => {
                let left_address = self.operand_address(left);
                let right_address = self.operand_address(right);
                let destination = self.allocate_address();
                self.instructions.push(IrInstruction {
                    destination,
                    rvalue: RValue::Binary {
                        operator: *operator,
                        left: left_address,
                        right: right_address,
                    },
                });

                Some(destination)
            }
            Expr::Invalid { .. } => {
                panic!("found invalid expression while generating SSA IR")
            }
        }
    }

    fn operand_address(&mut self, expr: &Expr<'src>) -> MemoryAddress {
        self.visit(expr)
            .expect("arithmetic operand must produce a value address")
    }
}
