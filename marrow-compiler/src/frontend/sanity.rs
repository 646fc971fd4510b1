//! Parse-tree sanity checking.
//!
//! A tree is sane when it contains no `Invalid` node; only sane trees may
//! enter IR generation.

use super::ast::Expr;

/// Walks a parse tree and collects its `Invalid` nodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SanityChecker;

impl SanityChecker {
    /// Create a checker.
    pub const fn new() -> Self {
        Self
    }

    /// Every invalid node of the tree, in depth-first order.
    ///
    /// Subexpressions collected inside an invalid node are not descended
    /// into; the node itself already marks the error.
    pub fn invalid_nodes<'tree, 'src>(&self, tree: &'tree Expr<'src>) -> Vec<&'tree Expr<'src>> {
        let mut invalid = Vec::new();
        Self::walk(tree, &mut invalid);

        invalid
    }

    /// Whether the tree contains no invalid node.
    pub fn is_sane(&self, tree: &Expr<'_>) -> bool {
        self.invalid_nodes(tree).is_empty()
    }

    fn walk<'tree, 'src>(expr: &'tree Expr<'src>, invalid: &mut Vec<&'tree Expr<'src>>) {
        match expr {
            Expr::LiteralScalar { .. } => {}
            Expr::Grouping(inner) | Expr::Module(inner) => Self::walk(inner, invalid),
            Expr::Block(expr_list) => {
                for subexpr in expr_list {
                    Self::walk(subexpr, invalid);
                }
            }
            Expr::Unary { operand, .. } => Self::walk(operand, invalid),
            Expr::Binary { left, right, .. } => {
                Self::walk(left, invalid);
                Self::walk(right, invalid);
            }
            Expr::Invalid { .. } => invalid.push(expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parser::Parser;
    use crate::frontend::tokenizer::Tokenizer;
    use crate::source::SourceFile;

    fn parse(source: &SourceFile) -> Expr<'_> {
        Parser::new(Tokenizer::new(source)).run()
    }

    #[test]
    fn well_formed_trees_are_sane() {
        let source = SourceFile::from_string("in 1 + 2; (3 * 4) end");
        assert!(SanityChecker::new().is_sane(&parse(&source)));
    }

    #[test]
    fn every_invalid_node_is_collected() {
        let source = SourceFile::from_string("in 1 2; ) end");
        let tree = parse(&source);

        let invalid = SanityChecker::new().invalid_nodes(&tree);
        assert_eq!(invalid.len(), 2);
        assert!(matches!(invalid[0], Expr::Invalid { .. }));
    }

    #[test]
    fn insane_trees_fail_the_check() {
        let source = SourceFile::from_string("1 +");
        assert!(!SanityChecker::new().is_sane(&parse(&source)));
    }
}
