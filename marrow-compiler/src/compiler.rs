//! The compile pipeline driver.

use std::time::Instant;

use marrow_asm::op;
use marrow_types::diagnostic::Diagnostic;

use crate::backend::MacroOpGenerator;
use crate::bytecode::Bytecode;
use crate::frontend::ast::Expr;
use crate::frontend::parser::Parser;
use crate::frontend::sanity::SanityChecker;
use crate::frontend::tokenizer::Tokenizer;
use crate::ir::{IrGenerator, IrInstruction};
use crate::source::SourceFile;

/// Exit code of a successful compilation.
pub const EXIT_OK: u8 = 0;
/// Exit code when the sanity check found invalid nodes.
pub const EXIT_INSANE: u8 = 1;

/// Stage artifacts, filled as compilation advances.
#[derive(Debug, Default)]
pub struct CompilerResources<'src> {
    /// The parse tree, once parsing ran.
    pub parse_tree: Option<Expr<'src>>,
    /// The SSA instructions, once IR generation ran.
    pub ir: Vec<IrInstruction<'src>>,
    /// The executable program, once macro-op generation ran.
    pub bytecode: Option<Bytecode>,
}

/// Drives tokenize → parse → sanity check → SSA IR → macro-op generation.
///
/// The compiler owns its diagnostics; the embedding application drains
/// them into its sink after (or during) a run.
#[derive(Debug)]
pub struct Compiler<'src> {
    source: &'src SourceFile,
    debug: bool,
    resources: CompilerResources<'src>,
    sanity_checker: SanityChecker,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Compiler<'src> {
    /// Create a compiler over a source buffer.
    ///
    /// `debug` injects a memory dump op after generation and records
    /// timing diagnostics.
    pub fn new(source: &'src SourceFile, debug: bool) -> Self {
        Self {
            source,
            debug,
            resources: CompilerResources::default(),
            sanity_checker: SanityChecker::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Run the pipeline.
    ///
    /// Returns [`EXIT_OK`] on success and [`EXIT_INSANE`] when the parse
    /// tree contains invalid nodes, in which case IR generation and
    /// macro-op generation do not run.
    pub fn compile(&mut self) -> u8 {
        self.diagnostics.push(Diagnostic::info(format!(
            "starting compilation of '{}'",
            self.source.name()
        )));
        let started = Instant::now();

        let parse_tree = self.parse();

        if !self.check_sanity(&parse_tree) {
            self.resources.parse_tree = Some(parse_tree);

            return EXIT_INSANE;
        }

        let ir = self.generate_ssa_ir(&parse_tree);
        let bytecode = self.generate_macro_ops(&ir);

        self.resources.parse_tree = Some(parse_tree);
        self.resources.ir = ir;
        self.resources.bytecode = Some(bytecode);

        if self.debug {
            self.diagnostics.push(Diagnostic::debug(format!(
                "compilation time: {:.4}s",
                started.elapsed().as_secs_f64()
            )));
        }

        EXIT_OK
    }

    /// Tokenize and parse; the tokenizer is drained lazily by the parser.
    fn parse(&mut self) -> Expr<'src> {
        tracing::debug!(source = self.source.name(), "tokenizing and parsing");

        let tokenizer = Tokenizer::new(self.source);
        let mut parser = Parser::new(tokenizer);
        let parse_tree = parser.run();

        self.diagnostics.push(Diagnostic::info("tokenized source"));
        self.diagnostics.push(Diagnostic::info("parsed source"));
        self.diagnostics.extend(parser.take_diagnostics());

        parse_tree
    }

    /// Returns whether the tree is sane, recording one error per invalid
    /// node otherwise.
    fn check_sanity(&mut self, parse_tree: &Expr<'src>) -> bool {
        let invalid_nodes = self.sanity_checker.invalid_nodes(parse_tree);
        self.diagnostics
            .push(Diagnostic::info("checked parse tree sanity"));

        if invalid_nodes.is_empty() {
            self.diagnostics
                .push(Diagnostic::success("parse tree seems sane"));

            return true;
        }

        self.diagnostics.push(Diagnostic::info("found invalid nodes!"));
        for node in invalid_nodes {
            let Expr::Invalid { message, token, .. } = node else {
                unreachable!("sanity checker only collects invalid nodes");
            };
            let ((line, column), _) = token.line_span();
            self.diagnostics.push(
                Diagnostic::error(format!("{message} at {line}:{column}"))
                    .with_source(self.source.name()),
            );
        }
        self.diagnostics
            .push(Diagnostic::error("errors occurred - aborting"));

        false
    }

    fn generate_ssa_ir(&mut self, parse_tree: &Expr<'src>) -> Vec<IrInstruction<'src>> {
        tracing::debug!("generating SSA IR");

        let ir = IrGenerator::new().generate(parse_tree);
        self.diagnostics
            .push(Diagnostic::info(format!("generated SSA IR ({} instructions)", ir.len())));

        ir
    }

    fn generate_macro_ops(&mut self, ir: &[IrInstruction<'src>]) -> Bytecode {
        tracing::debug!("generating macro ops");

        let mut generator = MacroOpGenerator::new();
        let mut ops = generator.generate(ir);
        self.diagnostics.extend(generator.take_diagnostics());
        self.diagnostics
            .push(Diagnostic::info(format!("generated {} macro ops", ops.len())));

        if self.debug {
            ops.push(op::dump_memory(0));
            self.diagnostics
                .push(Diagnostic::info("injected memory dump op"));
        }

        Bytecode::new(self.source.name(), ops)
    }

    /// Artifacts produced so far.
    pub fn resources(&self) -> &CompilerResources<'src> {
        &self.resources
    }

    /// The generated program, when compilation succeeded.
    pub fn bytecode(&self) -> Option<&Bytecode> {
        self.resources.bytecode.as_ref()
    }

    /// Consume the compiler, keeping only the generated program.
    pub fn into_bytecode(self) -> Option<Bytecode> {
        self.resources.bytecode
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take ownership of the recorded diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}
