//! Compile-and-run facade tying the compiler to the machine.

use marrow_compiler::{Bytecode, Compiler, SourceFile};
use marrow_types::diagnostic::{Diagnostic, DiagnosticSink};

use crate::machine::Machine;

/// Owns the machine and the run configuration.
///
/// Compiles sources, executes them on success and forwards every
/// diagnostic record to the sink chosen by the embedding application.
/// Verbosity gating is the sink's responsibility; error and warning
/// records must always be surfaced.
#[derive(Debug)]
pub struct Environment<S: DiagnosticSink> {
    machine: Machine,
    sink: S,
    debug: bool,
}

impl<S: DiagnosticSink> Environment<S> {
    /// Create an environment delivering diagnostics to `sink`.
    pub fn new(sink: S, debug: bool) -> Self {
        let mut environment = Self {
            machine: Machine::new(),
            sink,
            debug,
        };
        environment
            .sink
            .emit(Diagnostic::success("marrow environment initialized"));

        environment
    }

    /// Compile a source without running it.
    ///
    /// Returns 0 on success and 1 when the sanity check failed.
    pub fn compile(&mut self, source: &SourceFile) -> u8 {
        self.compile_source(source).0
    }

    /// Compile and, on success, execute.
    ///
    /// Returns the compile code when nonzero, otherwise 0 after execution.
    pub fn run(&mut self, source: &SourceFile) -> u8 {
        let (code, bytecode) = self.compile_source(source);
        if code != 0 {
            return code;
        }

        let bytecode = bytecode.expect("successful compilation produces bytecode");
        self.machine.execute(&bytecode, self.debug);
        for diagnostic in self.machine.take_diagnostics() {
            self.sink.emit(diagnostic);
        }
        self.sink.emit(Diagnostic::info("execution finished"));

        0
    }

    fn compile_source(&mut self, source: &SourceFile) -> (u8, Option<Bytecode>) {
        let mut compiler = Compiler::new(source, self.debug);
        let code = compiler.compile();

        for diagnostic in compiler.take_diagnostics() {
            self.sink.emit(diagnostic);
        }

        (code, compiler.into_bytecode())
    }

    /// The underlying machine, for state inspection.
    pub const fn machine(&self) -> &Machine {
        &self.machine
    }

    /// The diagnostic sink.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Consume the environment, returning the sink.
    pub fn into_sink(self) -> S {
        self.sink
    }
}
