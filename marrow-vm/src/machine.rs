//! Sequential macro-op execution.

use std::fmt::Write as _;
use std::time::Instant;

use itertools::Itertools;
use marrow_asm::{BinaryArithFunc, Immediate, MacroOp, UnaryArithFunc};
use marrow_compiler::Bytecode;
use marrow_types::diagnostic::Diagnostic;
use marrow_types::{ImmediateType, MemoryAddress, RawValue, RegisterId, REGISTER_COUNT};

use crate::access::RegisterAccess;
use crate::alu::{Alu, AluOp, UnitFlags};
use crate::consts::{HEAP_SIZE, REGISTER_FILE_SIZE, REGISTER_SIZE, SECTION_COUNT, SECTION_SIZE, STACK_SIZE};

/// The virtual machine.
///
/// Owns a 16 register file of 8-byte registers, a 64 KiB byte-addressed
/// heap, a 64 KiB stack memory for `Push`/`Pop`, the ALU, a register
/// access log and the diagnostics produced while executing. All state is
/// zeroed at the start of every [`Machine::execute`] call and lives for
/// its duration.
#[derive(Debug)]
pub struct Machine {
    register_file: [u8; REGISTER_FILE_SIZE],
    heap: Vec<u8>,
    stack: Vec<u8>,
    /// Top of the downward-growing stack.
    frame_address: usize,
    /// Index of the op being executed.
    instruction_count: usize,
    alu: Alu,
    access_log: Vec<RegisterAccess>,
    diagnostics: Vec<Diagnostic>,
}

impl Default for Machine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine {
    /// Create a machine with zeroed state.
    pub fn new() -> Self {
        Self {
            register_file: [0; REGISTER_FILE_SIZE],
            heap: vec![0; HEAP_SIZE],
            stack: vec![0; STACK_SIZE],
            frame_address: STACK_SIZE,
            instruction_count: 0,
            alu: Alu::new(),
            access_log: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Execute a program from its entry point.
    ///
    /// Registers, heap, stack and the access log start zeroed. Under
    /// `debug`, the elapsed time and the access log are recorded as debug
    /// diagnostics afterwards.
    pub fn execute(&mut self, bytecode: &Bytecode, debug: bool) {
        let started = Instant::now();

        self.reset();
        self.jump_relative(bytecode.entry_point);
        tracing::debug!(ops = bytecode.len(), file = %bytecode.file_name, "executing");

        while self.instruction_count < bytecode.ops.len() {
            let op = bytecode.ops[self.instruction_count];
            self.dispatch(op);

            self.instruction_count += 1;
        }

        if debug {
            self.diagnostics.push(Diagnostic::debug(format!(
                "execution time: {:.4}s",
                started.elapsed().as_secs_f64()
            )));
            self.diagnostics
                .push(Diagnostic::debug(self.render_access_log()));
        }
    }

    fn reset(&mut self) {
        self.register_file = [0; REGISTER_FILE_SIZE];
        self.heap.fill(0);
        self.stack.fill(0);
        self.frame_address = STACK_SIZE;
        self.instruction_count = 0;
        self.access_log.clear();
    }

    fn jump(&mut self, address: usize) {
        self.instruction_count = address;
    }

    fn jump_relative(&mut self, offset: usize) {
        self.jump(self.instruction_count + offset);
    }

    fn dispatch(&mut self, op: MacroOp) {
        match op {
            MacroOp::Load {
                destination,
                source,
            } => self.visit_load(destination, source),
            MacroOp::Store {
                destination,
                source,
            } => self.visit_store(destination, source),
            MacroOp::StoreImmediate {
                destination,
                immediate,
                ..
            } => self.visit_store_immediate(destination, immediate),
            MacroOp::Push { ty, source } => self.visit_push(ty, source),
            MacroOp::Pop { ty, destination } => self.visit_pop(ty, destination),
            MacroOp::BinaryArith {
                func,
                destination,
                left,
                right,
                ..
            } => self.visit_binary_arith(func, destination, left, right),
            MacroOp::UnaryArith {
                func,
                destination,
                source,
                ..
            } => self.visit_unary_arith(func, destination, source),
            MacroOp::DumpMemory { section_id } => self.visit_dump_memory(section_id),
        }
    }

    // register file

    fn register_offset(register: RegisterId) -> usize {
        assert!(
            register < REGISTER_COUNT,
            "register {register:#x} out of range"
        );

        register * REGISTER_SIZE
    }

    fn register_raw(&mut self, register: RegisterId) -> RawValue {
        self.access_log.push(RegisterAccess::Read(register));
        let offset = Self::register_offset(register);

        self.register_file[offset..offset + REGISTER_SIZE]
            .try_into()
            .expect("register slice is word sized")
    }

    fn set_register_raw(&mut self, register: RegisterId, value: RawValue) {
        self.access_log.push(RegisterAccess::Write(register, value));
        let offset = Self::register_offset(register);

        self.register_file[offset..offset + REGISTER_SIZE].copy_from_slice(&value);
    }

    // heap

    fn heap_offset(address: MemoryAddress) -> usize {
        let offset = address * REGISTER_SIZE;
        assert!(
            offset + REGISTER_SIZE <= HEAP_SIZE,
            "heap address {address:#x} out of range"
        );

        offset
    }

    /// Raw contents of the heap slot at `address`, without logging.
    pub fn heap_slot(&self, address: MemoryAddress) -> RawValue {
        let offset = Self::heap_offset(address);

        self.heap[offset..offset + REGISTER_SIZE]
            .try_into()
            .expect("heap slot is word sized")
    }

    fn set_heap_slot(&mut self, address: MemoryAddress, value: RawValue) {
        let offset = Self::heap_offset(address);

        self.heap[offset..offset + REGISTER_SIZE].copy_from_slice(&value);
    }

    // stack

    fn push(&mut self, value: RawValue, size: usize) {
        assert!(size <= self.frame_address, "stack memory exhausted");

        self.frame_address -= size;
        self.stack[self.frame_address..self.frame_address + size]
            .copy_from_slice(&value[value.len() - size..]);
    }

    fn pop(&mut self, size: usize) -> RawValue {
        assert!(
            self.frame_address + size <= STACK_SIZE,
            "pop from an empty stack"
        );

        let mut value = [0; REGISTER_SIZE];
        value[REGISTER_SIZE - size..]
            .copy_from_slice(&self.stack[self.frame_address..self.frame_address + size]);
        self.frame_address += size;

        value
    }

    // op visitors

    fn visit_load(&mut self, destination: RegisterId, source: MemoryAddress) {
        let value = self.heap_slot(source);
        self.set_register_raw(destination, value);
    }

    fn visit_store(&mut self, destination: MemoryAddress, source: RegisterId) {
        let value = self.register_raw(source);
        self.set_heap_slot(destination, value);
    }

    fn visit_store_immediate(&mut self, destination: MemoryAddress, immediate: Immediate) {
        self.set_heap_slot(destination, immediate.to_bytes());
    }

    fn visit_push(&mut self, ty: ImmediateType, source: Immediate) {
        self.push(source.to_bytes(), ty.size());
    }

    fn visit_pop(&mut self, ty: ImmediateType, destination: RegisterId) {
        let value = self.pop(ty.size());
        self.set_register_raw(destination, value);
    }

    fn visit_binary_arith(
        &mut self,
        func: BinaryArithFunc,
        destination: RegisterId,
        left: RegisterId,
        right: RegisterId,
    ) {
        let left = self.register_raw(left);
        let right = self.register_raw(right);

        let result = self.alu.execute(AluOp::from_binary(func, left, right));
        self.record_flag_warnings();

        self.set_register_raw(destination, result);
    }

    fn visit_unary_arith(
        &mut self,
        func: UnaryArithFunc,
        destination: RegisterId,
        source: RegisterId,
    ) {
        let right = self.register_raw(source);

        let result = self.alu.execute(AluOp::from_unary(func, right));
        self.record_flag_warnings();

        self.set_register_raw(destination, result);
    }

    fn visit_dump_memory(&mut self, section_id: usize) {
        let message = self.render_memory_dump(section_id);
        self.diagnostics.push(Diagnostic::debug(message));
    }

    fn record_flag_warnings(&mut self) {
        let flags = self.alu.flags();

        if flags.contains(UnitFlags::OVERFLOW) {
            self.diagnostics.push(Diagnostic::warning("overflow detected"));
        }
        if flags.contains(UnitFlags::DIV_BY_ZERO) {
            self.diagnostics
                .push(Diagnostic::warning("division by zero; the result is zero"));
        }
    }

    // rendering

    fn render_memory_dump(&self, section_id: usize) -> String {
        assert!(section_id < SECTION_COUNT, "section {section_id:#x} out of range");

        let start = section_id * SECTION_SIZE;
        let section = &self.heap[start..start + SECTION_SIZE];

        let mut out = format!("memory dump (section {section_id:#04x})");
        for row in section.chunks(16) {
            out.push('\n');
            out.push_str(&row.iter().map(|byte| render_byte(*byte)).join(" "));
        }

        out
    }

    fn render_access_log(&self) -> String {
        let mut out = String::from("register access log");

        for access in &self.access_log {
            match access {
                RegisterAccess::Read(register) => {
                    let _ = write!(out, "\n- read from register {register:#x}");
                }
                RegisterAccess::Write(register, _) => {
                    let _ = write!(out, "\n- write to register {register:#x}");
                }
            }
        }

        out
    }

    // inspection

    /// Raw contents of a register, without logging an access.
    pub fn peek_register(&self, register: RegisterId) -> RawValue {
        let offset = Self::register_offset(register);

        self.register_file[offset..offset + REGISTER_SIZE]
            .try_into()
            .expect("register slice is word sized")
    }

    /// The ALU, for flag inspection.
    pub const fn alu(&self) -> &Alu {
        &self.alu
    }

    /// The access log of the last execution.
    pub fn access_log(&self) -> &[RegisterAccess] {
        &self.access_log
    }

    /// Diagnostics recorded during execution.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Take ownership of the recorded diagnostics.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }
}

/// Zero bytes are dimmed so populated slots stand out in a dump.
fn render_byte(byte: u8) -> String {
    if byte == 0 {
        format!("\x1b[2m{byte:02x}\x1b[22m")
    } else {
        format!("{byte:02x}")
    }
}
