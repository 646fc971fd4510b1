//! End-to-end scenarios: source text in, machine state out.

use marrow_vm::prelude::*;

/// Compile and run a source string against a fresh environment with a
/// collecting sink.
fn run(input: &str) -> (u8, Environment<Vec<Diagnostic>>) {
    let source = SourceFile::from_string(input);
    let mut environment = Environment::new(Vec::new(), false);
    let code = environment.run(&source);

    (code, environment)
}

fn warnings(environment: &Environment<Vec<Diagnostic>>) -> Vec<&Diagnostic> {
    environment
        .sink()
        .iter()
        .filter(|diagnostic| diagnostic.kind == LogKind::Warning)
        .collect()
}

fn errors(environment: &Environment<Vec<Diagnostic>>) -> Vec<&Diagnostic> {
    environment
        .sink()
        .iter()
        .filter(|diagnostic| diagnostic.kind == LogKind::Error)
        .collect()
}

#[test]
fn addition_lands_in_the_top_heap_slot() {
    let (code, environment) = run("1 + 2");

    assert_eq!(code, 0);
    // SSA addresses: a0 := 1, a1 := 2, a2 := a0 + a1
    assert_eq!(
        environment.machine().heap_slot(2),
        [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x03]
    );
    assert!(!environment
        .machine()
        .alu()
        .flags()
        .contains(UnitFlags::OVERFLOW));
    assert!(warnings(&environment).is_empty());
}

#[test]
fn precedence_multiplies_before_adding() {
    let (code, environment) = run("2 * 3 + 4");

    assert_eq!(code, 0);
    // a0 := 2, a1 := 3, a2 := a0 * a1, a3 := 4, a4 := a2 + a3
    assert_eq!(environment.machine().heap_slot(4), bytes::encode_integer(10));
}

#[test]
fn grouping_overrides_precedence() {
    let (code, environment) = run("2 * (3 + 4)");

    assert_eq!(code, 0);
    assert_eq!(environment.machine().heap_slot(4), bytes::encode_integer(14));
}

#[test]
fn dangling_operator_fails_compilation() {
    let (code, environment) = run("1 +");

    assert_eq!(code, 1);
    assert!(errors(&environment)
        .iter()
        .any(|diagnostic| diagnostic.message.contains("unexpected token")));
}

#[test]
fn unmatched_paren_fails_compilation() {
    let (code, environment) = run("(1 + 2");

    assert_eq!(code, 1);
    assert!(errors(&environment)
        .iter()
        .any(|diagnostic| diagnostic.message.contains("missing expected ')'")));
}

#[test]
fn block_literals_fill_the_first_slots() {
    let (code, environment) = run("in 1; 2; 3 end");

    assert_eq!(code, 0);
    let machine = environment.machine();
    assert_eq!(machine.heap_slot(0), bytes::encode_integer(1));
    assert_eq!(machine.heap_slot(1), bytes::encode_integer(2));
    assert_eq!(machine.heap_slot(2), bytes::encode_integer(3));
}

#[test]
fn division_by_zero_yields_zero_and_flags() {
    let (code, environment) = run("10 / 0");

    assert_eq!(code, 0);
    assert_eq!(environment.machine().heap_slot(2), [0; 8]);
    assert!(environment
        .machine()
        .alu()
        .flags()
        .contains(UnitFlags::DIV_BY_ZERO));
    assert!(warnings(&environment)
        .iter()
        .any(|diagnostic| diagnostic.message.contains("division by zero")));
}

#[test]
fn integer_overflow_wraps_to_zero_and_warns() {
    let (code, environment) = run("18446744073709551615 + 1");

    assert_eq!(code, 0);
    assert_eq!(environment.machine().heap_slot(2), [0; 8]);
    assert!(warnings(&environment)
        .iter()
        .any(|diagnostic| diagnostic.message.contains("overflow")));
}

#[test]
fn unary_minus_wraps_around() {
    let (code, environment) = run("-1");

    assert_eq!(code, 0);
    // 0 - 1 on 64-bit unsigned bit patterns
    assert_eq!(
        environment.machine().heap_slot(1),
        bytes::encode_integer(u128::from(u64::MAX))
    );
}

#[test]
fn module_wraps_but_still_computes() {
    let (code, environment) = run("mod 2 + 3");

    assert_eq!(code, 0);
    assert_eq!(environment.machine().heap_slot(2), bytes::encode_integer(5));
}

#[test]
fn float_literals_warn_and_store_binary64() {
    let (code, environment) = run("1.5");

    assert_eq!(code, 0);
    assert!(warnings(&environment)
        .iter()
        .any(|diagnostic| diagnostic.message.contains("float")));
    assert_eq!(
        environment.machine().heap_slot(0),
        bytes::encode_float(1.5)
    );
}

#[test]
fn compile_alone_does_not_execute() {
    let source = SourceFile::from_string("1 + 2");
    let mut environment = Environment::new(Vec::new(), false);

    assert_eq!(environment.compile(&source), 0);
    assert_eq!(environment.machine().heap_slot(2), [0; 8]);
}

#[test]
fn run_reports_the_compile_code_on_failure() {
    let source = SourceFile::from_string("in 1; 2");
    let mut environment = Environment::new(Vec::new(), false);

    assert_eq!(environment.run(&source), 1);
    assert!(errors(&environment)
        .iter()
        .any(|diagnostic| diagnostic.message.contains("missing expected 'end'")));
}
