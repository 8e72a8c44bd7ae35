use super::*;
use crate::ast::Type;
use crate::lexer::Lexer;
use crate::parser::parse;
use crate::{scope, typechecker};

use std::io::Cursor;

fn checked(source: &str) -> Program {
    let (program, errors) = parse(Lexer::new(source));
    assert!(errors.is_empty(), "{:?}", errors);
    let (symbols, errors) = scope::build(&program);
    assert!(errors.is_empty(), "{:?}", errors);
    let errors = typechecker::check(&program, &symbols);
    assert!(errors.is_empty(), "{:?}", errors);
    program
}

fn run_with_input(source: &str, input: &str) -> (String, Result<(), RuntimeError>) {
    let program = checked(source);
    let mut output = Vec::new();
    let result = run(&program, Cursor::new(input), &mut output);
    (String::from_utf8(output).unwrap(), result)
}

fn run_str(source: &str) -> String {
    let (output, result) = run_with_input(source, "");
    assert!(result.is_ok(), "{:?}", result);
    output
}

#[test]
fn test_zero_values() {
    let program = checked("var i : int; var s : string; var b : bool;");
    let mut interpreter = Interpreter::new(Cursor::new(""), Vec::new());
    interpreter.run(&program).unwrap();

    assert_eq!(interpreter.variable("i"), Some(&Value::Int(0)));
    assert_eq!(interpreter.variable("s"), Some(&Value::Str(String::new())));
    assert_eq!(interpreter.variable("b"), Some(&Value::Bool(false)));
    assert_eq!(Value::zero(Type::Bool).ty(), Type::Bool);
}

#[test]
fn test_print_has_no_separator() {
    assert_eq!(run_str("print 1; print \"a\"; print 2 + 3;"), "1a5");
    assert_eq!(run_str("print \"line\\n\"; print \"tab\\t.\";"), "line\ntab\t.");
}

#[test]
fn test_print_booleans() {
    assert_eq!(run_str("var t : bool := (1 = 1);\nprint t; print !t;"), "truefalse");
}

#[test]
fn test_arithmetic() {
    assert_eq!(run_str("print 7 - 10;"), "-3");
    assert_eq!(run_str("print 6 * 7;"), "42");
    assert_eq!(run_str("print 7 / 2;"), "3");
    assert_eq!(run_str("print (0 - 7) / 2;"), "-3");
    assert_eq!(run_str("print \"foo\" + \"bar\";"), "foobar");
}

#[test]
fn test_comparisons() {
    assert_eq!(run_str("print 1 < 2; print 2 < 1; print 2 < 2;"), "truefalsefalse");
    assert_eq!(run_str("print \"abc\" < \"abd\";"), "true");
    assert_eq!(run_str("print (1 = 2) < (1 = 1);"), "true");
    assert_eq!(run_str("print \"x\" = \"x\"; print 3 = 4;"), "truefalse");
    assert_eq!(run_str("print (1 = 1) & (2 < 1);"), "false");
}

#[test]
fn test_assignment_overwrites() {
    assert_eq!(run_str("var x : int := 1;\nx := x + 1;\nprint x;"), "2");
}

#[test]
fn test_for_loop_is_half_open() {
    let source = "var i : int;\nfor i in 1..4 do\n  print i;\nend for;\nprint \",\"; print i;";
    assert_eq!(run_str(source), "123,3");
}

#[test]
fn test_for_loop_with_empty_range() {
    let source = "var i : int := 9;\nfor i in 5..5 do print \"x\"; end for;\nprint i;";
    assert_eq!(run_str(source), "9");
}

#[test]
fn test_for_loop_bounds_evaluated_once() {
    let source = "var n : int := 3; var i : int;\n\
                  for i in 0..n do\n\
                    n := n + 1;\n\
                    print i;\n\
                  end for;";
    assert_eq!(run_str(source), "012");
}

#[test]
fn test_factorial_reads_input() {
    let source = "var n : int; read n; var v : int := 1; var i : int;\n\
                  for i in 1..n do v := v * i; end for;\n\
                  print v;";
    let (output, result) = run_with_input(source, "5\n");
    assert!(result.is_ok());
    assert_eq!(output, "24");
}

#[test]
fn test_read_consumes_one_line_per_statement() {
    let source = "var a : int; var s : string; var b : int;\n\
                  read a; read s; read b;\n\
                  print a + b; print s;";
    let (output, result) = run_with_input(source, "  12 \r\nhello world\r\n30");
    assert!(result.is_ok(), "{:?}", result);
    assert_eq!(output, "42hello world");
}

#[test]
fn test_read_invalid_integer() {
    let (_, result) = run_with_input("var n : int;\nread n;", "five\n");
    match result {
        Err(RuntimeError::InvalidInput { input, position }) => {
            assert_eq!(input, "five");
            assert_eq!(position, Position::new(2, 1));
        }
        other => panic!("unexpected result {:?}", other),
    }
}

#[test]
fn test_read_past_end_of_input() {
    let (_, result) = run_with_input("var s : string;\nread s; read s;", "only\n");
    assert!(matches!(result, Err(RuntimeError::InputExhausted { .. })));
}

#[test]
fn test_assert_failure_stops_execution() {
    let (output, result) = run_with_input("print \"a\";\nassert (1 = 2);\nprint \"b\";", "");
    assert_eq!(output, "a");
    let err = result.unwrap_err();
    assert!(matches!(err, RuntimeError::AssertionFailed { .. }));
    assert_eq!(err.to_string(), "2:1: runtime error: assert failed");
}

#[test]
fn test_assert_success_is_silent() {
    assert_eq!(run_str("assert (1 < 2);\nprint \"ok\";"), "ok");
}

#[test]
fn test_division_by_zero() {
    let (_, result) = run_with_input("var z : int;\nprint 1 / z;", "");
    let err = result.unwrap_err();
    assert!(matches!(err, RuntimeError::DivisionByZero { .. }));
    assert_eq!(err.position(), Position::new(2, 7));
}

#[test]
fn test_overflow_is_reported() {
    let source = "var x : int := 9223372036854775807;\nx := x + 1;";
    let (_, result) = run_with_input(source, "");
    let err = result.unwrap_err();
    assert!(matches!(err, RuntimeError::Overflow { .. }));
    assert_eq!(err.message(), "integer overflow");
}

#[test]
fn test_failure_inside_loop_stops_loop() {
    let source = "var i : int;\nfor i in 0..10 do\n  print i;\n  assert (i < 2);\nend for;";
    let (output, result) = run_with_input(source, "");
    assert_eq!(output, "012");
    assert_eq!(result.unwrap_err().position(), Position::new(4, 3));
}

#[test]
#[should_panic(expected = "unsupported operands")]
fn test_unchecked_program_panics() {
    let (program, _) = parse(Lexer::new("print 1 - \"a\";"));
    let _ = run(&program, Cursor::new(""), Vec::new());
}
