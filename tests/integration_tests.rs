//! Integration tests for the whole pipeline.
//!
//! These tests run complete programs through tokenization, parsing,
//! analysis and evaluation, capturing `print` output in memory.

use std::rc::Rc;

use scriptlang::{
    analyze,
    ast::ast::Source,
    errors::errors::{Error, Phase},
    parse, tokenize, Interpreter, Value,
};

fn compile(source: &str) -> Result<Source, Error> {
    let file = "test.plc".to_string();
    let tokens = tokenize(source, Some(file.clone()))?;
    let mut ast = parse(tokens, Rc::new(file))?;
    analyze(&mut ast)?;
    Ok(ast)
}

fn execute(source: &str) -> Result<(Value, String), Error> {
    let ast = compile(source)?;

    let mut interpreter = Interpreter::with_output(Vec::new());
    let value = interpreter.evaluate_source(&ast)?;
    let output = String::from_utf8(interpreter.into_output()).unwrap();

    Ok((value, output))
}

#[test]
fn test_hello_world() {
    let (value, output) = execute("FUN main(): Integer DO print(\"Hello, World!\"); RETURN 0; END").unwrap();

    assert_eq!(value, Value::Integer(0));
    assert_eq!(output, "Hello, World!\n");
}

#[test]
fn test_while_sum() {
    let (value, output) = execute(
        "VAR i: Integer = 1; VAR sum: Integer = 0; FUN main(): Integer DO WHILE i < 50 DO sum = sum + i; i = i + 1; END print(sum); RETURN 0; END",
    )
    .unwrap();

    assert_eq!(value, Value::Integer(0));
    assert_eq!(output, "1225\n");
}

#[test]
fn test_multiline_program() {
    let (value, output) = execute(
        r#"
LIST primes: Integer = [2, 3, 5, 7, 11];
VAL greeting: String = "Primes:";

FUN show(value: Integer) DO
    print("total = " + value);
END

FUN total(): Integer DO
    LET i = 0;
    LET acc: Integer = 0;
    WHILE i < 5 DO
        acc = acc + primes[i];
        i = i + 1;
    END
    RETURN acc;
END

FUN main(): Integer DO
    print(greeting);
    print(primes);
    show(total());
    RETURN total() - 21;
END
"#,
    )
    .unwrap();

    assert_eq!(value, Value::Integer(7));
    assert_eq!(output, "Primes:\n[2, 3, 5, 7, 11]\ntotal = 28\n");
}

#[test]
fn test_short_circuit_skips_side_effects() {
    let (_, output) = execute(
        "VAR calls: Integer = 0;
         FUN touch(): Boolean DO calls = calls + 1; RETURN TRUE; END
         FUN main(): Integer DO
             IF FALSE && touch() DO print(\"unreachable\"); END
             IF TRUE || touch() DO print(calls); END
             RETURN calls;
         END",
    )
    .unwrap();

    assert_eq!(output, "0\n");
}

#[test]
fn test_switch_on_character() {
    let (_, output) = execute(
        "FUN answer(c: Character): String DO
             SWITCH c
                 CASE 'y': RETURN \"yes\";
                 CASE 'n': RETURN \"no\";
                 DEFAULT RETURN \"unknown\";
             END
         END
         FUN main(): Integer DO
             print(answer('y'));
             print(answer('n'));
             print(answer('x'));
             RETURN 0;
         END",
    )
    .unwrap();

    assert_eq!(output, "yes\nno\nunknown\n");
}

#[test]
fn test_list_copy_on_write() {
    let (_, output) = execute(
        "LIST l: Integer = [1, 2, 3];
         LIST m: Integer = [1, 2, 3];
         FUN fresh(): Integer DO print(m); RETURN 0; END
         FUN main(): Integer DO
             l[0] = 9;
             fresh();
             print(l);
             RETURN 0;
         END",
    )
    .unwrap();

    assert_eq!(output, "[1, 2, 3]\n[9, 2, 3]\n");
}

#[test]
fn test_decimal_results() {
    let (value, output) = execute(
        "FUN main(): Integer DO
             print(7 / 2);
             print(10.00 / 4.0);
             print(0.1 + 0.2);
             RETURN 2 ^ 3;
         END",
    )
    .unwrap();

    assert_eq!(value, Value::Integer(8));
    assert_eq!(output, "4\n2.50\n0.3\n");
}

#[test]
fn test_reanalysis_keeps_annotations() {
    let program = "VAR n: Integer = 3; FUN main(): Integer DO LET twice = n * 2; print(twice); RETURN twice; END";

    let mut ast = compile(program).unwrap();
    let before = format!("{:?}", ast);
    analyze(&mut ast).unwrap();

    assert_eq!(format!("{:?}", ast), before);
}

#[test]
fn test_errors_by_phase() {
    let phase = |source: &str| execute(source).unwrap_err().get_phase();

    assert_eq!(phase("FUN main(): Integer DO print(\"open); RETURN 0; END"), Phase::Lex);
    assert_eq!(phase("FUN main(): Integer DO RETURN 0 END"), Phase::Parse);
    assert_eq!(phase("FUN main(): Integer DO RETURN missing; END"), Phase::Semantic);
    assert_eq!(phase("FUN main(): Integer DO print(1 / 0); RETURN 0; END"), Phase::Runtime);
}

#[test]
fn test_run_uses_stdout() {
    let value = scriptlang::run("FUN main(): Integer DO RETURN 40 + 2; END", None).unwrap();

    assert_eq!(value, Value::Integer(42));
}
