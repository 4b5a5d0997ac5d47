// Integration tests for the interpreter

use minic::interpreter::{Interpreter, InterpreterConfig, RuntimeError};
use minic::memory::Value;
use minic::parser::{parse_source, tokenize, ParseError, Parser, TokenKind};
use minic::{run_source, Error};

#[test]
fn test_simple_arithmetic() {
    let source = r#"
        int main() {
            int x = 5;
            int y = 10;
            int z = x + y;
            return z;
        }
    "#;

    // Parse
    let mut parser = Parser::new(tokenize(source).expect("Tokenizing failed"));
    let program = parser.parse().expect("Parsing failed");

    // Execute
    let mut interpreter = Interpreter::new(&program);
    let result = interpreter.interpret();

    assert_eq!(result, Ok(Value::Int(15)));
}

#[test]
fn test_function_call() {
    let source = r#"
        int add(int a, int b) {
            return a + b;
        }

        int main() {
            int result = add(3, 4);
            return result;
        }
    "#;

    let run = run_source(source).expect("Execution failed");
    assert_eq!(run.value, Value::Int(7));
}

#[test]
fn test_call_to_function_defined_earlier() {
    let source = "int a() { return 42; }\nint main() { return a(); }";
    assert_eq!(run_source(source).unwrap().value, Value::Int(42));
}

#[test]
fn test_factorial_and_fibonacci() {
    let source = r#"
        int fac(int n) {
            if (n <= 1) {
                return 1;
            }
            return n * fac(n - 1);
        }

        int fib(int n) {
            int a = 0, b = 1;
            for (int i = 0; i < n; i = i + 1) {
                int next = a + b;
                a = b;
                b = next;
            }
            return a;
        }

        int main() {
            printf("fac(10) = {}\n", fac(10));
            printf("fib(20) = {}\n", fib(20));
            return fac(5) + fib(10);
        }
    "#;

    let run = run_source(source).expect("Execution failed");
    assert_eq!(run.output, "fac(10) = 3628800\nfib(20) = 6765\n");
    assert_eq!(run.value, Value::Int(120 + 55));
}

#[test]
fn test_nested_scopes() {
    let source = r#"
        int x = 100;

        int read_global() {
            return x;
        }

        int main() {
            int x = 1;
            {
                int x = 2;
                {
                    x = x + 1;
                    printf("{} ", x);
                }
                printf("{} ", x);
            }
            printf("{} {}", x, read_global());
            return x;
        }
    "#;

    let run = run_source(source).expect("Execution failed");
    assert_eq!(run.output, "3 3 1 100");
    assert_eq!(run.value, Value::Int(1));
}

#[test]
fn test_arity_overloads() {
    let source = r#"
        int area(int side) { return side * side; }
        int area(int width, int height) { return width * height; }

        int main() {
            return area(3) * 100 + area(2, 5);
        }
    "#;

    assert_eq!(run_source(source).unwrap().value, Value::Int(910));
}

#[test]
fn test_arity_mismatch() {
    let source = r#"
        int area(int width, int height) { return width * height; }
        int main() { return area(3); }
    "#;

    match run_source(source) {
        Err(Error::Runtime(RuntimeError::UndefinedFunction { name, arity, location })) => {
            assert_eq!(name, "area");
            assert_eq!(arity, 1);
            assert_eq!(location.line, 3);
        }
        other => panic!("Expected UndefinedFunction, got {:?}", other),
    }
}

#[test]
fn test_loop_control() {
    let source = r#"
        int main() {
            int total = 0;
            for (int i = 0; i < 10; i = i + 1) {
                if (i == 7) {
                    break;
                }
                if (i % 3 == 0) {
                    continue;
                }
                total = total + i;
            }
            printf("{} {}", i, total);
            return i;
        }
    "#;

    let run = run_source(source).unwrap();
    // 1 + 2 + 4 + 5
    assert_eq!(run.output, "7 12");
    assert_eq!(run.value, Value::Int(7));
}

#[test]
fn test_early_return_from_nested_loops() {
    let source = r#"
        int find(int target) {
            for (int i = 0; i < 10; i = i + 1) {
                int j = 0;
                while (j < 10) {
                    if (i * j == target) {
                        return i * 100 + j;
                    }
                    j = j + 1;
                }
            }
            return -1;
        }

        int main() {
            return find(12) + find(1000);
        }
    "#;

    // 2 * 6 is found first
    assert_eq!(run_source(source).unwrap().value, Value::Int(206 - 1));
}

#[test]
fn test_arrays() {
    let source = r#"
        int sum(int xs[], int n) {
            int total = 0;
            for (int i = 0; i < n; i = i + 1) {
                total = total + xs[i];
            }
            return total;
        }

        int main() {
            int squares[5];
            for (int i = 0; i < 5; i = i + 1) {
                squares[i] = i * i;
            }
            int primes[] = {2, 3, 5, 7};
            printf("{} {}\n", squares, primes);
            return sum(squares, 5) + sum(primes, 4);
        }
    "#;

    let run = run_source(source).unwrap();
    assert_eq!(run.output, "[0, 1, 4, 9, 16] [2, 3, 5, 7]\n");
    assert_eq!(run.value, Value::Int(30 + 17));
}

#[test]
fn test_printf_output_and_terminal_lines() {
    let source = "int main() {\n  printf(\"a\");\n  printf(\"b\\n\");\n  char c = 'z';\n  printf(\"{}{{}}\\n\", c);\n  return 0;\n}";
    let program = parse_source(source).unwrap();
    let mut interpreter = Interpreter::new(&program);
    interpreter.interpret().unwrap();

    let terminal = interpreter.terminal();
    assert_eq!(terminal.output(), "ab\nz{}\n");
    assert_eq!(terminal.lines().len(), 3);
    assert_eq!(terminal.lines()[2].location.line, 5);
    assert_eq!(terminal.output_lines(), vec!["ab", "z{}"]);
}

#[test]
fn test_printf_requires_an_argument() {
    assert!(matches!(
        run_source("int main() { printf(); return 0; }"),
        Err(Error::Runtime(RuntimeError::MissingIntrinsicArgument { .. }))
    ));
}

#[test]
fn test_unmatched_brace_aborts_parse() {
    match run_source("int main() { return 0; }}") {
        Err(Error::Parse(ParseError::UnexpectedToken { found, .. })) => {
            assert_eq!(found, TokenKind::RBrace)
        }
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[test]
fn test_lex_error() {
    match run_source("int main() {\n  return 1 && 2;\n}") {
        Err(Error::Lex(err)) => {
            assert_eq!(err.found, '&');
            assert_eq!(err.location.line, 2);
        }
        other => panic!("Expected lex error, got {:?}", other),
    }
}

#[test]
fn test_error_messages_carry_location() {
    let err = run_source("int main() {\n  int x;\n  return x;\n}").unwrap_err();
    assert_eq!(err.location().map(|l| l.line), Some(3));
    assert!(err.to_string().contains("'x'"), "{}", err);
}

#[test]
fn test_runtime_error_keeps_earlier_output() {
    let source = "int main() { printf(\"before\"); return 1 / 0; }";
    let program = parse_source(source).unwrap();
    let mut interpreter = Interpreter::new(&program);

    assert!(matches!(
        interpreter.interpret(),
        Err(RuntimeError::DivisionByZero { .. })
    ));
    assert_eq!(interpreter.terminal().output(), "before");
}

#[test]
fn test_deep_recursion_within_limit() {
    let source = r#"
        int count(int n) {
            if (n == 0) return 0;
            return 1 + count(n - 1);
        }
        int main() { return count(50); }
    "#;

    let program = parse_source(source).unwrap();
    let config = InterpreterConfig {
        max_call_depth: 64,
        ..InterpreterConfig::default()
    };
    assert_eq!(
        Interpreter::with_config(&program, config).interpret(),
        Ok(Value::Int(50))
    );

    let tight = InterpreterConfig {
        max_call_depth: 40,
        ..InterpreterConfig::default()
    };
    assert!(matches!(
        Interpreter::with_config(&program, tight).interpret(),
        Err(RuntimeError::StackOverflow { limit: 40, .. })
    ));
}

#[test]
fn test_flush_terminal() {
    let program = parse_source("int main() { printf(\"{}-{}\", 4, 2); return 0; }").unwrap();
    let mut interpreter = Interpreter::new(&program);
    interpreter.interpret().unwrap();

    let mut stdout = Vec::new();
    interpreter.terminal_mut().flush_to(&mut stdout).unwrap();
    assert_eq!(String::from_utf8(stdout).unwrap(), "4-2");
    assert!(interpreter.terminal().is_empty());
}

#[test]
fn test_runaway_recursion_reports_stack_overflow() {
    let source = r#"
        int count(int n) {
            if (n == 0) return 0;
            return 1 + count(n - 1);
        }
        int main() { return count(250); }
    "#;

    match run_source(source) {
        Err(Error::Runtime(RuntimeError::StackOverflow { name, limit, .. })) => {
            assert_eq!(name, "count");
            assert_eq!(limit, InterpreterConfig::default().max_call_depth);
        }
        other => panic!("Expected StackOverflow, got {:?}", other),
    }
}

#[test]
fn test_huge_array_is_a_runtime_error() {
    assert!(matches!(
        run_source("int main() { int xs[2147483647]; return 0; }"),
        Err(Error::Runtime(RuntimeError::ArrayTooLarge { .. }))
    ));
}
