// ABOUTME: Black-box end-to-end scenarios exercising the whole pipeline

use std::rc::Rc;

use wisplisp::builtins::register_builtins;
use wisplisp::env::Environment;
use wisplisp::error::LErrorKind;
use wisplisp::eval::eval_from_string;
use wisplisp::value::Value;

fn fresh_env() -> Rc<Environment> {
    let env = Environment::new();
    register_builtins(&env);
    env
}

fn run(env: &Rc<Environment>, src: &str) -> Value {
    let (value, error) = eval_from_string(env, src);
    assert!(error.is_none(), "expected success, got error: {value}");
    value
}

fn run_err(env: &Rc<Environment>, src: &str) -> LErrorKind {
    let (_, error) = eval_from_string(env, src);
    error.expect("expected an error").kind
}

#[test]
fn factorial_program_via_recursion_and_partial_defs() {
    let env = fresh_env();
    run(
        &env,
        "(def {fact} (lambda {n} {if (<= n 1) {1} {* n (fact (- n 1))}}))",
    );
    assert_eq!(run(&env, "(fact 5)"), Value::Int(120));
    assert_eq!(run(&env, "(fact 0)"), Value::Int(1));
}

#[test]
fn fun_sugar_defines_named_recursive_function() {
    let env = fresh_env();
    run(&env, "(fun {fib n} {if (< n 2) {n} {+ (fib (- n 1)) (fib (- n 2))}})");
    assert_eq!(run(&env, "(fib 10)"), Value::Int(55));
}

#[test]
fn closures_capture_their_defining_scope() {
    let env = fresh_env();
    run(&env, "(fun {make-adder n} {lambda {x} {+ n x}})");
    run(&env, "(def {add5} (make-adder 5))");
    assert_eq!(run(&env, "(add5 10)"), Value::Int(15));
    run(&env, "(def {add100} (make-adder 100))");
    assert_eq!(run(&env, "(add100 23)"), Value::Int(123));
}

#[test]
fn partial_application_via_under_saturation() {
    let env = fresh_env();
    run(&env, "(fun {add3 a b c} {+ a (+ b c)})");
    run(&env, "(def {add-to-5} (add3 5))");
    assert_eq!(run(&env, "(add-to-5 10 20)"), Value::Int(35));
}

#[test]
fn variadic_rest_param_collects_trailing_args_as_qexpr() {
    let env = fresh_env();
    run(&env, "(fun {first-and-rest first & rest} {join (list first) rest})");
    let result = run(&env, "(first-and-rest 1 2 3 4)");
    match result {
        Value::QExpr(items) => {
            assert_eq!(items, vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]);
        }
        other => panic!("expected QExpr, got {other}"),
    }
}

#[test]
fn list_operations_compose() {
    let env = fresh_env();
    assert_eq!(run(&env, "(head {1 2 3})"), Value::QExpr(vec![Value::Int(1)]));
    assert_eq!(run(&env, "(tail {1 2 3})"), Value::QExpr(vec![Value::Int(2), Value::Int(3)]));
    assert_eq!(run(&env, "(init {1 2 3})"), Value::QExpr(vec![Value::Int(1), Value::Int(2)]));
    assert_eq!(
        run(&env, "(cons 0 {1 2 3})"),
        Value::QExpr(vec![Value::Int(0), Value::Int(1), Value::Int(2), Value::Int(3)])
    );
    assert_eq!(
        run(&env, "(join {1 2} {3 4})"),
        Value::QExpr(vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)])
    );
}

#[test]
fn eval_builtin_runs_a_qexpr_as_code() {
    let env = fresh_env();
    assert_eq!(run(&env, "(eval {+ 1 2})"), Value::Int(3));
}

#[test]
fn len_counts_qexpr_elements() {
    let env = fresh_env();
    assert_eq!(run(&env, "(len {1 2 3 4 5})"), Value::Int(5));
}

#[test]
fn dollar_sugar_parses_the_same_as_nested_parens() {
    let env = fresh_env();
    let dollar = run(&env, "eval $ head {+ -}");
    let nested = run(&env, "(eval (head {+ -}))");
    assert_eq!(dollar, nested);
    assert!(matches!(dollar, Value::Function(_)));
}

#[test]
fn loop_accumulates_state_through_def_mutation() {
    let env = fresh_env();
    run(&env, "(def {acc} 0)");
    run(&env, "(def {n} 5)");
    run(&env, "(loop {> n 0} {def {acc n} (+ acc n) (- n 1)})");
    assert_eq!(run(&env, "acc"), Value::Int(15));
    assert_eq!(run(&env, "n"), Value::Int(0));
}

#[test]
fn arithmetic_promotes_on_overflow_to_bigint() {
    let env = fresh_env();
    let result = run(&env, "(* 9223372036854775807 2)");
    assert!(matches!(result, Value::BigInt(_)));
}

#[test]
fn division_by_zero_is_div_zero_error() {
    let env = fresh_env();
    assert_eq!(run_err(&env, "(/ 1 0)"), LErrorKind::DivZero);
}

#[test]
fn calling_a_non_function_value_is_an_eval_error() {
    let env = fresh_env();
    run(&env, "(def {x} 42)");
    assert_eq!(run_err(&env, "(x 1 2)"), LErrorKind::Eval);
}

#[test]
fn unbound_symbol_is_bad_symbol_error() {
    let env = fresh_env();
    assert_eq!(run_err(&env, "undefined-name"), LErrorKind::BadSymbol);
}

#[test]
fn too_many_arguments_is_rejected_by_the_max_argc_guard() {
    let env = fresh_env();
    run(&env, "(fun {one-arg x} {x})");
    assert_eq!(run_err(&env, "(one-arg 1 2)"), LErrorKind::TooManyArgs);
}

#[test]
fn head_of_empty_list_is_rejected() {
    let env = fresh_env();
    assert_eq!(run_err(&env, "(head {})"), LErrorKind::BadOperand);
}

#[test]
fn comparison_and_logic_builtins_compose() {
    let env = fresh_env();
    assert_eq!(run(&env, "(== 1 1)"), Value::Int(1));
    assert_eq!(run(&env, "(!= 1 2)"), Value::Int(1));
    assert_eq!(run(&env, "(&& 1 1 1)"), Value::Int(1));
    assert_eq!(run(&env, "(|| 0 0 1)"), Value::Int(1));
    assert_eq!(run(&env, "(not 0)"), Value::Int(1));
}

#[test]
fn quoted_expressions_are_inert_until_evaluated() {
    let env = fresh_env();
    let result = run(&env, "{+ 1 1}");
    assert!(matches!(result, Value::QExpr(_)));
}

#[test]
fn def_always_binds_at_the_global_scope() {
    let env = fresh_env();
    run(&env, "(fun {set-global x} {def {g} x})");
    run(&env, "(set-global 99)");
    assert_eq!(run(&env, "g"), Value::Int(99));
}

#[test]
fn read_parses_a_string_into_an_unevaluated_qexpr() {
    let env = fresh_env();
    let result = run(&env, "(read \"+ 1 2\")");
    match result {
        Value::QExpr(items) => {
            assert_eq!(items.len(), 1);
            assert!(matches!(&items[0], Value::SExpr(_)));
        }
        other => panic!("expected QExpr, got {other}"),
    }
}

#[test]
fn consecutive_top_level_forms_each_evaluate_in_sequence() {
    let env = fresh_env();
    let (value, error) = eval_from_string(&env, "(def {x} 1) (def {y} 2) (+ x y)");
    assert!(error.is_none());
    assert_eq!(value, Value::Int(3));
}

#[test]
fn a_top_level_unclosed_paren_is_a_parser_error() {
    let env = fresh_env();
    assert_eq!(run_err(&env, "(+ 1 2"), LErrorKind::ParserMissingCPar);
}

#[test]
fn unparseable_operand_and_noncallable_head_surface_as_eval_errors() {
    let env = fresh_env();
    assert_eq!(run_err(&env, "1 + 1"), LErrorKind::Eval);
    assert_eq!(run_err(&env, "- ("), LErrorKind::Eval);
}

#[test]
fn map_doubles_every_element_of_a_qexpr() {
    let env = fresh_env();
    let value = run(&env, "map (\\ {x} {* 2 x}) {1 2 3 4}");
    assert_eq!(
        value,
        Value::QExpr(vec![Value::Int(2), Value::Int(4), Value::Int(6), Value::Int(8)])
    );
}
