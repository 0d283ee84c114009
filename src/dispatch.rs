// ABOUTME: The unified dispatch core: partial application, guards, and invocation

use std::rc::Rc;

use crate::env::Environment;
use crate::error::{LError, LErrorKind};
use crate::eval::eval_value;
use crate::guard::{check_min_argc, universal_guards, Selector};
use crate::value::{BuiltinCallback, FuncBody, LFunction, Value};

/// Applies `func` to `new_args` (already evaluated): clones the function,
/// extends its partial-application buffer, runs guards, and either returns a
/// further-partially-applied function or invokes the call.
pub fn apply(env: &Rc<Environment>, func: &Rc<LFunction>, new_args: Vec<Value>) -> Value {
    let mut f = (**func).clone();
    f.args.extend(new_args);

    let whole = Value::SExpr(f.args.clone());
    for guard in universal_guards() {
        if let Err(e) = run_guard(&guard.selector, &guard.check, &f, &whole) {
            return Value::Error(wrap_guard_error(e, &f, &guard.selector, None));
        }
    }
    for guard in &f.guards {
        if let Err(e) = run_guard(&guard.selector, &guard.check, &f, &whole) {
            return Value::Error(wrap_guard_error(e, &f, &guard.selector, find_offender(&guard.selector)));
        }
    }

    if (f.args.len() as i64) < f.min_argc {
        return Value::Function(Rc::new(f));
    }
    if let Err(e) = check_min_argc(&f) {
        return Value::Error(e.propagate(format!("`{}`", f.name())));
    }

    invoke(env, f)
}

fn run_guard(
    selector: &Selector,
    check: &Rc<dyn Fn(&LFunction, &Value) -> Result<(), LError>>,
    f: &LFunction,
    whole: &Value,
) -> Result<(), LError> {
    match selector {
        Selector::All => check(f, whole),
        Selector::Each => {
            for arg in &f.args {
                check(f, arg)?;
            }
            Ok(())
        }
        Selector::Arg(k) => match f.args.get(k - 1) {
            Some(arg) => check(f, arg),
            None => Ok(()),
        },
    }
}

fn find_offender(selector: &Selector) -> Option<usize> {
    match selector {
        Selector::Arg(k) => Some(*k),
        _ => None,
    }
}

fn wrap_guard_error(e: LError, f: &LFunction, selector: &Selector, explicit_index: Option<usize>) -> LError {
    let context = match (selector, explicit_index) {
        (Selector::Arg(k), _) => format!("argument {k} of `{}`", f.name()),
        (_, Some(k)) => format!("argument {k} of `{}`", f.name()),
        _ => format!("`{}`", f.name()),
    };
    e.propagate(context)
}

fn invoke(env: &Rc<Environment>, f: LFunction) -> Value {
    match &f.body {
        FuncBody::Builtin {
            accumulator,
            init_neutral,
            func,
        } => invoke_builtin(env, &f, *accumulator, init_neutral.as_deref(), *func),
        FuncBody::UserDefined { .. } => invoke_user_defined(&f),
    }
}

fn invoke_builtin(
    env: &Rc<Environment>,
    f: &LFunction,
    accumulator: bool,
    init_neutral: Option<&Value>,
    func: BuiltinCallback,
) -> Value {
    match func {
        BuiltinCallback::Function(callback) => match callback(env, &f.args) {
            Ok(v) => v,
            Err(e) => Value::Error(e.propagate(format!("`{}`", f.name()))),
        },
        BuiltinCallback::Accumulator(callback) => {
            if accumulator {
                fold_accumulator(env, f, init_neutral, callback)
            } else {
                Value::Error(LError::with_message(
                    LErrorKind::Eval,
                    format!("`{}` is not a folding builtin", f.name()),
                ))
            }
        }
    }
}

/// With 2+ arguments the first one seeds the accumulator and folding starts
/// from the second, regardless of `init_neutral` — this is what keeps `- 10
/// 3` at `7` rather than `0 - 10 - 3`. With exactly one argument and a
/// marked `init_neutral`, that argument folds against the neutral instead
/// (so `- 5` is `0 - 5`, `+ 1` is `0 + 1`); with one argument and no
/// neutral (`min`, `max`), it passes through unchanged.
fn fold_accumulator(
    env: &Rc<Environment>,
    f: &LFunction,
    init_neutral: Option<&Value>,
    callback: fn(&Rc<Environment>, &Value, &mut Value) -> Result<(), LError>,
) -> Value {
    let mut iter = f.args.iter();
    let mut acc = if f.args.len() == 1 && init_neutral.is_some() {
        init_neutral.unwrap().clone()
    } else {
        match iter.next() {
            Some(first) => first.clone(),
            None => {
                return Value::Error(LError::new(LErrorKind::TooFewArgs));
            }
        }
    };
    for arg in iter {
        if let Err(e) = callback(env, arg, &mut acc) {
            return Value::Error(e.propagate(format!("`{}`", f.name())));
        }
    }
    acc
}

fn invoke_user_defined(f: &LFunction) -> Value {
    let FuncBody::UserDefined {
        formals,
        has_rest,
        body,
        scope,
    } = &f.body
    else {
        unreachable!("invoke_user_defined called on a builtin");
    };

    let call_scope = Environment::with_parent(scope.clone());
    let rest_name = if *has_rest {
        formals.last().cloned()
    } else {
        None
    };
    let positional = if *has_rest { &formals[..formals.len() - 1] } else { &formals[..] };

    for (name, value) in positional.iter().zip(f.args.iter()) {
        call_scope.define(name.clone(), value.clone());
    }
    if let Some(rest) = rest_name {
        let rest_values = if f.args.len() > positional.len() {
            f.args[positional.len()..].to_vec()
        } else {
            Vec::new()
        };
        call_scope.define(rest, Value::QExpr(rest_values));
    }

    eval_value(&call_scope, (**body).clone())
}
