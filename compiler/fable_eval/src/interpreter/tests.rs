use super::*;
use crate::eval_mode::EvalMode;
use fable_ir::{
    AssignOp, BinaryOp, Expr, FunctionDecl, ObjectTypeDecl, Stmt, UnaryOp, VariableType,
};
use fable_value::{ErrorCategory, EvalErrorKind};
use pretty_assertions::assert_eq;

fn interpreter() -> Interpreter {
    Interpreter::builder().mode(EvalMode::TestRun).build()
}

fn run(stmts: Vec<Stmt>) -> EvalResult {
    interpreter().run_program(&Program::new("test", stmts))
}

fn run_ok(stmts: Vec<Stmt>) -> Value {
    run(stmts).unwrap_or_else(|e| panic!("{e}"))
}

fn run_err(stmts: Vec<Stmt>) -> fable_value::EvalError {
    match run(stmts) {
        Ok(value) => panic!("expected an error, got {value}"),
        Err(err) => err,
    }
}

fn lt(name: &str, n: i32) -> Expr {
    Expr::binary(Expr::var(name), BinaryOp::Lt, Expr::int32(n))
}

fn eq(name: &str, n: i32) -> Expr {
    Expr::binary(Expr::var(name), BinaryOp::Eq, Expr::int32(n))
}

#[test]
fn falling_off_the_end_yields_null() {
    assert_eq!(run_ok(vec![]), Value::Null);
    assert_eq!(run_ok(vec![Stmt::declare("x", VariableType::Int32, None)]), Value::Null);
}

#[test]
fn declarations_use_type_defaults() {
    let value = run_ok(vec![
        Stmt::declare("f", VariableType::Float, None),
        Stmt::ret(Expr::var("f")),
    ]);
    assert_eq!(value, Value::float(0.0));
}

#[test]
fn object_declaration_requires_initializer() {
    let err = run_err(vec![Stmt::declare("hero", VariableType::Object, None)]);
    assert_eq!(err.category(), ErrorCategory::Definition);
}

#[test]
fn compound_assignment_and_increment() {
    let value = run_ok(vec![
        Stmt::declare("n", VariableType::Int32, Some(Expr::int32(10))),
        Stmt::compound_assign("n", AssignOp::MulAssign, Expr::int32(3)),
        Stmt::increment("n"),
        Stmt::decrement("n"),
        Stmt::decrement("n"),
        Stmt::ret(Expr::var("n")),
    ]);
    assert_eq!(value, Value::int32(29));
}

#[test]
fn compound_assignment_on_undeclared_variable_fails() {
    let err = run_err(vec![Stmt::compound_assign(
        "ghost",
        AssignOp::AddAssign,
        Expr::int32(1),
    )]);
    assert!(matches!(err.kind, EvalErrorKind::UndefinedVariable { .. }));
}

#[test]
fn plain_assignment_declares_when_unbound() {
    let value = run_ok(vec![
        Stmt::assign("fresh", Expr::string("hi")),
        Stmt::ret(Expr::var("fresh")),
    ]);
    assert_eq!(value, Value::string("hi"));
}

#[test]
fn assignment_in_block_updates_outer_binding() {
    let value = run_ok(vec![
        Stmt::declare("gold", VariableType::Int32, Some(Expr::int32(1))),
        Stmt::if_then(Expr::Bool(true), vec![Stmt::assign("gold", Expr::int32(5))]),
        Stmt::ret(Expr::var("gold")),
    ]);
    assert_eq!(value, Value::int32(5));
}

#[test]
fn block_declarations_do_not_leak() {
    let err = run_err(vec![
        Stmt::if_then(
            Expr::Bool(true),
            vec![Stmt::declare("inner", VariableType::Int32, None)],
        ),
        Stmt::ret(Expr::var("inner")),
    ]);
    assert!(matches!(err.kind, EvalErrorKind::UndefinedVariable { .. }));
}

#[test]
fn conditional_runs_first_truthy_branch_only() {
    let value = run_ok(vec![
        Stmt::declare("picked", VariableType::Int32, None),
        Stmt::Conditional(vec![
            fable_ir::ConditionalBranch {
                condition: Expr::int32(0),
                body: vec![Stmt::assign("picked", Expr::int32(1))],
            },
            fable_ir::ConditionalBranch {
                condition: Expr::string("yes"),
                body: vec![Stmt::assign("picked", Expr::int32(2))],
            },
            fable_ir::ConditionalBranch {
                condition: Expr::Bool(true),
                body: vec![Stmt::assign("picked", Expr::int32(3))],
            },
        ]),
        Stmt::ret(Expr::var("picked")),
    ]);
    assert_eq!(value, Value::int32(2));
}

#[test]
fn return_inside_loop_ends_the_program() {
    let value = run_ok(vec![
        Stmt::declare("i", VariableType::Int32, None),
        Stmt::while_loop(
            Expr::Bool(true),
            vec![
                Stmt::increment("i"),
                Stmt::if_then(eq("i", 4), vec![Stmt::ret(Expr::var("i"))]),
            ],
        ),
        Stmt::ret(Expr::int32(-1)),
    ]);
    assert_eq!(value, Value::int32(4));
}

#[test]
fn terminate_stops_with_null() {
    let value = run_ok(vec![Stmt::Terminate, Stmt::ret(Expr::int32(1))]);
    assert_eq!(value, Value::Null);
}

#[test]
fn forward_jump_skips_statements() {
    let value = run_ok(vec![
        Stmt::declare("x", VariableType::Int32, Some(Expr::int32(1))),
        Stmt::jump("end", Expr::Bool(true)),
        Stmt::assign("x", Expr::int32(2)),
        Stmt::mark("end"),
        Stmt::ret(Expr::var("x")),
    ]);
    assert_eq!(value, Value::int32(1));
}

#[test]
fn false_jump_condition_falls_through() {
    let value = run_ok(vec![
        Stmt::declare("x", VariableType::Int32, Some(Expr::int32(1))),
        Stmt::jump("end", Expr::Bool(false)),
        Stmt::assign("x", Expr::int32(2)),
        Stmt::mark("end"),
        Stmt::ret(Expr::var("x")),
    ]);
    assert_eq!(value, Value::int32(2));
}

#[test]
fn jump_cannot_reach_enclosing_list() {
    let err = run_err(vec![
        Stmt::mark("top"),
        Stmt::if_then(Expr::Bool(true), vec![Stmt::jump("top", Expr::Bool(true))]),
    ]);
    assert!(matches!(err.kind, EvalErrorKind::JumpTargetNotFound { .. }));
    assert_eq!(err.category(), ErrorCategory::ControlFlow);
}

#[test]
fn duplicate_labels_resolve_to_last() {
    let value = run_ok(vec![
        Stmt::declare("x", VariableType::Int32, None),
        Stmt::jump("l", Expr::Bool(true)),
        Stmt::mark("l"),
        Stmt::assign("x", Expr::int32(1)),
        Stmt::mark("l"),
        Stmt::ret(Expr::var("x")),
    ]);
    assert_eq!(value, Value::int32(0));
}

#[test]
fn errors_carry_scope_context_once() {
    let err = run_err(vec![Stmt::if_then(
        Expr::Bool(true),
        vec![Stmt::ret(Expr::var("missing"))],
    )]);
    assert_eq!(err.notes.len(), 1);
    assert!(err.notes[0].starts_with("in statement list of 1 statements"));
}

#[test]
fn scopes_are_popped_after_errors() {
    let mut interpreter = interpreter();
    let program = Program::new(
        "fails",
        vec![Stmt::if_then(
            Expr::Bool(true),
            vec![Stmt::system_call("except", vec![Expr::string("boom")])],
        )],
    );
    assert!(interpreter.run_program(&program).is_err());
    assert_eq!(interpreter.env().depth(), 1);
}

#[test]
fn field_assignment_is_visible_through_aliases() {
    let value = run_ok(vec![
        Stmt::object_type(ObjectTypeDecl::new(
            "Point",
            &[("x", VariableType::Int32), ("y", VariableType::Int32)],
        )),
        Stmt::declare(
            "a",
            VariableType::Object,
            Some(Expr::instantiate("Point", vec![Expr::int32(1), Expr::int32(2)])),
        ),
        Stmt::declare("b", VariableType::Object, Some(Expr::var("a"))),
        Stmt::field_assign(Expr::var("b"), "x", Expr::int32(9)),
        Stmt::FieldSelfOperation {
            target: Expr::var("b"),
            field: "y".to_string(),
            op: fable_ir::StepOp::Increment,
        },
        Stmt::ret(Expr::binary(
            Expr::field(Expr::var("a"), "x"),
            BinaryOp::Add,
            Expr::field(Expr::var("a"), "y"),
        )),
    ]);
    assert_eq!(value, Value::int32(12));
}

#[test]
fn compound_field_assignment_requires_the_field() {
    let err = run_err(vec![
        Stmt::object_type(ObjectTypeDecl::new("Bag", &[("n", VariableType::Int32)])),
        Stmt::declare(
            "bag",
            VariableType::Object,
            Some(Expr::instantiate("Bag", vec![Expr::int32(0)])),
        ),
        Stmt::FieldAssignment {
            target: Expr::var("bag"),
            field: "missing".to_string(),
            op: AssignOp::AddAssign,
            value: Expr::int32(1),
        },
    ]);
    assert!(matches!(err.kind, EvalErrorKind::UndefinedField { .. }));
}

#[test]
fn field_access_on_non_object_fails() {
    let err = run_err(vec![Stmt::ret(Expr::field(Expr::int32(3), "x"))]);
    assert!(matches!(err.kind, EvalErrorKind::NotAnObject { .. }));
}

#[test]
fn primitive_types_cannot_be_instantiated() {
    let err = run_err(vec![Stmt::ret(Expr::instantiate("Int32", vec![]))]);
    assert_eq!(err.category(), ErrorCategory::Definition);
}

#[test]
fn to_string_method_works_on_every_value() {
    let value = run_ok(vec![Stmt::ret(Expr::binary(
        Expr::method_call(Expr::int32(4), "to_string", vec![]),
        BinaryOp::Add,
        Expr::method_call(Expr::Bool(false), "to_string", vec![]),
    ))]);
    assert_eq!(value, Value::string("4false"));
}

#[test]
fn unknown_method_fails_with_lookup_error() {
    let err = run_err(vec![Stmt::method_call(Expr::int32(4), "explode", vec![])]);
    assert!(matches!(err.kind, EvalErrorKind::UndefinedMethod { .. }));
}

#[test]
fn unary_operators_apply() {
    let value = run_ok(vec![Stmt::ret(Expr::unary(
        UnaryOp::Not,
        Expr::binary(
            Expr::unary(UnaryOp::Neg, Expr::int32(2)),
            BinaryOp::Gt,
            Expr::int32(0),
        ),
    ))]);
    assert_eq!(value, Value::bool(true));
}

#[test]
fn local_functions_are_scoped_to_their_block() {
    let err = run_err(vec![
        Stmt::if_then(
            Expr::Bool(true),
            vec![Stmt::function(FunctionDecl::new("helper", &[], vec![]))],
        ),
        Stmt::call("helper", vec![]),
    ]);
    assert!(matches!(err.kind, EvalErrorKind::UndefinedFunction { .. }));
}

#[test]
fn function_without_return_yields_null() {
    let value = run_ok(vec![
        Stmt::function(FunctionDecl::new("noop", &[], vec![Stmt::Break])),
        Stmt::ret(Expr::call("noop", vec![])),
    ]);
    assert_eq!(value, Value::Null);
}

#[test]
fn recursion_is_bounded_by_call_depth() {
    let mut interpreter = Interpreter::builder()
        .mode(EvalMode::TestRun)
        .max_call_depth(Some(32))
        .build();
    let program = Program::new(
        "recurse",
        vec![
            Stmt::function(FunctionDecl::new(
                "down",
                &[],
                vec![Stmt::ret(Expr::call("down", vec![]))],
            )),
            Stmt::call("down", vec![]),
        ],
    );
    let Err(err) = interpreter.run_program(&program) else {
        panic!("unbounded recursion should fail");
    };
    assert_eq!(err.category(), ErrorCategory::Resource);
    assert_eq!(interpreter.call_depth(), 0);
    assert_eq!(interpreter.env().depth(), 1);
}

#[test]
fn recursion_computes_factorial() {
    let fact = FunctionDecl::new(
        "fact",
        &["n"],
        vec![
            Stmt::if_then(
                Expr::binary(Expr::var("n"), BinaryOp::LtEq, Expr::int32(1)),
                vec![Stmt::ret(Expr::int64(1))],
            ),
            Stmt::ret(Expr::binary(
                Expr::var("n"),
                BinaryOp::Mul,
                Expr::call(
                    "fact",
                    vec![Expr::binary(Expr::var("n"), BinaryOp::Sub, Expr::int32(1))],
                ),
            )),
        ],
    );
    let value = run_ok(vec![
        Stmt::function(fact),
        Stmt::ret(Expr::call("fact", vec![Expr::int32(10)])),
    ]);
    assert_eq!(value, Value::int64(3_628_800));
}

#[test]
fn host_call_void_becomes_null() {
    let mut registry = crate::host_calls::HostCallRegistry::with_builtins();
    registry.register("nothing", |_, _| Ok(Value::Void));
    let mut interpreter = Interpreter::builder()
        .mode(EvalMode::TestRun)
        .host_calls(crate::shared::SharedMutableRegistry::new(registry))
        .build();
    let program = Program::new(
        "void",
        vec![Stmt::ret(Expr::system_call("nothing", vec![]))],
    );
    let value = interpreter
        .run_program(&program)
        .unwrap_or_else(|e| panic!("{e}"));
    assert!(matches!(value, Value::Null));
}

#[test]
fn unknown_host_call_fails() {
    let err = run_err(vec![Stmt::system_call("launch", vec![])]);
    assert!(matches!(err.kind, EvalErrorKind::UndefinedHostCall { .. }));
}

#[test]
fn loop_condition_sees_loop_scope() {
    let value = run_ok(vec![
        Stmt::declare("i", VariableType::Int32, None),
        Stmt::declare("sum", VariableType::Int32, None),
        Stmt::while_loop(
            lt("i", 5),
            vec![
                Stmt::increment("i"),
                Stmt::compound_assign("sum", AssignOp::AddAssign, Expr::var("i")),
            ],
        ),
        Stmt::ret(Expr::var("sum")),
    ]);
    assert_eq!(value, Value::int32(15));
}

#[test]
fn with_env_scope_pops_on_return() {
    let mut interpreter = interpreter();
    let seen = interpreter.with_env_scope(|scoped| {
        scoped.env_mut().declare("tmp", Value::int32(1));
        scoped.env().depth()
    });
    assert_eq!(seen, 2);
    assert_eq!(interpreter.env().depth(), 1);
    assert!(interpreter.env().get("tmp").is_none());
}
