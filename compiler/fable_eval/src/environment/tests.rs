use super::*;
use fable_ir::{FunctionDecl, Stmt};

fn env() -> Environment {
    Environment::new(SharedMutableRegistry::default())
}

#[test]
fn test_scope_declare_lookup() {
    let mut scope = Scope::new();
    assert!(!scope.declare("x", Value::int32(42)));
    assert_eq!(scope.lookup("x"), Some(Value::int32(42)));
    assert!(scope.declare("x", Value::int32(43)));
    assert_eq!(scope.lookup("x"), Some(Value::int32(43)));
}

#[test]
fn test_scope_shadowing() {
    let parent = LocalScope::new(Scope::new());
    parent.borrow_mut().declare("x", Value::int32(1));

    let mut child = Scope::with_parent(parent.clone());
    child.declare("x", Value::int32(2));

    assert_eq!(child.lookup("x"), Some(Value::int32(2)));
    assert_eq!(parent.borrow().lookup("x"), Some(Value::int32(1)));
}

#[test]
fn test_scope_assign_reaches_parent() {
    let parent = LocalScope::new(Scope::new());
    parent.borrow_mut().declare("x", Value::int32(1));

    let mut child = Scope::with_parent(parent.clone());
    assert!(child.assign("x", Value::int32(5)));
    assert!(!child.assign("missing", Value::Null));
    assert_eq!(parent.borrow().lookup("x"), Some(Value::int32(5)));
}

#[test]
fn test_environment_push_pop() {
    let mut env = env();
    env.declare("x", Value::int32(1));

    env.push_scope();
    env.declare("x", Value::int32(2));
    assert_eq!(env.get("x"), Some(Value::int32(2)));

    env.pop_scope();
    assert_eq!(env.get("x"), Some(Value::int32(1)));
}

#[test]
fn test_root_is_never_popped() {
    let mut env = env();
    env.declare("kept", Value::bool(true));
    env.pop_scope();
    env.pop_scope();
    assert_eq!(env.depth(), 1);
    assert_eq!(env.get("kept"), Some(Value::bool(true)));
}

#[test]
fn test_set_updates_nearest_declaring_scope() {
    let mut env = env();
    env.declare("count", Value::int32(0));
    env.push_scope();
    env.set("count", Value::int32(3));
    env.pop_scope();
    assert_eq!(env.get("count"), Some(Value::int32(3)));
}

#[test]
fn test_set_declares_locally_when_unbound() {
    let mut env = env();
    env.push_scope();
    env.set("temp", Value::string("x"));
    assert!(env.contains("temp"));
    env.pop_scope();
    assert!(!env.contains("temp"));
    assert_eq!(env.get("temp"), None);
}

#[test]
fn test_function_lookup_prefers_scope_then_globals() {
    let globals = SharedMutableRegistry::<Globals>::default();
    globals.write().declare_function(Arc::new(FunctionDecl::new(
        "greet",
        &[],
        vec![Stmt::Break],
    )));
    let mut env = Environment::new(globals.clone());

    let Some(global) = env.get_function("greet") else {
        panic!("global function should resolve");
    };
    assert_eq!(global.body, vec![Stmt::Break]);

    env.push_scope();
    env.declare_function(Arc::new(FunctionDecl::new("greet", &[], vec![Stmt::Continue])));
    let Some(local) = env.get_function("greet") else {
        panic!("local function should resolve");
    };
    assert_eq!(local.body, vec![Stmt::Continue]);

    env.pop_scope();
    assert!(env.get_function("missing").is_none());
    assert!(env.globals().same_registry(&globals));
}

#[test]
fn test_snapshot_inner_wins() {
    let mut env = env();
    env.declare("name", Value::string("outer"));
    env.declare("gold", Value::int32(10));
    env.push_scope();
    env.declare("name", Value::string("inner"));

    let snapshot = env.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.get("name"), Some(&Value::string("inner")));
    assert_eq!(snapshot.get("gold"), Some(&Value::int32(10)));
}
