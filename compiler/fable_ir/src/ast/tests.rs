use super::*;
use pretty_assertions::assert_eq;

#[test]
fn binary_op_symbols() {
    assert_eq!(BinaryOp::Add.as_symbol(), "+");
    assert_eq!(BinaryOp::Mod.as_symbol(), "%");
    assert_eq!(BinaryOp::NotEq.as_symbol(), "!=");
    assert_eq!(BinaryOp::Or.as_symbol(), "||");
}

#[test]
fn binary_op_classification() {
    assert!(BinaryOp::Div.is_arithmetic());
    assert!(!BinaryOp::Eq.is_arithmetic());
    assert!(BinaryOp::GtEq.is_ordering());
    assert!(!BinaryOp::And.is_ordering());
}

#[test]
fn compound_assignment_maps_to_binary_op() {
    assert_eq!(AssignOp::Assign.binary_op(), None);
    assert_eq!(AssignOp::AddAssign.binary_op(), Some(BinaryOp::Add));
    assert_eq!(AssignOp::ModAssign.binary_op(), Some(BinaryOp::Mod));
    assert_eq!(AssignOp::default(), AssignOp::Assign);
}

#[test]
fn step_ops_map_to_add_and_sub() {
    assert_eq!(StepOp::Increment.binary_op(), BinaryOp::Add);
    assert_eq!(StepOp::Decrement.binary_op(), BinaryOp::Sub);
}

#[test]
fn program_collects_top_level_declarations() {
    let program = Program::new(
        "main",
        vec![
            Stmt::global_function(FunctionDecl::new("greet", &[], vec![])),
            Stmt::function(FunctionDecl::new("local_only", &[], vec![])),
            Stmt::object_type(ObjectTypeDecl::new("Point", &[("x", VariableType::Int32)])),
            Stmt::if_then(
                Expr::Bool(true),
                vec![Stmt::global_function(FunctionDecl::new("nested", &[], vec![]))],
            ),
        ],
    );

    let globals: Vec<_> = program.global_functions().map(|f| f.name.as_str()).collect();
    assert_eq!(globals, vec!["greet"]);

    let types: Vec<_> = program.object_types().map(|t| t.name.as_str()).collect();
    assert_eq!(types, vec!["Point"]);
}

#[test]
fn object_type_method_lookup() {
    let decl = ObjectTypeDecl::new(
        "Point",
        &[("x", VariableType::Int32), ("y", VariableType::Int32)],
    )
    .with_method(FunctionDecl::new("norm", &[], vec![]));

    assert_eq!(decl.fields.len(), 2);
    assert_eq!(decl.fields[1].name, "y");
    assert!(decl.method("norm").is_some());
    assert!(decl.method("missing").is_none());
}

#[test]
fn function_arity_excludes_receiver() {
    let decl = FunctionDecl::new("move_by", &["dx", "dy"], vec![]).returning(VariableType::Bool);
    assert_eq!(decl.arity(), 2);
    assert_eq!(decl.return_type, Some(VariableType::Bool));
}

#[test]
fn variable_type_defaults() {
    assert!(VariableType::Int64.has_default());
    assert!(VariableType::String.has_default());
    assert!(!VariableType::Object.has_default());
    assert!(!VariableType::Dynamic.has_default());
    assert_eq!(VariableType::Float.to_string(), "Float");
}

#[test]
fn selector_display() {
    assert_eq!(ParagraphSelector::Index(2).to_string(), "#2");
    assert_eq!(ParagraphSelector::Name("intro".into()).to_string(), "[intro]");
}

#[test]
fn expr_builders_box_children() {
    let expr = Expr::binary(Expr::var("a"), BinaryOp::Add, Expr::paren(Expr::int32(1)));
    let Expr::Binary { left, op, right } = expr else {
        panic!("expected binary expression");
    };
    assert_eq!(*left, Expr::Variable("a".into()));
    assert_eq!(op, BinaryOp::Add);
    assert_eq!(*right, Expr::Paren(Box::new(Expr::Int32(1))));
}
