use adam::ast::{ArgList, Call, Expr, Getter, StructList, StructProp};
use adam::config::Config;
use adam::session::Session;
use adam::types::{Blockdef, Sym, Type, TypeError, ValidationError};

/// Prelude plus `n: Num`.
fn session() -> Session {
    let mut session = Session::with_prelude(Config::default());
    let root = session.root();
    session.bind(root, Sym::new("n"), Type::sym("Num"));
    session
}

fn member_call(session: &Session, origin: &str, member: &str, args: Vec<Expr>) -> Call {
    let root = session.root();
    Call::new(
        root,
        Getter::member(root, Expr::sym(origin), Sym::new(member)),
        ArgList::new(root, args),
    )
}

fn primitive_call(session: &Session, op: &str, args: Vec<Expr>) -> Call {
    let root = session.root();
    Call::new(
        root,
        Getter::primitive(root, Expr::sym(op)),
        ArgList::new(root, args),
    )
}

#[test]
fn test_valid_member_call_is_typed() {
    let session = session();
    let call = session
        .validate(member_call(&session, "n", "+", vec![Expr::int(1)]))
        .unwrap();
    assert!(call.is_validated());
    assert_eq!(call.ty, Some(Type::sym("Num")));
    assert!(call.gen_table.is_none());
}

#[test]
fn test_value_is_not_callable() {
    let session = session();
    let err = session
        .validate(primitive_call(&session, "n", vec![]))
        .unwrap_err();
    assert!(matches!(
        err,
        TypeError::Validation(ValidationError::NotCallable { .. })
    ));
}

#[test]
fn test_arity_mismatch() {
    let session = session();
    let err = session
        .validate(member_call(&session, "n", "+", vec![]))
        .unwrap_err();
    assert_eq!(
        err,
        TypeError::Validation(ValidationError::ArityMismatch {
            expected: 1,
            found: 0
        })
    );
}

#[test]
fn test_argument_mismatch_reports_index() {
    let session = session();
    let err = session
        .validate(member_call(&session, "n", "+", vec![Expr::str("s")]))
        .unwrap_err();
    assert!(matches!(
        err,
        TypeError::Validation(ValidationError::ArgMismatch { index: 0, .. })
    ));
    assert!(!err.is_fatal());
}

#[test]
fn test_unknown_member() {
    let session = session();
    let err = session
        .validate(member_call(&session, "n", "shout", vec![]))
        .unwrap_err();
    assert!(err.is_inferno());
}

#[test]
fn test_thunk_stands_in_for_its_result() {
    let mut session = session();
    let root = session.root();
    session.bind(
        root,
        Sym::new("later"),
        Type::Blockdef(Blockdef::new(None, Type::sym("Num"))),
    );

    assert!(
        session
            .validate(member_call(&session, "n", "+", vec![Expr::sym("later")]))
            .is_ok()
    );
}

#[test]
fn test_alias_chain_reaches_members() {
    let mut session = session();
    let root = session.root();
    session.typedef(root, Sym::new("Age"), Type::sym("Num"));
    session.bind(root, Sym::new("age"), Type::sym("Age"));

    let call = session
        .validate(member_call(&session, "age", "<", vec![Expr::sym("n")]))
        .unwrap();
    assert_eq!(call.ty, Some(Type::sym("Bool")));
}

#[test]
fn test_vararg_parameter_accepts_homogeneous_list() {
    let mut session = session();
    let root = session.root();
    let numbers = Type::Struct(StructList::new(vec![StructProp::unnamed(Type::vararg(
        Type::sym("Num"),
    ))]));
    let sum = Blockdef::new(
        Some(StructList::new(vec![StructProp::named(numbers, "values")])),
        Type::sym("Num"),
    );
    session.bind(root, Sym::new("sum"), Type::Blockdef(sum));

    let homogeneous = Expr::list(root, vec![Expr::int(1), Expr::int(2), Expr::int(3)]);
    let call = session
        .validate(primitive_call(&session, "sum", vec![homogeneous]))
        .unwrap();
    assert_eq!(call.ty, Some(Type::sym("Num")));

    let mixed = Expr::list(root, vec![Expr::int(1), Expr::str("a")]);
    let err = session
        .validate(primitive_call(&session, "sum", vec![mixed]))
        .unwrap_err();
    assert!(matches!(
        err,
        TypeError::Validation(ValidationError::ArgMismatch { index: 0, .. })
    ));
}
