use adam::ast::{ArgList, Call, Expr, GenList, GenProp, Getter, Line, StructList, StructProp};
use adam::config::Config;
use adam::session::Session;
use adam::types::{Blockdef, Sym, Type, TypeError, ValidationError};

fn list_of(arg: Type) -> Type {
    Type::Sym(Sym::with_gens("List", vec![arg]))
}

fn params(props: Vec<(Type, &str)>) -> Option<StructList> {
    Some(StructList::new(
        props
            .into_iter()
            .map(|(ty, name)| StructProp::named(ty, name))
            .collect(),
    ))
}

/// `List = [T]..[{[T item] List..[T]} push, {T} first]` with `nums: List..[Num]`.
fn list_session() -> Session {
    let mut session = Session::with_prelude(Config::default());
    let root = session.root();

    let list = StructList::new(vec![
        StructProp::named(
            Type::Blockdef(Blockdef::new(
                params(vec![(Type::sym("T"), "item")]),
                list_of(Type::sym("T")),
            )),
            "push",
        ),
        StructProp::named(Type::Blockdef(Blockdef::new(None, Type::sym("T"))), "first"),
    ])
    .with_gens(GenList::of(&["T"]));
    session.typedef(root, Sym::new("List"), Type::Struct(list));
    session.bind(root, Sym::new("nums"), list_of(Type::sym("Num")));
    session
}

fn member_call(session: &Session, origin: Expr, member: &str, args: Vec<Expr>) -> Call {
    let root = session.root();
    Call::new(
        root,
        Getter::member(root, origin, Sym::new(member)),
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
fn test_direct_generic_call() {
    let session = list_session();
    let call = session
        .validate(member_call(&session, Expr::sym("nums"), "push", vec![Expr::int(5)]))
        .unwrap();
    assert_eq!(call.ty, Some(list_of(Type::sym("Num"))));
}

#[test]
fn test_generic_call_rejects_wrong_element() {
    let session = list_session();
    let err = session
        .validate(member_call(&session, Expr::sym("nums"), "push", vec![Expr::str("s")]))
        .unwrap_err();
    assert!(matches!(
        err,
        TypeError::Validation(ValidationError::ArgMismatch { index: 0, .. })
    ));
}

#[test]
fn test_chained_call_inherits_bindings() {
    let session = list_session();
    let pushed = session
        .validate(member_call(&session, Expr::sym("nums"), "push", vec![Expr::int(5)]))
        .unwrap();

    let first = session
        .validate(member_call(&session, Expr::Call(pushed), "first", vec![]))
        .unwrap();
    assert_eq!(first.ty, Some(Type::sym("Num")));
    let table = first.gen_table.expect("chained call keeps the bindings");
    assert_eq!(table.get(&Sym::new("T")), Some(&Type::sym("Num")));
}

#[test]
fn test_generic_function_binds_from_arguments() {
    let mut session = Session::with_prelude(Config::default());
    let root = session.root();
    let wrap = Blockdef::new(params(vec![(Type::sym("E"), "value")]), list_of(Type::sym("E")))
        .with_gens(GenList::of(&["E"]));
    session.bind(root, Sym::new("wrap"), Type::Blockdef(wrap));

    let call = session
        .validate(primitive_call(&session, "wrap", vec![Expr::str("s")]))
        .unwrap();
    assert_eq!(call.ty.unwrap().to_string(), "List..[Str]");
}

#[test]
fn test_generic_conflict_between_arguments() {
    let mut session = Session::with_prelude(Config::default());
    let root = session.root();
    let same = Blockdef::new(
        params(vec![(Type::sym("E"), "a"), (Type::sym("E"), "b")]),
        Type::sym("Bool"),
    )
    .with_gens(GenList::of(&["E"]));
    session.bind(root, Sym::new("same"), Type::Blockdef(same));

    assert!(
        session
            .validate(primitive_call(&session, "same", vec![Expr::int(1), Expr::int(2)]))
            .is_ok()
    );

    let err = session
        .validate(primitive_call(&session, "same", vec![Expr::int(1), Expr::str("2")]))
        .unwrap_err();
    assert!(matches!(err, TypeError::Generics { .. }));
}

#[test]
fn test_bounded_generic() {
    let mut session = Session::with_prelude(Config::default());
    let root = session.root();
    let double = Blockdef::new(params(vec![(Type::sym("N"), "n")]), Type::sym("N")).with_gens(
        GenList::new(vec![GenProp {
            bound: Some(Type::sym("Num")),
            sym: Sym::new("N"),
        }]),
    );
    session.bind(root, Sym::new("double"), Type::Blockdef(double));

    assert!(
        session
            .validate(primitive_call(&session, "double", vec![Expr::int(2)]))
            .is_ok()
    );
    assert!(
        session
            .validate(primitive_call(&session, "double", vec![Expr::str("two")]))
            .is_err()
    );
}

#[test]
fn test_generic_receiver_unary() {
    let mut session = list_session();
    let root = session.root();
    let size = Blockdef::new(None, Type::sym("Num"))
        .with_gens(GenList::of(&["U"]))
        .with_receiver(list_of(Type::sym("U")));
    session.bind(root, Sym::new("size"), Type::Blockdef(size));

    let expr = session
        .desugar_line(Line::new(root, vec![Expr::sym("size"), Expr::sym("nums")]))
        .unwrap();
    assert_eq!(expr.to_string(), "nums.size()");
    assert_eq!(session.infer(root, &expr).unwrap(), Type::sym("Num"));
}

#[test]
fn test_generic_receiver_binary() {
    let mut session = list_session();
    let root = session.root();
    let with = Blockdef::new(params(vec![(Type::sym("V"), "other")]), list_of(Type::sym("V")))
        .with_gens(GenList::of(&["V"]))
        .with_receiver(Type::sym("V"));
    session.bind(root, Sym::new("with"), Type::Blockdef(with));

    let expr = session
        .desugar_line(Line::new(
            root,
            vec![Expr::int(5), Expr::sym("with"), Expr::int(6)],
        ))
        .unwrap();
    assert_eq!(expr.to_string(), "5.with(6)");
    assert_eq!(session.infer(root, &expr).unwrap().to_string(), "List..[Num]");

    let err = session
        .desugar_line(Line::new(
            root,
            vec![Expr::int(5), Expr::sym("with"), Expr::str("six")],
        ))
        .unwrap_err();
    assert!(!err.is_standalone_block());
}

#[test]
fn test_receiver_mismatch() {
    let mut session = list_session();
    let root = session.root();
    let only_nums = Blockdef::new(None, Type::sym("Num")).with_receiver(Type::sym("Str"));
    session.bind(root, Sym::new("measure"), Type::Blockdef(only_nums));
    session.bind(root, Sym::new("n"), Type::sym("Num"));

    let err = session
        .validate(member_call(&session, Expr::sym("n"), "measure", vec![]))
        .unwrap_err();
    assert!(err.is_inferno());
}

#[test]
fn test_generic_receiver_mismatch() {
    let mut session = list_session();
    let root = session.root();
    let size = Blockdef::new(None, Type::sym("Num"))
        .with_gens(GenList::of(&["U"]))
        .with_receiver(list_of(Type::sym("U")));
    session.bind(root, Sym::new("size"), Type::Blockdef(size));
    session.bind(root, Sym::new("n"), Type::sym("Num"));

    let err = session
        .validate(member_call(&session, Expr::sym("n"), "size", vec![]))
        .unwrap_err();
    assert!(matches!(
        err,
        TypeError::Validation(ValidationError::ReceiverMismatch { .. })
    ));
}

#[test]
fn test_callback_with_other_generic_argument_is_rejected() {
    let mut session = list_session();
    let root = session.root();
    let producer = |element: &str| {
        Type::Blockdef(Blockdef::new(
            params(vec![(Type::sym("Num"), "n")]),
            list_of(Type::sym(element)),
        ))
    };
    let use_nums = Blockdef::new(params(vec![(producer("Num"), "make")]), Type::sym("Num"));
    session.bind(root, Sym::new("useNums"), Type::Blockdef(use_nums));
    session.bind(root, Sym::new("makeNums"), producer("Num"));
    session.bind(root, Sym::new("makeStrs"), producer("Str"));

    assert!(
        session
            .validate(primitive_call(&session, "useNums", vec![Expr::sym("makeNums")]))
            .is_ok()
    );

    let err = session
        .validate(primitive_call(&session, "useNums", vec![Expr::sym("makeStrs")]))
        .unwrap_err();
    assert!(matches!(
        err,
        TypeError::Validation(ValidationError::ArgMismatch { index: 0, .. })
    ));
}

#[test]
fn test_generic_bound_through_parameterized_arguments() {
    let mut session = list_session();
    let root = session.root();
    let concat = Blockdef::new(
        params(vec![
            (list_of(Type::sym("E")), "a"),
            (list_of(Type::sym("E")), "b"),
        ]),
        list_of(Type::sym("E")),
    )
    .with_gens(GenList::of(&["E"]));
    session.bind(root, Sym::new("concat"), Type::Blockdef(concat));
    session.bind(root, Sym::new("strs"), list_of(Type::sym("Str")));

    let call = session
        .validate(primitive_call(
            &session,
            "concat",
            vec![Expr::sym("nums"), Expr::sym("nums")],
        ))
        .unwrap();
    assert_eq!(call.ty, Some(list_of(Type::sym("Num"))));

    let err = session
        .validate(primitive_call(
            &session,
            "concat",
            vec![Expr::sym("nums"), Expr::sym("strs")],
        ))
        .unwrap_err();
    assert!(matches!(err, TypeError::Generics { .. }));
}
