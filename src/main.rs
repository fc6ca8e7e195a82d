use adam::ast::{ArgList, Block, Call, Expr, GenList, Getter, Line, StructList, StructProp};
use adam::config::Config;
use adam::session::Session;
use adam::types::{Blockdef, Sym, Type};
use log::info;

fn unary_block(param: Type, name: &str, ret: Type) -> Type {
    Type::Blockdef(Blockdef::new(
        Some(StructList::new(vec![StructProp::named(param, name)])),
        ret,
    ))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut session = Session::with_prelude(Config::default());
    let root = session.root();

    // List = [T]..[{[T item] List..[T]} push, {T} first]
    let list_of_t = Type::Sym(Sym::with_gens("List", vec![Type::sym("T")]));
    let list = StructList::new(vec![
        StructProp::named(unary_block(Type::sym("T"), "item", list_of_t), "push"),
        StructProp::named(Type::Blockdef(Blockdef::new(None, Type::sym("T"))), "first"),
    ])
    .with_gens(GenList::of(&["T"]));
    session.typedef(root, Sym::new("List"), Type::Struct(list));

    // Else = [{[{Num} other] Num} else]
    let thunk = Type::Blockdef(Blockdef::new(None, Type::sym("Num")));
    let else_type = StructList::new(vec![StructProp::named(
        unary_block(thunk.clone(), "other", Type::sym("Num")),
        "else",
    )]);
    session.typedef(root, Sym::new("Else"), Type::Struct(else_type));

    let if_type = Blockdef::new(
        Some(StructList::new(vec![
            StructProp::named(Type::sym("Bool"), "cond"),
            StructProp::named(thunk, "then"),
        ])),
        Type::sym("Else"),
    );
    session.bind(root, Sym::new("if"), Type::Blockdef(if_type));

    session.bind(root, Sym::new("a"), Type::sym("Num"));
    session.bind(root, Sym::new("b"), Type::sym("Num"));
    session.bind(root, Sym::new("flag"), Type::sym("Bool"));
    session.bind(
        root,
        Sym::new("nums"),
        Type::Sym(Sym::with_gens("List", vec![Type::sym("Num")])),
    );

    let then_scope = session.enter(root);
    let else_scope = session.enter(root);

    let lines = vec![
        Line::new(root, vec![Expr::sym("a"), Expr::sym("="), Expr::int(5)]),
        Line::new(root, vec![Expr::sym("a"), Expr::sym("+"), Expr::sym("b")]),
        Line::new(root, vec![Expr::sym("not"), Expr::sym("flag")]),
        Line::new(root, vec![Expr::sym("nums"), Expr::sym("push"), Expr::int(5)]),
        Line::new(
            root,
            vec![
                Expr::sym("if"),
                Expr::args(root, vec![Expr::sym("flag")]),
                Expr::Block(Block::new(then_scope, vec![Expr::int(1)])),
                Expr::sym("else"),
                Expr::Block(Block::new(else_scope, vec![Expr::int(2)])),
            ],
        ),
    ];

    let direct = Call::new(
        root,
        Getter::member(root, Expr::sym("nums"), Sym::new("first")),
        ArgList::empty(root),
    );
    let direct = session.validate(direct)?;
    info!("validated {direct}");

    let program = match session.desugar_program(lines) {
        Ok(program) => program,
        Err(errors) => {
            for err in &errors {
                eprintln!("{err}");
            }
            anyhow::bail!("{} line(s) failed to desugar", errors.len());
        }
    };

    for expr in &program.lines {
        let ty = session.infer(root, expr)?;
        println!("{expr} : {ty}");
    }
    if let Some(ty) = &direct.ty {
        println!("{direct} : {ty}");
    }

    Ok(())
}
