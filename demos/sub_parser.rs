use argot::prelude::*;
use argot::{CommandLineParser, Opt, SubParser};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn main() {
    let mut param1: i32 = 0;
    let mut param2: f64 = 1.0;
    let op = Cell::new(0);

    let sub = Rc::new(RefCell::new(
        SubParser::new()
            .add(
                Opt::long("param1")
                    .stow(&mut param1)
                    .help("parameter 1")
                    .show_default(),
            )
            .add(
                Opt::long("param2")
                    .stow(&mut param2)
                    .help("parameter 2")
                    .show_default(),
            )
            .add(Opt::long("opt1").set(&op, 1).help("perform op 1"))
            .add(Opt::long("opt2").set(&op, 2).help("perform op 2"))
            .help_option(),
    ));
    let mut parser = CommandLineParser::new()
        .header("Usage: sub_parser [OPTION]...")
        .add(
            Opt::new('o', "options")
                .store(Rc::clone(&sub))
                .help("comma separated sub-options (use -o help to list them)"),
        )
        .help_option()
        .build();

    parser.parse_env(false);
    let display = sub.borrow().to_display();
    drop(parser);
    drop(sub);

    println!("options: {display}");
    println!("param1 = {param1}, param2 = {param2}, op = {}", op.get());
}
