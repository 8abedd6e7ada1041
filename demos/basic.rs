use argot::{CommandLineParser, Opt};
use std::cell::Cell;

const VERSION: &str = "1.0";

fn main() {
    let mut number: i32 = 10;
    let mut input = String::default();
    let input_given = Cell::new(0);

    let mut parser = CommandLineParser::new()
        .header(format!("argot demo program v{VERSION}"))
        .text("")
        .text("available options are:")
        .add(
            Opt::new('n', "number")
                .stow(&mut number)
                .help("set number of nodes to INT")
                .help_word("INT")
                .show_default(),
        )
        .add(
            Opt::new('i', "input")
                .stow(&mut input)
                .help("read data from FILE")
                .help_word("FILE")
                .set(&input_given, 1)
                .once(0),
        )
        .help_option()
        .version_option(VERSION)
        .build();

    parser.parse_env(false);
    drop(parser);

    if input.is_empty() {
        eprintln!("Need to specify the input file!");
        std::process::exit(1);
    }

    println!("The parameters are:");
    println!("number = {number}");
    println!("input = {input}");
}
