use argot::prelude::*;
use argot::{Argument, CommandLineParser, ListValue, Opt, RelValue, SetValue, TermValue};

const MODE_FAST: i32 = 1;
const MODE_SAFE: i32 = 2;

fn main() {
    let mut mode: i32 = MODE_SAFE;
    let mut colour = String::from("red");
    let mut sizes: Vec<u32> = Vec::default();
    let mut amount: f64 = 0.0;
    let mut relative = false;

    let mut parser = CommandLineParser::new()
        .header("Usage: choices [OPTION]... AMOUNT")
        .help_option()
        .add(
            Opt::new('m', "mode")
                .store(
                    SetValue::new(&mut mode)
                        .choice_valued("fast", MODE_FAST, "skip the checks")
                        .choice_valued("safe", MODE_SAFE, "check everything")
                        .self_documenting("Available modes:"),
                )
                .help("processing mode (use --mode=help to list them)")
                .show_default(),
        )
        .add(
            Opt::new('c', "colour")
                .store(
                    TermValue::new(&mut colour)
                        .choice("red", "the warm one")
                        .choice("blue", "the cool one"),
                )
                .show_default(),
        )
        .add(
            Opt::new('s', "sizes")
                .store(ListValue::new(&mut sizes))
                .help("comma separated sizes"),
        )
        .add(
            Argument::new("amount")
                .store(RelValue::new(&mut amount, &mut relative))
                .help("absolute, or relative with a leading '+'"),
        )
        .build();

    parser.parse_env(false);
    drop(parser);

    println!("mode = {mode}, colour = {colour}, sizes = {sizes:?}");
    println!("amount = {amount} ({})", if relative { "relative" } else { "absolute" });
}
