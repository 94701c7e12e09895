use clap::Parser;
use env_logger::Env;
use log::debug;
use polish::{Error, Expr, Prompt};

/// Evaluate an arithmetic expression, such as `-(a+1.5)*{b/2}`. Variables
/// without a value are asked on the standard input.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Bind a variable before evaluating, as `name=value`. May be repeated.
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE", value_parser = parse_binding)]
    define: Vec<(String, f64)>,

    /// Print the expression in reverse polish notation before its value.
    #[arg(short, long)]
    postfix: bool,

    /// Fail on unbound variables instead of asking for their value.
    #[arg(long)]
    no_prompt: bool,

    /// The expression, without whitespace.
    expression: String,
}

fn parse_binding(arg: &str) -> Result<(String, f64), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    let value = value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not a number"))?;
    Ok((name.trim().to_owned(), value))
}

fn run(args: Args) -> Result<(), Error> {
    let mut expr = Expr::with_bindings(&args.expression, args.define)?;
    debug!("unresolved names: {:?}", expr.unresolved());
    if args.postfix {
        println!("{}", expr.postfix());
    }
    let result = if args.no_prompt {
        expr.eval()?
    } else {
        expr.eval_with(&mut Prompt::stdio())?
    };
    println!("{result}");
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
