use std::io::{self, BufRead, Write};

use clap::Parser;
use lispy::{eval, parse, read, SOURCE_NAME};

const BANNER: &str = "Lispy Version 0.0.0.0.5\nPress Ctrl+c to Exit\n";

/// lispy evaluates prefix arithmetic written as S-expressions, e.g. `(+ 1 (* 2 3))`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Text printed before each input line.
    #[arg(long, default_value = "lispy> ")]
    prompt: String,

    /// Print the parsed syntax tree after each result.
    #[arg(long)]
    print_ast: bool,

    /// Evaluate a single expression, print the result and exit.
    #[arg(short, long, value_name = "EXPR")]
    eval: Option<String>,
}

fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Only initialize if RUST_LOG is set
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn print_result<O: Write>(src: &str, print_ast: bool, output: &mut O) -> io::Result<()> {
    match parse(SOURCE_NAME, src) {
        Ok(ast) => {
            let result = eval(read(&ast));
            writeln!(output, "{}", result)?;
            if print_ast {
                output.write_all(ast.dump().as_bytes())?;
            }
        }
        Err(err) => {
            tracing::debug!(%err, "syntax error");
            writeln!(output, "{}", err)?;
        }
    }
    Ok(())
}

fn repl<I, O>(input: &mut I, output: &mut O, args: &Args) -> io::Result<()>
where
    I: BufRead,
    O: Write,
{
    writeln!(output, "{}", BANNER)?;
    let mut line = String::new();

    loop {
        output.write_all(args.prompt.as_bytes())?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(());
        }

        print_result(line.trim_end_matches(&['\n', '\r'][..]), args.print_ast, output)?;
    }
}

fn main() -> io::Result<()> {
    init_tracing();
    let args = Args::parse();
    let mut stdout = io::stdout().lock();

    if let Some(src) = &args.eval {
        return print_result(src, args.print_ast, &mut stdout);
    }

    repl(&mut io::stdin().lock(), &mut stdout, &args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    fn run(input: &str, args: &[&str]) -> String {
        let args = Args::parse_from(std::iter::once("lispy").chain(args.iter().copied()));
        let mut output = Vec::new();
        repl(&mut input.as_bytes(), &mut output, &args).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn session_prints_each_result() {
        assert_eq!(
            run("(+ 1 (* 2 3))\n(/ 10 0)\n(- 5)\n", &[]),
            "Lispy Version 0.0.0.0.5\nPress Ctrl+c to Exit\n\n\
             lispy> 7\n\
             lispy> Error: Division by zero\n\
             lispy> -5\n\
             lispy> \n"
        );
    }

    #[test]
    fn syntax_errors_do_not_end_the_session() {
        let out = run("(+ 1 x)\r\n(* 2 2)", &["--prompt", "> "]);
        assert_eq!(
            out.lines().skip(3).collect::<Vec<_>>(),
            vec![
                "> <stdin>:1:6: error: expected number, symbol, '(' or ')' at 'x'",
                "> 4",
                "> ",
            ]
        );
    }

    #[test]
    fn print_ast_follows_result() {
        let mut output = Vec::new();
        print_result("- 5", true, &mut output).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "-5\n\
             >\n\
             \x20 regex:1:1 ''\n\
             \x20 expr|symbol|char:1:1 '-'\n\
             \x20 expr|number|regex:1:3 '5'\n\
             \x20 regex:1:4 ''\n"
        );
    }

    #[test]
    fn eval_flag_is_parsed() {
        let args = Args::parse_from(["lispy", "-e", "(+ 2 2)"]);
        assert_eq!(args.eval.as_deref(), Some("(+ 2 2)"));
        assert_eq!(args.prompt, "lispy> ");
        assert!(!args.print_ast);
    }
}
