#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

pub mod builtins;
pub mod error;
pub mod eval;
pub mod printer;
pub mod reader;
pub mod syntax;
pub mod value;

pub use crate::builtins::{apply_builtin, Builtin};
pub use crate::error::{LispErr, LispResult, SyntaxError};
pub use crate::eval::{eval, eval_sexpr, Evaluator};
pub use crate::reader::read;
pub use crate::syntax::{parse, Ast, Node};
pub use crate::value::Value;

pub const SOURCE_NAME: &str = "<stdin>";

/// Parses, reads and evaluates one line of source.
pub fn eval_str(src: &str) -> Result<Value, SyntaxError> {
    let ast = parse(SOURCE_NAME, src)?;
    Ok(eval(read(&ast)))
}

/// One read-eval-print step: the rendered result, or the rendered syntax error.
pub fn rep(src: &str) -> std::string::String {
    match eval_str(src) {
        Ok(v) => v.pr_str(),
        Err(err) => err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_exp(src: &str, expected: &str) {
        assert_eq!(rep(src), expected, "evaluating {:?}", src);
    }

    #[test]
    fn eval_number() {
        test_exp("1", "1");
        test_exp("-42", "-42");
        test_exp("(7)", "7");
    }

    #[test]
    fn eval_empty_list() {
        test_exp("", "()");
        test_exp("()", "()");
        test_exp("(())", "()");
    }

    #[test]
    fn add_numbers() {
        test_exp("(+ 1 2)", "3");
        test_exp("(+ 1 2 2)", "5");
        test_exp("(+ 1 2 3 (+ 4 2))", "12");
        test_exp("+ 1 2", "3");
    }

    #[test]
    fn nested_forms() {
        test_exp("(+ 1 (* 2 3))", "7");
        test_exp("(* 10 (- 20 (/ 8 2)))", "160");
        test_exp("(- (* 3 3) (* 2 2) 1)", "4");
    }

    #[test]
    fn unary_minus() {
        test_exp("(- 5)", "-5");
        test_exp("(- -5)", "5");
        test_exp("(- (+ 1 2))", "-3");
    }

    #[test]
    fn division() {
        test_exp("(/ 10 3)", "3");
        test_exp("(/ 10 0)", "Error: Division by zero");
        test_exp("(+ 1 (/ 1 0) (/ 1 0))", "Error: Division by zero");
        test_exp("(* 2 (/ 5 (- 3 3)) 4)", "Error: Division by zero");
    }

    #[test]
    fn bare_symbols() {
        test_exp("+", "+");
        test_exp("(*)", "*");
        test_exp("(+ 1 (-))", "Error: Cannot operate on non-number");
    }

    #[test]
    fn missing_leading_symbol() {
        test_exp("(1 2 3)", "Error: S-expression does not start with symbol.");
        test_exp("1 2", "Error: S-expression does not start with symbol.");
    }

    #[test]
    fn invalid_number() {
        test_exp("99999999999999999999", "Error: invalid number");
        test_exp("(+ 1 -99999999999999999999)", "Error: invalid number");
    }

    #[test]
    fn overflow() {
        test_exp("(* 9223372036854775807 2)", "Error: Integer overflow");
        test_exp("(- -9223372036854775808)", "Error: Integer overflow");
    }

    #[test]
    fn syntax_errors() {
        test_exp(
            "(+ 1 x)",
            "<stdin>:1:6: error: expected number, symbol, '(' or ')' at 'x'",
        );
        test_exp(
            "(+ 1",
            "<stdin>:1:5: error: expected number, symbol, '(' or ')' at end of input",
        );
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let deep = format!("{}+{}", "(".repeat(100_000), ")".repeat(100_000));
        assert!(rep(&deep).ends_with("error: expected at most 1024 nested S-expressions at '('"));

        let depth = syntax::MAX_NESTING;
        test_exp(&format!("{}- 5{}", "(".repeat(depth), ")".repeat(depth)), "-5");
    }

    #[test]
    fn eval_str_splits_syntax_errors() {
        assert_eq!(eval_str("(* 6 7)"), Ok(Value::number(42)));
        assert!(eval_str(")").is_err());
    }
}
