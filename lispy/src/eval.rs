use crate::builtins::apply_builtin;
use crate::error::LispErr;
use crate::value::Value;

type ExpList = std::vec::IntoIter<Value>;

// An S-expression whose cells are being evaluated: `done` holds the cells
// already reduced, `rest` the ones still waiting.
struct Frame {
    done: Vec<Value>,
    rest: ExpList,
}

pub struct Evaluator {
    stack: Vec<Frame>,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Evaluator {
        Evaluator {
            stack: Vec::with_capacity(32),
        }
    }

    #[inline(always)]
    fn push_frame(&mut self, head: Value, rest: ExpList, len: usize) -> Value {
        self.stack.push(Frame {
            done: Vec::with_capacity(len),
            rest,
        });
        head
    }

    /// Reduces `root` to a number, a symbol, an error or the empty list.
    ///
    /// Cells are evaluated left to right. The first error met is the result:
    /// every pending frame is dropped and nothing further is evaluated.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn eval(&mut self, root: Value) -> Value {
        self.stack.clear();
        let mut exp = root;

        loop {
            exp = match exp {
                Value::SExpr(l) => {
                    let len = l.len();
                    let mut rest = l.into_iter();
                    match rest.next() {
                        Some(head) => {
                            exp = self.push_frame(head, rest, len);
                            continue;
                        }
                        None => Value::sexpr(),
                    }
                }
                exp => exp,
            };

            loop {
                match self.stack.pop() {
                    Some(Frame { mut done, mut rest }) => {
                        if exp.is_error() {
                            tracing::trace!(depth = self.stack.len() + 1, "abandoning evaluation");
                            self.stack.clear();
                            return exp;
                        }
                        done.push(exp);
                        match rest.next() {
                            Some(val) => {
                                self.stack.push(Frame { done, rest });
                                exp = val;
                                break;
                            }
                            None => exp = reduce(done),
                        }
                    }
                    None => return exp,
                }
            }
        }
    }
}

// Reduces an S-expression whose cells are all evaluated and error free.
fn reduce(mut cells: Vec<Value>) -> Value {
    tracing::trace!(len = cells.len(), "reduce");
    match cells.len() {
        0 => Value::SExpr(cells),
        1 => Value::SExpr(cells).take(0),
        _ => match cells.remove(0) {
            Value::Symbol(op) => apply_builtin(&op, cells),
            _ => Value::error(LispErr::MissingLeadingSymbol),
        },
    }
}

/// Evaluates a value. Anything but an S-expression evaluates to itself.
pub fn eval(v: Value) -> Value {
    match v {
        Value::SExpr(cells) => eval_sexpr(cells),
        v => v,
    }
}

/// Evaluates the cells of an S-expression and applies the leading operator
/// to the rest.
pub fn eval_sexpr(cells: Vec<Value>) -> Value {
    Evaluator::new().eval(Value::SExpr(cells))
}
