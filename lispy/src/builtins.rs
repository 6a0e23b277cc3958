use crate::error::{LispErr, LispResult};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Add,
    Sub,
    Mul,
    Div,
}

impl Builtin {
    pub fn lookup(op: &str) -> Option<Builtin> {
        match op {
            "+" => Some(Builtin::Add),
            "-" => Some(Builtin::Sub),
            "*" => Some(Builtin::Mul),
            "/" => Some(Builtin::Div),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Builtin::Add => "+",
            Builtin::Sub => "-",
            Builtin::Mul => "*",
            Builtin::Div => "/",
        }
    }

    #[inline(always)]
    fn fold(self, acc: i64, rhs: i64) -> LispResult<i64> {
        let res = match self {
            Builtin::Add => acc.checked_add(rhs),
            Builtin::Sub => acc.checked_sub(rhs),
            Builtin::Mul => acc.checked_mul(rhs),
            Builtin::Div if rhs == 0 => return Err(LispErr::DivisionByZero),
            Builtin::Div => acc.checked_div(rhs),
        };
        res.ok_or(LispErr::Overflow)
    }

    fn apply(self, args: Vec<i64>) -> LispResult<i64> {
        let mut rest = args.into_iter();
        let first = rest.next().ok_or(LispErr::MissingOperand)?;

        if self == Builtin::Sub && rest.len() == 0 {
            return first.checked_neg().ok_or(LispErr::Overflow);
        }

        // try_fold stops at the first error; the remaining operands are dropped with `rest`.
        rest.try_fold(first, |acc, rhs| self.fold(acc, rhs))
    }
}

fn numbers(args: Vec<Value>) -> LispResult<Vec<i64>> {
    args.into_iter()
        .map(|v| match v {
            Value::Number(n) => Ok(n),
            _ => Err(LispErr::NonNumberOperand),
        })
        .collect()
}

/// Applies the operator named `op` to `args`, folding left.
///
/// Every argument must be a number. A lone argument to `-` is negated.
pub fn apply_builtin(op: &str, args: Vec<Value>) -> Value {
    tracing::debug!(op, argc = args.len(), "apply builtin");

    let res = numbers(args).and_then(|nums| {
        Builtin::lookup(op)
            .ok_or(LispErr::InvalidOperator)?
            .apply(nums)
    });

    match res {
        Ok(n) => Value::number(n),
        Err(err) => Value::error(err),
    }
}
