pub use smartstring::alias::String;

use crate::error::{LispErr, LispResult};

#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Number(i64),
    Error(LispErr),
    Symbol(String),
    SExpr(Vec<Value>),
}

impl Value {
    pub fn number(x: i64) -> Value {
        Value::Number(x)
    }

    pub fn error(err: LispErr) -> Value {
        tracing::debug!(%err, "error value created");
        Value::Error(err)
    }

    pub fn symbol(name: &str) -> Value {
        Value::Symbol(String::from(name))
    }

    pub fn sexpr() -> Value {
        Value::SExpr(Vec::new())
    }

    /// Moves `child` to the end of this S-expression.
    ///
    /// # Panics
    ///
    /// If `self` is not an S-expression.
    pub fn append(mut self, child: Value) -> Value {
        self.push(child);
        self
    }

    /// In-place form of [`Value::append`].
    pub fn push(&mut self, child: Value) {
        match self {
            Value::SExpr(cells) => cells.push(child),
            other => panic!("cannot append to non S-expression {}", other.pr_str()),
        }
    }

    /// Removes the element at `index`, shifting the ones after it left.
    ///
    /// # Panics
    ///
    /// If `self` is not an S-expression or `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> Value {
        match self {
            Value::SExpr(cells) if index < cells.len() => cells.remove(index),
            Value::SExpr(cells) => panic!(
                "index {} out of bounds for S-expression of length {}",
                index,
                cells.len()
            ),
            other => panic!("cannot remove from non S-expression {}", other.pr_str()),
        }
    }

    /// Removes the element at `index` and drops what is left of the container.
    pub fn take(mut self, index: usize) -> Value {
        self.remove_at(index)
    }

    /// Drops the value and everything it owns.
    #[inline(always)]
    pub fn release(self) {
        drop(self)
    }

    /// Number of children. Zero for anything but an S-expression.
    pub fn len(&self) -> usize {
        self.cells().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn cells(&self) -> &[Value] {
        match self {
            Value::SExpr(cells) => cells,
            _ => &[],
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn into_result(self) -> LispResult<Value> {
        match self {
            Value::Error(err) => Err(err),
            v => Ok(v),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::sexpr()
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.pr_str())
    }
}

impl From<LispErr> for Value {
    fn from(err: LispErr) -> Self {
        Value::error(err)
    }
}
