use num_bigint::BigInt;
use std::fmt;

/// Operation code that marks an insert. Every other code is a remove.
pub const INSERT_CODE: &str = "1";

/// Values are arbitrary-precision integers; traces are not limited to a machine word.
pub type Value = BigInt;

/// A single recorded step of a trace: either a value went in, or a value
/// was observed coming out.
#[derive(PartialEq, Eq, Hash, Debug, Clone)]
pub enum AbstractOp {
    Insert(Value),
    Remove(Value),
}

impl AbstractOp {
    pub fn insert(value: impl Into<Value>) -> Self {
        AbstractOp::Insert(value.into())
    }

    pub fn remove(value: impl Into<Value>) -> Self {
        AbstractOp::Remove(value.into())
    }

    /// Builds an operation from its textual code. The code is compared as a
    /// token, so `"01"` is a remove.
    pub fn from_code(code: &str, value: Value) -> Self {
        if code == INSERT_CODE {
            AbstractOp::Insert(value)
        } else {
            AbstractOp::Remove(value)
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            AbstractOp::Insert(v) | AbstractOp::Remove(v) => v,
        }
    }
}

impl fmt::Display for AbstractOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AbstractOp::Insert(v) => write!(f, "insert {v}"),
            AbstractOp::Remove(v) => write!(f, "remove {v}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_one_is_insert() {
        assert_eq!(
            AbstractOp::from_code("1", 7.into()),
            AbstractOp::insert(7)
        );
    }

    #[test]
    fn test_any_other_code_is_remove() {
        // Codes are matched as text, not as numbers
        assert_eq!(AbstractOp::from_code("2", 7.into()), AbstractOp::remove(7));
        assert_eq!(
            AbstractOp::from_code("01", (-3).into()),
            AbstractOp::remove(-3)
        );
        assert_eq!(AbstractOp::from_code("pop", 0.into()), AbstractOp::remove(0));
    }

    #[test]
    fn test_display() {
        assert_eq!(AbstractOp::insert(4).to_string(), "insert 4");
        assert_eq!(AbstractOp::remove(-1).to_string(), "remove -1");
        assert_eq!(AbstractOp::remove(9).value(), &Value::from(9));
    }
}
