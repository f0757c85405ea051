use crate::runtime::{
    error::{RuntimeError, RuntimeResult},
    value::{Value, YarString},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    And,
    Or,
}

impl BinaryOp {
    /// Verb used in type-mismatch diagnostics.
    pub fn verb(self) -> &'static str {
        match self {
            BinaryOp::Add => "add",
            BinaryOp::Sub => "subtract",
            BinaryOp::Mul => "multiply",
            BinaryOp::Div => "divide",
            BinaryOp::Rem => "modulo",
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Lt
            | BinaryOp::Gt
            | BinaryOp::LtEq
            | BinaryOp::GtEq => "compare",
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
}

pub fn eval_binary(op: BinaryOp, left: &Value, right: &Value) -> RuntimeResult<Value> {
    use BinaryOp::*;
    match op {
        Add => add(left, right),
        Sub | Mul | Div | Rem => eval_numeric(op, left, right),
        Eq => Ok(Value::Bool(values_equal(left, right))),
        NotEq => Ok(Value::Bool(!values_equal(left, right))),
        Lt => eval_compare(op, left, right, |a, b| a < b),
        Gt => eval_compare(op, left, right, |a, b| a > b),
        LtEq => eval_compare(op, left, right, |a, b| a <= b),
        GtEq => eval_compare(op, left, right, |a, b| a >= b),
        And => Ok(Value::Bool(left.is_truthy() && right.is_truthy())),
        Or => Ok(Value::Bool(left.is_truthy() || right.is_truthy())),
    }
}

pub fn eval_unary(op: UnaryOp, operand: &Value) -> RuntimeResult<Value> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Neg => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(RuntimeError::unary("negate", other.type_name())),
        },
    }
}

pub fn add(left: &Value, right: &Value) -> RuntimeResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(a), Value::String(b)) => Ok(Value::String(YarString::concat(a, b))),
        _ => Err(mismatch(BinaryOp::Add, left, right)),
    }
}

pub fn subtract(left: &Value, right: &Value) -> RuntimeResult<Value> {
    eval_numeric(BinaryOp::Sub, left, right)
}

pub fn multiply(left: &Value, right: &Value) -> RuntimeResult<Value> {
    eval_numeric(BinaryOp::Mul, left, right)
}

pub fn divide(left: &Value, right: &Value) -> RuntimeResult<Value> {
    eval_numeric(BinaryOp::Div, left, right)
}

/// Both operands are truncated toward zero before the remainder is taken,
/// so `7.9 % 2.5` is `7 % 2`.
pub fn modulo(left: &Value, right: &Value) -> RuntimeResult<Value> {
    eval_numeric(BinaryOp::Rem, left, right)
}

pub fn equal(left: &Value, right: &Value) -> Value {
    Value::Bool(values_equal(left, right))
}

pub fn not_equal(left: &Value, right: &Value) -> Value {
    Value::Bool(!values_equal(left, right))
}

pub fn less(left: &Value, right: &Value) -> RuntimeResult<Value> {
    eval_binary(BinaryOp::Lt, left, right)
}

pub fn greater(left: &Value, right: &Value) -> RuntimeResult<Value> {
    eval_binary(BinaryOp::Gt, left, right)
}

pub fn less_equal(left: &Value, right: &Value) -> RuntimeResult<Value> {
    eval_binary(BinaryOp::LtEq, left, right)
}

pub fn greater_equal(left: &Value, right: &Value) -> RuntimeResult<Value> {
    eval_binary(BinaryOp::GtEq, left, right)
}

pub fn and(left: &Value, right: &Value) -> Value {
    Value::Bool(left.is_truthy() && right.is_truthy())
}

pub fn or(left: &Value, right: &Value) -> Value {
    Value::Bool(left.is_truthy() || right.is_truthy())
}

pub fn not(operand: &Value) -> Value {
    Value::Bool(!operand.is_truthy())
}

pub fn negate(operand: &Value) -> RuntimeResult<Value> {
    eval_unary(UnaryOp::Neg, operand)
}

/// Tags must match first. Function values never compare equal, not even to
/// themselves.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Nil, Value::Nil) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::String(a), Value::String(b)) => a.as_bytes() == b.as_bytes(),
        (Value::Function(_), Value::Function(_)) => false,
        _ => false,
    }
}

fn eval_numeric(op: BinaryOp, left: &Value, right: &Value) -> RuntimeResult<Value> {
    let (a, b) = match (left, right) {
        (Value::Number(a), Value::Number(b)) => (*a, *b),
        _ => return Err(mismatch(op, left, right)),
    };
    match op {
        BinaryOp::Sub => Ok(Value::Number(a - b)),
        BinaryOp::Mul => Ok(Value::Number(a * b)),
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(Value::Number(a / b))
        }
        BinaryOp::Rem => {
            // `as` saturates: NaN becomes 0 and infinities clamp to the i64 range.
            let (lhs, rhs) = (a as i64, b as i64);
            if rhs == 0 {
                return Err(RuntimeError::DivisionByZero);
            }
            Ok(Value::Number(lhs.wrapping_rem(rhs) as f64))
        }
        _ => unreachable!("{op:?} is not an arithmetic operator"),
    }
}

fn eval_compare<F>(op: BinaryOp, left: &Value, right: &Value, cmp: F) -> RuntimeResult<Value>
where
    F: Fn(f64, f64) -> bool,
{
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Bool(cmp(*a, *b))),
        _ => Err(mismatch(op, left, right)),
    }
}

fn mismatch(op: BinaryOp, left: &Value, right: &Value) -> RuntimeError {
    RuntimeError::binary(op.verb(), left.type_name(), right.type_name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    fn num(n: f64) -> Value {
        Value::number(n)
    }

    fn expect_number(value: RuntimeResult<Value>) -> f64 {
        match value {
            Ok(Value::Number(n)) => n,
            other => panic!("expected number, got {other:?}"),
        }
    }

    fn expect_bool(value: RuntimeResult<Value>) -> bool {
        match value {
            Ok(Value::Bool(b)) => b,
            other => panic!("expected bool, got {other:?}"),
        }
    }

    #[test]
    fn adds_numbers_and_strings() {
        assert_eq!(expect_number(add(&num(2.0), &num(3.0))), 5.0);
        let joined = add(&Value::string("ab"), &Value::string("cd")).expect("concat");
        assert_eq!(joined.as_bytes(), Some(&b"abcd"[..]));
    }

    #[test]
    fn add_rejects_mixed_operands() {
        let err = add(&num(1.0), &Value::string("x")).unwrap_err();
        assert_eq!(err.to_string(), "Cannot add number and string");
    }

    #[test]
    fn arithmetic_follows_ieee() {
        assert_eq!(expect_number(subtract(&num(1.5), &num(4.0))), -2.5);
        assert_eq!(expect_number(multiply(&num(3.0), &num(-2.0))), -6.0);
        assert_eq!(expect_number(divide(&num(7.0), &num(2.0))), 3.5);
        assert!(expect_number(subtract(&num(f64::INFINITY), &num(f64::INFINITY))).is_nan());
    }

    #[test]
    fn arithmetic_type_errors_name_both_operands() {
        let err = multiply(&Value::nil(), &num(1.0)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot multiply nil and number");
        let err = subtract(&Value::string("a"), &Value::string("b")).unwrap_err();
        assert_eq!(err.to_string(), "Cannot subtract string and string");
        let err = divide(&Value::bool(true), &num(0.0)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot divide bool and number");
    }

    #[test]
    fn division_by_zero_is_checked_first() {
        assert_eq!(
            divide(&num(10.0), &num(0.0)).unwrap_err(),
            RuntimeError::DivisionByZero
        );
        assert_eq!(
            divide(&num(10.0), &num(-0.0)).unwrap_err(),
            RuntimeError::DivisionByZero
        );
    }

    #[test]
    fn modulo_truncates_operands() {
        assert_eq!(expect_number(modulo(&num(7.9), &num(2.5))), 1.0);
        assert_eq!(expect_number(modulo(&num(-7.0), &num(3.0))), -1.0);
        assert_eq!(expect_number(modulo(&num(i64::MIN as f64), &num(-1.0))), 0.0);
    }

    #[test]
    fn modulo_by_truncated_zero_fails() {
        assert_eq!(
            modulo(&num(5.0), &num(0.4)).unwrap_err(),
            RuntimeError::DivisionByZero
        );
        let err = modulo(&Value::string("5"), &num(2.0)).unwrap_err();
        assert_eq!(err.to_string(), "Cannot modulo string and number");
    }

    #[test]
    fn equality_is_structural() {
        assert!(values_equal(&Value::nil(), &Value::nil()));
        assert!(values_equal(&Value::bool(true), &Value::bool(true)));
        assert!(!values_equal(&Value::bool(true), &Value::bool(false)));
        assert!(values_equal(&num(1.0), &num(1.0)));
        assert!(values_equal(&Value::string("x"), &Value::string("x")));
        assert!(!values_equal(&Value::string("x"), &Value::string("y")));
        assert!(!values_equal(&num(0.0), &Value::bool(false)));
        assert!(!values_equal(&Value::nil(), &Value::bool(false)));
    }

    #[test]
    fn nan_and_functions_never_equal_themselves() {
        let nan = num(f64::NAN);
        assert!(!values_equal(&nan, &nan));
        let func = Value::function(ptr::null(), true, 1);
        assert!(!values_equal(&func, &func));
        assert!(matches!(not_equal(&func, &func), Value::Bool(true)));
    }

    #[test]
    fn equality_is_symmetric() {
        let values = [
            Value::nil(),
            Value::bool(false),
            num(3.0),
            Value::string("3"),
        ];
        for a in &values {
            for b in &values {
                assert_eq!(values_equal(a, b), values_equal(b, a));
            }
        }
    }

    #[test]
    fn comparisons_require_numbers() {
        assert!(expect_bool(less(&num(1.0), &num(2.0))));
        assert!(!expect_bool(greater(&num(1.0), &num(2.0))));
        assert!(expect_bool(less_equal(&num(2.0), &num(2.0))));
        assert!(expect_bool(greater_equal(&num(2.0), &num(2.0))));
        assert!(!expect_bool(less(&num(f64::NAN), &num(1.0))));
        let err = less(&Value::string("a"), &Value::string("b")).unwrap_err();
        assert_eq!(err.to_string(), "Cannot compare string and string");
    }

    #[test]
    fn logical_operators_use_truthiness() {
        assert!(matches!(and(&num(0.0), &Value::string("")), Value::Bool(true)));
        assert!(matches!(and(&num(0.0), &Value::nil()), Value::Bool(false)));
        assert!(matches!(or(&Value::nil(), &Value::bool(false)), Value::Bool(false)));
        assert!(matches!(or(&Value::nil(), &num(0.0)), Value::Bool(true)));
        assert!(matches!(not(&Value::nil()), Value::Bool(true)));
        assert!(matches!(not(&num(0.0)), Value::Bool(false)));
    }

    #[test]
    fn negate_only_accepts_numbers() {
        assert_eq!(expect_number(negate(&num(4.0))), -4.0);
        let err = negate(&Value::string("4")).unwrap_err();
        assert_eq!(err.to_string(), "Cannot negate string");
    }

    #[test]
    fn dispatch_table_matches_named_operators() {
        assert_eq!(
            expect_number(eval_binary(BinaryOp::Add, &num(1.0), &num(2.0))),
            3.0
        );
        assert!(expect_bool(eval_binary(BinaryOp::NotEq, &num(1.0), &Value::nil())));
        assert!(expect_bool(eval_unary(UnaryOp::Not, &Value::bool(false))));
    }
}
