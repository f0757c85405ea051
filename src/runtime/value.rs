use std::ffi::c_void;
use std::fmt;

pub const TYPE_NIL: u32 = 0;
pub const TYPE_BOOL: u32 = 1;
pub const TYPE_NUMBER: u32 = 2;
pub const TYPE_STRING: u32 = 3;
pub const TYPE_FUNCTION: u32 = 4;

pub const UNKNOWN_TYPE_NAME: &str = "unknown";

#[derive(Clone, Debug)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(YarString),
    Function(FunctionValue),
}

impl Value {
    pub fn nil() -> Self {
        Value::Nil
    }

    pub fn bool(value: bool) -> Self {
        Value::Bool(value)
    }

    pub fn number(value: f64) -> Self {
        Value::Number(value)
    }

    pub fn string(bytes: impl AsRef<[u8]>) -> Self {
        Value::String(YarString::copy_from(bytes.as_ref()))
    }

    pub fn function(entry: *const c_void, is_native: bool, arity: i32) -> Self {
        Value::Function(FunctionValue::new(entry, is_native, arity))
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Only `nil` and `false` are falsy; `0` and `""` are true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::Number(_) | Value::String(_) | Value::Function(_) => true,
        }
    }

    pub fn tag(&self) -> u32 {
        match self {
            Value::Nil => TYPE_NIL,
            Value::Bool(_) => TYPE_BOOL,
            Value::Number(_) => TYPE_NUMBER,
            Value::String(_) => TYPE_STRING,
            Value::Function(_) => TYPE_FUNCTION,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Function(_) => "function",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::String(s) => Some(s.as_bytes()),
            _ => None,
        }
    }
}

/// Label for a raw tag as it appears on the C side of the boundary.
pub fn type_label(tag: u32) -> &'static str {
    match tag {
        TYPE_NIL => "nil",
        TYPE_BOOL => "bool",
        TYPE_NUMBER => "number",
        TYPE_STRING => "string",
        TYPE_FUNCTION => "function",
        _ => UNKNOWN_TYPE_NAME,
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Number(v) => write!(f, "{}", format_number(*v)),
            Value::String(v) => write!(f, "{v}"),
            Value::Function(_) => write!(f, "<function>"),
        }
    }
}

/// Shortest decimal that reads back to the same double. Integral values
/// print without a fractional part.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "nan".into()
    } else if value.is_infinite() {
        let label = if value > 0.0 { "inf" } else { "-inf" };
        label.into()
    } else {
        format!("{value}")
    }
}

/// Immutable byte string owned by a single [`Value`].
#[derive(Clone, PartialEq, Eq)]
pub struct YarString {
    bytes: Box<[u8]>,
}

impl YarString {
    pub fn copy_from(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec().into_boxed_slice(),
        }
    }

    pub fn concat(left: &YarString, right: &YarString) -> Self {
        let mut bytes = Vec::with_capacity(left.len() + right.len());
        bytes.extend_from_slice(&left.bytes);
        bytes.extend_from_slice(&right.bytes);
        Self {
            bytes: bytes.into_boxed_slice(),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Display for YarString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.bytes))
    }
}

impl fmt::Debug for YarString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", String::from_utf8_lossy(&self.bytes))
    }
}

/// Opaque code address carried by a function value. Never dereferenced by
/// the runtime itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FnEntry(pub *const c_void);

unsafe impl Send for FnEntry {}
unsafe impl Sync for FnEntry {}

#[derive(Clone, Debug)]
pub struct FunctionValue {
    pub entry: FnEntry,
    pub is_native: bool,
    pub arity: i32,
}

impl FunctionValue {
    pub fn new(entry: *const c_void, is_native: bool, arity: i32) -> Self {
        Self {
            entry: FnEntry(entry),
            is_native,
            arity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ptr;

    fn samples() -> Vec<(Value, &'static str)> {
        vec![
            (Value::nil(), "nil"),
            (Value::bool(true), "bool"),
            (Value::number(0.0), "number"),
            (Value::string(""), "string"),
            (Value::function(ptr::null(), false, 2), "function"),
        ]
    }

    #[test]
    fn only_matching_predicate_holds() {
        for (value, name) in samples() {
            assert_eq!(value.type_name(), name);
            let flags = [
                value.is_nil(),
                value.is_bool(),
                value.is_number(),
                value.is_string(),
                value.is_function(),
            ];
            assert_eq!(flags.iter().filter(|flag| **flag).count(), 1, "{name}");
            assert_eq!(type_label(value.tag()), name);
        }
    }

    #[test]
    fn zero_and_empty_string_are_truthy() {
        assert!(!Value::nil().is_truthy());
        assert!(!Value::bool(false).is_truthy());
        assert!(Value::bool(true).is_truthy());
        assert!(Value::number(0.0).is_truthy());
        assert!(Value::string("").is_truthy());
        assert!(Value::function(ptr::null(), true, 0).is_truthy());
    }

    #[test]
    fn unknown_tags_have_a_label() {
        assert_eq!(type_label(42), "unknown");
    }

    #[test]
    fn string_construction_copies_input() {
        let mut source = b"abc".to_vec();
        let value = Value::string(&source);
        source[0] = b'z';
        assert_eq!(value.as_bytes(), Some(&b"abc"[..]));
    }

    #[test]
    fn numbers_render_shortest_form() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(f64::NAN), "nan");
        assert_eq!(format_number(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn display_uses_print_forms() {
        assert_eq!(Value::nil().to_string(), "nil");
        assert_eq!(Value::bool(false).to_string(), "false");
        assert_eq!(Value::string("hi").to_string(), "hi");
        assert_eq!(
            Value::function(ptr::null(), false, 0).to_string(),
            "<function>"
        );
    }
}
