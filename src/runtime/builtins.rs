use crate::runtime::{
    error::{RuntimeError, RuntimeResult},
    platform::Platform,
    value::{format_number, Value},
};
use std::io::{self, Write};

/// Writes the print form of `value`. Strings go out as raw bytes.
pub fn write_value<W: Write + ?Sized>(out: &mut W, value: &Value) -> io::Result<()> {
    match value {
        Value::Nil => out.write_all(b"nil"),
        Value::Bool(b) => out.write_all(if *b { "true" } else { "false" }.as_bytes()),
        Value::Number(n) => out.write_all(format_number(*n).as_bytes()),
        Value::String(s) => out.write_all(s.as_bytes()),
        Value::Function(_) => out.write_all(b"<function>"),
    }
}

pub fn print(platform: &dyn Platform, value: &Value) {
    emit(platform, value, false);
}

pub fn println(platform: &dyn Platform, value: &Value) {
    emit(platform, value, true);
}

fn emit(platform: &dyn Platform, value: &Value, newline: bool) {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_value(&mut buffer, value);
    if newline {
        buffer.push(b'\n');
    }
    platform.write_out(&buffer);
    platform.flush_out();
}

/// Byte length of a string.
pub fn len(value: &Value) -> RuntimeResult<Value> {
    match value {
        Value::String(s) => Ok(Value::Number(s.len() as f64)),
        other => Err(RuntimeError::LenMismatch {
            found: other.type_name(),
        }),
    }
}

pub fn type_of(value: &Value) -> Value {
    Value::string(value.type_name())
}
