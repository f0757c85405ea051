#![allow(unsafe_op_in_unsafe_fn)]

// C ABI consumed by generated code. Every value crosses the boundary as a
// `YarHandle` into the calling thread's region heap; a null handle reads as
// nil. Operators and built-ins that fail never return: the error goes to the
// fatal channel and the process exits with status 1.

use crate::diagnostics::{fatal, or_fatal, panic_exit};
use crate::runtime::{
    builtins,
    error::{RuntimeError, RuntimeResult},
    format::render_template,
    heap::{self, NIL},
    ops,
    platform::platform,
    value::{Value, TYPE_BOOL, TYPE_FUNCTION, TYPE_NIL, TYPE_NUMBER, TYPE_STRING},
};
use std::ffi::{c_char, c_int, c_void, CStr};
use std::{ptr, slice};

#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YarHandle(pub *const Value);

impl YarHandle {
    pub const fn null() -> Self {
        Self(ptr::null())
    }

    pub fn is_null(self) -> bool {
        self.0.is_null()
    }

    /// # Safety
    /// A non-null handle must have been produced by this runtime on the
    /// current thread.
    pub unsafe fn value<'a>(self) -> &'a Value {
        if self.0.is_null() {
            &NIL
        } else {
            &*self.0
        }
    }
}

/// Calling convention of a function value whose `is_native` flag is set.
pub type NativeFn = unsafe extern "C" fn(argc: c_int, argv: *const YarHandle) -> YarHandle;

fn publish(value: Value) -> YarHandle {
    YarHandle(heap::publish(value))
}

unsafe fn binary(
    a: YarHandle,
    b: YarHandle,
    op: fn(&Value, &Value) -> RuntimeResult<Value>,
) -> YarHandle {
    publish(or_fatal(op(a.value(), b.value())))
}

unsafe fn c_str_bytes<'a>(text: *const c_char) -> &'a [u8] {
    if text.is_null() {
        &[]
    } else {
        CStr::from_ptr(text).to_bytes()
    }
}

unsafe fn handles<'a>(argv: *const YarHandle, argc: usize) -> &'a [YarHandle] {
    if argv.is_null() || argc == 0 {
        &[]
    } else {
        slice::from_raw_parts(argv, argc)
    }
}

fn type_label_c(tag: u32) -> &'static CStr {
    match tag {
        TYPE_NIL => c"nil",
        TYPE_BOOL => c"bool",
        TYPE_NUMBER => c"number",
        TYPE_STRING => c"string",
        TYPE_FUNCTION => c"function",
        _ => c"unknown",
    }
}

// Constructors.

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_nil() -> YarHandle {
    YarHandle(&NIL)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_bool(value: bool) -> YarHandle {
    publish(Value::Bool(value))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_number(value: f64) -> YarHandle {
    publish(Value::Number(value))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_string(text: *const c_char) -> YarHandle {
    publish(Value::string(c_str_bytes(text)))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_string_len(data: *const u8, len: usize) -> YarHandle {
    if data.is_null() || len == 0 {
        return publish(Value::string(b""));
    }
    publish(Value::string(slice::from_raw_parts(data, len)))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_function(entry: *const c_void, is_native: bool, arity: c_int) -> YarHandle {
    publish(Value::function(entry, is_native, arity))
}

// Predicates.

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_is_nil(value: YarHandle) -> bool {
    value.value().is_nil()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_is_bool(value: YarHandle) -> bool {
    value.value().is_bool()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_is_number(value: YarHandle) -> bool {
    value.value().is_number()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_is_string(value: YarHandle) -> bool {
    value.value().is_string()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_is_function(value: YarHandle) -> bool {
    value.value().is_function()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_is_truthy(value: YarHandle) -> bool {
    value.value().is_truthy()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_type_name(value: YarHandle) -> *const c_char {
    type_label_c(value.value().tag()).as_ptr()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_type_label(tag: u32) -> *const c_char {
    type_label_c(tag).as_ptr()
}

// Operators.

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_add(a: YarHandle, b: YarHandle) -> YarHandle {
    binary(a, b, ops::add)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_subtract(a: YarHandle, b: YarHandle) -> YarHandle {
    binary(a, b, ops::subtract)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_multiply(a: YarHandle, b: YarHandle) -> YarHandle {
    binary(a, b, ops::multiply)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_divide(a: YarHandle, b: YarHandle) -> YarHandle {
    binary(a, b, ops::divide)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_modulo(a: YarHandle, b: YarHandle) -> YarHandle {
    binary(a, b, ops::modulo)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_eq(a: YarHandle, b: YarHandle) -> YarHandle {
    publish(ops::equal(a.value(), b.value()))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_neq(a: YarHandle, b: YarHandle) -> YarHandle {
    publish(ops::not_equal(a.value(), b.value()))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_lt(a: YarHandle, b: YarHandle) -> YarHandle {
    binary(a, b, ops::less)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_gt(a: YarHandle, b: YarHandle) -> YarHandle {
    binary(a, b, ops::greater)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_lte(a: YarHandle, b: YarHandle) -> YarHandle {
    binary(a, b, ops::less_equal)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_gte(a: YarHandle, b: YarHandle) -> YarHandle {
    binary(a, b, ops::greater_equal)
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_and(a: YarHandle, b: YarHandle) -> YarHandle {
    publish(ops::and(a.value(), b.value()))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_or(a: YarHandle, b: YarHandle) -> YarHandle {
    publish(ops::or(a.value(), b.value()))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_not(value: YarHandle) -> YarHandle {
    publish(ops::not(value.value()))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_negate(value: YarHandle) -> YarHandle {
    publish(or_fatal(ops::negate(value.value())))
}

// Built-ins.

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_print(value: YarHandle) {
    builtins::print(platform(), value.value());
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_println(value: YarHandle) {
    builtins::println(platform(), value.value());
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_len(value: YarHandle) -> YarHandle {
    publish(or_fatal(builtins::len(value.value())))
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_type(value: YarHandle) -> YarHandle {
    publish(builtins::type_of(value.value()))
}

// Diagnostics.

#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_error(message: *const c_char) -> ! {
    let message = String::from_utf8_lossy(c_str_bytes(message));
    fatal(RuntimeError::user(message))
}

/// Variadic arguments arrive as an array of value handles.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn yar_errorf(fmt: *const c_char, argv: *const YarHandle, argc: usize) -> ! {
    let template = String::from_utf8_lossy(c_str_bytes(fmt));
    let args: Vec<&Value> = handles(argv, argc)
        .iter()
        .map(|handle| handle.value())
        .collect();
    fatal(RuntimeError::user(render_template(&template, &args)))
}

// Console helpers, independent of the value model.

#[unsafe(export_name = "println")]
pub unsafe extern "C" fn yar_console_println(message: *const c_char) {
    let mut line = c_str_bytes(message).to_vec();
    line.push(b'\n');
    platform().write_out(&line);
    platform().flush_out();
}

#[unsafe(export_name = "println_i32")]
pub unsafe extern "C" fn yar_console_println_i32(value: i32) {
    platform().write_out(format!("{value}\n").as_bytes());
    platform().flush_out();
}

#[unsafe(export_name = "println_bool")]
pub unsafe extern "C" fn yar_console_println_bool(value: bool) {
    let line: &[u8] = if value { b"true\n" } else { b"false\n" };
    platform().write_out(line);
    platform().flush_out();
}

#[unsafe(export_name = "panic")]
pub unsafe extern "C" fn yar_console_panic(message: *const c_char) -> ! {
    panic_exit(&String::from_utf8_lossy(c_str_bytes(message)))
}
