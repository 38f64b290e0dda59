//! Native functions available to every program.

use std::{fmt, io::Write};

use crate::errors::errors::{Error, ErrorImpl};

use super::value::Value;

pub type NativeFunction = fn(&mut dyn Write, Vec<Value>) -> Result<Value, Error>;

pub struct NativeFn {
    pub name: String,
    pub arity: usize,
    pub func: NativeFunction,
}

impl NativeFn {
    pub fn execute(&self, output: &mut dyn Write, arguments: Vec<Value>) -> Result<Value, Error> {
        (self.func)(output, arguments)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<native {}/{}>", self.name, self.arity)
    }
}

pub fn get_native_funcs() -> Vec<NativeFn> {
    vec![NativeFn {
        name: "print".to_owned(),
        arity: 1,
        func: print,
    }]
}

/// Writes the text form of its argument and a newline.
fn print(output: &mut dyn Write, arguments: Vec<Value>) -> Result<Value, Error> {
    for argument in arguments {
        writeln!(output, "{}", argument).map_err(|error| {
            Error::unpositioned(ErrorImpl::Output {
                message: error.to_string(),
            })
        })?;
    }

    Ok(Value::Nil)
}
