use std::fmt::Display;

use thiserror::Error;

use crate::Position;

/// Phase of the pipeline an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Lex,
    Parse,
    Semantic,
    Runtime,
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Lex => write!(f, "LexError"),
            Phase::Parse => write!(f, "ParseError"),
            Phase::Semantic => write!(f, "SemanticError"),
            Phase::Runtime => write!(f, "RuntimeError"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Option<Position>,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position: Some(position),
        }
    }

    /// An error with no known source position.
    pub fn unpositioned(error_impl: ErrorImpl) -> Self {
        Error {
            internal_error: error_impl,
            position: None,
        }
    }

    /// Attaches `position` unless the error already has one.
    pub fn with_position(mut self, position: &Position) -> Self {
        if self.position.is_none() {
            self.position = Some(position.clone());
        }
        self
    }

    pub fn get_position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn get_offset(&self) -> Option<u32> {
        self.position.as_ref().map(|position| position.0)
    }

    pub fn get_impl(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_phase(&self) -> Phase {
        match &self.internal_error {
            ErrorImpl::UnterminatedString
            | ErrorImpl::UnterminatedCharacter
            | ErrorImpl::InvalidEscape { .. }
            | ErrorImpl::NewlineInLiteral
            | ErrorImpl::MalformedCharacter
            | ErrorImpl::ExpectedDigit => Phase::Lex,
            ErrorImpl::UnexpectedToken { .. }
            | ErrorImpl::UnexpectedTokenDetailed { .. }
            | ErrorImpl::UnexpectedEndOfInput { .. }
            | ErrorImpl::NumberParseError { .. }
            | ErrorImpl::InvalidAssignmentTarget => Phase::Parse,
            ErrorImpl::VariableAlreadyDeclared { .. }
            | ErrorImpl::VariableNotDeclared { .. }
            | ErrorImpl::FunctionAlreadyDeclared { .. }
            | ErrorImpl::FunctionNotDeclared { .. }
            | ErrorImpl::UnknownType { .. }
            | ErrorImpl::TypeMatchError { .. }
            | ErrorImpl::ArgumentTypeMatchError { .. }
            | ErrorImpl::InvalidOperands { .. }
            | ErrorImpl::ImmutableAssignment { .. }
            | ErrorImpl::ExpectedExplicitValue { .. }
            | ErrorImpl::GroupWithoutBinary
            | ErrorImpl::ExpressionNotCall
            | ErrorImpl::MissingMain
            | ErrorImpl::InvalidMainReturn { .. } => Phase::Semantic,
            ErrorImpl::RuntimeTypeError { .. }
            | ErrorImpl::IllegalOperation { .. }
            | ErrorImpl::DivideByZero
            | ErrorImpl::IndexOutOfBounds { .. }
            | ErrorImpl::IntegerOverflow
            | ErrorImpl::DecimalOverflow
            | ErrorImpl::UndefinedVariable { .. }
            | ErrorImpl::UndefinedFunction { .. }
            | ErrorImpl::ImmutableVariable { .. }
            | ErrorImpl::Output { .. } => Phase::Runtime,
        }
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::UnterminatedCharacter => "UnterminatedCharacter",
            ErrorImpl::InvalidEscape { .. } => "InvalidEscape",
            ErrorImpl::NewlineInLiteral => "NewlineInLiteral",
            ErrorImpl::MalformedCharacter => "MalformedCharacter",
            ErrorImpl::ExpectedDigit => "ExpectedDigit",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::InvalidAssignmentTarget => "InvalidAssignmentTarget",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::ArgumentTypeMatchError { .. } => "ArgumentTypeMatchError",
            ErrorImpl::InvalidOperands { .. } => "InvalidOperands",
            ErrorImpl::ImmutableAssignment { .. } => "ImmutableAssignment",
            ErrorImpl::ExpectedExplicitValue { .. } => "ExpectedExplicitValue",
            ErrorImpl::GroupWithoutBinary => "GroupWithoutBinary",
            ErrorImpl::ExpressionNotCall => "ExpressionNotCall",
            ErrorImpl::MissingMain => "MissingMain",
            ErrorImpl::InvalidMainReturn { .. } => "InvalidMainReturn",
            ErrorImpl::RuntimeTypeError { .. } => "RuntimeTypeError",
            ErrorImpl::IllegalOperation { .. } => "IllegalOperation",
            ErrorImpl::DivideByZero => "DivideByZero",
            ErrorImpl::IndexOutOfBounds { .. } => "IndexOutOfBounds",
            ErrorImpl::IntegerOverflow => "IntegerOverflow",
            ErrorImpl::DecimalOverflow => "DecimalOverflow",
            ErrorImpl::UndefinedVariable { .. } => "UndefinedVariable",
            ErrorImpl::UndefinedFunction { .. } => "UndefinedFunction",
            ErrorImpl::ImmutableVariable { .. } => "ImmutableVariable",
            ErrorImpl::Output { .. } => "Output",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => {
                ErrorTip::Suggestion(String::from("String literal is missing its closing `\"`"))
            }
            ErrorImpl::UnterminatedCharacter => {
                ErrorTip::Suggestion(String::from("Character literal is missing its closing `'`"))
            }
            ErrorImpl::InvalidEscape { escape } => ErrorTip::Suggestion(format!(
                "Invalid escape `\\{}`, expected one of \\b \\n \\r \\t \\' \\\" \\\\",
                escape
            )),
            ErrorImpl::NewlineInLiteral => ErrorTip::Suggestion(String::from(
                "Literals cannot span lines, use `\\n` instead",
            )),
            ErrorImpl::MalformedCharacter => ErrorTip::Suggestion(String::from(
                "Character literals hold exactly one character",
            )),
            ErrorImpl::ExpectedDigit => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                token
            )),
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::UnexpectedEndOfInput { expected } => {
                ErrorTip::Suggestion(format!("Input ended while expecting {}", expected))
            }
            ErrorImpl::NumberParseError { token } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}`, is it above the integer limit?",
                token
            )),
            ErrorImpl::InvalidAssignmentTarget => ErrorTip::Suggestion(String::from(
                "Only variables and list elements can be assigned to",
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::FunctionAlreadyDeclared { function, arity } => ErrorTip::Suggestion(
                format!("Function `{}/{}` already declared", function, arity),
            ),
            ErrorImpl::FunctionNotDeclared { function, arity } => ErrorTip::Suggestion(format!(
                "Function `{}/{}` not declared",
                function, arity
            )),
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::ArgumentTypeMatchError { expected, received } => {
                ErrorTip::Suggestion(format!(
                    "Expected argument type `{}`, received `{}`",
                    expected, received
                ))
            }
            ErrorImpl::InvalidOperands {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}` and `{}`",
                operator, left, right
            )),
            ErrorImpl::ImmutableAssignment { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` is immutable, declare it with VAR or LET",
                variable
            )),
            ErrorImpl::ExpectedExplicitValue { variable } => ErrorTip::Suggestion(format!(
                "Declaration of `{}` needs a type or an initial value",
                variable
            )),
            ErrorImpl::GroupWithoutBinary => ErrorTip::Suggestion(String::from(
                "Parentheses may only wrap a binary expression",
            )),
            ErrorImpl::ExpressionNotCall => ErrorTip::Suggestion(String::from(
                "Only function calls may be used as statements",
            )),
            ErrorImpl::MissingMain => ErrorTip::Suggestion(String::from(
                "Declare `FUN main(): Integer DO ... END`",
            )),
            ErrorImpl::InvalidMainReturn { received } => ErrorTip::Suggestion(format!(
                "`main` must return `Integer`, found `{}`",
                received
            )),
            ErrorImpl::RuntimeTypeError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected a value of type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::IllegalOperation {
                operator,
                left,
                right,
            } => ErrorTip::Suggestion(format!(
                "Operator `{}` cannot be applied to `{}` and `{}`",
                operator, left, right
            )),
            ErrorImpl::DivideByZero => ErrorTip::None,
            ErrorImpl::IndexOutOfBounds { index, length } => ErrorTip::Suggestion(format!(
                "Index {} is outside a list of length {}",
                index, length
            )),
            ErrorImpl::IntegerOverflow => ErrorTip::Suggestion(String::from(
                "Integer arithmetic overflowed 64 bits",
            )),
            ErrorImpl::DecimalOverflow => ErrorTip::None,
            ErrorImpl::UndefinedVariable { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` is not defined", variable))
            }
            ErrorImpl::UndefinedFunction { function, arity } => ErrorTip::Suggestion(format!(
                "Function `{}/{}` is not defined",
                function, arity
            )),
            ErrorImpl::ImmutableVariable { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` cannot be reassigned", variable))
            }
            ErrorImpl::Output { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.position {
            Some(position) => write!(
                f,
                "{}: {} (at offset {})",
                self.get_phase(),
                self.internal_error,
                position.0
            ),
            None => write!(f, "{}: {}", self.get_phase(), self.internal_error),
        }
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexing
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedCharacter,
    #[error("invalid escape sequence \\{escape}")]
    InvalidEscape { escape: char },
    #[error("newline inside literal")]
    NewlineInLiteral,
    #[error("malformed character literal")]
    MalformedCharacter,
    #[error("expected digit")]
    ExpectedDigit,

    // Parsing
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput { expected: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("invalid assignment target")]
    InvalidAssignmentTarget,

    // Analysis
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("variable {variable:?} not declared")]
    VariableNotDeclared { variable: String },
    #[error("function {function:?} with {arity} parameters already declared")]
    FunctionAlreadyDeclared { function: String, arity: usize },
    #[error("function {function:?} with {arity} parameters not declared")]
    FunctionNotDeclared { function: String, arity: usize },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("argument types do not match: expected {expected}, received {received}")]
    ArgumentTypeMatchError { expected: String, received: String },
    #[error("operator {operator} cannot be applied to {left} and {right}")]
    InvalidOperands {
        operator: String,
        left: String,
        right: String,
    },
    #[error("cannot assign to immutable variable {variable:?}")]
    ImmutableAssignment { variable: String },
    #[error("declaration of {variable:?} has neither a type nor a value")]
    ExpectedExplicitValue { variable: String },
    #[error("grouped expression must be a binary expression")]
    GroupWithoutBinary,
    #[error("expression statement must be a function call")]
    ExpressionNotCall,
    #[error("no main/0 function declared")]
    MissingMain,
    #[error("main/0 must return Integer, found {received}")]
    InvalidMainReturn { received: String },

    // Evaluation
    #[error("expected {expected}, received {received}")]
    RuntimeTypeError { expected: String, received: String },
    #[error("illegal operation {left} {operator} {right}")]
    IllegalOperation {
        operator: String,
        left: String,
        right: String,
    },
    #[error("division by zero")]
    DivideByZero,
    #[error("index {index} out of bounds for length {length}")]
    IndexOutOfBounds { index: i64, length: usize },
    #[error("integer overflow")]
    IntegerOverflow,
    #[error("decimal overflow")]
    DecimalOverflow,
    #[error("variable {variable:?} is not defined")]
    UndefinedVariable { variable: String },
    #[error("function {function:?} with {arity} parameters is not defined")]
    UndefinedFunction { function: String, arity: usize },
    #[error("variable {variable:?} is immutable")]
    ImmutableVariable { variable: String },
    #[error("failed to write output: {message}")]
    Output { message: String },
}
