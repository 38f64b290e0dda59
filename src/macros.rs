//! Utility macros.
//!
//! - `MK_TOKEN!` - Creates a Token instance spanning `[start, end)`

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's source text
/// * `$start` - Byte offset of the first character
/// * `$end` - Byte offset just past the token
/// * `$file` - The `Rc<String>` source name
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), 0, 2, file);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $start:expr, $end:expr, $file:expr) => {{
        let value: String = $value;
        Token {
            kind: $kind,
            span: Span {
                start: Position($start as u32, Rc::clone(&$file)),
                end: Position($end as u32, Rc::clone(&$file)),
            },
            value,
        }
    }};
}
