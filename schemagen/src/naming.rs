//! Identifier conventions for generated code
//!
//! Database identifiers are usually `snake_case`. Generated class and property
//! names keep the underscores and capitalize every segment, so `user_id`
//! becomes `User_Id` rather than `UserId`.

use crate::error::{CodegenError, Result};

/// Upper-case the first character of `input`
///
/// # Examples
///
/// ```
/// # use schemagen::naming::capitalize_first;
/// assert_eq!(capitalize_first("id").unwrap(), "Id");
/// assert_eq!(capitalize_first("Name").unwrap(), "Name");
/// assert!(capitalize_first("").is_err());
/// ```
///
/// # Errors
///
/// Returns [`CodegenError::InvalidArgument`] if `input` is empty.
pub fn capitalize_first(input: &str) -> Result<String> {
    let mut chars = input.chars();
    let first = chars
        .next()
        .ok_or_else(|| CodegenError::InvalidArgument("cannot capitalize an empty string".into()))?;

    Ok(first.to_uppercase().chain(chars).collect())
}

/// Convert a database identifier into a class name
///
/// Splits on `_`, capitalizes each segment and joins the segments back with
/// `_`. Empty segments are kept as they are.
///
/// # Examples
///
/// ```
/// # use schemagen::naming::to_class_name;
/// assert_eq!(to_class_name("user_id").unwrap(), "User_Id");
/// assert_eq!(to_class_name("a_b_c").unwrap(), "A_B_C");
/// assert_eq!(to_class_name("Foo").unwrap(), "Foo");
/// ```
///
/// # Errors
///
/// Returns [`CodegenError::InvalidArgument`] if `input` is empty.
pub fn to_class_name(input: &str) -> Result<String> {
    if input.is_empty() {
        return Err(CodegenError::InvalidArgument(
            "cannot derive a class name from an empty identifier".into(),
        ));
    }

    let segments = input
        .split('_')
        .map(|segment| {
            if segment.is_empty() {
                Ok(String::new())
            } else {
                capitalize_first(segment)
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(segments.join("_"))
}

/// Property name for a column: [`capitalize_first`] followed by [`to_class_name`]
///
/// # Errors
///
/// Returns [`CodegenError::InvalidArgument`] if `column` is empty.
pub fn to_property_name(column: &str) -> Result<String> {
    to_class_name(&capitalize_first(column)?)
}
