//! 把外部响应中的原始值转换为字符串字段

use serde_json::Value;

use crate::errors::{IpInfoError, Result};

/// Render one raw response value as a record field.
///
/// Missing values become the empty string. Booleans are rejected even though JSON
/// tooling would happily print them: `true` is not a network or an AS number.
pub fn to_field_string(value: &Value) -> Result<String> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) if n.is_u64() || n.is_i64() => Ok(n.to_string()),
        Value::Bool(b) => Err(IpInfoError::type_error(format!(
            "Boolean value {} is not a valid field value",
            b
        ))),
        Value::Number(n) => Err(IpInfoError::type_error(format!(
            "Non-integer number {} is not a valid field value",
            n
        ))),
        Value::Array(_) | Value::Object(_) => Err(IpInfoError::type_error(
            "Structured value is not a valid field value",
        )),
    }
}
