//! String-case filters available to every template.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tera::{Tera, Value};

/// Lowercase letter or digit followed by an uppercase letter
static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("valid camel boundary pattern"));

/// Runs of anything that cannot appear in an HCL identifier or resource name
static SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid separator pattern"));

/// `myFunction_name` -> `my-function-name`
pub fn kebab_case(input: &str) -> String {
    separated_lowercase(input, "-")
}

/// `myFunction-name` -> `my_function_name`
pub fn snake_case(input: &str) -> String {
    separated_lowercase(input, "_")
}

/// `my-function_name` -> `MyFunctionName`
pub fn pascal_case(input: &str) -> String {
    input
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

fn separated_lowercase(input: &str, separator: &str) -> String {
    let split = CAMEL_BOUNDARY.replace_all(input.trim(), "${1} ${2}");
    SEPARATORS
        .replace_all(&split, separator)
        .trim_matches(|c| c == '-' || c == '_')
        .to_lowercase()
}

/// Register `kebab_case`, `snake_case` and `pascal_case` on an engine
pub fn register(tera: &mut Tera) {
    tera.register_filter("kebab_case", kebab_case_filter);
    tera.register_filter("snake_case", snake_case_filter);
    tera.register_filter("pascal_case", pascal_case_filter);
}

fn kebab_case_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(kebab_case(string_arg("kebab_case", value)?)))
}

fn snake_case_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(snake_case(string_arg("snake_case", value)?)))
}

fn pascal_case_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(pascal_case(string_arg("pascal_case", value)?)))
}

fn string_arg<'a>(filter: &str, value: &'a Value) -> tera::Result<&'a str> {
    value.as_str().ok_or_else(|| {
        tera::Error::msg(format!(
            "Filter `{}` expects a string, got {}",
            filter, value
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kebab_case() {
        assert_eq!(kebab_case("myFunction"), "my-function");
        assert_eq!(kebab_case("my_function name"), "my-function-name");
        assert_eq!(kebab_case("already-kebab"), "already-kebab");
        assert_eq!(kebab_case("api2Gateway"), "api2-gateway");
        assert_eq!(kebab_case("--Edge__Case--"), "edge-case");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("myFunction"), "my_function");
        assert_eq!(snake_case("my-bucket"), "my_bucket");
        assert_eq!(snake_case("Web Server"), "web_server");
        assert_eq!(snake_case("api.v2"), "api_v2");
        assert_eq!(snake_case("café@home"), "caf_home");
        assert_eq!(snake_case("--"), "");
        assert_eq!(snake_case(""), "");
    }

    #[test]
    fn test_pascal_case() {
        assert_eq!(pascal_case("my-function"), "MyFunction");
        assert_eq!(pascal_case("my_function name"), "MyFunctionName");
        assert_eq!(pascal_case("apiGateway"), "ApiGateway");
        assert_eq!(pascal_case("api.v2"), "ApiV2");
        assert_eq!(pascal_case(""), "");
    }

    #[test]
    fn test_filters_reject_non_strings() {
        let args = HashMap::new();
        assert!(kebab_case_filter(&Value::from(3), &args).is_err());
        assert_eq!(
            snake_case_filter(&Value::from("fooBar"), &args).unwrap(),
            Value::from("foo_bar")
        );
    }
}
