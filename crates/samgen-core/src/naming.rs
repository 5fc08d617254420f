//! Derived resource identifiers.
//!
//! Every declaration generated for an endpoint is addressed as
//! `{Name}{Suffix}`. The base and environment documents reference each
//! other's resources through these names, so both synthesizers must go
//! through this module rather than formatting identifiers themselves.

use once_cell::sync::Lazy;
use regex::Regex;

/// Resource logical ids must be alphanumeric; names feed straight into them.
static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").expect("identifier pattern is valid"));

/// Environment ids end up in a file name and a YAML scalar.
static ENVIRONMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9-]*$").expect("environment pattern is valid"));

/// Whether `s` is usable as (the stem of) a logical id
pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

/// Whether `s` is a plain environment token such as `staging` or `prod-eu`
pub fn is_environment_id(s: &str) -> bool {
    ENVIRONMENT.is_match(s)
}

/// Logical id of the serverless function declaration
pub fn function_id(name: &str) -> String {
    format!("{name}Function")
}

/// Logical id of the routing resource (path segment) declaration
pub fn api_resource_id(name: &str) -> String {
    format!("{name}APIResource")
}

/// Logical id of the routing method declaration
pub fn api_method_id(name: &str) -> String {
    format!("{name}APIMethod")
}

/// Logical id of a numbered function version declaration
pub fn version_id(name: &str, version: i64) -> String {
    format!("{name}Version{version}")
}

/// Logical id of the environment alias declaration
pub fn alias_id(name: &str) -> String {
    format!("{name}Alias")
}

/// Physical function name, `<prefix>-{Name}`
pub fn function_name(prefix: &str, name: &str) -> String {
    format!("{prefix}-{name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_ids() {
        assert_eq!(function_id("CheckStatus"), "CheckStatusFunction");
        assert_eq!(api_resource_id("CheckStatus"), "CheckStatusAPIResource");
        assert_eq!(api_method_id("CheckStatus"), "CheckStatusAPIMethod");
        assert_eq!(version_id("CheckStatus", 11), "CheckStatusVersion11");
        assert_eq!(alias_id("CheckStatus"), "CheckStatusAlias");
        assert_eq!(function_name("nway", "MyIP"), "nway-MyIP");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("nWAYApi"));
        assert!(is_identifier("ProdDeployment2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a b: c"));
        assert!(!is_identifier("2Api"));
    }

    #[test]
    fn test_is_environment_id() {
        assert!(is_environment_id("staging"));
        assert!(is_environment_id("prod-eu1"));
        for bad in ["", "x/../../escaped", "prod: x", "-prod", "..", "prod.yml"] {
            assert!(!is_environment_id(bad), "{bad}");
        }
    }
}
