use cat_env::{CatError, CatResult};
use cat_kernel::Prior;

/// Which estimator a session uses. `Eap` carries the validated prior it
/// quadrates over.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    Mle,
    Eap(Prior),
}

impl Method {
    /// Parse the method name (case-insensitively, per spec §4.5). Does not
    /// build the EAP prior — callers construct a `Prior` separately (it
    /// needs the session's theta bounds) and pass it to [`Method::Eap`].
    pub fn parse_name(s: &str) -> CatResult<MethodName> {
        match s.to_lowercase().as_str() {
            "mle" => Ok(MethodName::Mle),
            "eap" => Ok(MethodName::Eap),
            other => Err(CatError::invalid_config(format!(
                "unknown estimation method '{other}'"
            ))),
        }
    }
}

/// The parsed method name before an EAP prior (if any) is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodName {
    Mle,
    Eap,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!(Method::parse_name("MLE").unwrap(), MethodName::Mle);
        assert_eq!(Method::parse_name("eap").unwrap(), MethodName::Eap);
        assert_eq!(Method::parse_name("Eap").unwrap(), MethodName::Eap);
    }

    #[test]
    fn rejects_unknown_method() {
        assert!(Method::parse_name("map").is_err());
    }
}
