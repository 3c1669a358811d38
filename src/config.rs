/// Application-level constants
pub const APP_NAME: &str = "Briefscope";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default tracing filter applied when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("warn,{}=info", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_name_is_briefscope() {
        assert_eq!(APP_NAME, "Briefscope");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.3.0");
    }

    #[test]
    fn default_filter_scopes_crate_to_info() {
        assert_eq!(default_log_filter(), "warn,briefscope=info");
    }
}
