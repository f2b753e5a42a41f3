//! Query-string building
//!
//! Absent parameters are skipped entirely rather than sent empty.

use std::fmt::Display;

#[derive(Debug, Default)]
pub struct Query {
    params: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl Display) {
        self.params.push((key, value.to_string()));
    }

    pub fn push_opt(&mut self, key: &'static str, value: Option<impl Display>) {
        if let Some(value) = value {
            let s = value.to_string();
            if !s.is_empty() {
                self.params.push((key, s));
            }
        }
    }

    /// `?a=1&b=two` with encoded values, or the empty string when nothing
    /// was pushed.
    pub fn build(&self) -> String {
        if self.params.is_empty() {
            return String::new();
        }
        let joined: Vec<String> = self
            .params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect();
        format!("?{}", joined.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_absent_and_empty_params() {
        let mut q = Query::new();
        q.push_opt("search", Some("web server"));
        q.push_opt("ci_type_id", None::<String>);
        q.push_opt("name", Some(""));
        q.push("limit", 50);
        assert_eq!(q.build(), "?search=web%20server&limit=50");
    }

    #[test]
    fn empty_query_is_empty_string() {
        assert_eq!(Query::new().build(), "");
    }
}
