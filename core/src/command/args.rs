use std::fmt::Display;

use crate::pipeline::params::set_value;

/// Placeholder the stage programs read as "not given".
pub const UNSET: &str = "None";

/// Argv under construction. Values are rendered once, in insertion order.
#[derive(Debug, Default)]
pub(crate) struct ArgList(Vec<String>);

impl ArgList {
    pub(crate) fn new(program: impl Into<String>) -> Self {
        Self(vec![program.into()])
    }

    /// Bare positional argument.
    pub(crate) fn arg(mut self, value: impl Display) -> Self {
        self.0.push(value.to_string());
        self
    }

    /// Positional argument that may be unset.
    pub(crate) fn arg_opt(self, value: &Option<String>) -> Self {
        let rendered = set_value(value).unwrap_or(UNSET).to_string();
        self.arg(rendered)
    }

    pub(crate) fn flag(mut self, name: &str, value: impl Display) -> Self {
        self.0.push(name.to_string());
        self.0.push(value.to_string());
        self
    }

    pub(crate) fn flag_opt(self, name: &str, value: &Option<String>) -> Self {
        let rendered = set_value(value).unwrap_or(UNSET).to_string();
        self.flag(name, rendered)
    }

    pub(crate) fn finish(self) -> Vec<String> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_and_empty_values_render_as_none() {
        let argv = ArgList::new("prog")
            .flag("--threads", 4)
            .flag_opt("--gtf", &None)
            .flag_opt("--db", &Some(String::new()))
            .arg_opt(&Some("/db/nt".to_string()))
            .finish();
        assert_eq!(
            argv,
            vec!["prog", "--threads", "4", "--gtf", "None", "--db", "None", "/db/nt"]
        );
    }
}
