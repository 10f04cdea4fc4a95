//! Template types for typed variable injection.

use std::marker::PhantomData;

/// Trait for template variable sets
pub trait TemplateVars {
    fn apply(&self, content: &str) -> String;
}

/// Template with typed variable injection
#[derive(Debug, Clone, Copy)]
pub struct Template<V> {
    content: &'static str,
    _marker: PhantomData<V>,
}

impl<V> Template<V> {
    pub const fn new(content: &'static str) -> Self {
        Self {
            content,
            _marker: PhantomData,
        }
    }
}

impl<V: TemplateVars> Template<V> {
    pub fn render(&self, vars: &V) -> String {
        vars.apply(self.content)
    }
}

/// Replace `__NAME__` placeholders in one pass.
///
/// Substituted values are never rescanned, so a value containing
/// placeholder-like text is emitted as-is. Unknown placeholders stay.
pub fn substitute(content: &str, vars: &[(&str, &str)]) -> String {
    let extra: usize = vars.iter().map(|(_, value)| value.len()).sum();
    let mut out = String::with_capacity(content.len() + extra);
    let mut rest = content;

    while let Some(start) = rest.find("__") {
        let tail = &rest[start..];
        match vars.iter().find(|(key, _)| tail.starts_with(key)) {
            Some((key, value)) => {
                out.push_str(&rest[..start]);
                out.push_str(value);
                rest = &tail[key.len()..];
            }
            None => {
                out.push_str(&rest[..start + 2]);
                rest = &tail[2..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeting<'a> {
        name: &'a str,
    }

    impl TemplateVars for Greeting<'_> {
        fn apply(&self, content: &str) -> String {
            substitute(content, &[("__NAME__", self.name)])
        }
    }

    #[test]
    fn test_render() {
        const HELLO: Template<Greeting<'static>> = Template::new("Hello, __NAME__! __NAME__?");
        assert_eq!(HELLO.render(&Greeting { name: "Ada" }), "Hello, Ada! Ada?");
    }

    #[test]
    fn test_values_not_rescanned() {
        let out = substitute("__A__|__B__", &[("__A__", "__B__"), ("__B__", "b")]);
        assert_eq!(out, "__B__|b");
    }

    #[test]
    fn test_unknown_placeholders_kept() {
        assert_eq!(substitute("a __X__ b__", &[("__Y__", "y")]), "a __X__ b__");
    }
}
