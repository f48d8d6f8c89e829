//! Domain chains: nested subsystem names attached to log lines.

/// Separator placed between domain segments when a chain is rendered
pub const DOMAIN_SEPARATOR: &str = ":";

/// Render a domain chain, e.g. `["server", "tls"]` → `server:tls`.
pub fn join_chain(chain: &[String]) -> String {
    chain.join(DOMAIN_SEPARATOR)
}

/// Stack of domain segments pushed around scoped operations.
///
/// Every logged line carries the stack plus its own (optional) segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainStack {
    segments: Vec<String>,
}

impl DomainStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Remove the innermost segment. Popping an empty stack returns `None`.
    pub fn pop(&mut self) -> Option<String> {
        self.segments.pop()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Chain for a line logged with `own` as its domain.
    ///
    /// An empty `own` adds nothing, so logging at `""` inside an empty stack
    /// yields an empty chain and the decoration omits the domain.
    pub fn effective(&self, own: &str) -> Vec<String> {
        let mut chain = Vec::with_capacity(self.segments.len() + 1);
        chain.extend(self.segments.iter().cloned());
        if !own.is_empty() {
            chain.push(own.to_string());
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_chain() {
        assert_eq!(join_chain(&[]), "");
        assert_eq!(join_chain(&["server".into(), "tls".into()]), "server:tls");
    }

    #[test]
    fn test_effective_chain() {
        let mut stack = DomainStack::new();
        assert!(stack.effective("").is_empty());
        assert_eq!(stack.effective("db"), vec!["db".to_string()]);

        stack.push("net");
        assert_eq!(stack.effective(""), vec!["net".to_string()]);
        assert_eq!(
            stack.effective("tls"),
            vec!["net".to_string(), "tls".to_string()]
        );

        assert_eq!(stack.pop().as_deref(), Some("net"));
        assert!(stack.effective("").is_empty());
        assert_eq!(stack.pop(), None);
    }
}
