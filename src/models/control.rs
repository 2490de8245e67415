use serde::Serialize;

/// NIST 800-53 R5 control identifiers a rule provides evidence for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ControlSet {
    pub ids: &'static [&'static str],
}

impl ControlSet {
    pub const fn new(ids: &'static [&'static str]) -> Self {
        Self { ids }
    }

    /// Rendered as it appears at the end of a rule message
    pub fn describe(&self) -> String {
        format!("(Control IDs: {})", self.ids.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: ControlSet = ControlSet::new(&["CP-9a", "CP-10", "SC-5(2)", "SI-13(5)"]);

    #[test]
    fn test_describe() {
        assert_eq!(
            SAMPLE.describe(),
            "(Control IDs: CP-9a, CP-10, SC-5(2), SI-13(5))"
        );
    }

    #[test]
    fn test_describe_empty() {
        assert_eq!(ControlSet::new(&[]).describe(), "(Control IDs: )");
    }
}
