//! Renderable trait and CodeFragment for decoupled code generation.

/// Represents a fragment of generated code.
///
/// CodeFragments form an intermediate representation between HCL nodes
/// and the final string output.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A single line of code (will have newline appended).
    Line(String),
    /// A blank line.
    Blank,
    /// A block with header, body fragments, and optional closing line.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: Option<String>,
    },
    /// A sequence of fragments.
    Sequence(Vec<CodeFragment>),
}

impl CodeFragment {
    /// Create a line fragment.
    pub fn line(s: impl Into<String>) -> Self {
        Self::Line(s.into())
    }

    /// Create a block fragment.
    pub fn block(
        header: impl Into<String>,
        body: Vec<CodeFragment>,
        close: Option<String>,
    ) -> Self {
        Self::Block {
            header: header.into(),
            body,
            close,
        }
    }

    /// Create a sequence of fragments.
    pub fn sequence(fragments: Vec<CodeFragment>) -> Self {
        Self::Sequence(fragments)
    }
}

/// Trait for nodes that can be rendered to code fragments.
pub trait Renderable {
    /// Convert this node to a list of code fragments.
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl<T: Renderable> Renderable for [T] {
    /// Renders each item, separated by one blank line.
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                fragments.push(CodeFragment::Blank);
            }
            fragments.extend(item.to_fragments());
        }
        fragments
    }
}

impl<T: Renderable> Renderable for Vec<T> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.as_slice().to_fragments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Line(&'static str);

    impl Renderable for Line {
        fn to_fragments(&self) -> Vec<CodeFragment> {
            vec![CodeFragment::line(self.0)]
        }
    }

    #[test]
    fn test_fragment_constructors() {
        assert_eq!(CodeFragment::line("a"), CodeFragment::Line("a".to_string()));
        assert_eq!(
            CodeFragment::block("x {", vec![], Some("}".to_string())),
            CodeFragment::Block {
                header: "x {".to_string(),
                body: vec![],
                close: Some("}".to_string()),
            }
        );
    }

    #[test]
    fn test_slice_separates_items_with_blank_lines() {
        let items = vec![Line("a"), Line("b")];
        assert_eq!(
            items.to_fragments(),
            vec![
                CodeFragment::line("a"),
                CodeFragment::Blank,
                CodeFragment::line("b"),
            ]
        );
    }

    #[test]
    fn test_empty_slice_renders_nothing() {
        let items: Vec<Line> = Vec::new();
        assert!(items.to_fragments().is_empty());
    }
}
