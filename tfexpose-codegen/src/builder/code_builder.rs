//! Code builder utility for generating properly indented HCL.

use super::{CodeFragment, Indent, Renderable};

/// Renders [`Renderable`] nodes into indented text.
///
/// # Example
///
/// ```
/// use tfexpose_codegen::builder::{CodeBuilder, Expression, HclBlock};
///
/// let locals = HclBlock::new("locals").attribute("region", Expression::string("eu-west-1"));
/// let code = CodeBuilder::hcl().render(&locals).build();
///
/// assert_eq!(code, "locals {\n  region = \"eu-west-1\"\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    indent_level: usize,
    indent: Indent,
    buffer: String,
}

impl CodeBuilder {
    /// Create a new CodeBuilder with the specified indentation.
    pub fn new(indent: Indent) -> Self {
        Self {
            indent_level: 0,
            indent,
            buffer: String::new(),
        }
    }

    /// Create a new CodeBuilder with 2-space indentation.
    pub fn hcl() -> Self {
        Self::new(Indent::HCL)
    }

    /// Render a node after whatever has been built so far.
    pub fn render(mut self, node: &(impl Renderable + ?Sized)) -> Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    /// Consume the builder and return the generated code.
    pub fn build(self) -> String {
        self.buffer
    }

    fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(s) => self.push_line(&s),
            CodeFragment::Blank => self.buffer.push('\n'),
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.push_line(&header);
                self.indent_level += 1;
                for f in body {
                    self.apply_fragment(f);
                }
                self.indent_level = self.indent_level.saturating_sub(1);
                if let Some(c) = close {
                    self.push_line(&c);
                }
            }
            CodeFragment::Sequence(fragments) => {
                for f in fragments {
                    self.apply_fragment(f);
                }
            }
        }
    }

    fn push_line(&mut self, s: &str) {
        for _ in 0..self.indent_level {
            self.buffer.push_str(self.indent.as_str());
        }
        self.buffer.push_str(s);
        self.buffer.push('\n');
    }
}
