//! Minimal HCL syntax tree for the generated files.

use tfexpose_core::hcl_quote;

use super::{CodeFragment, Renderable};

/// Right-hand side of an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// A quoted string literal; the content is escaped on render.
    String(String),
    /// A traversal or other expression emitted verbatim.
    Raw(String),
    /// An inline object, e.g. `{ source = "hashicorp/aws" }`.
    Object(Vec<(String, Expression)>),
}

impl Expression {
    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn raw(s: impl Into<String>) -> Self {
        Self::Raw(s.into())
    }

    pub fn render(&self) -> String {
        match self {
            Self::String(s) => hcl_quote(s),
            Self::Raw(s) => s.clone(),
            Self::Object(entries) if entries.is_empty() => "{}".to_string(),
            Self::Object(entries) => {
                let body = entries
                    .iter()
                    .map(|(key, value)| format!("{} = {}", key, value.render()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{ {} }}", body)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Item {
    Attribute(String, Expression),
    Block(HclBlock),
}

/// A block such as `data "aws_instance" "web" { ... }`.
///
/// # Example
///
/// ```
/// use tfexpose_codegen::builder::{CodeBuilder, Expression, HclBlock};
///
/// let block = HclBlock::new("output")
///     .label("web_id")
///     .attribute("value", Expression::raw("data.aws_instance.web.id"));
///
/// let code = CodeBuilder::hcl().render(&block).build();
/// assert_eq!(code, "output \"web_id\" {\n  value = data.aws_instance.web.id\n}\n");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HclBlock {
    kind: String,
    labels: Vec<String>,
    items: Vec<Item>,
}

impl HclBlock {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            labels: Vec::new(),
            items: Vec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    pub fn attribute(mut self, name: impl Into<String>, value: Expression) -> Self {
        self.items.push(Item::Attribute(name.into(), value));
        self
    }

    pub fn block(mut self, block: HclBlock) -> Self {
        self.items.push(Item::Block(block));
        self
    }

    fn header(&self) -> String {
        let mut header = self.kind.clone();
        for label in &self.labels {
            header.push(' ');
            header.push_str(&hcl_quote(label));
        }
        header.push_str(" {");
        header
    }
}

impl Renderable for HclBlock {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let body = self
            .items
            .iter()
            .map(|item| match item {
                Item::Attribute(name, value) => {
                    CodeFragment::line(format!("{} = {}", name, value.render()))
                }
                Item::Block(block) => CodeFragment::sequence(block.to_fragments()),
            })
            .collect();

        vec![CodeFragment::block(self.header(), body, Some("}".to_string()))]
    }
}
