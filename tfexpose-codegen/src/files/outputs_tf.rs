use std::path::{Path, PathBuf};

use tfexpose_core::GeneratedFile;

use crate::{
    ResolvedDeclaration,
    builder::{CodeBuilder, Expression, HclBlock},
};

pub const OUTPUTS_FILE: &str = "generated_outputs.tf";

/// Outputs re-exposing each declaration through its data source.
pub struct OutputsTf {
    outputs: Vec<ResolvedDeclaration>,
}

impl OutputsTf {
    pub fn new(outputs: Vec<ResolvedDeclaration>) -> Self {
        Self { outputs }
    }
}

impl GeneratedFile for OutputsTf {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(OUTPUTS_FILE)
    }

    fn render(&self) -> String {
        let blocks: Vec<HclBlock> = self
            .outputs
            .iter()
            .map(|output| {
                HclBlock::new("output")
                    .label(&output.declaration.name)
                    .attribute("value", Expression::raw(output.data_reference()))
            })
            .collect();
        CodeBuilder::hcl().render(&blocks).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AnnotatedDeclaration, reference::ResourceReference};

    fn output(name: &str, expression: &str) -> ResolvedDeclaration {
        ResolvedDeclaration {
            declaration: AnnotatedDeclaration {
                file: "main.tf".into(),
                line: 1,
                name: name.to_string(),
                reference_expression: expression.to_string(),
            },
            reference: ResourceReference::parse(expression).unwrap(),
        }
    }

    #[test]
    fn test_render_outputs() {
        let file = OutputsTf::new(vec![
            output("x", "aws_instance.foo.id"),
            output("pet", "random_pet.name"),
            output("volume", "aws_instance.foo.root_block_device.volume_id"),
        ]);

        insta::assert_snapshot!(file.render(), @r#"
        output "x" {
          value = data.aws_instance.foo.id
        }

        output "pet" {
          value = data.random_pet.name
        }

        output "volume" {
          value = data.aws_instance.foo.root_block_device.volume_id
        }
        "#);
    }
}
