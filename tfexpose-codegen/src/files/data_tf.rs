use std::path::{Path, PathBuf};

use tfexpose_core::{GeneratedFile, json_value_to_hcl};

use crate::{
    MatchedResource,
    builder::{CodeBuilder, Expression, HclBlock},
};

pub const DATA_FILE: &str = "generated_data.tf";

/// Data blocks looking up each matched resource by its required attributes.
pub struct DataTf {
    resources: Vec<MatchedResource>,
}

impl DataTf {
    pub fn new(resources: Vec<MatchedResource>) -> Self {
        Self { resources }
    }

    fn block(resource: &MatchedResource) -> HclBlock {
        resource.attributes().fold(
            HclBlock::new("data")
                .label(&resource.resource_type)
                .label(&resource.resource_name),
            |block, (name, value)| {
                let value = value.map(json_value_to_hcl).unwrap_or_default();
                block.attribute(name, Expression::string(value))
            },
        )
    }
}

impl GeneratedFile for DataTf {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(DATA_FILE)
    }

    fn render(&self) -> String {
        let blocks: Vec<HclBlock> = self.resources.iter().map(Self::block).collect();
        CodeBuilder::hcl().render(&blocks).build()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::reference::ResourceReference;

    fn resource(expression: &str, values: &[(&str, serde_json::Value)]) -> MatchedResource {
        let reference = ResourceReference::parse(expression).unwrap();
        let mut resource = MatchedResource::new(
            &reference,
            "hashicorp/aws",
            values.iter().map(|(name, _)| name.to_string()).collect(),
        );
        for (name, value) in values {
            if !value.is_null() {
                resource
                    .extracted_values
                    .insert(name.to_string(), value.clone());
            }
        }
        resource
    }

    #[test]
    fn test_render_data_blocks() {
        let file = DataTf::new(vec![
            resource("aws_instance.foo.id", &[("id", json!("i-123"))]),
            resource(
                "aws_subnet.private.id",
                &[("cidr_block", json!("10.0.1.0/24")), ("vpc_id", json!(null))],
            ),
        ]);

        insta::assert_snapshot!(file.render(), @r#"
        data "aws_instance" "foo" {
          id = "i-123"
        }

        data "aws_subnet" "private" {
          cidr_block = "10.0.1.0/24"
          vpc_id = ""
        }
        "#);
    }

    #[test]
    fn test_non_string_values() {
        let file = DataTf::new(vec![resource(
            "example_thing.a",
            &[
                ("count", json!(3)),
                ("enabled", json!(true)),
                ("tags", json!({"Name": "web"})),
            ],
        )]);

        insta::assert_snapshot!(file.render(), @r#"
        data "example_thing" "a" {
          count = "3"
          enabled = "true"
          tags = "{\"Name\":\"web\"}"
        }
        "#);
    }

    #[test]
    fn test_path() {
        let file = DataTf::new(Vec::new());
        assert_eq!(
            file.path(Path::new("interface")),
            PathBuf::from("interface/generated_data.tf")
        );
        assert_eq!(file.render(), "");
    }
}
