//! Demo command: a code-defined element type with behavior

use anyhow::Result;
use xel_core::Result as XelResult;
use xel_element::{ElementInstance, ElementType};
use xel_schema::{AttrType, SchemaBuilder, SchemaRegistry};

/// Element with two string attributes and a greeting
pub struct MyElement(ElementInstance);

impl MyElement {
    pub fn greet(&self) -> XelResult<String> {
        let a = self.instance().get_str("a")?;
        let b = self.instance().get_str("b")?;
        Ok(format!("a={:?} b={:?}", a, b))
    }
}

impl ElementType for MyElement {
    const NAME: &'static str = "my-element";

    fn declare(schema: &mut SchemaBuilder) -> XelResult<()> {
        schema
            .description("Demo element")
            .declare_attribute("a", AttrType::String, "")?
            .declare_attribute("b", AttrType::String, "")?;
        Ok(())
    }

    fn from_instance(instance: ElementInstance) -> Self {
        Self(instance)
    }

    fn instance(&self) -> &ElementInstance {
        &self.0
    }

    fn instance_mut(&mut self) -> &mut ElementInstance {
        &mut self.0
    }
}

pub fn run(markup: &str) -> Result<()> {
    println!("{}", greet_from_markup(markup)?);
    Ok(())
}

fn greet_from_markup(markup: &str) -> XelResult<String> {
    let mut registry = SchemaRegistry::new();
    MyElement::register(&mut registry)?;

    let instance = xel_markup::construct(&registry, markup)?;
    MyElement::try_from_instance(instance)?.greet()
}
