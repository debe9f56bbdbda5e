//! Typed element definitions

use crate::instance::{AttrMap, ElementInstance};
use std::sync::Arc;
use xel_core::{AttrValue, Result, XelError};
use xel_schema::{ElementSchema, SchemaBuilder, SchemaRegistry};

/// A concrete element type: a schema plus the behavior built on top of it.
///
/// Implementors declare their attributes once in [`declare`](Self::declare)
/// and wrap an [`ElementInstance`]. Behavior methods read attributes through
/// [`get`](Self::get) or the typed getters on the instance.
///
/// ```ignore
/// struct Greeting(ElementInstance);
///
/// impl ElementType for Greeting {
///     const NAME: &'static str = "greeting";
///
///     fn declare(schema: &mut SchemaBuilder) -> Result<()> {
///         schema.declare_attribute("name", AttrType::String, "world")?;
///         Ok(())
///     }
///
///     fn from_instance(instance: ElementInstance) -> Self { Self(instance) }
///     fn instance(&self) -> &ElementInstance { &self.0 }
///     fn instance_mut(&mut self) -> &mut ElementInstance { &mut self.0 }
/// }
/// ```
pub trait ElementType: Sized {
    /// Element type name used in the registry and in markup
    const NAME: &'static str;

    /// Registered element type this one extends
    const EXTENDS: Option<&'static str> = None;

    /// Declare the attributes owned by this type
    fn declare(schema: &mut SchemaBuilder) -> Result<()>;

    fn from_instance(instance: ElementInstance) -> Self;

    fn instance(&self) -> &ElementInstance;

    fn instance_mut(&mut self) -> &mut ElementInstance;

    /// Build and register the schema. The parent, if any, must already be
    /// registered.
    fn register(registry: &mut SchemaRegistry) -> Result<Arc<ElementSchema>> {
        let mut builder = SchemaBuilder::new(Self::NAME);
        if let Some(parent) = Self::EXTENDS {
            builder.extends(registry.require(parent)?)?;
        }
        Self::declare(&mut builder)?;
        registry.define(builder)
    }

    /// Construct from explicit values, defaulting the rest
    fn construct(registry: &SchemaRegistry, values: AttrMap) -> Result<Self> {
        let schema = registry.require(Self::NAME)?;
        ElementInstance::construct(schema, values).map(Self::from_instance)
    }

    /// Wrap an instance built elsewhere, e.g. from markup. Fails unless the
    /// instance's type is this type or extends it.
    fn try_from_instance(instance: ElementInstance) -> Result<Self> {
        if instance.schema().is_subtype_of(Self::NAME) {
            Ok(Self::from_instance(instance))
        } else {
            Err(XelError::WrongElementType {
                expected: Self::NAME.to_string(),
                got: instance.element_name().to_string(),
            })
        }
    }

    fn get(&self, name: &str) -> Result<&AttrValue> {
        self.instance().get(name)
    }

    fn set(&mut self, name: &str, value: impl Into<AttrValue>) -> Result<()> {
        self.instance_mut().set(name, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xel_schema::{AttrType, AttributeSchema};

    struct MyElement(ElementInstance);

    impl MyElement {
        fn greet(&self) -> Result<String> {
            Ok(format!(
                "a={:?} b={:?}",
                self.instance().get_str("a")?,
                self.instance().get_str("b")?
            ))
        }
    }

    impl ElementType for MyElement {
        const NAME: &'static str = "my-element";

        fn declare(schema: &mut SchemaBuilder) -> Result<()> {
            schema
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

    struct Banner(ElementInstance);

    impl ElementType for Banner {
        const NAME: &'static str = "banner";
        const EXTENDS: Option<&'static str> = Some("my-element");

        fn declare(schema: &mut SchemaBuilder) -> Result<()> {
            schema.declare(AttributeSchema::new("level", AttrType::Int).required())?;
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

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        MyElement::register(&mut registry).unwrap();
        Banner::register(&mut registry).unwrap();
        registry
    }

    #[test]
    fn test_scenario() {
        let registry = registry();

        let element = MyElement::construct(&registry, attrs! {}).unwrap();
        assert_eq!(element.get("a").unwrap(), &AttrValue::from(""));
        assert_eq!(element.get("b").unwrap(), &AttrValue::from(""));

        let element = MyElement::construct(&registry, attrs! { "b" => "hi" }).unwrap();
        assert_eq!(element.greet().unwrap(), "a=\"\" b=\"hi\"");

        assert!(matches!(
            MyElement::construct(&registry, attrs! { "c" => "x" }),
            Err(XelError::UnknownAttribute { .. })
        ));
        assert!(matches!(
            MyElement::construct(&registry, attrs! { "a" => 5 }),
            Err(XelError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_set_through_element() {
        let registry = registry();
        let mut element = MyElement::construct(&registry, attrs! {}).unwrap();
        element.set("a", "changed").unwrap();
        assert_eq!(element.greet().unwrap(), "a=\"changed\" b=\"\"");
        assert!(element.set("a", true).is_err());
    }

    #[test]
    fn test_extends_registered_parent() {
        let registry = registry();
        let banner = Banner::construct(&registry, attrs! { "level" => 2, "a" => "x" }).unwrap();
        assert_eq!(banner.instance().get_int("level").unwrap(), 2);
        assert_eq!(banner.instance().get_str("a").unwrap(), "x");

        let as_parent = MyElement::try_from_instance(banner.0).unwrap();
        assert_eq!(as_parent.greet().unwrap(), "a=\"x\" b=\"\"");
    }

    #[test]
    fn test_try_from_instance_rejects_unrelated_type() {
        let registry = registry();
        let element = MyElement::construct(&registry, attrs! {}).unwrap();
        assert!(matches!(
            Banner::try_from_instance(element.0),
            Err(XelError::WrongElementType { .. })
        ));
    }

    #[test]
    fn test_missing_parent() {
        let mut registry = SchemaRegistry::new();
        assert!(matches!(
            Banner::register(&mut registry),
            Err(XelError::ElementTypeNotFound(_))
        ));
    }

    #[test]
    fn test_register_twice_fails() {
        let mut registry = registry();
        assert!(matches!(
            MyElement::register(&mut registry),
            Err(XelError::DuplicateElementType(_))
        ));
    }
}
