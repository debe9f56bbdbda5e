//! Construction helpers

/// Build an [`AttrMap`](crate::AttrMap) from `name => value` pairs.
///
/// ```ignore
/// let values = attrs! { "label" => "Save", "count" => 3 };
/// ```
#[macro_export]
macro_rules! attrs {
    () => {
        $crate::AttrMap::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::AttrMap::new();
        $(
            map.insert(
                ::std::string::String::from($name),
                $crate::AttrValue::from($value),
            );
        )+
        map
    }};
}
