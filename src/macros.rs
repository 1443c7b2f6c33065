/// Builds a [`Document`](crate::Document) from JSON-like syntax.
///
/// Object keys must be literals. Any other token tree falls through to
/// `Document::from`, so Rust expressions of a convertible type can be spliced
/// in directly. Negative numbers and other multi-token expressions need
/// parentheses inside arrays and objects.
///
/// ```rust
/// use docjson::{document, Document};
///
/// let limit = 10;
/// let doc = document!({
///     "name": "Alice",
///     "tags": ["a", "b"],
///     "limit": limit,
///     "offset": (-1),
///     "next": null
/// });
///
/// assert_eq!(doc.as_object().map(|o| o.len()), Some(5));
/// assert_eq!(doc.as_object().and_then(|o| o.get("offset")), Some(&Document::Int(-1)));
/// ```
#[macro_export]
macro_rules! document {
    (null) => {
        $crate::Document::Null
    };

    (true) => {
        $crate::Document::Bool(true)
    };

    (false) => {
        $crate::Document::Bool(false)
    };

    ([]) => {
        $crate::Document::Array(::std::vec::Vec::new())
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Document::Array(vec![$($crate::document!($elem)),*])
    };

    ({}) => {
        $crate::Document::Object($crate::Object::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::Object::new();
        $(
            object.insert($key, $crate::document!($value));
        )*
        $crate::Document::Object(object)
    }};

    ($other:expr) => {
        $crate::Document::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Document, Object};

    #[test]
    fn test_document_macro_scalars() {
        assert_eq!(document!(null), Document::Null);
        assert_eq!(document!(true), Document::Bool(true));
        assert_eq!(document!(42), Document::Int(42));
        assert_eq!(document!(3.5), Document::Float(3.5));
        assert_eq!(document!("hello"), Document::from("hello"));
        assert_eq!(document!((-7)), Document::Int(-7));
    }

    #[test]
    fn test_document_macro_nesting() {
        assert_eq!(document!([]), Document::Array(vec![]));
        assert_eq!(document!({}), Document::Object(Object::new()));

        let doc = document!({"a": [1, {"b": null}], "c": {}});
        let obj = doc.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        let arr = obj.get("a").and_then(Document::as_array).unwrap();
        assert_eq!(arr[0], Document::Int(1));
        assert!(arr[1].as_object().and_then(|o| o.get("b")).unwrap().is_null());
        assert_eq!(obj.get("c"), Some(&Document::Object(Object::new())));
    }

    #[test]
    fn test_document_macro_keeps_key_order() {
        let doc = document!({"z": 1, "a": 2, "m": 3});
        let keys: Vec<_> = doc
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.to_string_lossy().into_owned())
            .collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }
}
