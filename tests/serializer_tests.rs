use docjson::{
    document, parse, parse_with_options, to_string, to_string_pretty, to_string_with_options,
    to_vec, to_writer_with_options, Array, Document, JsonString, Object, ParseOptions,
    SerializeOptions, Serializer,
};

fn compact<T: docjson::ToJson + ?Sized>(value: &T) -> String {
    to_string(value)
}

#[test]
fn test_scalars() {
    assert_eq!(compact(&Document::Null), "null");
    assert_eq!(compact(&Document::Bool(true)), "true");
    assert_eq!(compact(&Document::Bool(false)), "false");
    assert_eq!(compact(&Document::Int(-17)), "-17");
    assert_eq!(compact(&Document::Int(i64::MIN)), "-9223372036854775808");
    assert_eq!(compact(&Document::Float(1.0)), "1.0");
    assert_eq!(compact(&Document::Float(-0.5)), "-0.5");
    assert_eq!(compact(&Document::Float(1e300)), "1e300");
    assert_eq!(compact(&Document::Float(0.1)), "0.1");
}

#[test]
fn test_non_finite_floats_are_null() {
    assert_eq!(compact(&Document::Float(f64::NAN)), "null");
    assert_eq!(compact(&Document::Float(f64::INFINITY)), "null");
    assert_eq!(
        compact(&document!([(f64::NEG_INFINITY), 1])),
        "[null,1]"
    );
}

#[test]
fn test_floats_stay_floats_after_reparse() {
    for value in [0.0, -0.0, 2.0, 1.5e-7, 123456789.0, f64::MAX, f64::MIN_POSITIVE] {
        let text = compact(&Document::Float(value));
        assert_eq!(parse(&text).document, Document::Float(value), "{text}");
    }
}

#[test]
fn test_escape_table() {
    let cases = [
        ("\"", r#""\"""#),
        ("\\", r#""\\""#),
        ("/", r#""/""#),
        ("\u{8}", r#""\b""#),
        ("\u{c}", r#""\f""#),
        ("\n", r#""\n""#),
        ("\r", r#""\r""#),
        ("\t", r#""\t""#),
        ("\u{0}", r#""\u0000""#),
        ("\u{1f}", r#""\u001f""#),
        ("\u{7f}", "\"\u{7f}\""),
        ("é😀", "\"é😀\""),
    ];
    for (raw, expected) in cases {
        assert_eq!(compact(raw), expected, "{raw:?}");
    }
}

#[test]
fn test_stored_surrogates_are_escaped() {
    let lone_high = JsonString::from_bytes(vec![0xED, 0xA0, 0x80]);
    assert_eq!(compact(&lone_high), r#""\ud800""#);

    let mut mixed = JsonString::from("a");
    mixed.push_bytes(&[0xED, 0xBF, 0xBF]);
    mixed.push_str("b");
    assert_eq!(compact(&mixed), r#""a\udfffb""#);
}

#[test]
fn test_malformed_bytes_become_replacement_characters() {
    let broken = JsonString::from_bytes(vec![b'x', 0xFF, b'y', 0xC3]);
    assert_eq!(compact(&broken), "\"x\u{FFFD}y\u{FFFD}\"");
    assert!(String::from_utf8(to_vec(&broken)).is_ok());
}

#[test]
fn test_accepted_code_points_round_trip() {
    let options = ParseOptions::new().with_invalid_code_points(true);
    for input in [r#""\ud800""#, r#""\udc00x""#, r#""￿""#] {
        let output = parse_with_options(input, &options);
        assert!(output.is_ok(), "{input}");
        assert_eq!(compact(&output.document).to_lowercase(), input.to_lowercase());
    }
}

#[test]
fn test_empty_containers() {
    assert_eq!(compact(&document!([])), "[]");
    assert_eq!(compact(&document!({})), "{}");
    assert_eq!(to_string_pretty(&document!([])), "[]");
    assert_eq!(to_string_pretty(&document!({"a": [], "b": {}})), "{\n  \"a\": [],\n  \"b\": {}\n}");
}

#[test]
fn test_indentation_widths() {
    let doc = document!({"k": [1, {"z": null}]});
    assert_eq!(compact(&doc), r#"{"k":[1,{"z":null}]}"#);
    assert_eq!(
        to_string_with_options(&doc, SerializeOptions::new().with_indent(1)),
        "{\n \"k\": [\n  1,\n  {\n   \"z\": null\n  }\n ]\n}"
    );
    assert_eq!(
        to_string_with_options(&doc, SerializeOptions::new().with_indent(3)),
        "{\n   \"k\": [\n      1,\n      {\n         \"z\": null\n      }\n   ]\n}"
    );
}

#[test]
fn test_wide_indentation() {
    let doc = document!([[1]]);
    let text = to_string_with_options(&doc, SerializeOptions::new().with_indent(40));
    let spaces = " ".repeat(80);
    assert_eq!(
        text,
        format!("[\n{}[\n{spaces}1\n{}]\n]", &spaces[..40], &spaces[..40])
    );
}

#[test]
fn test_object_iteration_order_is_kept() {
    let mut object = Object::new();
    object.insert("zeta", Document::Int(1));
    object.insert("alpha", Document::Int(2));
    object.insert("mid", Document::Int(3));
    assert_eq!(compact(&object), r#"{"zeta":1,"alpha":2,"mid":3}"#);

    object.insert("zeta", Document::Int(4));
    assert_eq!(compact(&object), r#"{"zeta":4,"alpha":2,"mid":3}"#);
}

#[test]
fn test_each_writable_type() {
    let array: Array = vec![Document::Int(1), Document::from("two")];
    assert_eq!(compact(&array), r#"[1,"two"]"#);
    assert_eq!(compact(&array[..]), r#"[1,"two"]"#);
    assert_eq!(compact(&JsonString::from("s")), r#""s""#);
    assert_eq!(compact("str"), r#""str""#);
    assert_eq!(compact(&String::from("owned")), r#""owned""#);
    assert_eq!(compact(&true), "true");
    assert_eq!(compact(&-3i64), "-3");
    assert_eq!(compact(&2.5f64), "2.5");
    assert_eq!(compact(&()), "null");
}

#[test]
fn test_sinks() {
    let doc = document!({"a": [true]});
    let mut serializer = Serializer::new(SerializeOptions::new());

    let text = serializer.serialize(&doc, String::from("prefix "));
    assert_eq!(text, r#"prefix {"a":[true]}"#);

    let bytes = serializer.serialize(&doc, Vec::new());
    assert_eq!(bytes, br#"{"a":[true]}"#);

    let mut buffer = String::new();
    serializer.serialize(&Document::Int(1), &mut buffer);
    serializer.serialize(" ", &mut buffer);
    serializer.serialize(&Document::Int(2), &mut buffer);
    assert_eq!(buffer, r#"1" "2"#);
}

#[test]
fn test_serializer_reuse_keeps_options() {
    let mut serializer = Serializer::new(SerializeOptions::pretty());
    assert_eq!(serializer.options().indent, 2);
    let first = serializer.serialize(&document!([1]), String::new());
    let second = serializer.serialize(&document!([1]), String::new());
    assert_eq!(first, second);
    assert_eq!(first, "[\n  1\n]");
}

#[test]
fn test_to_writer() {
    let mut out = Vec::new();
    to_writer_with_options(&mut out, &document!({"x": 1}), SerializeOptions::pretty()).unwrap();
    assert_eq!(out, b"{\n  \"x\": 1\n}");
}

#[test]
fn test_output_matches_serde_json() {
    let inputs = [
        r#"{"a":[1,-2,{"b":null}],"c":"\u0007\n","d":true}"#,
        r#"[[],{},[[]],"é",""]"#,
        r#"{"nested":{"deeper":{"deepest":[false]}}}"#,
    ];
    for input in inputs {
        let ours = parse(input).document;
        let theirs: serde_json::Value = serde_json::from_str(input).unwrap();
        assert_eq!(compact(&ours), serde_json::to_string(&theirs).unwrap());
        assert_eq!(
            to_string_pretty(&ours),
            serde_json::to_string_pretty(&theirs).unwrap()
        );
    }
}
