//! Property-based round-trip coverage: any record whose value shapes conform
//! to the schema must decode back to an equal record.

use proptest::collection::vec;
use proptest::prelude::*;

use schemapack::{Decoder, Encoder, Field, Record, Registry, SchemaType, Value};

fn define_blob(registry: &mut Registry) {
    registry
        .define(
            "Blob",
            vec![
                Field::new(0, "tiny", SchemaType::Int8),
                Field::new(1, "small", SchemaType::Int16),
                Field::new(2, "medium", SchemaType::Int32),
                Field::new(3, "large", SchemaType::Int64),
                Field::new(4, "ratio", SchemaType::Float32),
                Field::new(5, "precise", SchemaType::Float64),
                Field::new(6, "flag", SchemaType::Bool),
                Field::new(7, "label", SchemaType::String),
                Field::new(8, "tags", SchemaType::list_of(SchemaType::String)),
                Field::new(
                    9,
                    "scores",
                    SchemaType::map_of(SchemaType::String, SchemaType::Int32).unwrap(),
                ),
            ],
        )
        .unwrap();
}

proptest! {
    #[test]
    fn encode_decode_roundtrip(
        tiny in any::<i8>(),
        small in any::<i16>(),
        medium in any::<i32>(),
        large in any::<i64>(),
        ratio in -1.0e6f32..1.0e6f32,
        precise in -1.0e9f64..1.0e9f64,
        flag in any::<bool>(),
        label in "[a-z ]{0,16}",
        tags in vec("[a-z]{0,8}", 0..6),
        scores in vec(("[a-z]{0,8}", any::<i32>()), 0..6),
    ) {
        let mut registry = Registry::new();
        define_blob(&mut registry);
        let model = registry.get("Blob").unwrap();

        let mut record = Record::new();
        record.insert("tiny".to_string(), Value::I8(tiny));
        record.insert("small".to_string(), Value::I16(small));
        record.insert("medium".to_string(), Value::I32(medium));
        record.insert("large".to_string(), Value::I64(large));
        record.insert("ratio".to_string(), Value::F32(ratio));
        record.insert("precise".to_string(), Value::F64(precise));
        record.insert("flag".to_string(), Value::Bool(flag));
        record.insert("label".to_string(), Value::Str(label));
        record.insert(
            "tags".to_string(),
            Value::List(tags.into_iter().map(Value::Str).collect()),
        );
        record.insert(
            "scores".to_string(),
            Value::Map(
                scores
                    .into_iter()
                    .map(|(k, v)| (Value::Str(k), Value::I32(v)))
                    .collect(),
            ),
        );

        let bytes = Encoder::new(&registry).encode(model, &record).unwrap();
        let decoded = Decoder::new(&registry).decode(model, &bytes).unwrap();
        prop_assert_eq!(decoded, record);
    }

    #[test]
    fn string_field_prefixes_rejected(
        label in "[a-z]{1,12}",
    ) {
        let mut registry = Registry::new();
        define_blob(&mut registry);
        let model = registry.get("Blob").unwrap();

        let mut record = Record::new();
        record.insert("label".to_string(), Value::Str(label));
        let bytes = Encoder::new(&registry).encode(model, &record).unwrap();
        let decoder = Decoder::new(&registry);

        // a single-field buffer has no interior field boundary, so every
        // strict prefix cuts mid-field and must be rejected
        for cut in 1..bytes.len() {
            prop_assert!(decoder.decode(model, &bytes[..cut]).is_err());
        }
    }
}
