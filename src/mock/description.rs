//! OpenRPC description served by the mock backend under `openrpc`.

use super::models::*;
use crate::openrpc::models::{
    Components, OpenRpcDocument, OperationDescriptor, ParamDescriptor, SchemaIndex, Tag,
    COMMAND_PREFIX_TAG, ROOT_LABEL_TAG,
};
use serde_json::{json, Value};

const ENCODING_MODE_SCHEMA: &str = "Base64EncodingMode";
const DECODING_MODE_SCHEMA: &str = "Base64DecodingMode";

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{}", name) })
}

fn string_schema() -> Value {
    json!({ "type": "string" })
}

fn operation(name: &str, group: &str, prefix: &str, description: &str) -> OperationDescriptor {
    let mut op = OperationDescriptor::new(name);
    op.description = Some(description.to_string());
    op.tags = vec![Tag::new(ROOT_LABEL_TAG, group)];
    if !prefix.is_empty() {
        op.tags.push(Tag::new(COMMAND_PREFIX_TAG, prefix));
    }
    op.result = Some(json!({ "name": "result", "schema": string_schema() }));
    op
}

/// Builds the description of every method the mock answers.
pub fn description() -> OpenRpcDocument {
    let mut base64_encode = operation(
        BASE64_ENCODE,
        "Encoding",
        "base64-",
        "Encodes a text value in base64.",
    );
    base64_encode.params = vec![
        ParamDescriptor::new("mode", schema_ref(ENCODING_MODE_SCHEMA))
            .described("Alphabet and padding to use."),
        ParamDescriptor::new("value", string_schema())
            .required()
            .described("Text to encode.")
            .widget("textarea"),
    ];

    let mut base64_decode = operation(
        BASE64_DECODE,
        "Encoding",
        "base64-",
        "Decodes a base64 value to text.",
    );
    base64_decode.params = vec![
        ParamDescriptor::new("mode", schema_ref(DECODING_MODE_SCHEMA))
            .described("Alphabet of the encoded value."),
        ParamDescriptor::new("value", string_schema())
            .required()
            .described("Base64 value to decode.")
            .widget("textarea"),
    ];

    let uuid_generator = operation(
        UUID_GENERATOR,
        "Generator",
        "",
        "Generates a random UUID.",
    );

    let mut json_format = operation(
        JSON_FORMAT,
        "Formatter",
        "",
        "Pretty prints a JSON document.",
    );
    json_format.params = vec![ParamDescriptor::new("value", string_schema())
        .required()
        .described("JSON to format.")
        .widget("textarea")];

    let mut jwt_read = operation(
        JWT_READ,
        "Security",
        "jwt-",
        "Decodes the header and payload of a JWT without validating it.",
    );
    jwt_read.params = vec![ParamDescriptor::new("value", string_schema())
        .required()
        .described("Token to read.")
        .widget("textarea")];
    jwt_read.result = Some(json!({ "name": "result", "schema": { "type": "object" } }));

    let mut custom_widget = operation(
        CUSTOM_WIDGET,
        "Samples",
        "",
        "Returns a fixed declarative UI sample.",
    );
    custom_widget.result = Some(json!({ "name": "result", "schema": { "type": "object" } }));

    let mut schemas = SchemaIndex::new();
    schemas.insert(
        ENCODING_MODE_SCHEMA.to_string(),
        json!({ "type": "string", "enum": ["DEFAULT", "URL", "URL_NO_PADDING"] }),
    );
    schemas.insert(
        DECODING_MODE_SCHEMA.to_string(),
        json!({ "type": "string", "enum": ["DEFAULT", "URL"] }),
    );

    OpenRpcDocument {
        openrpc: Some("1.2.6".to_string()),
        info: Some(json!({ "title": "RPC Console Mock", "version": env!("CARGO_PKG_VERSION") })),
        methods: vec![
            base64_decode,
            base64_encode,
            custom_widget,
            json_format,
            jwt_read,
            uuid_generator,
        ],
        components: Components { schemas },
    }
}
