use er_core::core_api::{
    Catalog, CoreError, CoreErrorCode, DecodeOutcome, Engine, FilterCriteria, Session, apply,
    cross_reference,
};
use er_render::{
    JsonStyle, TextRenderOptions, render_checklist_json, render_checklist_text,
    render_decode_json, render_slots_json,
};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

/// Options object passed from JavaScript. Catalogs arrive as JSON text
/// rather than objects: JS reorders integer-like keys such as `10000000`,
/// and catalog order is display order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebOptions {
    pub slot: Option<usize>,
    pub base_catalog: Option<String>,
    pub expansion_catalog: Option<String>,
    pub include_expansion: bool,
    pub filter: FilterCriteria,
    pub json_output: bool,
    pub verbose: bool,
}

impl Default for WebOptions {
    fn default() -> Self {
        Self {
            slot: None,
            base_catalog: None,
            expansion_catalog: None,
            include_expansion: true,
            filter: FilterCriteria::default(),
            json_output: true,
            verbose: false,
        }
    }
}

#[derive(Debug, Clone)]
struct WebError {
    code: &'static str,
    message: String,
}

#[derive(Debug, Clone, Serialize)]
struct WebErrorPayload {
    code: String,
    message: String,
}

impl WebError {
    fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    fn to_js_value(&self) -> JsValue {
        let payload = WebErrorPayload {
            code: self.code.to_string(),
            message: self.message.clone(),
        };
        serde_wasm_bindgen::to_value(&payload).unwrap_or_else(|_| {
            JsValue::from_str(&format!("{}: {}", payload.code, payload.message))
        })
    }
}

impl From<CoreError> for WebError {
    fn from(err: CoreError) -> Self {
        let code = match err.code {
            code if code.is_save_format() => "parse_failed",
            CoreErrorCode::InvalidSlot => "invalid_slot",
            CoreErrorCode::Catalog => "invalid_catalog",
            _ => "io_failed",
        };
        WebError::new(code, err.message)
    }
}

#[wasm_bindgen]
pub fn list_slots(save_bytes: &[u8]) -> Result<String, JsValue> {
    list_slots_impl(save_bytes).map_err(|err| err.to_js_value())
}

#[wasm_bindgen]
pub fn decode_slot(save_bytes: &[u8], options: JsValue) -> Result<String, JsValue> {
    let parsed_options = parse_options(options).map_err(|err| err.to_js_value())?;
    decode_slot_impl(save_bytes, &parsed_options).map_err(|err| err.to_js_value())
}

#[wasm_bindgen]
pub fn render_checklist(save_bytes: &[u8], options: JsValue) -> Result<String, JsValue> {
    let parsed_options = parse_options(options).map_err(|err| err.to_js_value())?;
    render_checklist_impl(save_bytes, &parsed_options).map_err(|err| err.to_js_value())
}

fn open(save_bytes: &[u8]) -> Result<Session<'_>, WebError> {
    if save_bytes.is_empty() {
        return Err(WebError::new(
            "unsupported_file",
            "The uploaded file is empty. Please provide an ER0000.sl2 save file.",
        ));
    }
    Ok(Engine::new().open_bytes(save_bytes)?)
}

fn list_slots_impl(save_bytes: &[u8]) -> Result<String, WebError> {
    let session = open(save_bytes)?;
    let slots = session.slot_names()?;
    to_pretty_json(&render_slots_json(&slots, JsonStyle::CanonicalV1))
}

fn decode_slot_impl(save_bytes: &[u8], options: &WebOptions) -> Result<String, WebError> {
    let session = open(save_bytes)?;
    let outcome = decode_selected(&session, options)?;
    to_pretty_json(&render_decode_json(&outcome, JsonStyle::CanonicalV1))
}

fn render_checklist_impl(save_bytes: &[u8], options: &WebOptions) -> Result<String, WebError> {
    let catalog = build_catalog(options)?;
    let session = open(save_bytes)?;
    let outcome = decode_selected(&session, options)?;

    let result = cross_reference(outcome.ids(), &catalog);
    let view = apply(&result.items, &options.filter);

    if options.json_output {
        let value = render_checklist_json(
            &outcome,
            &result,
            &options.filter,
            &view,
            JsonStyle::CanonicalV1,
        );
        return to_pretty_json(&value);
    }

    Ok(render_checklist_text(
        &outcome,
        &result,
        &view,
        TextRenderOptions {
            verbose: options.verbose,
        },
    ))
}

fn decode_selected(session: &Session<'_>, options: &WebOptions) -> Result<DecodeOutcome, WebError> {
    let slot = match options.slot {
        Some(slot) => slot,
        None => session.first_occupied_slot()?.ok_or_else(|| {
            WebError::new(
                "no_character",
                "No character slots are in use in this save file.",
            )
        })?,
    };
    Ok(session.decode_slot(slot)?)
}

fn build_catalog(options: &WebOptions) -> Result<Catalog, WebError> {
    let Some(base_json) = options.base_catalog.as_deref() else {
        return Err(WebError::new(
            "invalid_options",
            "A base catalog is required to build a checklist.",
        ));
    };
    let base = Catalog::from_json_str(base_json)?;

    match options.expansion_catalog.as_deref() {
        Some(expansion_json) if options.include_expansion => {
            let expansion = Catalog::from_json_str(expansion_json)?;
            Ok(Catalog::merge(base, expansion))
        }
        _ => Ok(base),
    }
}

fn to_pretty_json(value: &serde_json::Value) -> Result<String, WebError> {
    serde_json::to_string_pretty(value).map_err(|err| {
        WebError::new(
            "render_failed",
            format!("failed to serialize rendered JSON output: {err}"),
        )
    })
}

fn parse_options(options: JsValue) -> Result<WebOptions, WebError> {
    if options.is_null() || options.is_undefined() {
        return Ok(WebOptions::default());
    }

    serde_wasm_bindgen::from_value(options).map_err(|err| {
        WebError::new(
            "invalid_options",
            format!("Failed to parse web options: {err}"),
        )
    })
}

#[cfg(test)]
mod tests {
    use er_core::core_api::OwnershipFilter;
    use er_core::inventory::STANDARD_MARKER;
    use er_core::layout::SlotTable;

    use super::{WebOptions, decode_slot_impl, list_slots_impl, render_checklist_impl};

    const CATALOG_JSON: &str = r#"{
        "Limgrave": {
            "Church of Elleh": {
                "00F42400": {"name": "Dagger", "type": "merchant"},
                "40000800": {"name": "Smithing-Stone Miner's Bell Bearing [1]", "type": "boss"}
            },
            "Stormhill": {
                "10000000": {"name": "Knight Helm", "type": "foe", "farmable": true},
                "00F42400": {"name": "Dagger", "type": "chest"}
            }
        },
        "Liurnia": {
            "Raya Lucaria": {
                "40000BC0": {"name": "Crimson Crystal Tear", "type": "invader"},
                "90000000": {"name": "Wandering Noble Ashes", "type": "quest"}
            }
        }
    }"#;

    const EXPANSION_JSON: &str = r#"{
        "Gravesite Plain": {
            "Belurat": {
                "20000001": {"name": "Two-Headed Turtle Talisman", "type": "chest"}
            }
        }
    }"#;

    /// Full-size save; `character` names slot 2 and gives it a dagger and a
    /// talisman.
    fn build_save(character: Option<&str>) -> Vec<u8> {
        let table = SlotTable::default();
        let mut bytes = vec![0u8; table.required_len()];
        bytes[..4].copy_from_slice(b"BND4");
        let Some(name) = character else {
            return bytes;
        };

        let field = table.names[2];
        for (i, unit) in name.encode_utf16().enumerate() {
            let at = field.start + i * 2;
            bytes[at..at + 2].copy_from_slice(&unit.to_le_bytes());
        }

        let mut section = STANDARD_MARKER.to_vec();
        section.extend([0x00; 8]);
        for id in [0x00F4_2400u32, 0x2000_0001] {
            section.extend(id.to_le_bytes());
            section.extend([0x01, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x80]);
            section.extend([0x00; 4]);
        }
        let at = table.slots[2].start + 0x1_0000;
        bytes[at..at + section.len()].copy_from_slice(&section);
        bytes
    }

    fn save_bytes() -> Vec<u8> {
        build_save(Some("Thops"))
    }

    fn with_catalogs() -> WebOptions {
        WebOptions {
            base_catalog: Some(CATALOG_JSON.to_string()),
            expansion_catalog: Some(EXPANSION_JSON.to_string()),
            ..WebOptions::default()
        }
    }

    #[test]
    fn list_slots_impl_returns_all_ten() {
        let rendered = list_slots_impl(&save_bytes()).expect("slots should render");
        let parsed: serde_json::Value =
            serde_json::from_str(&rendered).expect("json output should parse");
        let slots = parsed.as_array().expect("slot array");
        assert_eq!(slots.len(), 10);
        assert_eq!(slots[2]["name"], "Thops");
    }

    #[test]
    fn empty_payload_is_rejected() {
        let err = list_slots_impl(&[]).expect_err("empty payload should fail");
        assert_eq!(err.code, "unsupported_file");
    }

    #[test]
    fn foreign_file_fails_to_parse() {
        let err = list_slots_impl(b"PK\x03\x04 not a save").expect_err("zip should fail");
        assert_eq!(err.code, "parse_failed");
    }

    #[test]
    fn decode_slot_impl_defaults_to_first_named_slot() {
        let rendered =
            decode_slot_impl(&save_bytes(), &WebOptions::default()).expect("slot should decode");
        let parsed: serde_json::Value =
            serde_json::from_str(&rendered).expect("json output should parse");
        assert_eq!(parsed["slot"], 2);
        assert_eq!(parsed["ids"], serde_json::json!(["00F42400", "20000001"]));

        let options = WebOptions {
            slot: Some(11),
            ..WebOptions::default()
        };
        let err = decode_slot_impl(&save_bytes(), &options).expect_err("slot 11 is invalid");
        assert_eq!(err.code, "invalid_slot");
    }

    #[test]
    fn save_without_characters_has_no_default_slot() {
        let bytes = build_save(None);
        let err = decode_slot_impl(&bytes, &WebOptions::default())
            .expect_err("no named slot to pick");
        assert_eq!(err.code, "no_character");
    }

    #[test]
    fn checklist_merges_expansion_unless_disabled() {
        let rendered =
            render_checklist_impl(&save_bytes(), &with_catalogs()).expect("checklist renders");
        let parsed: serde_json::Value =
            serde_json::from_str(&rendered).expect("json output should parse");
        assert_eq!(parsed["stats"]["global"]["total"], 7);
        assert_eq!(parsed["stats"]["global"]["owned"], 3);

        let options = WebOptions {
            include_expansion: false,
            ..with_catalogs()
        };
        let rendered = render_checklist_impl(&save_bytes(), &options).expect("checklist renders");
        let parsed: serde_json::Value =
            serde_json::from_str(&rendered).expect("json output should parse");
        assert_eq!(parsed["stats"]["global"]["total"], 6);
        assert_eq!(parsed["stats"]["global"]["owned"], 2);
    }

    #[test]
    fn checklist_applies_filter_and_can_render_text() {
        let mut options = with_catalogs();
        options.filter.status = OwnershipFilter::Missing;
        options.json_output = false;
        let rendered = render_checklist_impl(&save_bytes(), &options).expect("text renders");
        assert!(rendered.contains("Slot 2: Thops"));
        assert!(rendered.contains("[ ] Knight Helm"));
        assert!(!rendered.contains("[x]"));
    }

    #[test]
    fn checklist_requires_base_catalog() {
        let err = render_checklist_impl(&save_bytes(), &WebOptions::default())
            .expect_err("no catalog given");
        assert_eq!(err.code, "invalid_options");

        let options = WebOptions {
            base_catalog: Some("[1, 2, 3]".to_string()),
            ..WebOptions::default()
        };
        let err = render_checklist_impl(&save_bytes(), &options).expect_err("bad catalog");
        assert_eq!(err.code, "invalid_catalog");
    }
}
