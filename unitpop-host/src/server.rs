//! Request dispatch for the popup host

use std::str::FromStr;
use std::sync::Arc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info, warn};
use unitpop::{
    category_options, options_bindings, popup_bindings, render_labels, unit_options, ElementBinding,
    MissingLabel, PopupError, UnitPopup,
};
use unitpop_i18n::{CatalogLookup, DirLocaleSource, Language, TranslationResolver};
use unitpop_prefs::{JsonFileStore, Theme};
use unitpop_units::{Category, ConversionError};

use crate::config::HostConfig;
use crate::protocol::{RpcError, RpcRequest, RpcResponse};

pub const SERVER_NAME: &str = "unitpop";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct Server {
    app: UnitPopup,
}

impl Server {
    pub fn new(app: UnitPopup) -> Self {
        Self { app }
    }

    /// Wire the stores from `config`, then load preferences and translations
    pub async fn start(config: &HostConfig) -> Result<Self, PopupError> {
        let source = Arc::new(DirLocaleSource::new(config.locales_dir()));

        let lookup = match CatalogLookup::load(source.as_ref(), &config.default_locale).await {
            Ok(lookup) => {
                info!(locale = lookup.locale(), "default catalog loaded");
                lookup
            }
            Err(e) => {
                warn!(locale = %config.default_locale, error = %e, "no default catalog, labels will show markers");
                CatalogLookup::default()
            }
        };

        let resolver = Arc::new(TranslationResolver::new(Arc::new(lookup), source));
        let store = Arc::new(JsonFileStore::new(&config.prefs_file));
        let app = UnitPopup::load(store, resolver).await?;
        Ok(Self::new(app))
    }

    /// Handle one input line; `None` when nothing should be written back
    pub async fn handle_line(&mut self, line: &str) -> Option<String> {
        let value: JsonValue = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "error parsing request");
                return serialize(&RpcResponse::from_result(None, Err(RpcError::parse(e))));
            }
        };

        // Best-effort id so the client can match an invalid-request error
        let raw_id = value.get("id").cloned();
        let response = match RpcRequest::from_value(value) {
            Ok(request) => {
                debug!(method = %request.method, "processing");
                let response = self.handle_request(&request).await;
                if request.id.is_none() {
                    debug!(method = %request.method, "notification processed (no response)");
                    return None;
                }
                response
            }
            Err(e) => {
                warn!(error = %e.message, "invalid request");
                RpcResponse::from_result(Some(raw_id.unwrap_or(JsonValue::Null)), Err(e))
            }
        };

        serialize(&response)
    }

    pub async fn handle_request(&mut self, request: &RpcRequest) -> RpcResponse {
        let params = &request.params;
        let result = match request.method.as_str() {
            // Lifecycle
            "initialize" => self.handle_initialize(params),
            "initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Popup
            "popup/state" => self.view(),
            "popup/selectCategory" => self.handle_select_category(params),
            "popup/setInput" => self.handle_set_input(params),
            "popup/setFromUnit" => self.handle_set_unit(params, Side::From),
            "popup/setToUnit" => self.handle_set_unit(params, Side::To),
            "popup/swap" => self.handle_swap(),
            "popup/categories" => to_json(category_options(self.app.resolver())),
            "popup/units" => self.handle_units(params),

            // Translations
            "i18n/resolve" => self.handle_resolve(params),
            "i18n/render" => self.handle_render(params),

            // Options page
            "options/get" => self.handle_options_get().await,
            "options/set" => self.handle_options_set(params).await,

            _ => Err(RpcError::method_not_found(&request.method)),
        };

        RpcResponse::from_result(request.id.clone(), result)
    }

    fn handle_initialize(&self, params: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
        let client = params.as_ref()
            .and_then(|p| p.get("clientInfo"))
            .and_then(|c| c.get("name"))
            .and_then(|n| n.as_str())
            .unwrap_or("unknown");
        info!(client, "client connected");

        Ok(json!({
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION,
            },
            "locale": self.app.resolver().active_locale(),
            "preferences": self.app.preferences(),
        }))
    }

    fn handle_select_category(&mut self, params: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
        let p: CategoryParams = parse_params(params)?;
        let category = Category::from_str(&p.category).map_err(RpcError::invalid_params)?;
        self.app.popup_mut().select_category(category).map_err(conversion_error)?;
        self.view()
    }

    fn handle_set_input(&mut self, params: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
        let p: InputParams = parse_params(params)?;
        self.app.popup_mut().set_input(&p.text).map_err(conversion_error)?;
        self.view()
    }

    fn handle_set_unit(&mut self, params: &Option<JsonValue>, side: Side) -> Result<JsonValue, RpcError> {
        let p: UnitParams = parse_params(params)?;
        let popup = self.app.popup_mut();
        let changed = match side {
            Side::From => popup.set_from_unit(&p.unit),
            Side::To => popup.set_to_unit(&p.unit),
        };
        changed.map_err(conversion_error)?;
        self.view()
    }

    fn handle_swap(&mut self) -> Result<JsonValue, RpcError> {
        self.app.popup_mut().swap().map_err(conversion_error)?;
        self.view()
    }

    fn handle_units(&self, params: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
        let p: UnitsParams = parse_params(params)?;
        let category = match p.category {
            Some(id) => Category::from_str(&id).map_err(RpcError::invalid_params)?,
            None => self.app.popup().state().category,
        };
        let options = unit_options(self.app.resolver(), category).map_err(conversion_error)?;
        to_json(options)
    }

    fn handle_resolve(&self, params: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
        let p: ResolveParams = parse_params(params)?;
        let resolver = self.app.resolver();
        let message = match &p.fallback {
            Some(fallback) => resolver.resolve_or(&p.key, fallback),
            None => resolver.resolve(&p.key),
        };
        Ok(json!({
            "key": &p.key,
            "message": message,
            "translated": resolver.try_resolve(&p.key).is_some(),
        }))
    }

    fn handle_render(&self, params: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
        let p: RenderParams = parse_params(params)?;
        let (bindings, missing) = match (p.bindings, p.page.as_deref()) {
            (Some(bindings), _) => (bindings, MissingLabel::Marker),
            (None, None | Some("popup")) => (popup_bindings(), MissingLabel::Marker),
            (None, Some("options")) => (options_bindings(), MissingLabel::Keep),
            (None, Some(page)) => return Err(RpcError::invalid_params(format!("unknown page '{}'", page))),
        };
        to_json(render_labels(self.app.resolver(), &bindings, missing))
    }

    async fn handle_options_get(&self) -> Result<JsonValue, RpcError> {
        let options = self.app.options();
        let preferences = options.restore().await.map_err(RpcError::internal)?;
        Ok(json!({
            "document": options.document(&preferences.theme),
            "labels": options.labels(),
            "preferences": preferences,
        }))
    }

    async fn handle_options_set(&mut self, params: &Option<JsonValue>) -> Result<JsonValue, RpcError> {
        let p: OptionsParams = parse_params(params)?;
        let theme = p.theme.as_deref().map(Theme::parse);
        let language = p.language.as_deref().map(Language::parse);

        let reload = self.app.save_options(theme, language).await.map_err(RpcError::internal)?;
        Ok(json!({
            "preferences": self.app.preferences(),
            "reload": reload,
        }))
    }

    fn view(&self) -> Result<JsonValue, RpcError> {
        let view = self.app.view().map_err(RpcError::internal)?;
        to_json(view)
    }
}

#[derive(Debug, Clone, Copy)]
enum Side {
    From,
    To,
}

#[derive(Debug, Deserialize)]
struct CategoryParams {
    category: String,
}

#[derive(Debug, Deserialize)]
struct InputParams {
    text: String,
}

#[derive(Debug, Deserialize)]
struct UnitParams {
    unit: String,
}

#[derive(Debug, Deserialize)]
struct UnitsParams {
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResolveParams {
    key: String,
    /// Shown instead of the `!!key!!` marker
    #[serde(default)]
    fallback: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RenderParams {
    #[serde(default)]
    page: Option<String>,
    #[serde(default)]
    bindings: Option<Vec<ElementBinding>>,
}

#[derive(Debug, Deserialize)]
struct OptionsParams {
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    language: Option<String>,
}

fn serialize(response: &RpcResponse) -> Option<String> {
    match serde_json::to_string(response) {
        Ok(json) => Some(json),
        Err(e) => {
            error!(error = %e, "error serializing response");
            None
        }
    }
}

/// Missing params read as an empty object so optional fields default
fn parse_params<T: DeserializeOwned>(params: &Option<JsonValue>) -> Result<T, RpcError> {
    let value = params.clone().unwrap_or_else(|| json!({}));
    serde_json::from_value(value).map_err(RpcError::invalid_params)
}

fn to_json<T: serde::Serialize>(value: T) -> Result<JsonValue, RpcError> {
    serde_json::to_value(value).map_err(RpcError::internal)
}

/// Unknown ids come from the client, so they are parameter errors
fn conversion_error(e: ConversionError) -> RpcError {
    match e {
        ConversionError::UnknownCategory(_) | ConversionError::UnknownUnit { .. } => RpcError::invalid_params(e),
        other => RpcError::internal(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR};
    use std::path::Path;
    use tempfile::TempDir;

    fn write_locale(root: &Path, locale: &str, json: &str) {
        let dir = root.join("_locales").join(locale);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("messages.json"), json).unwrap();
    }

    async fn server() -> (TempDir, Server) {
        let dir = tempfile::tempdir().unwrap();
        write_locale(
            dir.path(),
            "en",
            r#"{
                "extName": { "message": "Unit Converter" },
                "category_length": { "message": "Length" },
                "unit_cm": { "message": "Centimeters" },
                "labelTheme": { "message": "Theme" }
            }"#,
        );
        write_locale(dir.path(), "fr", r#"{ "extName": { "message": "Convertisseur" } }"#);

        let config = HostConfig::from_vars(|name| match name {
            crate::config::DATA_PATH_VAR => Some(dir.path().display().to_string()),
            _ => None,
        });
        let server = Server::start(&config).await.unwrap();
        (dir, server)
    }

    async fn call(server: &mut Server, method: &str, params: JsonValue) -> JsonValue {
        let line = json!({ "jsonrpc": "2.0", "id": 1, "method": method, "params": params }).to_string();
        let response = server.handle_line(&line).await.unwrap();
        serde_json::from_str(&response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_and_ping() {
        let (_dir, mut server) = server().await;
        let response = call(&mut server, "initialize", json!({ "clientInfo": { "name": "test" } })).await;
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["serverInfo"]["name"], "unitpop");
        assert_eq!(response["result"]["locale"], JsonValue::Null);
        assert_eq!(response["result"]["preferences"]["theme"], "system");

        let response = call(&mut server, "ping", json!({})).await;
        assert_eq!(response["result"], json!({}));
    }

    #[tokio::test]
    async fn test_popup_flow() {
        let (_dir, mut server) = server().await;

        let response = call(&mut server, "popup/state", json!({})).await;
        assert_eq!(response["result"]["labels"][0]["text"], "Unit Converter");
        assert_eq!(response["result"]["units"][0]["label"], "Centimeters");
        assert_eq!(response["result"]["units"][1]["label"], "!!unit_m!!");

        call(&mut server, "popup/selectCategory", json!({ "category": "temperature" })).await;
        let response = call(&mut server, "popup/setInput", json!({ "text": "100" })).await;
        assert_eq!(response["result"]["state"]["result"], "212");

        call(&mut server, "popup/setToUnit", json!({ "unit": "k" })).await;
        let response = call(&mut server, "popup/swap", json!({})).await;
        let state = &response["result"]["state"];
        assert_eq!(state["from_unit"], "k");
        assert_eq!(state["to_unit"], "c");
        assert_eq!(state["input"], "373.15");
        assert_eq!(state["result"], "100");
    }

    #[tokio::test]
    async fn test_bad_params() {
        let (_dir, mut server) = server().await;

        let response = call(&mut server, "popup/setFromUnit", json!({ "unit": "parsec" })).await;
        assert_eq!(response["error"]["code"], INVALID_PARAMS);

        let response = call(&mut server, "popup/selectCategory", json!({ "category": "time" })).await;
        assert_eq!(response["error"]["code"], INVALID_PARAMS);

        let response = call(&mut server, "popup/setInput", json!({})).await;
        assert_eq!(response["error"]["code"], INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_protocol_errors() {
        let (_dir, mut server) = server().await;

        let response: JsonValue = serde_json::from_str(&server.handle_line("{ nope").await.unwrap()).unwrap();
        assert_eq!(response["error"]["code"], PARSE_ERROR);

        let response = call(&mut server, "tools/list", json!({})).await;
        assert_eq!(response["error"]["code"], METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn test_null_id_gets_a_response() {
        let (_dir, mut server) = server().await;
        let line = json!({ "jsonrpc": "2.0", "id": null, "method": "ping" }).to_string();
        let response: JsonValue = serde_json::from_str(&server.handle_line(&line).await.unwrap()).unwrap();
        assert_eq!(response["id"], JsonValue::Null);
        assert_eq!(response["result"], json!({}));
    }

    #[tokio::test]
    async fn test_missing_jsonrpc_is_invalid_request() {
        let (_dir, mut server) = server().await;
        let line = json!({ "id": 7, "method": "ping" }).to_string();
        let response: JsonValue = serde_json::from_str(&server.handle_line(&line).await.unwrap()).unwrap();
        assert_eq!(response["error"]["code"], INVALID_REQUEST);
        assert_eq!(response["id"], 7);
    }

    #[tokio::test]
    async fn test_overflowing_input_is_an_empty_result() {
        let (_dir, mut server) = server().await;
        call(&mut server, "popup/setFromUnit", json!({ "unit": "km" })).await;
        call(&mut server, "popup/setToUnit", json!({ "unit": "cm" })).await;
        let response = call(&mut server, "popup/setInput", json!({ "text": "2" })).await;
        assert_eq!(response["result"]["state"]["result"], "200000");
        let response = call(&mut server, "popup/setInput", json!({ "text": "1e306" })).await;
        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["state"]["input"], "1e306");
        assert_eq!(response["result"]["state"]["result"], "");
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let (_dir, mut server) = server().await;
        let line = json!({ "jsonrpc": "2.0", "method": "popup/setInput", "params": { "text": "5" } }).to_string();
        assert_eq!(server.handle_line(&line).await, None);

        let response = call(&mut server, "popup/state", json!({})).await;
        assert_eq!(response["result"]["state"]["result"], "0.05");
    }

    #[tokio::test]
    async fn test_resolve_and_render() {
        let (_dir, mut server) = server().await;

        let response = call(&mut server, "i18n/resolve", json!({ "key": "nope" })).await;
        assert_eq!(response["result"]["message"], "!!nope!!");
        assert_eq!(response["result"]["translated"], false);

        let response = call(&mut server, "i18n/resolve", json!({ "key": "nope", "fallback": "Nope" })).await;
        assert_eq!(response["result"]["message"], "Nope");

        let bindings = json!([{ "id": "q", "kind": "input", "text_key": "extName" }]);
        let response = call(&mut server, "i18n/render", json!({ "bindings": bindings })).await;
        assert_eq!(response["result"][0]["placeholder"], "Unit Converter");

        let response = call(&mut server, "i18n/render", json!({ "page": "options" })).await;
        let labels = response["result"].as_array().unwrap();
        let theme = labels.iter().find(|l| l["id"] == "themeLabel").unwrap();
        assert_eq!(theme["text"], "Theme");
        let heading = labels.iter().find(|l| l["id"] == "optionsHeading").unwrap();
        assert!(heading.get("text").is_none());
    }

    #[tokio::test]
    async fn test_options_round_trip_persists() {
        let (dir, mut server) = server().await;

        let response = call(&mut server, "options/set", json!({ "theme": "dark", "language": "fr" })).await;
        assert_eq!(response["result"]["reload"]["mode"], "loaded");
        assert_eq!(response["result"]["preferences"]["language"], "fr");

        let response = call(&mut server, "options/get", json!({})).await;
        assert_eq!(response["result"]["document"]["data_theme"], "dark");
        assert_eq!(response["result"]["document"]["lang"], "fr");

        let saved = std::fs::read_to_string(dir.path().join("prefs.json")).unwrap();
        let saved: JsonValue = serde_json::from_str(&saved).unwrap();
        assert_eq!(saved, json!({ "language": "fr", "theme": "dark" }));

        let response = call(&mut server, "popup/state", json!({})).await;
        assert_eq!(response["result"]["labels"][0]["text"], "Convertisseur");
    }

    #[tokio::test]
    async fn test_missing_locale_falls_back() {
        let (_dir, mut server) = server().await;
        let response = call(&mut server, "options/set", json!({ "language": "de" })).await;
        assert_eq!(response["result"]["reload"]["mode"], "fallback");

        let response = call(&mut server, "popup/state", json!({})).await;
        assert_eq!(response["result"]["labels"][0]["text"], "Unit Converter");
    }
}
