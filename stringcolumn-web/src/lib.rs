use js_sys::Promise;
use serde::Serialize;
use serde_json::Value;
use stringcolumn_rs::{Error, StringColumn, DEFAULT_MIN_THRESHOLD, DEFAULT_SEPARATOR};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{JsFuture, future_to_promise};
use web_sys::{Request, RequestInit, RequestMode, Response};

fn to_js_error(e: Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    JsValue::from_serde(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub struct StringColumnHandle {
    column: StringColumn,
}

#[wasm_bindgen]
impl StringColumnHandle {
    /// Builds a column from a JS array of strings, numbers or booleans.
    #[wasm_bindgen(constructor)]
    pub fn new(data: JsValue) -> Result<StringColumnHandle, JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();
        let value: Value = data.into_serde().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let column = StringColumn::from_json(value).map_err(to_js_error)?;
        Ok(Self { column })
    }

    /// Downloads a delimited file and resolves to a handle over its first
    /// column.
    pub fn fetch(url: String, separator: Option<String>) -> Promise {
        future_to_promise(async move {
            let separator = match separator {
                Some(s) if s.len() == 1 => s.as_bytes()[0],
                Some(s) => return Err(JsValue::from_str(&format!("separator must be a single byte, got {:?}", s))),
                None => DEFAULT_SEPARATOR,
            };
            let text = fetch_text(&url).await?;
            let column = StringColumn::from_reader(text.as_bytes(), separator).map_err(to_js_error)?;
            Ok(JsValue::from(StringColumnHandle { column }))
        })
    }

    #[wasm_bindgen(method)]
    pub fn length(&self) -> usize {
        self.column.len()
    }

    #[wasm_bindgen(method)]
    pub fn at(&self, index: usize) -> Result<String, JsValue> {
        self.column.get(index).map(str::to_string).map_err(to_js_error)
    }

    #[wasm_bindgen(method)]
    pub fn data(&self) -> Result<JsValue, JsValue> {
        to_js(self.column.data())
    }

    #[wasm_bindgen(method)]
    pub fn original_data(&self) -> Result<JsValue, JsValue> {
        to_js(self.column.original_data())
    }

    #[wasm_bindgen(method)]
    pub fn lowercase(&mut self) {
        self.column.lowercase();
    }

    #[wasm_bindgen(method)]
    pub fn strip_punctuation(&mut self, punctuation: Option<String>) {
        match punctuation {
            Some(punctuation) => {
                let punctuation: Vec<char> = punctuation.chars().collect();
                self.column.strip_punctuation(Some(punctuation.as_slice()));
            },
            None => self.column.strip_punctuation(None),
        }
    }

    #[wasm_bindgen(method)]
    pub fn identify_potential_stopwords(&mut self, min_threshold: Option<f64>) -> Result<JsValue, JsValue> {
        let candidates = self.column
            .identify_potential_stopwords(min_threshold.unwrap_or(DEFAULT_MIN_THRESHOLD))
            .map_err(to_js_error)?;
        to_js(candidates)
    }

    #[wasm_bindgen(method)]
    pub fn potential_stopwords(&self) -> Result<JsValue, JsValue> {
        to_js(&self.column.potential_stopwords())
    }

    #[wasm_bindgen(method)]
    pub fn remove_stopwords(&mut self, stopwords: JsValue) -> Result<(), JsValue> {
        let stopwords: Vec<String> = stopwords.into_serde().map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.column.remove_stopwords(stopwords);
        Ok(())
    }

    /// Returns the stopwords that were removed, sorted.
    #[wasm_bindgen(method)]
    pub fn remove_stopwords_automatically(&mut self, use_cache: bool, min_threshold: Option<f64>) -> Result<JsValue, JsValue> {
        let applied = self.column
            .remove_stopwords_automatically(use_cache, min_threshold)
            .map_err(to_js_error)?;
        let mut stopwords: Vec<&str> = applied.iter().collect();
        stopwords.sort_unstable();
        to_js(&stopwords)
    }
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let mut opts = RequestInit::new();
    opts.method("GET");
    opts.mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let response_value = JsFuture::from(window.fetch_with_request(&request)).await?;
    let response: Response = response_value.dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!("fetching {} failed with status {}", url, response.status())));
    }

    JsFuture::from(response.text()?)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))
}
