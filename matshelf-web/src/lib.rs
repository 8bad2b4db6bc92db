/// Matshelf Web - WASM bindings for the browser page
///
/// Wraps a shelf session so the page's buttons can apply a transform,
/// show the results and check the student's answer.
use matshelf_core::{Report, ShelfConfig, ShelfSession};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Positions of the last applied transform, one entry per box
#[derive(Debug, Clone, PartialEq, Serialize)]
struct Positions {
    before: Vec<[f64; 3]>,
    after: Vec<[f64; 3]>,
    colors: Vec<String>,
    opacities: Vec<f32>,
}

fn positions(session: &ShelfSession) -> Option<Positions> {
    let applied = session.last()?;
    Some(Positions {
        before: applied.before.to_rows(),
        after: applied.after.to_rows(),
        colors: applied.boxes.iter().map(|b| b.color.hex()).collect(),
        opacities: applied.boxes.iter().map(|b| b.opacity()).collect(),
    })
}

fn compare_report(session: &ShelfSession, expected: &str) -> Report {
    let outcome = session.compare(expected);
    Report::from_outcome(&outcome, session.config().mismatch_preview)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn document() -> Result<web_sys::Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

fn element(document: &web_sys::Document, id: &str) -> Result<web_sys::Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("element #{} not found", id)))
}

#[wasm_bindgen]
pub struct WebShelf {
    session: ShelfSession,
}

#[wasm_bindgen]
impl WebShelf {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebShelf {
        WebShelf {
            session: ShelfSession::default(),
        }
    }

    /// Create a session from a JSON config string
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<WebShelf, JsValue> {
        let config = ShelfConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(WebShelf {
            session: ShelfSession::new(config),
        })
    }

    /// Parse the sign matrix and transform and move the boxes
    pub fn apply(&mut self, signs: &str, matrix: &str) -> Result<(), JsValue> {
        self.session
            .apply(signs, matrix)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = matrixText)]
    pub fn matrix_text(&self) -> Option<String> {
        self.session.matrix_text()
    }

    #[wasm_bindgen(js_name = positionsHtml)]
    pub fn positions_html(&self) -> Option<String> {
        self.session.positions_html()
    }

    /// `{ before, after, colors, opacities }` for the scene, or `null`
    #[wasm_bindgen(js_name = afterPoints)]
    pub fn after_points(&self) -> Result<JsValue, JsValue> {
        match positions(&self.session) {
            Some(p) => to_js(&p),
            None => Ok(JsValue::NULL),
        }
    }

    /// `{ ok, message, tone }`; never throws for a wrong answer
    pub fn compare(&self, expected: &str) -> Result<JsValue, JsValue> {
        to_js(&compare_report(&self.session, expected))
    }

    /// Write the matrix and the positions table into the given elements
    #[wasm_bindgen(js_name = renderResults)]
    pub fn render_results(&self, info_id: &str, table_id: &str) -> Result<(), JsValue> {
        let document = document()?;
        let matrix = self.session.matrix_text().unwrap_or_default();
        element(&document, info_id)?.set_text_content(Some(&format!("Matrix (R³→R³):\n{}", matrix)));
        element(&document, table_id)?.set_inner_html(&self.session.positions_html().unwrap_or_default());
        Ok(())
    }

    #[wasm_bindgen(js_name = clearResults)]
    pub fn clear_results(&self, info_id: &str, table_id: &str) -> Result<(), JsValue> {
        let document = document()?;
        element(&document, info_id)?.set_text_content(Some(""));
        element(&document, table_id)?.set_inner_html("");
        Ok(())
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }
}

impl Default for WebShelf {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    #[cfg(feature = "console-panic")]
    console_error_panic_hook::set_once();

    Ok(())
}
