// ============================================================================
// MARKER CONTENT - HTML de las ventanas de información
// ============================================================================

use crate::models::ShopRecord;

pub const CURRENT_LOCATION_LABEL: &str = "현재 위치";
pub const DEFAULT_LOCATION_LABEL: &str = "기본 위치";

/// Ventana de una tienda: nombre, teléfono y dirección original (sin limpiar)
pub fn shop_info_html(shop: &ShopRecord) -> String {
    let mut html = String::from(r#"<div class="shop-info" style="padding:6px 10px;min-width:180px;">"#);
    html.push_str(&format!("<strong>{}</strong>", escape_html(&shop.title)));
    if !shop.telephone.trim().is_empty() {
        html.push_str(&format!("<div>☎ {}</div>", escape_html(&shop.telephone)));
    }
    html.push_str(&format!("<div>{}</div>", escape_html(&shop.address)));
    html.push_str("</div>");
    html
}

pub fn label_html(label: &str) -> String {
    format!(
        r#"<div class="location-label" style="padding:5px 8px;">{}</div>"#,
        escape_html(label)
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
