//! Cell value formatting for table output.
//!
//! Absent values never render as a raw hole: currency cells fall back to
//! "R$ 0,00", everything else to "-". Enum-coded fields (payment method,
//! product type) map to display labels with the raw code as fallback so an
//! unknown backend value still shows something meaningful.

use serde_json::Value;

/// How a cell value should be rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    /// As-is string conversion
    Text,
    /// Brazilian Real, "R$ 1.234,56"
    Currency,
    /// dd/mm/yyyy
    Date,
    /// Payment method code to label
    PaymentMethod,
    /// Product type code to label
    ProductType,
}

/// Render one cell. `None`, JSON null and the empty string all count as
/// absent.
pub fn format_cell(value: Option<&Value>, format: CellFormat) -> String {
    let value = match value {
        Some(v) if !v.is_null() && v.as_str() != Some("") => v,
        _ => {
            return match format {
                CellFormat::Currency => currency_brl(0.0),
                _ => "-".to_string(),
            }
        }
    };

    match format {
        CellFormat::Text => display_text(value),
        CellFormat::Currency => currency_brl(value.as_f64().unwrap_or(0.0)),
        CellFormat::Date => match value.as_str() {
            Some(s) => date_br(s),
            None => display_text(value),
        },
        CellFormat::PaymentMethod => payment_method_label(&display_text(value)).to_string(),
        CellFormat::ProductType => product_type_label(&display_text(value)).to_string(),
    }
}

fn display_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Format a number as Brazilian Real: thousands separated by '.',
/// decimals by ',', always two decimal places.
pub fn currency_brl(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{frac:02}")
}

/// Format an ISO date or datetime string as dd/mm/yyyy.
///
/// Unparseable input is returned unchanged.
pub fn date_br(raw: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return dt.format("%d/%m/%Y").to_string();
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%d/%m/%Y").to_string();
    }
    if let Ok(d) = chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return d.format("%d/%m/%Y").to_string();
    }
    raw.to_string()
}

/// Payment method code to display label; unknown codes pass through
pub fn payment_method_label(code: &str) -> &str {
    match code {
        "DINHEIRO" => "Dinheiro",
        "CARTAO_CREDITO" => "Cartão de Crédito",
        "CARTAO_DEBITO" => "Cartão de Débito",
        "PIX" => "PIX",
        "TRANSFERENCIA_BANCARIA" => "Transferência Bancária",
        // already-translated labels map to themselves
        "Dinheiro" => "Dinheiro",
        "Cartão de Crédito" => "Cartão de Crédito",
        "Cartão de Débito" => "Cartão de Débito",
        "Transferência Bancária" => "Transferência Bancária",
        other => other,
    }
}

/// Product type code to display label; unknown codes pass through
pub fn product_type_label(code: &str) -> &str {
    match code {
        "LIPS" => "Lábios",
        "FACE" => "Rosto",
        "EYES" => "Olhos",
        "NAILS" => "Unhas",
        "SKIN_CARE" => "Cuidados com a Pele",
        "HAIR" => "Cabelos",
        "FRAGRANCE" => "Fragrância",
        "OTHER" => "Outro",
        other => other,
    }
}
