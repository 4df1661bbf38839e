//! Error types for sales-link.
//!
//! Failed requests are classified by origin (transport, auth, validation,
//! server fault) rather than by concrete response type. Every variant carries
//! a ready-to-display message: either one extracted from the response body or
//! the default for that status. Backend messages with known unfriendly
//! patterns (enum constants, constraint violations, duplicates) are rewritten
//! before they reach the user.

use thiserror::Error;

/// Result type for sales-link operations
pub type Result<T> = std::result::Result<T, SalesLinkError>;

/// Errors that can occur when talking to the sales backend
#[derive(Debug, Error)]
pub enum SalesLinkError {
    /// Could not reach the server at all (connection refused, DNS, timeout)
    #[error("{0}")]
    Connection(String),

    /// 401 - session is no longer valid; callers must clear local state
    #[error("{0}")]
    Unauthorized(String),

    /// 403
    #[error("{0}")]
    Forbidden(String),

    /// 404
    #[error("{0}")]
    NotFound(String),

    /// 409
    #[error("{0}")]
    Conflict(String),

    /// 422
    #[error("{0}")]
    Validation(String),

    /// 500
    #[error("{0}")]
    Server(String),

    /// Any other non-success status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Client misconfiguration (missing base URL, bad TLS setup)
    #[error("{0}")]
    Configuration(String),

    /// Response body did not match the expected shape
    #[error("{0}")]
    Decode(String),
}

impl SalesLinkError {
    /// Classify a non-success HTTP response.
    ///
    /// Prefers a message extracted from the body; falls back to the
    /// per-status default. The defaults match what the console shows users.
    pub fn from_status(status: u16, body: &str) -> Self {
        let extracted = extract_message(body);
        let msg = |default: &str| extracted.clone().unwrap_or_else(|| default.to_string());

        match status {
            401 => SalesLinkError::Unauthorized(msg("Não autorizado. Faça login novamente.")),
            403 => SalesLinkError::Forbidden(msg(
                "Você não tem permissão para acessar este recurso",
            )),
            404 => SalesLinkError::NotFound(msg("Recurso não encontrado")),
            409 => SalesLinkError::Conflict(msg("Conflito ao processar a solicitação")),
            422 => SalesLinkError::Validation(msg("Dados inválidos")),
            500 => SalesLinkError::Server(msg("Erro interno do servidor")),
            _ => SalesLinkError::Http {
                status,
                message: extracted.unwrap_or_else(|| format!("Erro {status}")),
            },
        }
    }

    /// Whether this error means the current session must be discarded
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, SalesLinkError::Unauthorized(_))
    }

    /// The message suitable for showing to the user
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for SalesLinkError {
    fn from(err: reqwest::Error) -> Self {
        // Status errors are mapped via from_status before reaching here, so
        // anything left is a transport-level failure.
        log::warn!("[LINK] transport failure: {err}");
        if err.is_decode() {
            SalesLinkError::Decode("Resposta inesperada do servidor".to_string())
        } else {
            SalesLinkError::Connection("Não foi possível conectar ao servidor".to_string())
        }
    }
}

/// Extract a human-readable message from an error response body.
///
/// Tries, in order: a `message` field, a raw string body, the first entry of
/// an `errors` array. Returns `None` when the body carries nothing usable.
pub fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => {
            if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
                return Some(format_backend_message(message));
            }
            if let Some(raw) = value.as_str() {
                return Some(format_backend_message(raw));
            }
            if let Some(first) = value
                .get("errors")
                .and_then(|e| e.as_array())
                .and_then(|a| a.first())
            {
                if let Some(msg) = first.get("message").and_then(|m| m.as_str()) {
                    return Some(msg.to_string());
                }
                if let Some(msg) = first.as_str() {
                    return Some(msg.to_string());
                }
            }
            None
        }
        // Not JSON at all: treat the body itself as the message
        Err(_) => Some(format_backend_message(trimmed)),
    }
}

/// Rewrite known backend message patterns into friendlier text.
///
/// Unmatched messages pass through verbatim.
pub fn format_backend_message(message: &str) -> String {
    if message.contains("No enum constant") {
        if let Some(value) = trailing_enum_constant(message) {
            return format!(
                "Valor inválido: \"{value}\". Por favor, selecione uma opção válida."
            );
        }
        return "Valor selecionado é inválido. Por favor, selecione uma opção válida."
            .to_string();
    }

    if message.contains("ConstraintViolation") || message.contains("constraint") {
        return "Dados inválidos. Verifique os campos e tente novamente.".to_string();
    }

    if message.contains("duplicate") || message.contains("já existe") {
        return "Este registro já existe no sistema.".to_string();
    }

    message.to_string()
}

/// The `X` in a message ending with `No enum constant some.path.X`
fn trailing_enum_constant(message: &str) -> Option<&str> {
    let rest = message.rsplit("No enum constant ").next()?;
    let last = rest.trim_end().rsplit('.').next()?;
    if !last.is_empty() && last.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some(last)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults() {
        assert!(matches!(
            SalesLinkError::from_status(401, ""),
            SalesLinkError::Unauthorized(_)
        ));
        assert_eq!(
            SalesLinkError::from_status(404, "").user_message(),
            "Recurso não encontrado"
        );
        assert_eq!(
            SalesLinkError::from_status(409, "").user_message(),
            "Conflito ao processar a solicitação"
        );
        assert_eq!(
            SalesLinkError::from_status(422, "").user_message(),
            "Dados inválidos"
        );
        assert_eq!(
            SalesLinkError::from_status(500, "").user_message(),
            "Erro interno do servidor"
        );
    }

    #[test]
    fn test_unknown_status_keeps_code() {
        match SalesLinkError::from_status(418, "") {
            SalesLinkError::Http { status, message } => {
                assert_eq!(status, 418);
                assert_eq!(message, "Erro 418");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_message_field_wins() {
        let body = r#"{"message": "Cliente não encontrado", "errors": [{"message": "x"}]}"#;
        assert_eq!(
            SalesLinkError::from_status(404, body).user_message(),
            "Cliente não encontrado"
        );
    }

    #[test]
    fn test_raw_string_body() {
        assert_eq!(
            extract_message("algo deu errado"),
            Some("algo deu errado".to_string())
        );
        assert_eq!(
            extract_message(r#""mensagem em json""#),
            Some("mensagem em json".to_string())
        );
    }

    #[test]
    fn test_errors_array_first_entry() {
        let body = r#"{"errors": [{"message": "campo obrigatório"}, {"message": "outro"}]}"#;
        assert_eq!(extract_message(body), Some("campo obrigatório".to_string()));

        let body = r#"{"errors": ["primeiro", "segundo"]}"#;
        assert_eq!(extract_message(body), Some("primeiro".to_string()));
    }

    #[test]
    fn test_empty_body_has_no_message() {
        assert_eq!(extract_message(""), None);
        assert_eq!(extract_message("   "), None);
        assert_eq!(extract_message("{}"), None);
    }

    #[test]
    fn test_enum_constant_rewrite() {
        let msg =
            format_backend_message("No enum constant com.sales.domain.PaymentMethod.BITCOIN");
        assert_eq!(
            msg,
            "Valor inválido: \"BITCOIN\". Por favor, selecione uma opção válida."
        );
    }

    #[test]
    fn test_constraint_rewrite() {
        let msg = format_backend_message("javax.validation.ConstraintViolationException: ...");
        assert_eq!(msg, "Dados inválidos. Verifique os campos e tente novamente.");
    }

    #[test]
    fn test_duplicate_rewrite() {
        assert_eq!(
            format_backend_message("registro já existe"),
            "Este registro já existe no sistema."
        );
    }

    #[test]
    fn test_unmatched_message_passes_through() {
        assert_eq!(format_backend_message("tudo certo"), "tudo certo");
    }
}
