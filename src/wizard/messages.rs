/// Visual severity for a status message. Classification is by substring over
/// the Spanish UI strings, not structured error codes; fragile, but required
/// for parity with the kiosk styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Success,
    Warning,
    Info,
}

pub fn classify(message: &str) -> Severity {
    if message.contains("Error") || message.contains("no encontrado") {
        Severity::Error
    } else if ["Perfecto", "Increíble", "Excelente"]
        .iter()
        .any(|w| message.contains(w))
    {
        Severity::Success
    } else if message.contains("Por favor") {
        Severity::Warning
    } else {
        Severity::Info
    }
}

pub fn css_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "message-box message-error",
        Severity::Success => "message-box message-success",
        Severity::Warning => "message-box message-warning",
        Severity::Info => "message-box message-info",
    }
}
