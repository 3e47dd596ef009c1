//! Error banner shown above a grid.

use console_core::ConsoleError;
use dioxus::prelude::*;

/// Human-readable text for an error.
pub fn describe_error(error: &ConsoleError) -> String {
    match error {
        ConsoleError::Validation(v) => format!("Invalid {}: {}", v.field, v.message),
        ConsoleError::NotFound(what) => format!("Not found: {}", what),
        ConsoleError::Network(e) => format!("Could not reach the server: {}", e),
        ConsoleError::Server(e) => format!("Server error: {}", e),
        ConsoleError::Busy => "Another change is still being saved".to_string(),
    }
}

/// Dismissible banner for the last failure, if any.
#[component]
pub fn ErrorBanner(error: Option<ConsoleError>, on_dismiss: EventHandler<()>) -> Element {
    let Some(error) = error else {
        return rsx! {};
    };
    let message = describe_error(&error);

    rsx! {
        div { class: "error-banner", role: "alert",
            span { "{message}" }
            button {
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_name_the_field() {
        let text = describe_error(&ConsoleError::validation("name", "is required"));
        assert_eq!(text, "Invalid name: is required");
    }
}
