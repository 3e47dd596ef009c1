// Dioxus `rsx!` macro expands to unwraps internally; allow to avoid false positives.
#![allow(clippy::disallowed_methods)]

use dioxus::prelude::*;

use ui::admin::{AdminJndiPage, AdminJobDefinitionsPage, AdminQueuesPage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(AdminLayout)]
        #[route("/")]
        Home {},
        #[route("/admin")]
        AdminRedirect {},
        #[route("/admin/queues")]
        AdminQueues {},
        #[route("/admin/job-definitions")]
        AdminJobDefinitions {},
        #[route("/admin/jndi")]
        AdminJndi {},
    #[end_layout]
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const ADMIN_CSS: Asset = asset!("/assets/admin.css");

fn main() {
    #[cfg(feature = "server")]
    {
        // RUST_LOG overrides the default level, e.g. RUST_LOG=db=debug.
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .init();
    }

    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "Job console" }
        document::Link { rel: "stylesheet", href: ADMIN_CSS }

        Router::<Route> {}
    }
}

/// Layout for admin routes with sidebar navigation.
#[component]
fn AdminLayout() -> Element {
    rsx! {
        div { class: "admin-layout",
            // Sidebar navigation
            aside { class: "admin-sidebar",
                div { class: "sidebar-header",
                    h1 { class: "sidebar-logo", "Job Console" }
                }
                nav { class: "sidebar-nav",
                    div { class: "nav-section",
                        span { class: "nav-section-title", "Configuration" }
                        Link {
                            to: Route::AdminQueues {},
                            class: "nav-link",
                            active_class: "active",
                            span { class: "nav-icon", "▦" }
                            span { "Queues" }
                        }
                        Link {
                            to: Route::AdminJobDefinitions {},
                            class: "nav-link",
                            active_class: "active",
                            span { class: "nav-icon", "⚙" }
                            span { "Job definitions" }
                        }
                        Link {
                            to: Route::AdminJndi {},
                            class: "nav-link",
                            active_class: "active",
                            span { class: "nav-icon", "⛓" }
                            span { "JNDI resources" }
                        }
                    }
                }
            }

            // Main content area
            main { class: "admin-main",
                Outlet::<Route> {}
            }
        }
    }
}

/// The console has no landing page of its own.
#[component]
fn Home() -> Element {
    rsx! {
        AdminRedirect {}
    }
}

/// Redirect /admin to /admin/queues.
#[component]
fn AdminRedirect() -> Element {
    let nav = use_navigator();
    use_effect(move || {
        nav.push(Route::AdminQueues {});
    });
    rsx! {}
}

#[component]
fn AdminQueues() -> Element {
    rsx! {
        AdminQueuesPage {}
    }
}

#[component]
fn AdminJobDefinitions() -> Element {
    rsx! {
        AdminJobDefinitionsPage {}
    }
}

#[component]
fn AdminJndi() -> Element {
    rsx! {
        AdminJndiPage {}
    }
}

#[component]
fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div { class: "page-container",
            div { class: "empty-state",
                p { "No page at /{path}" }
                Link { to: Route::AdminQueues {}, "Go to queues" }
            }
        }
    }
}
