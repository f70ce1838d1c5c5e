//! Responses page. Signed-in users only.

use leptos::prelude::*;

use crate::components::protected_route::ProtectedRoute;
use crate::components::responses_section::ResponsesSection;

#[component]
pub fn ResponsesPage() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <ResponsesSection/>
        </ProtectedRoute>
    }
}
