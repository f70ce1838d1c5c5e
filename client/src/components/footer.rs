//! Page footer.

use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="site-footer">
            <div class="site-footer__brand">
                <span>"Prompter"</span>
                <p>"One prompt. Every leading model. Side by side."</p>
            </div>
            <nav class="site-footer__links">
                <a href="/#models">"Models"</a>
                <a href="/#pricing">"Pricing"</a>
                <a href="/responses">"Responses"</a>
            </nav>
            <p class="site-footer__legal">"© 2025 Prompter. All rights reserved."</p>
        </footer>
    }
}
