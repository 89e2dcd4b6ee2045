use crate::job::JobController;
use leptos::prelude::*;

#[component]
pub fn ActivityPanel(job: RwSignal<JobController>) -> impl IntoView {
    let output_path = move || job.with(|job| job.output_path().to_string());

    view! {
        <section class="grid">
            <div class="card">
                <div class="card-header"><p class="eyebrow">"Output"</p></div>
                <p class="result-text">
                    {move || {
                        let path = output_path();
                        if path.is_empty() { "The .lrc file will be written next to your audio.".to_string() } else { path }
                    }}
                </p>
            </div>

            <div class="card">
                <div class="card-header">
                    <p class="eyebrow">"Log"</p>
                    <span class="settings-hint">{move || format!("{} lines", job.with(|job| job.log().len()))}</span>
                </div>
                <pre class="log-body">{move || job.with(|job| job.log().to_text())}</pre>
            </div>
        </section>
    }
}
