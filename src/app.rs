use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::fetch_model_choice;
use crate::bridge::mount_progress_bridge;
use crate::components::activity::ActivityPanel;
use crate::components::controls::JobControls;
use crate::job::JobController;

#[component]
pub fn App() -> impl IntoView {
    let job = RwSignal::new(JobController::new());

    mount_progress_bridge(job);

    spawn_local(async move {
        match fetch_model_choice().await {
            Ok(model) => job.update(|job| {
                if let Err(err) = job.set_model(model) {
                    leptos::logging::warn!("Saved model choice not applied: {err}");
                }
            }),
            Err(err) => leptos::logging::warn!("Failed to load model choice: {err}"),
        }
    });

    view! {
        <main class="shell">
            <header class="hero">
                <p class="eyebrow">"Offline lyric timing"</p>
                <h1>"LyricTime"</h1>
            </header>

            <JobControls job />
            <ActivityPanel job />
        </main>
    }
}
