use crate::api::*;
use crate::job::{JobController, ModelChoice, AUDIO_EXTENSIONS};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn JobControls(job: RwSignal<JobController>) -> impl IntoView {
    let busy = move || job.with(|job| job.is_busy());

    let choose_file = move |_| {
        spawn_local(async move {
            match pick_audio_file(&AUDIO_EXTENSIONS).await {
                Ok(Some(path)) => job.update(|job| {
                    if let Err(err) = job.select_file(path) {
                        leptos::logging::warn!("Ignoring file selection: {err}");
                    }
                }),
                Ok(None) => {}
                Err(err) => leptos::logging::error!("File picker failed: {err}"),
            }
        });
    };

    let change_model = move |ev: leptos::ev::Event| {
        let Ok(model) = event_target_value(&ev).parse::<ModelChoice>() else {
            return;
        };
        let accepted = job
            .try_update(|job| job.set_model(model).is_ok())
            .unwrap_or(false);
        if accepted {
            spawn_local(async move {
                if let Err(err) = save_model_choice(model).await {
                    leptos::logging::warn!("Failed to save model choice: {err}");
                }
            });
        }
    };

    let generate = move |_| {
        let Some(request) = job.try_update(|job| job.begin()).flatten() else {
            return;
        };
        spawn_local(async move {
            let result = generate_lrc(&request).await;
            job.update(|job| job.finish(result));
        });
    };

    view! {
        <section class="card control-card">
            <div class="card-header">
                <div>
                    <p class="eyebrow">"Audio"</p>
                    <h2>"Generate a timed .lrc"</h2>
                </div>
                <span class="pill"
                    class:live=busy
                    class:idle=move || !busy()
                >
                    {move || job.with(|job| job.state().label())}
                </span>
            </div>
            <div class="control-row">
                <button class="ghost" on:click=choose_file disabled=busy>"Choose audio file"</button>
                <code class="path-code">
                    {move || job.with(|job| {
                        if job.audio_path().is_empty() {
                            "No file selected".to_string()
                        } else {
                            job.audio_path().to_string()
                        }
                    })}
                </code>
            </div>
            <div class="control-row">
                <select
                    on:change=change_model
                    prop:value=move || job.with(|job| job.model().as_str())
                    disabled=busy
                >
                    {ModelChoice::ALL
                        .into_iter()
                        .map(|model| view! { <option value=model.as_str()>{model.label()}</option> })
                        .collect_view()}
                </select>
                <button
                    on:click=generate
                    disabled=move || !job.with(|job| job.can_run())
                >
                    {move || if busy() { "Working..." } else { "Generate lyrics" }}
                </button>
            </div>
            <p class="inline-status">{move || job.with(|job| job.status().to_string())}</p>
        </section>
    }
}
