use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::subscribe;
use crate::job::JobController;
use crate::progress::{
    DownloadProgressDto, LyricProgressDto, ProgressFact, DOWNLOAD_PROGRESS_EVENT,
    LYRIC_PROGRESS_EVENT,
};
use crate::subscription::ListenerSlot;

/// Feeds both progress channels into `job` for the lifetime of the calling
/// component.
pub fn mount_progress_bridge(job: RwSignal<JobController>) {
    let lyric_slot = ListenerSlot::new();
    let download_slot = ListenerSlot::new();

    spawn_local(subscribe(
        LYRIC_PROGRESS_EVENT,
        lyric_slot.clone(),
        move |dto: LyricProgressDto| {
            job.update(|controller| controller.apply(ProgressFact::from(dto)));
        },
    ));

    spawn_local(subscribe(
        DOWNLOAD_PROGRESS_EVENT,
        download_slot.clone(),
        move |dto: DownloadProgressDto| {
            job.update(|controller| controller.apply(ProgressFact::from(dto)));
        },
    ));

    let slots = StoredValue::new_local([lyric_slot, download_slot]);
    on_cleanup(move || {
        slots.try_with_value(|slots| slots.iter().for_each(ListenerSlot::release));
    });
}
