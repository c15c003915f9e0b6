//! Staggered entrance of ring items.
//!
//! Each item rises from `rise` pixels below its resting place and fades in,
//! starting `stagger` seconds after the previous one. The animation runs as a
//! frame callback and unregisters itself once the last item has settled.
//! Elapsed time is measured from the first refresh the callback sees.

use std::rc::Rc;

use log::debug;

use crate::components::element::ElementId;
use crate::components::tween::IntroSettings;
use crate::resources::framescheduler::{CallbackId, FrameScheduler};
use crate::resources::visualsink::SharedSink;
use crate::systems::tween::{ease, lerp_f32};

/// Eased progress in `[0, 1]` of item `index` after `elapsed` seconds.
pub fn intro_progress(settings: &IntroSettings, index: usize, elapsed: f32) -> f32 {
    let local = elapsed - index as f32 * settings.stagger.max(0.0);
    let t = if settings.duration > 0.0 {
        local / settings.duration
    } else if local >= 0.0 {
        1.0
    } else {
        0.0
    };
    ease(settings.easing, t)
}

fn publish(sink: &SharedSink, item: ElementId, settings: &IntroSettings, progress: f32) {
    let offset = lerp_f32(settings.rise, 0.0, progress);
    sink.set_property(item, "--introY", &format!("{:.2}px", offset));
    sink.set_property(item, "opacity", &format!("{:.3}", progress));
}

/// Start the intro for `items` and return the callback driving it.
pub fn play_intro(
    scheduler: &FrameScheduler,
    sink: &SharedSink,
    items: &[ElementId],
    settings: IntroSettings,
) -> CallbackId {
    let items = items.to_vec();
    let sink = Rc::clone(sink);
    let weak = scheduler.downgrade();
    let mut started_ms: Option<f64> = None;
    let total = settings.total_duration(items.len());

    let id = scheduler.add(move |ctx| {
        let start = *started_ms.get_or_insert(ctx.timestamp_ms);
        let elapsed = ((ctx.timestamp_ms - start) / 1000.0) as f32;

        for (index, &item) in items.iter().enumerate() {
            publish(&sink, item, &settings, intro_progress(&settings, index, elapsed));
        }

        if elapsed >= total {
            if let Some(scheduler) = weak.upgrade() {
                scheduler.remove(&ctx.callback_id);
            }
            debug!(
                "intro {} finished after {:.2}s ({} items)",
                ctx.callback_id,
                elapsed,
                items.len()
            );
        }
    });
    debug!("intro {} scheduled, {:.2}s total", id, total);
    id
}
