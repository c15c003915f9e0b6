//! Headless gallery scene and host loop.
//!
//! Builds the ECS world that stands in for a browser page: a ring of image
//! items with drag rotation and an entrance intro, and a row of slides each
//! carrying a pointer tilt. All animation output lands in a
//! [`RecordingSink`]; the schedule in [`build_schedule`] feeds it scripted
//! pointer input and fires the refresh signal once per host frame.

use std::rc::Rc;

use bevy_ecs::prelude::*;
use log::info;

use crate::components::element::ElementId;
use crate::components::tilt::TiltOptions;
use crate::events::pointer::PointerMessage;
use crate::resources::captions::Caption;
use crate::resources::framescheduler::{CallbackId, FrameScheduler};
use crate::resources::galleryconfig::GalleryConfig;
use crate::resources::pointerinput::{PointerHub, SharedInput};
use crate::resources::refresh::ManualRefresh;
use crate::resources::visualsink::{RecordingSink, SharedSink, VisualSink};
use crate::resources::worldtime::WorldTime;
use crate::systems::intro::play_intro;
use crate::systems::ring::{RingHandle, attach_ring};
use crate::systems::scene::{
    dispatch_pointer_system, refresh_system, report_system, scripted_pointer_system,
    update_pointer_messages,
};
use crate::systems::tilt::{TiltHandle, attach_tilt};
use crate::systems::time::update_world_time;

/// Window-level target: drags anywhere on the page turn the ring.
pub const WINDOW: ElementId = ElementId(0);
/// The rotating ring container.
pub const RING: ElementId = ElementId(1);
/// First slide element; slide `i` is `SLIDE_BASE + i`.
pub const SLIDE_BASE: u32 = 100;
/// First ring item element; item `i` is `RING_ITEM_BASE + i`.
pub const RING_ITEM_BASE: u32 = 200;

pub fn slide_element(index: usize) -> ElementId {
    ElementId(SLIDE_BASE + index as u32)
}

pub fn ring_item_element(index: usize) -> ElementId {
    ElementId(RING_ITEM_BASE + index as u32)
}

/// One slide: its element, image and caption.
#[derive(Clone, Debug)]
pub struct Slide {
    pub element: ElementId,
    pub image_url: String,
    pub caption: Caption,
}

/// Animation state of the page. Holds `Rc` handles, so it lives in the
/// world as a non-send resource.
pub struct GalleryScene {
    pub scheduler: FrameScheduler,
    pub refresh: ManualRefresh,
    pub hub: Rc<PointerHub>,
    pub sink: Rc<RecordingSink>,
    pub ring: RingHandle,
    pub tilts: Vec<TiltHandle>,
    pub slides: Vec<Slide>,
    pub intro: CallbackId,
}

impl GalleryScene {
    /// Lay out the page for `image_urls` and start the animation loop.
    pub fn new(config: &GalleryConfig, image_urls: Vec<String>, rng: &mut fastrand::Rng) -> Self {
        let refresh = ManualRefresh::new();
        let scheduler = FrameScheduler::new(Rc::new(refresh.clone()));
        let hub = Rc::new(PointerHub::new());
        let sink = Rc::new(RecordingSink::new());
        let input: SharedInput = hub.clone();
        let shared_sink: SharedSink = sink.clone();

        let items: Vec<ElementId> = (0..image_urls.len()).map(ring_item_element).collect();
        for (&item, url) in items.iter().zip(&image_urls) {
            sink.set_property(item, "background-image", &format!("url({})", url));
        }
        let ring = attach_ring(&shared_sink, RING, &items, config.ring_settings());

        let captions = Caption::batch(rng, image_urls.len());
        let slides: Vec<Slide> = image_urls
            .into_iter()
            .zip(captions)
            .enumerate()
            .map(|(index, (image_url, caption))| Slide {
                element: slide_element(index),
                image_url,
                caption,
            })
            .collect();
        for slide in &slides {
            sink.set_property(slide.element, "title", slide.caption.title);
            sink.set_property(slide.element, "subtitle", slide.caption.subtitle);
            sink.set_property(slide.element, "description", slide.caption.description);
        }

        let tilt_options = TiltOptions::default().with_settings(config.tilt_settings());
        let tilts: Vec<TiltHandle> = slides
            .iter()
            .map(|slide| {
                attach_tilt(&scheduler, &input, &shared_sink, slide.element, tilt_options.clone())
            })
            .collect();

        let intro = play_intro(&scheduler, &shared_sink, &items, config.intro_settings());
        scheduler.start();

        info!(
            "gallery scene ready: {} slides, {} frame callbacks",
            slides.len(),
            scheduler.len()
        );

        GalleryScene {
            scheduler,
            refresh,
            hub,
            sink,
            ring,
            tilts,
            slides,
            intro,
        }
    }

    /// Whether the entrance intro is still registered.
    pub fn intro_running(&self) -> bool {
        self.scheduler.contains(&self.intro)
    }
}

/// Create the world with every resource the schedule needs.
pub fn build_world(config: GalleryConfig, image_urls: Vec<String>, seed: u64) -> World {
    let mut rng = fastrand::Rng::with_seed(seed);
    let scene = GalleryScene::new(&config, image_urls, &mut rng);

    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(config);
    world.insert_resource(Messages::<PointerMessage>::default());
    world.insert_non_send_resource(scene);
    world
}

/// Per-frame systems, in the order a browser would run them.
pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            scripted_pointer_system,
            update_pointer_messages,
            dispatch_pointer_system,
            refresh_system,
            report_system,
        )
            .chain(),
    );
    update
}

/// Advance the world by `frames` fixed steps at the configured rate.
pub fn run(world: &mut World, schedule: &mut Schedule, frames: u64) {
    let fps = world.resource::<GalleryConfig>().target_fps.max(1);
    let dt = 1.0 / fps as f32;
    for _ in 0..frames {
        update_world_time(world, dt);
        schedule.run(world);
        world.clear_trackers();
    }
    let scene = world.non_send_resource::<GalleryScene>();
    info!(
        "ran {} frames, {} refreshes served, ring at {:.2} deg",
        frames,
        scene.scheduler.frame_count(),
        scene.ring.state().current_angle
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::imagesource::placeholder_url;

    fn urls(n: usize) -> Vec<String> {
        (0..n).map(placeholder_url).collect()
    }

    #[test]
    fn test_scene_registers_tilts_and_intro() {
        let config = GalleryConfig::new();
        let scene = GalleryScene::new(&config, urls(3), &mut fastrand::Rng::with_seed(1));
        assert_eq!(scene.tilts.len(), 3);
        assert_eq!(scene.scheduler.len(), 4);
        assert!(scene.intro_running());
        assert!(scene.scheduler.is_running());
        assert_eq!(
            scene.sink.get(ring_item_element(1), "background-image"),
            Some(format!("url({})", placeholder_url(1)))
        );
        assert_eq!(
            scene.sink.get(slide_element(2), "subtitle").as_deref(),
            Some("Dog Gallery")
        );
    }

    #[test]
    fn test_empty_gallery_still_builds() {
        let config = GalleryConfig::new();
        let scene = GalleryScene::new(&config, Vec::new(), &mut fastrand::Rng::with_seed(1));
        assert!(scene.tilts.is_empty());
        assert_eq!(scene.ring.spacing(), None);
    }
}
