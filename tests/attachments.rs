mod common;

use std::collections::HashSet;

use common::harness;
use eframe_chat_composer::{PermissionStatus, PickerResult};
use futures::executor::block_on;

fn uris(h: &common::Harness) -> Vec<String> {
    h.composer
        .attachments()
        .iter()
        .map(|a| a.source_uri().to_owned())
        .collect()
}

#[test]
fn test_remove_keeps_relative_order() {
    let mut h = harness();
    h.composer.add_images(["a", "b", "c", "d"]);
    let target = h.composer.attachments().as_slice()[1].id().to_owned();

    assert!(h.composer.remove_attachment(&target));
    assert_eq!(uris(&h), vec!["a", "c", "d"]);

    assert!(!h.composer.remove_attachment(&target));
    assert_eq!(h.composer.attachments().len(), 3);
}

#[test]
fn test_remove_only_matching_duplicate() {
    let mut h = harness();
    h.composer.add_images(["same", "same"]);
    let second = h.composer.attachments().as_slice()[1].id().to_owned();

    h.composer.remove_attachment(&second);
    assert_eq!(h.composer.attachments().len(), 1);
    assert_ne!(h.composer.attachments().as_slice()[0].id(), second);
}

#[test]
fn test_ids_are_unique() {
    let mut h = harness();
    for _ in 0..20 {
        h.composer.add_images(["file:///same.png"; 5]);
    }
    let ids: HashSet<_> = h.composer.attachments().iter().map(|a| a.id().to_owned()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_picked_images_are_appended() {
    let mut h = harness();
    let pick = h.media.next_pick();
    h.composer.attach_images();
    pick.send(PickerResult::selected(vec!["x.png".into(), "y.png".into()]))
        .unwrap();

    block_on(h.composer.settle());
    assert_eq!(uris(&h), vec!["x.png", "y.png"]);
}

#[test]
fn test_out_of_order_picks_append_in_completion_order() {
    let mut h = harness();
    let first = h.media.next_pick();
    let second = h.media.next_pick();
    h.composer.attach_images();
    h.composer.attach_images();
    assert_eq!(h.composer.pump(), 0);

    second.send(PickerResult::selected(vec!["second.png".into()])).unwrap();
    assert_eq!(h.composer.pump(), 1);
    assert_eq!(uris(&h), vec!["second.png"]);

    first.send(PickerResult::selected(vec!["first.png".into()])).unwrap();
    assert_eq!(h.composer.pump(), 1);
    assert_eq!(uris(&h), vec!["second.png", "first.png"]);
    assert!(!h.composer.has_pending());
}

#[test]
fn test_cancelled_pick_is_silent() {
    let mut h = harness();
    let pick = h.media.next_pick();
    h.composer.attach_images();
    pick.send(PickerResult::cancelled()).unwrap();

    block_on(h.composer.settle());
    assert!(h.composer.attachments().is_empty());
    assert!(h.composer.take_notices().is_empty());
}

#[test]
fn test_permission_denied_raises_notice() {
    let mut h = harness();
    h.composer.add_images(["kept.png"]);
    h.media.permission.set(PermissionStatus::Denied);

    h.composer.attach_images();
    block_on(h.composer.settle());

    assert_eq!(uris(&h), vec!["kept.png"]);
    let notices = h.composer.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "Permission required");
    assert_eq!(notices[0].message, "Permission to access media library is needed.");
    assert!(h.composer.take_notices().is_empty());
}
