#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tourguide_core::geometry::{Offset, Rect, Size};
use tourguide_layout::{Placement, PlacementCalculator, Side, Spotlight};

#[derive(Debug, Arbitrary)]
struct Input {
    target: (i32, i32, i32, i32),
    viewport: (i32, i32, i32, i32),
    modal: (i32, i32),
    placement: u8,
    offset: (i32, i32),
    gap: i32,
    auto_flip: bool,
    clamp: bool,
    padding: i32,
    inset: i32,
}

/// Whether the viewport's far edges are representable without saturating.
fn on_grid(r: Rect) -> bool {
    i64::from(r.x) + i64::from(r.width) <= i64::from(i32::MAX)
        && i64::from(r.y) + i64::from(r.height) <= i64::from(i32::MAX)
}

fuzz_target!(|input: Input| {
    let (tx, ty, tw, th) = input.target;
    let target = Rect::new(tx, ty, tw, th);
    let (vx, vy, vw, vh) = input.viewport;
    let viewport = Rect::new(vx, vy, vw, vh);
    let modal = Size::new(input.modal.0, input.modal.1);
    let placement = Placement::ALL[usize::from(input.placement) % Placement::ALL.len()];
    let offset = Offset::new(input.offset.0, input.offset.1);
    let fits = modal.width <= viewport.width && modal.height <= viewport.height;

    let pos = PlacementCalculator::new(target, placement)
        .offset(offset)
        .gap(input.gap)
        .auto_flip(input.auto_flip)
        .clamp(input.clamp)
        .compute(modal, viewport);
    let rect = pos.rect(modal);

    assert_eq!(rect.size(), modal, "modal size changed");
    if !input.auto_flip {
        assert!(!pos.flipped, "flipped with auto_flip off");
        assert_eq!(pos.placement, Some(placement));
    }
    if !input.clamp {
        assert!(!pos.clamped, "clamped with clamp off");
    }
    if input.clamp && fits && on_grid(viewport) {
        assert!(
            viewport.contains_rect(&rect),
            "clamped modal {rect:?} escapes viewport {viewport:?}"
        );
    }

    let centered = PlacementCalculator::centered(modal, viewport, offset);
    assert_eq!(centered.placement, None);
    if fits && on_grid(viewport) {
        assert!(viewport.contains_rect(&centered.rect(modal)));
    }

    let spotlight = Spotlight::new(target).padding(input.padding);
    let cutout = spotlight.cutout(viewport);
    for region in spotlight.mask_regions(viewport) {
        assert!(viewport.contains_rect(&region), "mask region outside viewport");
        if let Some(cutout) = cutout {
            assert!(
                region.intersection_opt(&cutout).is_none(),
                "mask region {region:?} overlaps cutout {cutout:?}"
            );
        }
    }

    let _ = spotlight.hotspot();
    let arrow = spotlight.arrow(rect, pos.placement.unwrap_or(placement), input.inset);
    match arrow.edge {
        Side::Top | Side::Bottom => assert!(arrow.x >= rect.x && arrow.x <= rect.right()),
        Side::Left | Side::Right => assert!(arrow.y >= rect.y && arrow.y <= rect.bottom()),
    }
});
