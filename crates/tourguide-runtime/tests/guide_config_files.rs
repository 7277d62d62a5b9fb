//! Loading guide definitions from TOML and JSON files.

use std::io::Write;

use tourguide_core::geometry::Rect;
use tourguide_i18n::{Lang, TextKey};
use tourguide_layout::Placement;
use tourguide_runtime::{GuideConfig, GuideConfigError, TourController, TourState};
use tourguide_widgets::{GuideRenderer, MissingTarget, MountParent, NavButton, StaticHost};

const ONBOARDING_TOML: &str = r##"
local_key = "onboarding-v2"
mask = true
hotspot = true
closable = false
step = 3
lang = "ja"
expire_date = "2099-01-01"
missing_target = "skip"

[layout]
gap = 8

[labels]
ok = "完了"

[[steps]]
selector = "#search"
title = "Search"
content = "Find anything from here."
placement = "bottom-left"
offset = { x = 0, y = 4 }

[[steps]]
selector = "#sidebar"
title = "Navigate"
placement = "right-top"
parent = "body"

[[steps]]
target_pos = { left = 40, top = 300, width = 200, height = 80 }
title = "Charts"
content = "<em>Live</em> data"
markup = true
"##;

#[test]
fn toml_round_trips_into_guide() {
    let cfg = GuideConfig::from_toml_str(ONBOARDING_TOML).unwrap();
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    assert_eq!(cfg.steps.len(), 3);
    assert_eq!(cfg.steps[0].placement, Placement::BottomLeft);
    assert_eq!(cfg.steps[1].parent, Some(MountParent::Body));
    assert_eq!(cfg.layout.gap, 8);
    assert_eq!(cfg.layout.spotlight_padding, 4, "unset layout fields keep defaults");

    let guide = cfg.to_guide().unwrap();
    assert_eq!(guide.local_key.as_deref(), Some("onboarding-v2"));
    assert!(guide.mask && guide.hotspot && !guide.closable);
    assert_eq!(guide.first_step_number, 3);
    assert_eq!(guide.lang, Lang::Ja);
    assert_eq!(guide.missing_target, MissingTarget::Skip);
    assert!(guide.expire_date.is_some());
    assert_eq!(guide.steps[2].target_pos, Some(Rect::new(40, 300, 200, 80)));
    assert_eq!(guide.translator().label(TextKey::NextStep), "次へ");
    assert_eq!(guide.renderer.button(NavButton::Ok, "了解しました"), "完了");
}

#[test]
fn json_file_drives_a_controller() {
    let json = r##"{
        "local_key": "billing",
        "steps": [
            { "selector": "#plan", "title": "Plan", "placement": "top" },
            { "selector": "#pay", "title": "Pay", "skip": true },
            { "title": "Done" }
        ]
    }"##;
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let cfg = GuideConfig::from_file(file.path()).unwrap();
    let guide = cfg.to_guide().unwrap();

    let host = StaticHost::new(Rect::from_size(800, 600))
        .with_element("#plan", Rect::new(100, 300, 80, 30))
        .with_element("#pay", Rect::new(100, 400, 80, 30));
    let mut c = TourController::new(guide, host);
    c.start().unwrap();
    c.next().unwrap();
    assert_eq!(c.state(), TourState::Active(2));
    c.next().unwrap();
    assert_eq!(c.state(), TourState::Completed);
}

#[test]
fn extreme_coordinates_stay_inside_viewport() {
    let toml = r##"
[[steps]]
title = "Far away"
offset = { x = 2147483647, y = 0 }

[[steps]]
title = "Above the page"
target_pos = { left = 0, top = -2147483600, width = 10, height = 10 }
placement = "top"
"##;
    let cfg = GuideConfig::from_toml_str(toml).unwrap();
    assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
    let viewport = Rect::from_size(800, 600);
    let mut c = TourController::new(cfg.to_guide().unwrap(), StaticHost::new(viewport));
    c.start().unwrap();

    let layout = c.layout(tourguide_core::geometry::Size::new(100, 40)).unwrap();
    assert_eq!(layout.modal, Rect::new(700, 280, 100, 40));

    c.next().unwrap();
    let layout = c.layout(tourguide_core::geometry::Size::new(100, 40)).unwrap();
    assert_eq!(layout.placement, Some(Placement::Bottom));
    assert!(viewport.contains_rect(&layout.modal));
}

#[test]
fn parse_errors_are_typed() {
    assert!(matches!(
        GuideConfig::from_toml_str("steps = 5"),
        Err(GuideConfigError::Toml(_))
    ));
    assert!(matches!(
        GuideConfig::from_json_str("{\"steps\": ["),
        Err(GuideConfigError::Json(_))
    ));
    assert!(matches!(
        GuideConfig::from_toml_str("placement = \"sideways\"\n[[steps]]\nplacement = \"diagonal\""),
        Err(GuideConfigError::Toml(_))
    ));
    assert!(matches!(
        GuideConfig::from_toml_file("/definitely/not/here.toml"),
        Err(GuideConfigError::Io(_))
    ));
}

#[test]
fn invalid_values_surface_as_validation_errors() {
    let cfg = GuideConfig::from_toml_str("step = 0\nexpire_date = \"whenever\"").unwrap();
    match cfg.to_guide() {
        Err(GuideConfigError::Validation(errors)) => {
            assert!(errors.iter().any(|e| e.contains("steps must not be empty")));
            assert!(errors.iter().any(|e| e.contains("step must be >= 1")));
            assert!(errors.iter().any(|e| e.contains("expire_date")));
        }
        other => panic!("expected validation errors, got {other:?}"),
    }
}
