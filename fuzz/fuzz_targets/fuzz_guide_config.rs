#![no_main]

use libfuzzer_sys::fuzz_target;
use tourguide_runtime::GuideConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    for parsed in [GuideConfig::from_toml_str(text), GuideConfig::from_json_str(text)] {
        let Ok(config) = parsed else {
            continue;
        };
        let problems = config.validate();
        match config.to_guide() {
            Ok(guide) => {
                assert!(problems.is_empty(), "guide built despite {problems:?}");
                assert_eq!(guide.len(), config.steps.len());
                assert!(guide.first_step_number >= 1);
            }
            Err(_) => assert!(!problems.is_empty(), "to_guide failed without problems"),
        }
    }
});
