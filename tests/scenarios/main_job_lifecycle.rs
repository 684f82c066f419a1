//! Scenario: Editing a Stylesheet
//!
//! Journey: A developer builds a site's stylesheet, edits it, and ships it
//! with a cache-busting URL.
//!
//! Steps:
//! 1. First build compiles the job
//! 2. Rebuilding without changes compiles nothing
//! 3. Editing the source triggers exactly one recompile
//! 4. `list` shows the job as up to date again
//! 5. The asset URL token follows the new content
//! 6. `clean` removes the output and forgets the job
//!
//! Success Criteria:
//! - The compiler runs only when the source actually changed
//! - Saving an unchanged file does not trigger a rebuild

use std::fs::File;
use std::time::{Duration, SystemTime};

use stylesmith::ContentHash;

use crate::common::*;
use crate::{assert_file_exists, assert_file_missing, assert_output_contains, assert_success};

const EDITED: &str = "body { color: rebeccapurple; }\n";

/// SCENARIO: edit, rebuild, ship, clean
#[test]
fn scenario_main_job_lifecycle() {
    let env = TestEnv::builder()
        .with_job("main", MAIN_SCSS)
        .with_job("admin", ADMIN_SCSS)
        .build();

    // Step 1
    assert_success!(env.run(&["build"]));
    assert_eq!(env.compile_count(), 2, "Step 1: both jobs compile");

    // Step 2
    let result = env.run(&["build"]);
    assert_success!(result);
    assert_eq!(env.compile_count(), 2, "Step 2: nothing recompiles");

    // Step 3
    env.write_file("styles/main.scss", EDITED);
    let result = env.run(&["build"]);
    assert_success!(result);
    assert_output_contains!(result, "1 built, 1 up to date, 0 failed");
    assert_eq!(env.compile_count(), 3, "Step 3: only the edited job recompiles");
    assert_eq!(
        env.read_file("generated/main.css"),
        format!("{}{}", banner("nested"), EDITED)
    );

    // Step 4
    let result = env.run(&["list", "--json"]);
    let report = &result.json_lines()[0];
    assert_eq!(report["stale"], 0, "Step 4: nothing is stale");

    // Step 5
    let result = env.run(&["asset", "main"]);
    let token = ContentHash::from_bytes(EDITED.as_bytes()).short(12).to_string();
    assert_eq!(
        result.stdout.trim_end(),
        format!("/static/generated/main.css?{}", token)
    );

    // Step 6
    assert_success!(env.run(&["clean"]));
    assert_file_missing!(env, "generated/main.css");
    assert_file_exists!(env, "styles/main.scss");
    assert!(env.record_files().is_empty(), "Step 6: records forgotten");
}

/// SCENARIO: the file is saved again without edits
///
/// Only the modification time moves; the content digest decides, so nothing
/// is rebuilt and `list` marks the job as touched.
#[test]
fn scenario_touch_without_edit_is_not_a_rebuild() {
    let env = TestEnv::builder().with_job("main", MAIN_SCSS).build();
    assert_success!(env.run(&["build"]));

    let later = SystemTime::now() + Duration::from_secs(120);
    File::options()
        .write(true)
        .open(env.path("styles/main.scss"))
        .unwrap()
        .set_modified(later)
        .unwrap();

    let result = env.run(&["list"]);
    assert_success!(result);
    assert_output_contains!(result, "up to date (touched)");

    assert_success!(env.run(&["build"]));
    assert_eq!(env.compile_count(), 1);
}
