//! Scenario: One Broken Stylesheet
//!
//! Journey: A developer introduces a syntax error in one of several
//! stylesheets, reads the compiler's message, and fixes it.
//!
//! Steps:
//! 1. Build with one broken job
//! 2. The other jobs still build; the error names the file
//! 3. Fix the broken source and rebuild
//! 4. Only the previously broken job compiles
//!
//! Success Criteria:
//! - A failed job never blocks the rest of the batch
//! - The compiler's diagnostic reaches the user unaltered

use crate::common::*;
use crate::{assert_failure, assert_file_exists, assert_file_missing, assert_output_contains, assert_success};

/// SCENARIO: broken job is isolated, then fixed
#[test]
fn scenario_broken_job_isolated_then_fixed() {
    let env = TestEnv::builder()
        .with_job("main", MAIN_SCSS)
        .with_job("broken", BROKEN_SCSS)
        .with_job("admin", ADMIN_SCSS)
        .build();

    // Step 1
    let result = env.run(&["build"]);
    assert_failure!(result);

    // Step 2
    assert_output_contains!(result, "2 built, 0 up to date, 1 failed");
    assert_output_contains!(result, "Error: unterminated block");
    assert_output_contains!(result, "broken.scss:1");
    assert_file_exists!(env, "generated/main.css");
    assert_file_exists!(env, "generated/admin.css");
    assert_file_missing!(env, "generated/broken.css");

    let list = env.run(&["list", "--json"]);
    let broken = &list.json_lines()[0]["jobs"][1];
    assert_eq!(broken["name"], "broken");
    assert_eq!(broken["status"], "never_built");

    // Step 3
    env.write_file("styles/broken.scss", ".fixed { margin: 0; }\n");
    let result = env.run(&["build"]);
    assert_success!(result);

    // Step 4
    assert_output_contains!(result, "1 built, 2 up to date, 0 failed");
    assert_eq!(env.compile_count(), 4);
    assert_file_exists!(env, "generated/broken.css");
}
