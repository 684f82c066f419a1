//! Integration tests for `stylesmith list`.

#![cfg(unix)]

mod common;

use common::*;
use stylesmith::ContentHash;

#[test]
fn list_before_and_after_build() {
    let env = TestEnv::builder()
        .with_job("main", MAIN_SCSS)
        .with_job("admin", ADMIN_SCSS)
        .build();

    let before = env.run(&["list"]);
    assert_success!(before);
    insta::assert_snapshot!(before.stdout.trim_end(), @r"
    main   never built
    admin  never built
    ");

    assert_success!(env.run(&["build", "main"]));
    let after = env.run(&["list"]);
    insta::assert_snapshot!(after.stdout.trim_end(), @r"
    main   up to date
    admin  never built
    ");

    assert_eq!(env.compile_count(), 1);
}

#[test]
fn list_shows_both_digests_after_a_change() {
    let env = TestEnv::builder().with_job("main", MAIN_SCSS).build();
    assert_success!(env.run(&["build"]));

    env.write_file("styles/main.scss", "body { color: blue; }\n");
    let result = env.run(&["list", "--json"]);
    assert_success!(result);

    let report = &result.json_lines()[0];
    let job = &report["jobs"][0];
    assert_eq!(job["status"], "source_changed");
    assert_eq!(
        job["previous_digest"],
        ContentHash::from_bytes(MAIN_SCSS.as_bytes()).as_str()
    );
    assert_eq!(
        job["current_digest"],
        ContentHash::from_bytes(b"body { color: blue; }\n").as_str()
    );

    let human = env.run(&["list"]);
    assert_output_contains!(human, ContentHash::from_bytes(MAIN_SCSS.as_bytes()).hex());
    assert_eq!(env.compile_count(), 1);
}

#[test]
fn list_reports_missing_output_and_style_change() {
    let env = TestEnv::builder()
        .with_job("main", MAIN_SCSS)
        .with_job("admin", ADMIN_SCSS)
        .build();
    assert_success!(env.run(&["build"]));
    env.remove_file("generated/main.css");

    let result = env.run(&["list", "--style", "expanded", "--json"]);
    let report = &result.json_lines()[0];

    assert_eq!(report["jobs"][0]["status"], "output_missing");
    assert_eq!(report["jobs"][1]["status"], "style_changed");
    assert_eq!(report["jobs"][1]["previous_style"], "nested");
    assert_eq!(report["stale"], 2);
    assert_eq!(env.compile_count(), 2);
}

#[test]
fn list_fails_on_invalid_entries() {
    let env = TestEnv::builder()
        .with_job("main", MAIN_SCSS)
        .with_raw_job("input = \"styles/main.scss\"\noutput = \"x.css\"")
        .build();

    let result = env.run(&["list"]);

    assert_failure!(result);
    assert_output_contains!(result, "missing required field 'name'");
}
