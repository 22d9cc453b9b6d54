//! Checks the container build recipe against the service defaults.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::path::PathBuf;

use mealbox_common::constants::DEFAULT_PORT;

fn workspace_file(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..").join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}

fn instructions(dockerfile: &str) -> Vec<String> {
    dockerfile
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}

#[test]
fn image_exposes_default_port() {
    let dockerfile = workspace_file("Dockerfile");
    let expose = format!("EXPOSE {DEFAULT_PORT}");
    assert!(instructions(&dockerfile).iter().any(|l| *l == expose));
}

#[test]
fn image_runs_a_single_serve_process() {
    let lines = instructions(&workspace_file("Dockerfile"));
    let cmds: Vec<_> = lines.iter().filter(|l| l.starts_with("CMD") || l.starts_with("ENTRYPOINT")).collect();
    assert_eq!(cmds.len(), 2);
    assert!(cmds.iter().any(|l| l.contains("mealbox")));
    assert!(cmds.iter().any(|l| l.contains("serve")));
    assert!(lines.iter().any(|l| l == "WORKDIR /app"));
}

#[test]
fn manifests_are_copied_before_sources() {
    let lines = instructions(&workspace_file("Dockerfile"));
    let sources = lines.iter().position(|l| l == "COPY crates/ crates/").unwrap();
    let manifests: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.starts_with("COPY") && l.contains("Cargo.toml"))
        .map(|(i, _)| i)
        .collect();
    assert!(manifests.len() >= 5);
    assert!(manifests.iter().all(|&i| i < sources));
}

#[test]
fn workbooks_are_kept_out_of_the_build_context() {
    let ignore = workspace_file(".dockerignore");
    assert!(ignore.lines().any(|l| l.trim() == "**/*.xlsx"));
}
