use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::process::Command;

fn is_numbered_rs(entry: &fs::DirEntry) -> bool {
    let path = entry.path();
    path.is_file()
        && path.extension() == Some(OsStr::new("rs"))
        && path
            .file_name()
            .and_then(OsStr::to_str)
            .is_some_and(|n| n.chars().next().is_some_and(|c| c.is_ascii_digit()))
}

#[test]
fn run_all_demos() {
    let out = std::env::temp_dir();
    let entries = fs::read_dir(Path::new("examples")).expect("read examples dir");
    let mut found_any = false;
    for entry in entries.flatten().filter(is_numbered_rs) {
        let path = entry.path();
        let name = path
            .file_stem()
            .and_then(OsStr::to_str)
            .expect("demo name")
            .to_string();
        found_any = true;
        let mut cmd = Command::new("cargo");
        cmd.arg("run").arg("--example").arg(&name);
        cmd.env("POSITIVITY_DEMOS_OUT", &out);
        cmd.assert().success();
    }
    assert!(found_any, "no demos found to run");
}

#[test]
fn all_methods_demo_reports_selections() {
    let mut cmd = Command::new("cargo");
    cmd.arg("run").arg("--example").arg("01_all_methods");
    cmd.env("POSITIVITY_DEMOS_OUT", std::env::temp_dir());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("positiveCasesViral_totalTestEncountersViral"))
        .stdout(predicate::str::contains("8 regions"));
}
