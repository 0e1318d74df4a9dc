#![allow(missing_docs)]

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use xtoken_testkit::{canonical_text, copy_fixture, fixture_path, scratch_dir, write_file};

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_xtoken"))
		.args(args)
		.env("RUST_LOG", "info")
		.env("NO_COLOR", "1")
		.output()
		.expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn path_arg(path: &Path) -> String {
	path.display().to_string()
}

#[test]
fn dump_json_lists_typed_tokens() {
	let fixture = path_arg(&fixture_path("cube.xmodel_export"));
	let json = run_json(&["dump", &fixture, "--json"]);
	let items = json.as_array().expect("dump emits an array");

	assert_eq!(items.len(), canonical_text("cube.xmodel_export").lines().count());
	assert_eq!(items[0]["name"], "//");
	assert_eq!(items[0]["data_type"], "comment");
	assert_eq!(items[2]["name"], "MODEL");
	assert!(items[2]["value"].is_null());

	let numbones = items.iter().find(|item| item["name"] == "NUMBONES").expect("numbones present");
	assert_eq!(numbones["hash"], "0x76BA");
	assert_eq!(numbones["value"], 2);

	let weight = items.iter().find(|item| item["data_type"] == "bone_weight").expect("bone weight present");
	assert_eq!(weight["value"]["bone"], 0);
	assert_eq!(weight["value"]["weight"], 1.0);
}

#[test]
fn dump_limit_truncates_output() {
	let fixture = path_arg(&fixture_path("wave.xanim_export"));
	let json = run_json(&["dump", &fixture, "--json", "--limit", "3"]);
	let names: Vec<_> = json.as_array().expect("array").iter().map(|item| item["name"].clone()).collect();
	assert_eq!(names, vec!["//", "ANIMATION", "VERSION"]);
}

#[test]
fn convert_then_dump_and_info_on_binary() {
	let dir = scratch_dir();
	let source = copy_fixture(dir.path(), "cube.xmodel_export");
	let out_dir = dir.path().join("bin");

	let output = run(&["convert", &path_arg(&source), "--out-dir", &path_arg(&out_dir), "--jobs", "2"]);
	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
	assert!(String::from_utf8_lossy(&output.stderr).contains("Converted: cube.xmodel_export in"));

	let binary = out_dir.join("cube.xmodel_bin");
	assert!(binary.is_file());

	let dumped = run(&["dump", &path_arg(&binary)]);
	assert!(dumped.status.success());
	assert_eq!(String::from_utf8_lossy(&dumped.stdout), canonical_text("cube.xmodel_export"));

	let info = run_json(&["info", &path_arg(&binary), "--json"]);
	assert_eq!(info["format"]["kind"], "model");
	assert_eq!(info["format"]["encoding"], "binary");
	assert!(info["container"]["uncompressed_size"].as_u64().is_some_and(|size| size > 0));
	assert_eq!(info["token_count"], canonical_text("cube.xmodel_export").lines().count());

	let tokens = info["tokens"].as_array().expect("token counts");
	let vert = tokens.iter().find(|item| item["name"] == "VERT").expect("vert counted");
	assert_eq!(vert["count"], 6);
}

#[test]
fn convert_reports_failures_but_keeps_going() {
	let dir = scratch_dir();
	let good = copy_fixture(dir.path(), "wave.xanim_export");
	let bad = write_file(dir.path(), "bad.xanim_export", "ANIMATION\nVERSION three\n");

	let output = run(&["convert", &path_arg(&bad), &path_arg(&good)]);
	assert_eq!(output.status.code(), Some(1));

	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("Failed to convert bad.xanim_export"), "{stderr}");
	assert!(stderr.contains("Converted: wave.xanim_export in"), "{stderr}");
	assert!(dir.path().join("wave.xanim_bin").is_file());
	assert!(!dir.path().join("bad.xanim_bin").exists());
}

#[test]
fn unknown_extension_fails_cleanly() {
	let dir = scratch_dir();
	let path = write_file(dir.path(), "cube.obj", "v 0 0 0\n");

	let output = run(&["info", &path_arg(&path)]);
	assert_eq!(output.status.code(), Some(1));
	assert!(String::from_utf8_lossy(&output.stderr).contains("unsupported file extension"));
}
