// tests/export.rs
//
// Export path/format handling and the download action, without a session.

use std::fs;
use std::path::PathBuf;

use wa_capture::s;
use wa_capture::config::options::{ExportFormat, ExportOptions};
use wa_capture::file::write_export;
use wa_capture::store::{CapturedProfile, MemberStore, RecordSink};
use wa_capture::ui::actions;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("wa_capture_{}", name));
    let _ = fs::remove_dir_all(&p);
    p
}

fn store_with(people: &[(&str, Option<&str>)]) -> MemberStore {
    let mut store = MemberStore::new("export-test");
    for (name, desc) in people {
        let p = CapturedProfile {
            profile_id: s!(*name),
            name: Some(s!(*name)),
            description: desc.map(String::from),
            phone_number: Some(s!(*name)),
            source: None,
        };
        store.upsert(name, p, None, true);
    }
    store
}

#[test]
fn csv_export_writes_header_then_quoted_rows() {
    let dir = tmp_dir("csv");
    let export = ExportOptions { dir: dir.clone(), ..ExportOptions::default() };
    let store = store_with(&[("Doe, Jane", Some("On a call")), ("Bob", None)]);

    let path = write_export(&export, &store.to_csv_data(), "2026-10-17T08:30:00.000Z").unwrap();
    assert_eq!(path, dir.join("whatsAppExport-2026-10-17T08-30-00.000Z.csv"));

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Phone Number,Name,Description,Source");
    assert_eq!(lines[1], r#""Doe, Jane","Doe, Jane",On a call,"#);
    assert_eq!(lines[2], "Bob,Bob,,");
}

#[test]
fn tsv_without_headers() {
    let dir = tmp_dir("tsv");
    let export = ExportOptions {
        dir: dir.clone(),
        format: ExportFormat::Tsv,
        include_headers: false,
        stem: s!("contacts"),
    };
    let store = store_with(&[("Ann", Some("Gym"))]);

    let path = write_export(&export, &store.to_csv_data(), "t").unwrap();
    assert!(path.to_string_lossy().ends_with("contacts-t.tsv"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "Ann\tAnn\tGym\t\n");
}

#[test]
fn download_action_writes_a_file() {
    let dir = tmp_dir("download");
    let export = ExportOptions { dir: dir.clone(), ..ExportOptions::default() };
    let store = store_with(&[("Ann", None)]);

    let path = actions::download(&store, &export).expect("export written");
    assert!(path.starts_with(&dir));
    assert!(fs::read_to_string(path).unwrap().contains("Ann,Ann,,"));
}

#[test]
fn download_failure_is_swallowed() {
    // A regular file where the export directory should be
    let blocker = tmp_dir("blocked");
    let _ = fs::remove_file(&blocker);
    fs::write(&blocker, "not a dir").unwrap();

    let export = ExportOptions { dir: blocker.clone(), ..ExportOptions::default() };
    let store = store_with(&[("Ann", None)]);
    assert!(actions::download(&store, &export).is_none());

    let _ = fs::remove_file(&blocker);
}
