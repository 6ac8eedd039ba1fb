// tests/replay.rs
//
// Runner over snapshot files, as the CLI uses it.

use std::fs;
use std::path::PathBuf;

use wa_capture::params::Params;
use wa_capture::runner;
use wa_capture::store::RecordSink;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("wa_capture_replay_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

const FIRST: &str = r#"
<div class="two">
  <div aria-label="Search results." role="grid">
    <div role="row"><div>Contacts</div></div>
    <div role="row"><img src="a.jpg"><span dir="auto" title="Ann Lee">Ann Lee</span><span data-testid="selectable-text">Available</span></div>
    <div role="row"><span data-icon="default-contact-refreshed"></span><span title="Bob"></span><span data-testid="selectable-text">At the gym</span></div>
    <div role="row"><span data-icon="default-group"></span><img><span title="Family"></span></div>
  </div>
</div>"#;

const SECOND: &str = r#"
<div aria-label="Search results.">
  <div role="row"><img><span title="Bob"></span><span data-testid="selectable-text">Back home</span></div>
  <div role="row"><img><span title="Cleo ~â€¯"></span><span class="_ak8k">Hey there! I am using WhatsApp.</span></div>
</div>"#;

#[test]
fn replays_snapshots_in_order_and_exports() {
    let dir = tmp_dir("run");
    let a = dir.join("a.html");
    let b = dir.join("b.html");
    fs::write(&a, FIRST).unwrap();
    fs::write(&b, SECOND).unwrap();

    let mut params = Params::new();
    params.snapshots = vec![a, b];
    params.app.export.dir = dir.join("out");
    params.app.capture.source = Some("replay".into());

    let summary = runner::run(&params, None).unwrap();
    assert_eq!(summary.captured, 3);
    assert_eq!(summary.history.len(), 4);

    let text = fs::read_to_string(&summary.export).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines, [
        "Phone Number,Name,Description,Source",
        "Ann Lee,Ann Lee,,replay",
        "Bob,Bob,Back home,replay",
        "Cleo,Cleo,,replay",
    ]);
}

#[test]
fn snapshot_without_container_captures_nothing() {
    let mut params = Params::new();
    let mut session = runner::new_session(&params);
    let touched = runner::replay_snapshot(&mut session, "<div>loading…</div>").unwrap();
    assert_eq!(touched, 0);
    assert_eq!(session.sink().count(), 0);

    params.snapshots.clear();
    assert!(runner::run(&params, None).is_err());
}

#[test]
fn missing_snapshot_file_is_an_error() {
    let mut params = Params::new();
    params.snapshots = vec![tmp_dir("missing").join("nope.html")];
    let err = runner::run(&params, None).err().expect("should fail");
    assert!(err.to_string().contains("nope.html"));
}

#[test]
fn maximal_attach_delay_clamps_the_clock() {
    let mut params = Params::new();
    params.app.capture.attach_delay_ms = u64::MAX;
    let mut session = runner::new_session(&params);

    assert_eq!(runner::replay_snapshot(&mut session, FIRST).unwrap(), 4);
    assert_eq!(runner::replay_snapshot(&mut session, SECOND).unwrap(), 2);
    assert_eq!(session.now(), u64::MAX);
    assert_eq!(session.sink().count(), 3);
    assert_eq!(session.sink().get("Bob").unwrap().description.as_deref(), Some("Back home"));
}
