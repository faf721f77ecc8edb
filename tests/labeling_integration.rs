//! Integration tests for inbox labeling.
//!
//! These tests drive the labeler end to end through both mailbox backends.
//! Each module contains its own unit tests for detailed logic testing.

use pretty_assertions::assert_eq;
use sublabel::config::{LabelingSettings, Settings, TrustedDomains};
use sublabel::domain::{decode, extract_address, get_subroute, parse_address, Message, ThreadId};
use sublabel::providers::{LabelStore, MailThread, Mailbox, StoreError};
use sublabel::services::{LabelResolver, ThreadOutcome};
use sublabel::storage::{InMemoryMailbox, SqliteMailbox};
use sublabel::ThreadLabeler;

fn labeler() -> ThreadLabeler {
    ThreadLabeler::new(LabelingSettings::default())
}

fn label_names<T: MailThread>(thread: &T) -> Vec<String> {
    thread
        .current_labels()
        .unwrap()
        .into_iter()
        .map(|l| l.name)
        .collect()
}

// ============================================================================
// Decoding Pipeline Tests
// ============================================================================

#[test]
fn recipient_decodes_to_label_paths() {
    let recipient = extract_address("\"Jonathan\" <jonathan+abc.def+foo_bar@example.com>");
    assert_eq!(recipient, "jonathan+abc.def+foo_bar@example.com");

    let subroute = get_subroute(recipient);
    assert_eq!(subroute.as_str(), "abc.def+foo_bar");

    let paths: Vec<String> = decode(&subroute).iter().map(|p| p.to_string()).collect();
    assert_eq!(paths, vec!["Abc/Def", "Foo Bar"]);
}

#[test]
fn address_parts() {
    let parts = parse_address("a@b@c.com");
    assert_eq!(parts.local_part, "a@b");
    assert_eq!(parts.domain, "c.com");
}

// ============================================================================
// In-Memory Mailbox Tests
// ============================================================================

#[test]
fn end_to_end_trusted_sender() {
    let mailbox = InMemoryMailbox::new();
    mailbox
        .insert_thread(
            "t1",
            vec![Message::new(
                "\"J\" <j@bswck.dev>",
                "casino.omega+inquiries@gmail.com",
                "Inquiry",
            )],
        )
        .unwrap();

    let report = labeler().run(&mailbox).unwrap();

    assert!(report.is_success());
    assert_eq!(report.applied.len(), 1);
    assert_eq!(report.applied[0].sender, "j@bswck.dev");
    assert_eq!(report.applied[0].subject, "Inquiry");
    assert!(mailbox.find_label_by_name("Inquiries").unwrap().is_some());

    let thread = mailbox.thread(&ThreadId::from("t1")).unwrap();
    assert_eq!(label_names(&thread), vec!["Inquiries"]);
}

#[test]
fn untrusted_sender_never_creates_labels() {
    let mailbox = InMemoryMailbox::from_json(
        r#"{
            "labels": ["Foo Bar"],
            "threads": [{
                "id": "t1",
                "messages": [{"from": "x@untrusted.org", "to": "me+abc.def+foo_bar@gmail.com"}]
            }]
        }"#,
    )
    .unwrap();

    labeler().run(&mailbox).unwrap();

    let names: Vec<String> = mailbox.labels().unwrap().into_iter().map(|l| l.name).collect();
    assert_eq!(names, vec!["Foo Bar"]);

    let thread = mailbox.thread(&ThreadId::from("t1")).unwrap();
    assert_eq!(label_names(&thread), vec!["Foo Bar"]);
}

#[test]
fn present_labels_are_excluded_from_report() {
    let mailbox = InMemoryMailbox::from_json(
        r#"{
            "threads": [{
                "id": "t1",
                "labels": ["Foo Bar"],
                "messages": [
                    {"from": "j@bswck.dev", "to": "me+foo_bar+biz@gmail.com", "subject": "S"}
                ]
            }]
        }"#,
    )
    .unwrap();

    let report = labeler().run(&mailbox).unwrap();

    let added: Vec<&str> = report.applied[0]
        .labels
        .iter()
        .map(|l| l.name.as_str())
        .collect();
    assert_eq!(added, vec!["Biz"]);
}

#[test]
fn only_first_message_decides() {
    let mailbox = InMemoryMailbox::new();
    mailbox
        .insert_thread(
            "t1",
            vec![
                Message::new("", "me+first@gmail.com", "First"),
                Message::new("j@bswck.dev", "me+second@gmail.com", "Second"),
            ],
        )
        .unwrap();

    let report = labeler().run(&mailbox).unwrap();

    assert_eq!(report.threads_examined, 1);
    assert!(report.applied.is_empty());
    assert!(mailbox.labels().unwrap().is_empty());
}

#[test]
fn failing_thread_does_not_stop_batch() {
    let mailbox = InMemoryMailbox::new();
    for id in ["t1", "t2", "t3"] {
        mailbox
            .insert_thread(id, vec![Message::new("j@bswck.dev", "me+ok@gmail.com", id)])
            .unwrap();
    }
    mailbox.fail_thread("t2").unwrap();

    let report = labeler().run(&mailbox).unwrap();

    assert_eq!(report.threads_examined, 3);
    assert_eq!(report.applied.len(), 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].thread_id, ThreadId::from("t2"));
    assert!(matches!(report.failures[0].error, StoreError::Unavailable(_)));
}

#[test]
fn second_run_is_a_no_op() {
    let mailbox = InMemoryMailbox::new();
    mailbox
        .insert_thread("t1", vec![Message::new("j@bswck.dev", "me+a.b@gmail.com", "")])
        .unwrap();

    let first = labeler().run(&mailbox).unwrap();
    let second = labeler().run(&mailbox).unwrap();

    assert_eq!(first.labels_applied(), 1);
    assert_eq!(second.labels_applied(), 0);
    assert_eq!(mailbox.labels().unwrap().len(), 1);
}

#[test]
fn archived_threads_are_not_labeled() {
    let mailbox = InMemoryMailbox::new();
    mailbox
        .insert_thread("t1", vec![Message::new("j@bswck.dev", "me+a@gmail.com", "")])
        .unwrap();
    mailbox.archive(&ThreadId::from("t1")).unwrap();

    let report = labeler().run(&mailbox).unwrap();
    assert_eq!(report.threads_examined, 0);
}

#[test]
fn custom_trust_list_replaces_default() {
    let mailbox = InMemoryMailbox::new();
    mailbox
        .insert_thread("t1", vec![Message::new("j@bswck.dev", "me+a@gmail.com", "")])
        .unwrap();
    mailbox
        .insert_thread("t2", vec![Message::new("ops@corp.example", "me+b@gmail.com", "")])
        .unwrap();

    let labeler = ThreadLabeler::with_trusted_domains(TrustedDomains::new(["corp.example"]));
    labeler.run(&mailbox).unwrap();

    let names: Vec<String> = mailbox.labels().unwrap().into_iter().map(|l| l.name).collect();
    assert_eq!(names, vec!["B"]);
}

#[test]
fn dry_run_leaves_store_unchanged() {
    let mailbox = InMemoryMailbox::from_json(
        r#"{
            "labels": ["Known"],
            "threads": [{
                "id": "t1",
                "messages": [{"from": "j@bswck.dev", "to": "me+known+brand_new@gmail.com"}]
            }]
        }"#,
    )
    .unwrap();
    let before = mailbox.snapshot().unwrap();

    let labeler = ThreadLabeler::new(LabelingSettings {
        dry_run: true,
        ..LabelingSettings::default()
    });
    let report = labeler.run(&mailbox).unwrap();

    assert_eq!(report.applied[0].names(), vec!["Known", "Brand New"]);
    let after = mailbox.snapshot().unwrap();
    assert_eq!(after.labels, before.labels);
    assert!(after.threads[0].labels.is_empty());
}

#[test]
fn resolver_is_idempotent_against_store() {
    let mailbox = InMemoryMailbox::new();
    let resolver = LabelResolver::new(&mailbox);
    let paths = decode(&get_subroute("me+news@gmail.com"));

    let first = resolver.resolve_all(&paths, true).unwrap();
    let second = resolver.resolve_all(&paths, true).unwrap();

    assert_eq!(first[0].id, second[0].id);
    assert_eq!(mailbox.labels().unwrap().len(), 1);
}

#[test]
fn snapshot_file_keeps_labels_between_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inbox.json");
    std::fs::write(
        &path,
        r#"{
            "threads": [{
                "id": "t1",
                "messages": [{"from": "j@bswck.dev", "to": "me+news@gmail.com"}]
            }]
        }"#,
    )
    .unwrap();

    let mailbox = InMemoryMailbox::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    labeler().run(&mailbox).unwrap();
    std::fs::write(&path, mailbox.to_json().unwrap()).unwrap();

    let reloaded = InMemoryMailbox::from_json(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let report = labeler().run(&reloaded).unwrap();

    assert_eq!(report.labels_applied(), 0);
    let thread = reloaded.thread(&ThreadId::from("t1")).unwrap();
    assert_eq!(label_names(&thread), vec!["News"]);
}

// ============================================================================
// SQLite Mailbox Tests
// ============================================================================

#[test]
fn sqlite_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mailbox.db");

    {
        let mailbox = SqliteMailbox::open(&path).unwrap();
        mailbox
            .insert_thread(
                &ThreadId::from("t1"),
                &[Message::new(
                    "\"J\" <j@bswck.dev>",
                    "jonathan+abc.def+foo_bar@example.com",
                    "Hello",
                )],
            )
            .unwrap();
        mailbox
            .insert_thread(
                &ThreadId::from("t2"),
                &[Message::new("stranger@x.org", "jonathan+abc.def@example.com", "")],
            )
            .unwrap();

        let report = labeler().run(&mailbox).unwrap();
        assert_eq!(report.applied.len(), 2);
        assert_eq!(report.labels_applied(), 3);
    }

    let mailbox = SqliteMailbox::open(&path).unwrap();
    let threads = mailbox.inbox_threads().unwrap();
    assert_eq!(label_names(&threads[0]), vec!["Abc/Def", "Foo Bar"]);
    assert_eq!(label_names(&threads[1]), vec!["Abc/Def"]);

    let all: Vec<String> = mailbox.labels().unwrap().into_iter().map(|l| l.name).collect();
    assert_eq!(all, vec!["Abc/Def", "Foo Bar"]);
}

#[test]
fn sqlite_dry_run_leaves_threads_untouched() {
    let mailbox = SqliteMailbox::open_in_memory().unwrap();
    mailbox
        .insert_thread(
            &ThreadId::from("t1"),
            &[Message::new("j@bswck.dev", "me+later@gmail.com", "")],
        )
        .unwrap();

    let labeler = ThreadLabeler::new(LabelingSettings {
        dry_run: true,
        ..LabelingSettings::default()
    });
    let report = labeler.run(&mailbox).unwrap();

    assert_eq!(report.applied.len(), 1);
    assert_eq!(report.applied[0].pending, vec!["Later"]);
    assert_eq!(report.labels_applied(), 1);
    assert!(mailbox.labels().unwrap().is_empty());
    let thread = mailbox.thread(&ThreadId::from("t1")).unwrap();
    assert!(label_names(&thread).is_empty());
}

#[test]
fn sqlite_single_thread_outcome() {
    let mailbox = SqliteMailbox::open_in_memory().unwrap();
    mailbox.insert_thread(&ThreadId::from("t1"), &[]).unwrap();
    let thread = mailbox.thread(&ThreadId::from("t1")).unwrap();

    let outcome = labeler().label_thread(&mailbox, &thread).unwrap();
    assert!(matches!(outcome, ThreadOutcome::NoMessages));
}

// ============================================================================
// Settings Tests
// ============================================================================

#[test]
fn settings_file_drives_labeler() {
    let dir = tempfile::tempdir().unwrap();
    let settings_path = dir.path().join("settings.json");
    std::fs::write(
        &settings_path,
        r#"{"labeling": {"trusted_domains": ["example.org"]}}"#,
    )
    .unwrap();

    let settings = Settings::load(&settings_path).unwrap();
    let labeler = ThreadLabeler::new(settings.labeling);

    assert!(labeler.is_trusted_sender("someone@example.org"));
    assert!(!labeler.is_trusted_sender("j@bswck.dev"));
}
