use std::path::PathBuf;

use threadscope::analysis::{analyze_dump, analyze_lock_contention, DumpSummary};
use threadscope::classification::Health;
use threadscope::domain::ThreadNumber;
use threadscope::thread_data::{ThreadDump, ThreadRecord};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn load(name: &str) -> ThreadDump {
    ThreadDump::from_file(fixture(name)).expect("Failed to read fixture")
}

fn find<'a>(threads: &'a [ThreadRecord], name: &str) -> &'a ThreadRecord {
    threads
        .iter()
        .find(|t| t.name() == name)
        .unwrap_or_else(|| panic!("thread {name:?} not parsed"))
}

#[test]
fn test_jdk8_hex_nid_without_cpu() {
    let dump = load("jdk8.txt");
    assert_eq!(dump.len(), 7);

    let blocked = find(&dump.threads, "http-nio-8080-exec-1");
    assert_eq!(blocked.thread_number(), Some(ThreadNumber(12)));
    assert!(blocked.daemon());
    assert_eq!(blocked.native_id_hex(), Some("0x2f0c"));
    assert_eq!(blocked.native_id_decimal().as_deref(), Some("12044"));
    assert_eq!(blocked.vm_thread_id(), Some("0x00007f3cbc2a1800"));
    assert_eq!(blocked.state(), "BLOCKED");
    assert_eq!(blocked.state_detail(), "(on object monitor)");
    assert_eq!(blocked.lock_info(), "waiting on <0x00000000c5a1b2c8> (a java.lang.Object)");
    assert_eq!(blocked.health(), Health::Blocked);

    // JDK 8 prints no cpu= / elapsed=
    assert!(blocked.cpu_ms().is_none());
    assert!(blocked.elapsed_ms().is_none());
    assert!(blocked.cpu_percent().is_none());

    let runnable = find(&dump.threads, "http-nio-8080-exec-2");
    assert_eq!(runnable.health(), Health::Active);
    assert_eq!(runnable.lock_info(), "locked <0x00000000c5a1b2c8> (a java.lang.Object)");
}

#[test]
fn test_jdk8_parking_and_internal_threads() {
    let dump = load("jdk8.txt");

    let parked = find(&dump.threads, "pool-1-thread-1");
    assert!(!parked.daemon());
    assert_eq!(parked.health(), Health::Idle);
    assert!(parked.lock_info().starts_with("parking for <0x00000000c5b0e7a0>"));

    let vm = find(&dump.threads, "VM Thread");
    assert_eq!(vm.state(), "UNKNOWN");
    assert_eq!(vm.stack_trace(), "");
    assert!(vm.thread_number().is_none());
    assert!(vm.priority().is_none());
    assert_eq!(vm.os_priority(), Some(0));

    let main = find(&dump.threads, "main");
    assert_eq!(
        main.stack_trace(),
        "at java.lang.Thread.sleep(Native Method)\n\tat com.example.Main.main(Main.java:22)"
    );
}

#[test]
fn test_jni_trailer_is_not_part_of_last_stack() {
    let dump = load("jdk8.txt");
    let last = dump.threads.last().unwrap();
    assert_eq!(last.name(), "GC task thread#0 (ParallelGC)");
    assert!(!last.stack_trace().contains("JNI"));
}

#[test]
fn test_jdk17_seconds_elapsed_and_cpu_percent() {
    let dump = load("jdk17.txt");
    assert_eq!(dump.len(), 8);

    let hot = find(&dump.threads, "order-processor-1");
    assert_eq!(hot.cpu_ms(), Some(2_700_000.0));
    assert_eq!(hot.elapsed_ms(), Some(3_000_000.0));
    assert!((hot.cpu_percent().unwrap() - 90.0).abs() < 1e-9);
    assert_eq!(hot.health(), Health::Hot);
    assert_eq!(hot.native_id_decimal().as_deref(), Some("7232"));

    let compiler = find(&dump.threads, "C2 CompilerThread0");
    assert_eq!(compiler.health(), Health::Active);
    assert_eq!(compiler.stack_trace(), "No compile task");

    let periodic = find(&dump.threads, "VM Periodic Task Thread");
    assert_eq!(periodic.state(), "UNKNOWN");
    assert_eq!(periodic.health(), Health::Idle);
    assert!(periodic.cpu_percent().is_some());
}

#[test]
fn test_jdk17_sorted_by_cpu() {
    let content = std::fs::read_to_string(fixture("jdk17.txt")).unwrap();
    let threads = analyze_dump(&content).unwrap();
    let names: Vec<&str> = threads.iter().map(ThreadRecord::name).collect();

    assert_eq!(
        names,
        vec![
            "order-processor-1",
            "C2 CompilerThread0",
            "main",
            "VM Periodic Task Thread",
            "order-processor-2",
            "order-processor-3",
            "VM Thread",
            "Reference Handler",
        ]
    );
    assert_eq!(load("jdk17.txt").sorted_by_cpu(), threads);
}

#[test]
fn test_jdk21_decimal_nid_and_bracket_fallback() {
    let dump = load("jdk21.txt");
    assert_eq!(dump.len(), 5);

    let main = find(&dump.threads, "main");
    assert_eq!(main.native_id_decimal().as_deref(), Some("48211"));
    assert_eq!(main.native_id_hex(), Some("0xbc53"));

    // No nid= on this line; the [N] after #37 is used
    let attach = find(&dump.threads, "Attach Listener");
    assert_eq!(attach.native_id_decimal().as_deref(), Some("48301"));
    assert_eq!(attach.native_id_hex(), Some("0xbcad"));

    let worker = find(&dump.threads, "ForkJoinPool-1-worker-1");
    assert_eq!(worker.health(), Health::Hot);
    assert_eq!(worker.elapsed_ms(), Some(120_000.0));

    let service = find(&dump.threads, "G1 Service");
    assert_eq!(service.native_id_hex(), Some("0xbc5b"));
}

#[test]
fn test_deadlock_section_ends_stack() {
    let dump = load("deadlock.txt");
    let names: Vec<&str> = dump.threads.iter().map(ThreadRecord::name).collect();
    // The quoted name in the deadlock report starts a record of its own
    assert_eq!(names, vec!["Thread-0", "Thread-1", "Thread-0"]);

    let second = &dump.threads[1];
    assert!(second.stack_trace().ends_with("at java.lang.Thread.run(java.base@11.0.22/Thread.java:829)"));
    assert!(!second.stack_trace().contains("Found"));
    assert_eq!(
        second.lock_info(),
        "waiting on <0x0000000089a4f1a8> (a java.lang.Object); locked <0x0000000089a4f1b8> (a java.lang.Object)"
    );

    let report_entry = &dump.threads[2];
    assert_eq!(report_entry.state(), "UNKNOWN");
    assert!(report_entry.locks().is_empty());
}

#[test]
fn test_deadlock_contention() {
    let dump = load("deadlock.txt");
    let contended = analyze_lock_contention(&dump.threads);

    assert_eq!(contended.len(), 2);
    assert_eq!(contended[0].identity, "0x0000000089a4f1b8");
    assert_eq!(contended[0].owners, vec!["Thread-1"]);
    assert_eq!(contended[0].waiters, vec!["Thread-0"]);
    assert_eq!(contended[1].identity, "0x0000000089a4f1a8");
    assert_eq!(contended[1].owners, vec!["Thread-0"]);
}

#[test]
fn test_summary_counts() {
    let dump = load("jdk17.txt");
    let summary = DumpSummary::from_threads(&dump.threads);

    assert_eq!(summary.total, 8);
    assert_eq!(summary.runnable, 4);
    assert_eq!(summary.waiting, 1);
    assert_eq!(summary.timed_waiting, 1);
    assert_eq!(summary.daemon, 2);
    assert_eq!(summary.count(Health::Hot), 1);
    assert_eq!(summary.count(Health::Idle), 4);
}

#[test]
fn test_reparse_is_identical() {
    for name in ["jdk8.txt", "jdk17.txt", "jdk21.txt", "deadlock.txt"] {
        assert_eq!(load(name).threads, load(name).threads, "{name}");
    }
}

#[test]
fn test_crlf_dump_matches_lf() {
    let content = std::fs::read_to_string(fixture("jdk17.txt")).unwrap();
    let crlf = content.replace('\n', "\r\n");
    assert_eq!(ThreadDump::parse(&crlf).threads, ThreadDump::parse(&content).threads);
}
