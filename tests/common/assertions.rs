use ffbatch::engine::worker::WorkerMessage;

/// Assert that a job's progress values never go down and stay within [0, 100]
pub fn assert_progress_monotonic(messages: &[WorkerMessage]) {
    let progress = progress_values(messages);
    assert!(!progress.is_empty(), "Expected at least one progress message");
    for pair in progress.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "Progress went backwards: {:?}",
            progress
        );
    }
    assert!(
        progress.iter().all(|p| *p <= 100),
        "Progress out of range: {:?}",
        progress
    );
}

/// Assert that exactly one completion message was sent and it came last
pub fn assert_finished_last(messages: &[WorkerMessage]) {
    let finished = messages
        .iter()
        .filter(|m| matches!(m, WorkerMessage::Finished { .. }))
        .count();
    assert_eq!(finished, 1, "Expected exactly one Finished message");
    assert!(
        matches!(messages.last(), Some(WorkerMessage::Finished { .. })),
        "Finished must be the last message, got {:?}",
        messages.last()
    );
}

pub fn progress_values(messages: &[WorkerMessage]) -> Vec<u8> {
    messages
        .iter()
        .filter_map(|m| match m {
            WorkerMessage::Progress { percent, .. } => Some(*percent),
            _ => None,
        })
        .collect()
}

pub fn log_lines(messages: &[WorkerMessage]) -> Vec<String> {
    messages
        .iter()
        .filter_map(|m| match m {
            WorkerMessage::Log { line, .. } => Some(line.clone()),
            _ => None,
        })
        .collect()
}

/// Assert that some log line contains `needle`
pub fn assert_log_contains(messages: &[WorkerMessage], needle: &str) {
    let lines = log_lines(messages);
    assert!(
        lines.iter().any(|l| l.contains(needle)),
        "Expected a log line containing '{}'.\nLog:\n{}",
        needle,
        lines.join("\n")
    );
}
