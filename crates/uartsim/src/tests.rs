use uartsim_harness::{Exchange, Script};
use uartsim_uart::{ConfigError, UartConfig};

use crate::device::{AGREED, EXIT_AGREED, EXIT_REFUSED, PROMPT, REFUSED};
use crate::{run, run_script, RunOptions};

/// Eight ticks per bit keeps the runs short.
fn fast() -> RunOptions {
    RunOptions::builder()
        .uart(UartConfig::builder().clock_hz(8 * 115_200).build())
        .build()
}

#[test]
fn default_run_completes_within_budget() {
    let outcome = run(RunOptions::default()).unwrap();

    assert!(outcome.report.completed, "{:?}", outcome.report);
    assert_eq!(outcome.rc(), 0);
    assert_eq!(outcome.exit_code, Some(EXIT_AGREED));
    assert_eq!(outcome.report.frame_errors, 0);
    assert!(outcome.report.cycles < 60_000);
    assert_eq!(outcome.report.transcript, [PROMPT, AGREED].concat());
}

#[test]
fn refusal_is_answered() {
    let script = Script::new(vec![
        Exchange::new(PROMPT).reply("xN"),
        Exchange::new(REFUSED),
    ]);
    let outcome = run_script(fast(), script).unwrap();

    assert!(outcome.report.completed);
    assert_eq!(outcome.exit_code, Some(EXIT_REFUSED));
}

#[test]
fn enter_counts_as_agreement() {
    let script = Script::new(vec![Exchange::new(PROMPT).reply("\r"), Exchange::new(AGREED)]);
    let outcome = run_script(fast(), script).unwrap();

    assert!(outcome.report.completed);
    assert_eq!(outcome.exit_code, Some(EXIT_AGREED));
}

#[test]
fn unanswered_prompt_times_out() {
    let script = Script::new(vec![Exchange::new(PROMPT), Exchange::new(AGREED)]);
    let options = RunOptions {
        max_cycles: 5_000,
        ..fast()
    };
    let outcome = run_script(options, script).unwrap();

    assert!(!outcome.report.completed);
    assert_eq!(outcome.rc(), 1);
    assert_eq!(outcome.exit_code, None);
    assert_eq!(outcome.report.transcript, PROMPT);
}

#[test]
fn bad_baud_is_reported() {
    let options = RunOptions::builder()
        .uart(UartConfig::builder().baud(0).build())
        .build();
    let err = run(options).unwrap_err();
    assert_eq!(err.downcast_ref::<ConfigError>(), Some(&ConfigError::ZeroBaud));
}

#[test]
fn vcd_is_written_when_requested() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prompt.vcd");
    let options = RunOptions {
        vcd: Some(path.clone()),
        ..fast()
    };
    let outcome = run(options).unwrap();

    assert!(outcome.report.completed);
    let text = std::fs::read_to_string(path).unwrap();
    assert!(text.contains("$enddefinitions $end"));
    assert!(text.lines().filter(|l| l.starts_with('#')).count() > 100);
}
